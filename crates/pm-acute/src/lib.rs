//! Acute-angle pseudo-landmark detection on closed object contours.
//!
//! Pipeline:
//! - Score every contour vertex with the angle between its farthest backward
//!   and forward neighbours inside a chordal window (`win`).
//! - Group vertices scoring at or below the threshold into islands, bridging
//!   gaps shorter than `win / 2`. The scan is circular, so a cluster across
//!   the `n - 1 -> 0` seam stays one island.
//! - Reduce each island of three or more vertices to the member farthest from
//!   the island's endpoints; optionally sample a mask inside the island hull.
//!
//! Contours are ordered integer pixel loops; the sequence is circular and no
//! point is repeated at the end. A contour shorter than
//! [`AcuteParams::min_contour_len`] is rejected with
//! [`Error::InsufficientContour`](pm_core::Error::InsufficientContour).
//!
//! Landmarks found this way can be moved into a size-invariant frame with
//! [`scale_landmarks`].

mod chain;
mod debug;
mod detect;
mod island;
mod landmark;
mod params;
mod scale;

pub use chain::{AngleChain, angle_at, build_angle_chain};
pub use debug::{DebugContext, DebugMode, StageTiming};
pub use detect::{AcuteResult, find_acute_landmarks, find_acute_landmarks_batch};
pub use island::{Island, extract_islands};
pub use landmark::{Curvature, DistanceRecord, Landmark, select_landmarks};
pub use params::{AcuteParams, MIN_LANDMARK_ISLAND, min_contour_len};
pub use scale::{ScaledFeatures, scale_landmarks};
