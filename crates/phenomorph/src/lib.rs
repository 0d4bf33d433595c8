//! Umbrella crate for the `phenomorph` workspace.
//!
//! This crate re-exports the contour primitives and the acute-angle landmark
//! detector.

pub use pm_acute::*;
pub use pm_core::*;
