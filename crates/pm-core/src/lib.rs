//! Foundational primitives for contour morphometrics.
//!
//! ## Contours
//! A contour is an ordered sequence of integer pixel coordinates describing a
//! closed outline. The sequence is circular: the point after the last one is
//! the first one. Index arithmetic over contours lives in [`circular`] and
//! treats indices as elements of Z/nZ.
//!
//! ## Masks
//! Masks are single-channel `u8` rasters stored row-major without padding.
//! Pixels outside the raster read as `None`, never as background.
//!
//! ## Coordinates
//! Integer coordinates refer to pixel centers. `x` grows to the right and `y`
//! grows downward, matching raster row order.

pub mod circular;
mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::{Point2f, Point2i, Vec2f};
pub use image::{Image, ImageView, MaskView};
