//! Image processing primitives for eclipse frames
//!
//! Geometry, luminance, pixel access and the visited-pixel grid used by the
//! limb detector.

pub mod geometry;
pub mod image;
pub mod luminance;
pub mod visited;

pub use self::image::{Offset, PixelSource};
pub use geometry::{Point, Rectangle};
pub use luminance::{to_gray, LuminanceBand, LUMA_WEIGHTS};
pub use visited::VisitedGrid;
