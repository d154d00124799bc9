//! Lunar limb detection for aligning solar eclipse photographs.
//!
//! The moon drifts against the corona between exposures, so the only stable
//! anchor in an eclipse sequence is the dark lunar disk itself. This crate
//! finds that disk in a single frame:
//!
//! 1. A luminance centroid of the corona pixels seeds the search.
//! 2. A breadth-first flood fill grows outward from the seed through every
//!    4-connected pixel that stays at or below an adaptive gray threshold.
//! 3. The bounding rectangle of the accepted pixels yields the limb's
//!    center and radius.
//!
//! The resulting [`LunarLimb`] feeds the transform algebra in `eclipse-math`
//! that registers one frame against another.
//!
//! Decoding images, writing outputs and orchestrating a whole stack belong to
//! the caller; the [`viz`] module only offers an optional diagnostic overlay.

pub mod image_proc;
pub mod limb;
pub mod viz;

pub use image_proc::{Point, PixelSource, Rectangle};
pub use limb::{LimbDetector, LimbDetectorConfig, LimbError, LunarLimb};
