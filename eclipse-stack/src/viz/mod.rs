//! Diagnostic overlays for limb detection.
//!
//! The detector reports its progress to a [`LimbPlotter`] handed in by the
//! caller. Nothing here affects the detection result; plotters exist so a
//! human can check where the fill went.

pub mod composite;

use thiserror::Error;

use crate::image_proc::{Point, Rectangle};

pub use composite::DebugComposite;

/// Errors from rendering or persisting an overlay.
#[derive(Debug, Error)]
pub enum VizError {
    /// No frame was ever started, so there is no canvas to write.
    #[error("overlay has no frames")]
    NoFrames,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VizError>;

/// Receives the detector's progress for one frame at a time.
pub trait LimbPlotter {
    /// A new frame with pixel `bounds` is starting; `center` is the fill seed.
    fn start_frame(&mut self, bounds: Rectangle, center: Point);

    /// `p` was accepted as part of the limb.
    fn plot(&mut self, p: Point);

    /// Final bounds of the limb for the current frame.
    fn plot_rectangle(&mut self, r: Rectangle);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlotter;

impl LimbPlotter for NullPlotter {
    fn start_frame(&mut self, _bounds: Rectangle, _center: Point) {}

    fn plot(&mut self, _p: Point) {}

    fn plot_rectangle(&mut self, _r: Rectangle) {}
}
