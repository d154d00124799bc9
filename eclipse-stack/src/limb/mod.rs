//! Lunar limb detection.
//!
//! See [`LimbDetector`] for the algorithm and [`LimbDetectorConfig`] for the
//! tunable policy (luminance band, fill thresholds, grid ceiling).

mod config;
mod detector;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image_proc::{Point, Rectangle};

pub use config::{ConfigError, LimbDetectorConfig};
pub use detector::{brightness_sample, luminal_centroid, Centroid, LimbDetector};

/// Errors that can occur while locating a lunar limb
#[derive(Error, Debug)]
pub enum LimbError {
    #[error("no pixel fell inside the luminance band; centroid is undefined")]
    DegenerateCentroid,

    #[error("could not locate lunar limb from seed {seed} with threshold 0x{threshold:04x}")]
    LimbNotFound { seed: Point, threshold: u16 },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("image {width}x{height} exceeds the {max_pixels} pixel ceiling")]
    ImageTooLarge {
        width: u64,
        height: u64,
        max_pixels: usize,
    },
}

/// The dark silhouette of the moon in one frame.
///
/// Produced once per image by [`LimbDetector::detect`] and then only read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarLimb {
    /// Seed of the flood fill: the centroid of in-band luminance.
    /// Not necessarily the geometric center of the limb.
    pub luminal_center: Point,
    /// Average gray value sampled around the seed.
    pub brightness: u16,
    /// Gray threshold the fill used; brighter pixels are outside the limb.
    pub threshold: u16,
    /// Bounding rectangle of every accepted pixel.
    pub bounds: Rectangle,
    /// Number of pixels the fill accepted.
    pub accepted: usize,
}

impl LunarLimb {
    /// Circle radius approximating the bounds: `(dx + dy) / 4`.
    pub fn radius(&self) -> i64 {
        (self.bounds.dx() + self.bounds.dy()) / 4
    }

    /// Midpoint of the bounds.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

impl fmt::Display for LunarLimb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Lunar limb center:{}, lunar radius: {} (brightness: 0x{:04x})",
            self.center(),
            self.radius(),
            self.brightness
        )
    }
}
