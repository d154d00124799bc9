//! Scalar brightness of 16-bit RGB pixels.

use serde::{Deserialize, Serialize};

/// Rec. 601 luma weights for R, G and B.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Perceptual gray value of a 16-bit RGB pixel, clamped to `u16::MAX`.
///
/// The fractional part is truncated.
pub fn to_gray(rgb: [u16; 3]) -> u16 {
    let gray = rgb
        .iter()
        .zip(LUMA_WEIGHTS.iter())
        .map(|(&c, &w)| c as f64 * w)
        .sum::<f64>();
    gray.min(u16::MAX as f64) as u16
}

/// Open interval of channel values admitted into the luminance centroid.
///
/// Values at or below `low` are treated as sensor noise, values at or above
/// `high` as saturated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuminanceBand {
    pub low: u16,
    pub high: u16,
}

impl LuminanceBand {
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// True when `low < value < high`.
    pub fn admits(&self, value: u16) -> bool {
        value > self.low && value < self.high
    }
}

impl Default for LuminanceBand {
    fn default() -> Self {
        Self::new(0x0300, 0xfff0)
    }
}
