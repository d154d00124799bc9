//! Tunable policy for the limb detector.
//!
//! Every constant the detector relies on lives here, with defaults tuned for
//! 16-bit totality exposures. A configuration can be loaded from JSON; any
//! field left out keeps its default.
//!
//! ```rust
//! use eclipse_stack::limb::LimbDetectorConfig;
//!
//! let config = LimbDetectorConfig::default();
//! assert_eq!(config.threshold_for(0x0100), 0x1000); // normal frame
//! assert_eq!(config.threshold_for(0x0010), 0x0040); // very dark frame
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image_proc::LuminanceBand;

/// Errors from loading a detector configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimbDetectorConfig {
    /// Red-channel values admitted into the luminance centroid (exclusive)
    pub luminance_band: LuminanceBand,

    /// Gray value above which a pixel is outside the limb
    pub default_threshold: u16,

    /// Replacement threshold for frames whose brightness sample is very dim.
    /// Keeps the fill from leaking through a faint corona.
    pub dark_threshold: u16,

    /// Brightness samples below this switch to `dark_threshold`
    pub dark_brightness_cutoff: u16,

    /// Half width of the horizontal brightness window around the centroid.
    /// The window covers `[x - n, x + n)`.
    pub brightness_half_window: u16,

    /// Largest image (in pixels) the visited grid may be sized for
    pub max_pixels: usize,
}

impl Default for LimbDetectorConfig {
    fn default() -> Self {
        Self {
            luminance_band: LuminanceBand::default(),
            default_threshold: 0x1000,
            dark_threshold: 0x0040,
            dark_brightness_cutoff: 0x0015,
            brightness_half_window: 5,
            max_pixels: 10_000 * 10_000,
        }
    }
}

impl LimbDetectorConfig {
    /// Fill threshold to use for a frame with the given brightness sample.
    pub fn threshold_for(&self, brightness: u16) -> u16 {
        if brightness < self.dark_brightness_cutoff {
            self.dark_threshold
        } else {
            self.default_threshold
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
