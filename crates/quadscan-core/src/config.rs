// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection configuration.

use serde::{Deserialize, Serialize};

use crate::error::{QuadScanError, Result};
use crate::types::LengthBounds;

/// Default half-width of the background color band, per channel.
///
/// Wide enough to absorb sensor noise and mild shading on a uniform
/// background, narrow enough that white paper on a dark table (or the
/// reverse) still falls outside it.
pub const DEFAULT_COLOR_TOLERANCE: u8 = 25;

/// Largest usable tolerance. At 127 the band is 254 wide; anything larger
/// would cover the whole channel and leave nothing to detect.
pub const MAX_COLOR_TOLERANCE: u8 = 127;

/// Smallest accepted contour perimeter, as a fraction of the image perimeter.
/// Shorter outlines are sensor noise, text glyphs, or stains.
pub const DEFAULT_LENGTH_RATIO_MIN: f64 = 0.10;

/// Largest accepted contour perimeter, as a fraction of the image perimeter.
/// Longer outlines hug the frame border and are background bleed.
pub const DEFAULT_LENGTH_RATIO_MAX: f64 = 0.70;

/// Allowed deviation from 1.0 of the squared-length ratio between opposite
/// sides. Squared lengths exaggerate the difference, so the envelope is wide
/// to tolerate perspective skew.
pub const DEFAULT_SIDE_RATIO_TOLERANCE: f64 = 0.5;

/// Tunable parameters of the document detection pipeline.
///
/// The defaults define the accepted-shape envelope; change them only with
/// evidence from real captures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Half-width of the background color band per channel (clamped to 127).
    pub color_tolerance: u8,
    /// Minimum contour perimeter as a fraction of `2 * (width + height)`.
    pub length_ratio_min: f64,
    /// Maximum contour perimeter as a fraction of `2 * (width + height)`.
    pub length_ratio_max: f64,
    /// Opposite sides must have squared-length ratio in `1 ± tolerance`.
    pub side_ratio_tolerance: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
            length_ratio_min: DEFAULT_LENGTH_RATIO_MIN,
            length_ratio_max: DEFAULT_LENGTH_RATIO_MAX,
            side_ratio_tolerance: DEFAULT_SIDE_RATIO_TOLERANCE,
        }
    }
}

impl DetectionConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the ratios describe a usable envelope.
    pub fn validate(&self) -> Result<()> {
        if !self.length_ratio_min.is_finite() || !self.length_ratio_max.is_finite() {
            return Err(QuadScanError::InvalidConfig(
                "length ratios must be finite".into(),
            ));
        }
        if self.length_ratio_min <= 0.0 {
            return Err(QuadScanError::InvalidConfig(format!(
                "length_ratio_min must be positive, got {}",
                self.length_ratio_min
            )));
        }
        if self.length_ratio_min > self.length_ratio_max {
            return Err(QuadScanError::InvalidConfig(format!(
                "length_ratio_min ({}) exceeds length_ratio_max ({})",
                self.length_ratio_min, self.length_ratio_max
            )));
        }
        if !(0.0..1.0).contains(&self.side_ratio_tolerance) {
            return Err(QuadScanError::InvalidConfig(format!(
                "side_ratio_tolerance must be in [0, 1), got {}",
                self.side_ratio_tolerance
            )));
        }
        Ok(())
    }

    /// Color tolerance after clamping to [`MAX_COLOR_TOLERANCE`].
    pub fn effective_color_tolerance(&self) -> u8 {
        self.color_tolerance.min(MAX_COLOR_TOLERANCE)
    }

    /// Perimeter bounds for an image of the given size.
    pub fn length_bounds(&self, width: u32, height: u32) -> LengthBounds {
        let perimeter = 2.0 * (f64::from(width) + f64::from(height));
        LengthBounds::new(
            self.length_ratio_min * perimeter,
            self.length_ratio_max * perimeter,
        )
    }

    /// Accepted range of opposite-side squared-length ratios.
    pub fn side_ratio_range(&self) -> (f64, f64) {
        (
            1.0 - self.side_ratio_tolerance,
            1.0 + self.side_ratio_tolerance,
        )
    }
}
