// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background color range binarization — marks every pixel whose color falls
// outside a tolerance band around the known background color.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use quadscan_core::config::MAX_COLOR_TOLERANCE;
use quadscan_core::error::{QuadScanError, Result};
use serde::Serialize;
use tracing::{debug, instrument};

/// Mask value for candidate document pixels.
pub const FOREGROUND: u8 = 255;

/// Mask value for background pixels.
pub const BACKGROUND: u8 = 0;

/// Per-channel inclusive color band `[lower, upper]` around a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    /// Build the band `background ± tolerance` for each channel.
    ///
    /// The tolerance is clamped to 127 so the band never wraps. A bound that
    /// would leave `[0, 255]` is pinned to the edge and the opposite bound is
    /// shifted by the same amount, so every channel keeps a width of
    /// `2 * tolerance`.
    pub fn new(background: Rgb<u8>, tolerance: u8) -> Self {
        let tolerance = i32::from(tolerance.min(MAX_COLOR_TOLERANCE));
        let mut lower = [0u8; 3];
        let mut upper = [0u8; 3];

        for channel in 0..3 {
            let center = i32::from(background.0[channel]);
            let mut low = center - tolerance;
            let mut high = center + tolerance;
            if low < 0 {
                high -= low;
                low = 0;
            }
            if high > 255 {
                low -= high - 255;
                high = 255;
            }
            lower[channel] = low as u8;
            upper[channel] = high as u8;
        }

        Self { lower, upper }
    }

    /// Whether every channel of `pixel` lies inside the band.
    pub fn contains(&self, pixel: &Rgb<u8>) -> bool {
        (0..3).all(|c| self.lower[c] <= pixel.0[c] && pixel.0[c] <= self.upper[c])
    }
}

/// Borrow `image` as a non-empty 8-bit, 3-channel buffer.
pub fn require_rgb8(image: &DynamicImage) -> Result<&RgbImage> {
    let rgb = image.as_rgb8().ok_or_else(|| {
        QuadScanError::InvalidInput(format!(
            "expected an 8-bit 3-channel image, got {:?}",
            image.color()
        ))
    })?;
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(QuadScanError::InvalidInput(format!(
            "image is empty ({}x{})",
            rgb.width(),
            rgb.height()
        )));
    }
    Ok(rgb)
}

/// Binarize a decoded image against `range`.
///
/// Fails with [`QuadScanError::InvalidInput`] unless the image is a
/// non-empty 8-bit RGB buffer.
#[instrument(skip(image, range), fields(width = image.width(), height = image.height()))]
pub fn binarize(image: &DynamicImage, range: &ColorRange) -> Result<GrayImage> {
    let rgb = require_rgb8(image)?;
    Ok(mask_outside_range(rgb, range))
}

/// Single-channel mask: [`FOREGROUND`] where the pixel is outside `range`,
/// [`BACKGROUND`] where it matches the background.
pub fn mask_outside_range(image: &RgbImage, range: &ColorRange) -> GrayImage {
    let mut mask = GrayImage::new(image.width(), image.height());
    let mut foreground = 0usize;

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if range.contains(pixel) {
            BACKGROUND
        } else {
            foreground += 1;
            FOREGROUND
        };
        mask.put_pixel(x, y, Luma([value]));
    }

    debug!(
        lower = ?range.lower,
        upper = ?range.upper,
        foreground,
        "Background mask computed"
    );
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_is_symmetric_away_from_edges() {
        let range = ColorRange::new(Rgb([100, 128, 200]), 25);
        assert_eq!(range.lower, [75, 103, 175]);
        assert_eq!(range.upper, [125, 153, 225]);
    }

    #[test]
    fn band_shifts_at_channel_edges() {
        let range = ColorRange::new(Rgb([0, 10, 250]), 25);
        assert_eq!(range.lower, [0, 0, 205]);
        assert_eq!(range.upper, [50, 50, 255]);
    }

    /// Every background color and tolerance yields an ordered band of width
    /// `2 * min(tolerance, 127)`.
    #[test]
    fn band_width_is_preserved_for_all_inputs() {
        for tolerance in [0u8, 1, 25, 100, 127, 128, 255] {
            let expected = 2 * u16::from(tolerance.min(127));
            for value in (0..=255u16).step_by(5) {
                let v = value as u8;
                let range = ColorRange::new(Rgb([v, 255 - v, v / 2]), tolerance);
                for c in 0..3 {
                    assert!(range.lower[c] <= range.upper[c]);
                    assert_eq!(
                        u16::from(range.upper[c] - range.lower[c]),
                        expected,
                        "tolerance {tolerance}, value {v}, channel {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn mask_marks_pixels_outside_band() {
        let mut img = RgbImage::from_pixel(4, 3, Rgb([20, 20, 20]));
        img.put_pixel(1, 1, Rgb([240, 240, 240]));
        // Only one channel out of band is enough.
        img.put_pixel(2, 2, Rgb([20, 90, 20]));

        let range = ColorRange::new(Rgb([0, 0, 0]), 25);
        let mask = mask_outside_range(&img, &range);

        assert_eq!(mask.get_pixel(0, 0).0[0], BACKGROUND);
        assert_eq!(mask.get_pixel(1, 1).0[0], FOREGROUND);
        assert_eq!(mask.get_pixel(2, 2).0[0], FOREGROUND);
        assert_eq!(mask.pixels().filter(|p| p.0[0] == FOREGROUND).count(), 2);
    }

    #[test]
    fn grayscale_input_is_rejected() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(10, 10));
        let range = ColorRange::new(Rgb([0, 0, 0]), 25);
        assert!(matches!(
            binarize(&img, &range),
            Err(QuadScanError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let range = ColorRange::new(Rgb([0, 0, 0]), 25);
        assert!(matches!(
            binarize(&img, &range),
            Err(QuadScanError::InvalidInput(_))
        ));
    }
}
