// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document detector — composes binarization, contour tracing, filtering, and
// rectification into the two public operations: detect every document, or
// extract the most central one as an upright image.

use image::{DynamicImage, Rgb, RgbImage};
use quadscan_core::error::Result;
use quadscan_core::geometry;
use quadscan_core::{DetectionConfig, Point, QuadScanError, Quad};
use tracing::{debug, info, instrument};

use crate::detect::binarize::{ColorRange, mask_outside_range, require_rgb8};
use crate::detect::contours::extract_contours;
use crate::detect::filter::{FilterParams, filter_contours};
use crate::rectify::rectify;

/// Locates document quadrilaterals against a known background color.
///
/// A detector holds only its configuration; every call allocates and drops
/// its own mask and contour buffers, so one detector can serve many
/// threads.
///
/// ```ignore
/// let detector = DocumentDetector::new();
/// let quads = detector.detect_documents(&frame, Rgb([0, 0, 0]))?;
/// let page = detector.extract_document(&frame, Rgb([0, 0, 0]))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentDetector {
    config: DetectionConfig,
}

impl DocumentDetector {
    // -- Construction ---------------------------------------------------------

    /// Detector with the default accepted-shape envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with a custom configuration, validated up front.
    pub fn with_config(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    // -- Operations -----------------------------------------------------------

    /// Find every document in `image`.
    ///
    /// ## Pipeline
    ///
    /// 1. Mask pixels outside the background color band
    /// 2. Trace all borders in the mask, compressing straight runs
    /// 3. Keep outlines with a perimeter between 10% and 70% of the image
    ///    perimeter (by default)
    /// 4. Reduce each outline to four corners
    /// 5. Keep quads whose opposite sides are roughly equal
    /// 6. Drop quads nested inside larger ones
    ///
    /// Quads are returned largest first, corners in extraction order.
    /// Fails with [`QuadScanError::InvalidInput`] for anything but a
    /// non-empty 8-bit RGB image and [`QuadScanError::NoDocumentsFound`]
    /// when no candidate survives.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn detect_documents(&self, image: &DynamicImage, background: Rgb<u8>) -> Result<Vec<Quad>> {
        let rgb = require_rgb8(image)?;
        self.detect_in_rgb(rgb, background)
    }

    /// Rectify the document closest to the image center.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn extract_document(&self, image: &DynamicImage, background: Rgb<u8>) -> Result<RgbImage> {
        self.extract_document_with_quad(image, background)
            .map(|(_, rectified)| rectified)
    }

    /// Like [`extract_document`](Self::extract_document), also returning the
    /// quad that was rectified.
    pub fn extract_document_with_quad(
        &self,
        image: &DynamicImage,
        background: Rgb<u8>,
    ) -> Result<(Quad, RgbImage)> {
        let rgb = require_rgb8(image)?;
        let quads = self.detect_in_rgb(rgb, background)?;

        let center = image_center(rgb);
        let quad = *geometry::nearest_to_center(&quads, center)
            .ok_or(QuadScanError::NoDocumentsFound)?;
        debug!(
            corners = ?quad.corners,
            center = %center,
            "Selected most central document"
        );

        let rectified = rectify(rgb, &quad)?;
        Ok((quad, rectified))
    }

    fn detect_in_rgb(&self, rgb: &RgbImage, background: Rgb<u8>) -> Result<Vec<Quad>> {
        let range = ColorRange::new(background, self.config.effective_color_tolerance());
        let mask = mask_outside_range(rgb, &range);
        let contours = extract_contours(&mask);

        let (side_ratio_min, side_ratio_max) = self.config.side_ratio_range();
        let params = FilterParams {
            bounds: self.config.length_bounds(rgb.width(), rgb.height()),
            side_ratio_min,
            side_ratio_max,
        };
        let quads = filter_contours(contours, &params)?;

        info!(documents = quads.len(), "Document detection complete");
        Ok(quads)
    }
}

/// Geometric center of the image, truncated to whole pixels.
fn image_center(image: &RgbImage) -> Point {
    Point::new((image.width() / 2) as i32, (image.height() / 2) as i32)
}
