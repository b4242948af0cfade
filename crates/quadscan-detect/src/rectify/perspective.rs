// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification of a single document quadrilateral.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use quadscan_core::error::{QuadScanError, Result};
use quadscan_core::geometry;
use quadscan_core::{Point, Quad};
use tracing::{debug, info, instrument};

/// Fill for output pixels that map outside the source image.
const OUTSIDE_PIXEL: Rgb<u8> = Rgb([0, 0, 0]);

/// Output size for corners ordered top-left, top-right, bottom-right,
/// bottom-left: the longer of each pair of opposite sides, rounded.
pub fn target_size(ordered: &[Point; 4]) -> (u32, u32) {
    let [top_left, top_right, bottom_right, bottom_left] = *ordered;
    let width_sq = top_left
        .squared_distance(top_right)
        .max(bottom_right.squared_distance(bottom_left));
    let height_sq = top_right
        .squared_distance(bottom_right)
        .max(bottom_left.squared_distance(top_left));
    (
        (width_sq as f64).sqrt().round() as u32,
        (height_sq as f64).sqrt().round() as u32,
    )
}

/// Warp the region inside `quad` to an upright rectangle.
///
/// ## Pipeline
///
/// 1. Order the corners top-left, top-right, bottom-right, bottom-left
///    ([`geometry::order_corners`])
/// 2. Size the output from the longer side of each opposite pair
/// 3. Map the corners onto `(0, 0)`, `(W-1, 0)`, `(W-1, H-1)`, `(0, H-1)`
/// 4. Resample with bilinear interpolation via `warp_into`
///
/// Fails with [`QuadScanError::DegenerateQuad`] when the width or height
/// rounds to zero or no projective transform fits the corners.
#[instrument(skip(image, quad), fields(width = image.width(), height = image.height()))]
pub fn rectify(image: &RgbImage, quad: &Quad) -> Result<RgbImage> {
    let ordered = geometry::order_corners(&quad.corners);
    let (out_w, out_h) = target_size(&ordered);
    debug!(
        top_left = %ordered[0],
        top_right = %ordered[1],
        bottom_right = %ordered[2],
        bottom_left = %ordered[3],
        out_w,
        out_h,
        "Corners ordered"
    );

    if out_w == 0 || out_h == 0 {
        return Err(QuadScanError::DegenerateQuad);
    }

    let src = ordered.map(|p| (p.x as f32, p.y as f32));
    let (right, bottom) = ((out_w - 1) as f32, (out_h - 1) as f32);
    let dest: [(f32, f32); 4] = [
        (0.0, 0.0),       // top-left
        (right, 0.0),     // top-right
        (right, bottom),  // bottom-right
        (0.0, bottom),    // bottom-left
    ];

    let projection =
        Projection::from_control_points(src, dest).ok_or(QuadScanError::DegenerateQuad)?;

    let mut output = RgbImage::new(out_w, out_h);
    warp_into(image, &projection, Interpolation::Bilinear, OUTSIDE_PIXEL, &mut output);

    info!(out_w, out_h, "Document rectified");
    Ok(output)
}
