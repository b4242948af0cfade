// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Four-corner extraction — reduces a noisy traced outline to its four
// dominant corners without computing a full convex hull.

use std::collections::BTreeSet;

use quadscan_core::error::{QuadScanError, Result};
use quadscan_core::geometry;
use quadscan_core::{LengthBounds, Point, Quad};
use tracing::trace;

/// Reduce `contour` to four corners.
///
/// A contour that already has exactly four points is returned unchanged.
/// Otherwise:
///
/// 1. Corner A is the point farthest from the centroid, and corner B the
///    point farthest from A, approximating the longest diagonal.
/// 2. Every point off the line AB is assigned to a side by the sign of
///    `(B − A) × (P − A)`. On each side the point maximising the squared
///    triangle area with A and B (Heron's formula without the square root)
///    is the corner that bows furthest from the diagonal.
/// 3. The result is `[A, side 0 corner, B, side 1 corner]`, so consecutive
///    corners are joined by an edge of the outline.
///
/// Fails with [`QuadScanError::DegenerateCorners`] for fewer than four
/// points, when the four picks are not distinct (an empty side, or a
/// collapsed diagonal), or when the resulting perimeter leaves `bounds`.
pub fn extract_four_corners(contour: &[Point], bounds: &LengthBounds) -> Result<Quad> {
    if contour.len() < 4 {
        return Err(QuadScanError::DegenerateCorners);
    }
    if let Some(quad) = Quad::from_contour(contour) {
        return Ok(quad);
    }

    let center = geometry::centroid(contour);
    let a = geometry::farthest_from(contour, center);
    let b = geometry::farthest_from(contour, contour[a]);
    let (side0, side1) = widest_per_side(contour, contour[a], contour[b]);

    let (Some(side0), Some(side1)) = (side0, side1) else {
        trace!(a, b, "An outline side has no off-diagonal point");
        return Err(QuadScanError::DegenerateCorners);
    };

    let distinct: BTreeSet<usize> = [a, side0, b, side1].into_iter().collect();
    if distinct.len() != 4 {
        trace!(a, b, side0, side1, "Corner picks collapsed");
        return Err(QuadScanError::DegenerateCorners);
    }

    let quad = Quad::new([contour[a], contour[side0], contour[b], contour[side1]]);
    let perimeter = quad.perimeter();
    if !bounds.contains(perimeter) {
        trace!(
            perimeter,
            min = bounds.min,
            max = bounds.max,
            "Reduced outline out of bounds"
        );
        return Err(QuadScanError::DegenerateCorners);
    }
    Ok(quad)
}

/// For each side of the diagonal `a`–`b`, the index of the point spanning
/// the largest triangle with it. Side 0 holds points with a positive cross
/// product, side 1 those with a negative one.
fn widest_per_side(points: &[Point], a: Point, b: Point) -> (Option<usize>, Option<usize>) {
    let ab = b - a;
    let ab_length = ab.norm();
    let mut best: [Option<usize>; 2] = [None, None];
    let mut best_area = [0.0f64; 2];

    for (i, &p) in points.iter().enumerate() {
        let ac = p - a;
        let cross = ab.cross(ac);
        if cross == 0 {
            continue;
        }
        let side = if cross > 0 { 0 } else { 1 };

        let ac_length = ac.norm();
        let bc_length = (p - b).norm();
        let half = (ab_length + ac_length + bc_length) / 2.0;
        let area_squared = half * (half - ac_length) * (half - bc_length) * (half - ab_length);

        if area_squared > best_area[side] {
            best_area[side] = area_squared;
            best[side] = Some(i);
        }
    }

    (best[0], best[1])
}
