// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction — border following on the binary mask, flattened into
// a plain list with straight runs compressed to their endpoints.

use image::GrayImage;
use imageproc::contours::find_contours;
use quadscan_core::{Contour, Point};
use tracing::{debug, instrument};

/// Trace every border in `mask`, outer borders and hole borders alike.
///
/// The tracer's parent/child hierarchy is discarded; nesting is resolved
/// later by geometry. Each contour is compressed with [`compress_runs`].
#[instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn extract_contours(mask: &GrayImage) -> Vec<Contour> {
    let traced = find_contours::<i32>(mask);
    let raw_points: usize = traced.iter().map(|c| c.points.len()).sum();

    let contours: Vec<Contour> = traced
        .into_iter()
        .map(|contour| {
            let points: Vec<Point> = contour
                .points
                .into_iter()
                .map(|p| Point::new(p.x, p.y))
                .collect();
            compress_runs(&points)
        })
        .collect();

    debug!(
        count = contours.len(),
        raw_points,
        kept_points = contours.iter().map(Vec::len).sum::<usize>(),
        "Contours traced"
    );
    contours
}

/// Drop every point of a closed boundary that continues a straight run in
/// the same direction, keeping only the run endpoints.
///
/// An axis-aligned rectangle collapses to its four corners. Reversals (as on
/// one-pixel-wide spurs) are kept.
pub fn compress_runs(points: &[Point]) -> Contour {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let kept: Contour = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let current = points[i];
            let next = points[(i + 1) % n];
            let incoming = current - prev;
            let outgoing = next - current;
            !(incoming.cross(outgoing) == 0 && incoming.dot(outgoing) > 0)
        })
        .map(|i| points[i])
        .collect();

    // A boundary that is one straight run has no turning point at all.
    if kept.is_empty() {
        return vec![points[0], points[n - 1]];
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    #[test]
    fn empty_mask_has_no_contours() {
        let mask = GrayImage::new(30, 30);
        assert!(extract_contours(&mask).is_empty());
    }

    #[test]
    fn rectangle_compresses_to_corners() {
        let mut mask = GrayImage::new(60, 50);
        draw_filled_rect_mut(&mut mask, Rect::at(10, 5).of_size(30, 20), Luma([255u8]));

        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 1);

        let mut corners = contours[0].clone();
        corners.sort_by_key(|p| (p.x, p.y));
        assert_eq!(
            corners,
            vec![
                Point::new(10, 5),
                Point::new(10, 24),
                Point::new(39, 5),
                Point::new(39, 24),
            ]
        );
    }

    #[test]
    fn hole_borders_are_listed_too() {
        let mut mask = GrayImage::new(80, 80);
        draw_filled_rect_mut(&mut mask, Rect::at(10, 10).of_size(60, 60), Luma([255u8]));
        draw_filled_rect_mut(&mut mask, Rect::at(30, 30).of_size(20, 20), Luma([0u8]));

        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 2);
    }

    #[test]
    fn compress_keeps_turns_and_reversals() {
        let line = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(1, 0),
        ];
        // (2,0) reverses direction, (0,0) closes back onto the run start.
        assert_eq!(
            compress_runs(&line),
            vec![Point::new(0, 0), Point::new(2, 0)]
        );

        let square = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
            Point::new(2, 1),
            Point::new(2, 0),
            Point::new(1, 0),
        ];
        assert_eq!(
            compress_runs(&square),
            vec![
                Point::new(0, 0),
                Point::new(0, 2),
                Point::new(2, 2),
                Point::new(2, 0),
            ]
        );
    }
}
