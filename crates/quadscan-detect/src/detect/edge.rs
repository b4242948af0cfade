// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge-based document detection — a simpler, background-agnostic strategy
// built on Canny edges and polygon approximation. Independent of the
// background color pipeline; none of its shape checks apply here.

use image::DynamicImage;
use imageproc::contours::find_contours;
use imageproc::edges::canny;
use imageproc::filter::box_filter;
use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point as ImagePoint;
use quadscan_core::error::{QuadScanError, Result};
use quadscan_core::geometry;
use quadscan_core::{Point, Quad};
use tracing::{debug, info, instrument};

/// Default Canny hysteresis thresholds.
pub const DEFAULT_CANNY_LOW: f32 = 50.0;
pub const DEFAULT_CANNY_HIGH: f32 = 150.0;

/// Douglas–Peucker tolerance as a fraction of the contour perimeter.
pub const DEFAULT_APPROX_RATIO: f64 = 0.02;

/// Finds four-sided outlines in an edge map, largest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDetector {
    low_threshold: f32,
    high_threshold: f32,
    approx_ratio: f64,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self {
            low_threshold: DEFAULT_CANNY_LOW,
            high_threshold: DEFAULT_CANNY_HIGH,
            approx_ratio: DEFAULT_APPROX_RATIO,
        }
    }
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the Canny hysteresis thresholds.
    pub fn with_thresholds(mut self, low: f32, high: f32) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    /// Detect up to `max_documents` quads (0 means no limit).
    ///
    /// Pipeline: grayscale, 3x3 box blur, Canny, border following over the
    /// edge map, contours sorted by area descending, then polygon
    /// approximation ([`simplify_closed`]) with a tolerance of 2% of each
    /// contour's perimeter.
    /// Approximations with exactly four vertices are kept, ordered with
    /// [`geometry::order_by_columns`]. Finding nothing is not an error.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &DynamicImage, max_documents: usize) -> Result<Vec<Quad>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(QuadScanError::InvalidInput("image is empty".into()));
        }

        let gray = image.to_luma8();
        let blurred = box_filter(&gray, 1, 1);
        let edges = canny(&blurred, self.low_threshold, self.high_threshold);

        let mut outlines: Vec<(f64, Vec<Point>)> = find_contours::<i32>(&edges)
            .into_iter()
            .filter(|c| c.points.len() >= 4)
            .map(|c| {
                let points = to_points(&c.points);
                (geometry::polygon_area(&points), points)
            })
            .collect();
        outlines.sort_by(|a, b| b.0.total_cmp(&a.0));
        debug!(contours = outlines.len(), "Edge contours traced");

        let mut quads = Vec::new();
        for (_, outline) in &outlines {
            let epsilon = self.approx_ratio * geometry::perimeter(outline);
            if epsilon <= 0.0 {
                continue;
            }

            let approx = simplify_closed(outline, epsilon);
            let Ok(corners) = <[Point; 4]>::try_from(approx.as_slice()) else {
                continue;
            };

            quads.push(Quad::new(geometry::order_by_columns(corners)));
            if quads.len() == max_documents {
                break;
            }
        }

        info!(documents = quads.len(), "Edge-based detection complete");
        Ok(quads)
    }
}

/// Douglas–Peucker over a closed outline.
///
/// `approximate_polygon_dp` always keeps the first point of its input, so the
/// outline is first rotated to start at the point farthest from its centroid
/// and then cut at the point farthest from that one. Both cut points are
/// extreme, hence true vertices. Each open half is simplified separately and
/// the halves are joined without repeating the cut points.
/// `epsilon` must be positive.
fn simplify_closed(outline: &[Point], epsilon: f64) -> Vec<Point> {
    if outline.len() < 3 {
        return outline.to_vec();
    }

    let start = geometry::farthest_from(outline, geometry::centroid(outline));
    let ring: Vec<Point> = outline[start..]
        .iter()
        .chain(&outline[..start])
        .copied()
        .collect();
    let split = geometry::farthest_from(&ring, ring[0]);
    if split == 0 {
        return vec![ring[0]];
    }

    let mut closing = ring[split..].to_vec();
    closing.push(ring[0]);

    let mut simplified = simplify_open(&ring[..=split], epsilon);
    let tail = simplify_open(&closing, epsilon);
    simplified.extend_from_slice(&tail[1..tail.len() - 1]);
    simplified
}

/// Douglas–Peucker over an open curve; both endpoints are kept.
fn simplify_open(curve: &[Point], epsilon: f64) -> Vec<Point> {
    let curve: Vec<ImagePoint<i32>> = curve.iter().map(|p| ImagePoint::new(p.x, p.y)).collect();
    to_points(&approximate_polygon_dp(&curve, epsilon, false))
}

fn to_points(points: &[ImagePoint<i32>]) -> Vec<Point> {
    points.iter().map(|p| Point::new(p.x, p.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    #[test]
    fn blank_image_yields_nothing() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(120, 90, Luma([128u8])));
        let quads = EdgeDetector::new().detect(&img, 0).expect("detect");
        assert!(quads.is_empty());
    }

    #[test]
    fn empty_image_is_invalid() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            EdgeDetector::new().detect(&img, 0),
            Err(QuadScanError::InvalidInput(_))
        ));
    }

    /// Every pixel on the border of the rectangle (10, 10)-(110, 70),
    /// walked clockwise on screen from the middle of the top edge.
    fn rectangle_border_from_mid_edge() -> Vec<Point> {
        let mut border = Vec::new();
        border.extend((60..110).map(|x| Point::new(x, 10)));
        border.extend((10..70).map(|y| Point::new(110, y)));
        border.extend((11..=110).rev().map(|x| Point::new(x, 70)));
        border.extend((11..=70).rev().map(|y| Point::new(10, y)));
        border.extend((10..60).map(|x| Point::new(x, 10)));
        border
    }

    #[test]
    fn closed_simplification_ignores_trace_start() {
        let border = rectangle_border_from_mid_edge();
        let epsilon = DEFAULT_APPROX_RATIO * geometry::perimeter(&border);

        let simplified = simplify_closed(&border, epsilon);
        assert_eq!(
            simplified,
            vec![
                Point::new(110, 10),
                Point::new(110, 70),
                Point::new(10, 70),
                Point::new(10, 10),
            ]
        );
    }

    #[test]
    fn closed_simplification_of_a_point_cloud_collapses() {
        let blob = [Point::new(3, 3); 5];
        assert_eq!(simplify_closed(&blob, 1.0), vec![Point::new(3, 3)]);
    }

    #[test]
    fn bright_rectangle_is_found_near_its_corners() {
        let mut img = RgbImage::from_pixel(200, 160, Rgb([20, 20, 20]));
        draw_filled_rect_mut(&mut img, Rect::at(40, 30).of_size(120, 90), Rgb([235, 235, 235]));
        let img = DynamicImage::ImageRgb8(img);

        let quads = EdgeDetector::new().detect(&img, 1).expect("detect");
        assert_eq!(quads.len(), 1);

        let expected = [
            Point::new(40, 30),
            Point::new(159, 30),
            Point::new(159, 119),
            Point::new(40, 119),
        ];
        for corner in quads[0].corners {
            assert!(
                expected
                    .iter()
                    .any(|e| (e.x - corner.x).abs() <= 4 && (e.y - corner.y).abs() <= 4),
                "unexpected corner {corner}"
            );
        }
        // Column ordering: left-most first, right-most third.
        assert!(quads[0].corners[0].x < 80);
        assert!(quads[0].corners[2].x > 120);
    }
}
