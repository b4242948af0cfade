// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Polygon helpers over integer pixel coordinates — centroid, perimeter, area,
// containment, and corner ordering.

use std::cmp::Reverse;

use crate::types::{Point, Quad};

/// Integer mean of `points`, truncated toward zero. Returns the origin for an
/// empty slice.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let (sum_x, sum_y) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });
    let count = points.len() as i64;
    Point::new((sum_x / count) as i32, (sum_y / count) as i32)
}

/// Length of the closed polygon through `points` (last point joins the first).
pub fn perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let closing = points[points.len() - 1].distance(points[0]);
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum::<f64>()
        + closing
}

/// Shoelace area with sign. In image coordinates (y down) a polygon that runs
/// clockwise on screen has positive area.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: i64 = (0..n).map(|i| points[i].cross(points[(i + 1) % n])).sum();
    twice as f64 / 2.0
}

/// Unsigned shoelace area.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Half-plane test of `point` against a convex, consistently wound quad.
///
/// For each edge the sign of `edge × (start − point)` is tallied; the point is
/// inside when no two edges disagree. A zero cross product (point on the
/// edge's line) agrees with either sign, so the test is boundary-inclusive
/// for both windings. Non-convex or self-intersecting quads give meaningless
/// answers.
pub fn point_in_quad(quad: &[Point; 4], point: Point) -> bool {
    let mut positive = 0;
    let mut negative = 0;
    for i in 0..4 {
        let start = quad[i];
        let end = quad[(i + 1) % 4];
        match (end - start).cross(start - point).signum() {
            1 => positive += 1,
            -1 => negative += 1,
            _ => {}
        }
    }
    positive == 0 || negative == 0
}

/// Reorder a quad to top-left, top-right, bottom-right, bottom-left.
///
/// The top-left corner is the one with the smallest `x + y`. The remaining
/// corners are taken in the quad's own cyclic order, walking in whichever
/// direction reaches the top-right corner first: backwards for quads that run
/// counter-clockwise on screen (as corner extraction emits them), forwards
/// for clockwise ones. Degenerate zero-area quads walk backwards.
pub fn order_corners(quad: &[Point; 4]) -> [Point; 4] {
    let mut top_left = 0;
    let mut min_sum = quad[0].x + quad[0].y;
    for (i, p) in quad.iter().enumerate().skip(1) {
        let sum = p.x + p.y;
        if sum < min_sum {
            min_sum = sum;
            top_left = i;
        }
    }

    let step = if signed_area(quad) > 0.0 { 1 } else { 3 };
    [
        quad[top_left],
        quad[(top_left + step) % 4],
        quad[(top_left + 2 * step) % 4],
        quad[(top_left + 3 * step) % 4],
    ]
}

/// Column-wise ordering used by the edge-based detector: the left-most
/// point, the middle pair ordered bottom-first, then the right-most point,
/// emitted as `[left, lower-middle, right, upper-middle]`.
pub fn order_by_columns(mut points: [Point; 4]) -> [Point; 4] {
    points.sort_by_key(|p| p.x);
    points[1..3].sort_by_key(|p| Reverse(p.y));
    [points[0], points[1], points[3], points[2]]
}

/// Index of the first point with the greatest squared distance to `from`.
/// Returns 0 when no point lies farther than distance zero.
pub fn farthest_from(points: &[Point], from: Point) -> usize {
    let mut best = 0;
    let mut best_distance = 0;
    for (i, p) in points.iter().enumerate() {
        let distance = p.squared_distance(from);
        if distance > best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

/// The quad whose centroid is closest to `center` by squared distance. Ties
/// keep the earliest quad.
pub fn nearest_to_center(quads: &[Quad], center: Point) -> Option<&Quad> {
    quads
        .iter()
        .min_by_key(|quad| quad.centroid().squared_distance(center))
}
