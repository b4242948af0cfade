// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Quadscan.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::geometry;

/// Integer pixel coordinate, also used as a 2D vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    pub fn squared_distance(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.squared_distance(other) as f64).sqrt()
    }

    /// Length of this point taken as a vector from the origin.
    pub fn norm(self) -> f64 {
        self.distance(Self::ORIGIN)
    }

    /// Z component of the cross product, treating both points as vectors.
    pub fn cross(self, other: Point) -> i64 {
        i64::from(self.x) * i64::from(other.y) - i64::from(self.y) * i64::from(other.x)
    }

    /// Dot product, treating both points as vectors.
    pub fn dot(self, other: Point) -> i64 {
        i64::from(self.x) * i64::from(other.x) + i64::from(self.y) * i64::from(other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A closed polygon boundary as traced from a binary mask.
pub type Contour = Vec<Point>;

/// A four-cornered document candidate in source-image pixel coordinates.
///
/// During detection the corners keep whatever order corner extraction
/// produced (diagonal corner, side corner, opposite diagonal corner, other
/// side corner), so consecutive corners are always joined by an edge. Use
/// [`geometry::order_corners`] for the top-left/top-right/bottom-right/
/// bottom-left order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    pub const fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Build a quad from a contour that has exactly four points.
    pub fn from_contour(contour: &[Point]) -> Option<Self> {
        let corners: [Point; 4] = contour.try_into().ok()?;
        Some(Self { corners })
    }

    /// Closed perimeter length.
    pub fn perimeter(&self) -> f64 {
        geometry::perimeter(&self.corners)
    }

    /// Unsigned polygon area.
    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.corners)
    }

    /// Integer mean of the four corners.
    pub fn centroid(&self) -> Point {
        geometry::centroid(&self.corners)
    }

    /// Boundary-inclusive containment test; see [`geometry::point_in_quad`].
    pub fn contains(&self, point: Point) -> bool {
        geometry::point_in_quad(&self.corners, point)
    }

    /// Squared-length ratios of the two pairs of opposite sides:
    /// `|c0c1|² / |c2c3|²` and `|c1c2|² / |c3c0|²`.
    ///
    /// A zero-length denominator yields an infinite or NaN ratio, which no
    /// finite range accepts.
    pub fn opposite_side_ratios(&self) -> (f64, f64) {
        let [a, b, c, d] = self.corners;
        let side_ab = a.squared_distance(b) as f64;
        let side_cd = c.squared_distance(d) as f64;
        let side_bc = b.squared_distance(c) as f64;
        let side_da = d.squared_distance(a) as f64;
        (side_ab / side_cd, side_bc / side_da)
    }

    /// Flat `(x1, y1, x2, y2, x3, y3, x4, y4)` encoding handed to host code.
    pub fn to_flat(&self) -> [i32; 8] {
        let mut flat = [0; 8];
        for (i, corner) in self.corners.iter().enumerate() {
            flat[2 * i] = corner.x;
            flat[2 * i + 1] = corner.y;
        }
        flat
    }
}

/// Inclusive perimeter range a candidate outline must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: f64,
    pub max: f64,
}

impl LengthBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, length: f64) -> bool {
        self.min <= length && length <= self.max
    }
}
