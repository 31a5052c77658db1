//! Core geometry types and tests.
//!
//! This module provides the primitives shared by the shape model, the
//! viewport transform, and the simplification routines:
//! - Points and axis-aligned bounding boxes in image coordinates
//! - Distance helpers (point-to-point, point-to-segment)
//! - Ray-casting point-in-polygon test

use serde::{Deserialize, Serialize};

/// A 2D point in logical image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Offset this point by a delta.
    pub fn translated(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width of the box
    pub width: f32,
    /// Height of the box
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a bounding box from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        let width = (p1.x - p2.x).abs();
        let height = (p1.y - p2.y).abs();
        Self { x, y, width, height }
    }

    /// Create the tightest box around a set of points.
    /// Returns None for an empty set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Get the center point of the box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the box.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Distance from a point to the segment `a`-`b`.
///
/// Degenerate segments (a == b) fall back to point distance.
pub fn distance_to_segment(point: &Point, a: &Point, b: &Point) -> f32 {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let len_sq = ab_x * ab_x + ab_y * ab_y;

    if len_sq <= f32::EPSILON {
        return point.distance_to(a);
    }

    // Project onto the segment and clamp to its extent
    let t = (((point.x - a.x) * ab_x + (point.y - a.y) * ab_y) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * ab_x, a.y + t * ab_y);
    point.distance_to(&closest)
}

/// Check if a point is inside a closed polygon (ray casting, even-odd rule).
///
/// Returns false for degenerate polygons with fewer than 3 vertices.
pub fn point_in_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = vertices.len();

    let mut j = n - 1;
    for i in 0..n {
        let vi = &vertices[i];
        let vj = &vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Total edge length of a vertex sequence.
///
/// For closed outlines the edge from last back to first is included.
pub fn perimeter(points: &[Point], closed: bool) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut total: f32 = points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum();

    if closed && points.len() > 2 {
        // Unwraps guarded by the length check above, but avoid them anyway
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            total += last.distance_to(first);
        }
    }

    total
}

/// Enclosed area of a closed polygon (shoelace formula).
pub fn polygon_area(vertices: &[Point]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let n = vertices.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        twice_area += a.x * b.y - b.x * a.y;
    }

    twice_area.abs() / 2.0
}
