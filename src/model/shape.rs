//! Shape geometry for annotations.
//!
//! Each variant carries its point sequence with fixed per-type meaning:
//! rectangle corners run clockwise from the drag anchor, circle stores
//! [center, edge], ellipse stores [center, right, bottom] with the two axis
//! handles constrained to their axes. Rendering, hit-testing, and
//! control-point updates are exhaustive matches over the variants, so a new
//! shape type cannot silently fall through.

use serde::{Deserialize, Serialize};

use crate::constants::annotation;
use crate::geometry::{self, BoundingBox, Point};

/// Geometry of an annotation, tagged by shape type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle, 4 corners in clockwise order
    Rectangle { corners: [Point; 4] },
    /// Circle as center plus a point on its edge
    Circle { center: Point, edge: Point },
    /// Axis-aligned ellipse as center plus per-axis handles
    Ellipse {
        center: Point,
        right: Point,
        bottom: Point,
    },
    /// Single point marker
    Point { position: Point },
    /// Closed region outlined by vertices in click order
    Polygon { vertices: Vec<Point> },
    /// Open chain of vertices in click order
    Polyline { vertices: Vec<Point> },
}

impl Shape {
    // ========================================================================
    // Construction from drag gestures
    // ========================================================================

    /// Rectangle spanned by the drag anchor and the current pointer.
    pub fn rectangle_from_drag(anchor: Point, current: Point) -> Self {
        Shape::Rectangle {
            corners: [
                anchor,
                Point::new(current.x, anchor.y),
                current,
                Point::new(anchor.x, current.y),
            ],
        }
    }

    /// Circle centered at the drag anchor with the pointer on its edge.
    pub fn circle_from_drag(anchor: Point, current: Point) -> Self {
        Shape::Circle {
            center: anchor,
            edge: current,
        }
    }

    /// Ellipse centered at the drag anchor with radii from the pointer.
    pub fn ellipse_from_drag(anchor: Point, current: Point) -> Self {
        let rx = (current.x - anchor.x).abs();
        let ry = (current.y - anchor.y).abs();
        Shape::Ellipse {
            center: anchor,
            right: Point::new(anchor.x + rx, anchor.y),
            bottom: Point::new(anchor.x, anchor.y + ry),
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Short lowercase name for status messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle { .. } => "rectangle",
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Point { .. } => "point",
            Shape::Polygon { .. } => "polygon",
            Shape::Polyline { .. } => "polyline",
        }
    }

    /// Circle radius, or None for other shapes.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Shape::Circle { center, edge } => Some(center.distance_to(edge)),
            _ => None,
        }
    }

    /// Ellipse half-axes (rx, ry), or None for other shapes.
    pub fn ellipse_radii(&self) -> Option<(f32, f32)> {
        match self {
            Shape::Ellipse {
                center,
                right,
                bottom,
            } => Some(((right.x - center.x).abs(), (bottom.y - center.y).abs())),
            _ => None,
        }
    }

    /// Vertices of a polygon or polyline, or None for fixed-arity shapes.
    pub fn vertices(&self) -> Option<&[Point]> {
        match self {
            Shape::Polygon { vertices } | Shape::Polyline { vertices } => Some(vertices),
            _ => None,
        }
    }

    /// Whether the geometry satisfies its completion rule.
    ///
    /// Polygons need at least 3 vertices, polylines at least 1; the
    /// fixed-arity shapes are complete by construction.
    pub fn meets_completion_rule(&self) -> bool {
        match self {
            Shape::Polygon { vertices } => vertices.len() >= 3,
            Shape::Polyline { vertices } => !vertices.is_empty(),
            _ => true,
        }
    }

    /// Tightest axis-aligned box around the shape.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Shape::Rectangle { corners } => BoundingBox::from_points(corners),
            Shape::Circle { center, edge } => {
                let r = center.distance_to(edge);
                Some(BoundingBox::new(center.x - r, center.y - r, 2.0 * r, 2.0 * r))
            }
            Shape::Ellipse {
                center,
                right,
                bottom,
            } => {
                let rx = (right.x - center.x).abs();
                let ry = (bottom.y - center.y).abs();
                Some(BoundingBox::new(
                    center.x - rx,
                    center.y - ry,
                    2.0 * rx,
                    2.0 * ry,
                ))
            }
            Shape::Point { position } => {
                Some(BoundingBox::new(position.x, position.y, 0.0, 0.0))
            }
            Shape::Polygon { vertices } | Shape::Polyline { vertices } => {
                BoundingBox::from_points(vertices)
            }
        }
    }

    // ========================================================================
    // Hit testing
    // ========================================================================

    /// Check if a logical point falls on this shape's body.
    ///
    /// `point_hit_radius` applies to point markers and polyline edges, which
    /// have no fillable interior; callers scale it by zoom so hits feel the
    /// same at any magnification.
    pub fn contains(&self, point: &Point, point_hit_radius: f32) -> bool {
        match self {
            Shape::Rectangle { corners } => BoundingBox::from_points(corners)
                .is_some_and(|bbox| bbox.contains(point)),
            Shape::Circle { center, edge } => {
                point.distance_to(center) <= center.distance_to(edge)
            }
            Shape::Ellipse {
                center,
                right,
                bottom,
            } => {
                let rx = (right.x - center.x).abs();
                let ry = (bottom.y - center.y).abs();
                if rx <= f32::EPSILON || ry <= f32::EPSILON {
                    return false;
                }
                let nx = (point.x - center.x) / rx;
                let ny = (point.y - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            Shape::Point { position } => point.distance_to(position) <= point_hit_radius,
            Shape::Polygon { vertices } => geometry::point_in_polygon(point, vertices),
            // Polylines are never a filled region; hit near any edge instead
            Shape::Polyline { vertices } => vertices
                .windows(2)
                .any(|pair| geometry::distance_to_segment(point, &pair[0], &pair[1]) <= point_hit_radius),
        }
    }

    // ========================================================================
    // Control points
    // ========================================================================

    /// Draggable control points in their canonical order.
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Shape::Rectangle { corners } => corners.to_vec(),
            Shape::Circle { center, edge } => vec![*center, *edge],
            Shape::Ellipse {
                center,
                right,
                bottom,
            } => vec![*center, *right, *bottom],
            Shape::Point { position } => vec![*position],
            Shape::Polygon { vertices } | Shape::Polyline { vertices } => vertices.clone(),
        }
    }

    /// Find the closest control point within `radius`, if any.
    pub fn hit_control_point(&self, point: &Point, radius: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, cp) in self.control_points().iter().enumerate() {
            let d = point.distance_to(cp);
            if d <= radius && best.is_none_or(|(_, prev)| d < prev) {
                best = Some((index, d));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Produce the shape with control point `index` dragged to `target`.
    ///
    /// Per-type update rules:
    /// - rectangle: the corner moves and its two neighbors follow on their
    ///   shared axis, keeping the rectangle axis-aligned
    /// - circle: the edge handle changes the radius; the center handle
    ///   translates the whole circle
    /// - ellipse: right/bottom handles move only along their own axis; the
    ///   center handle translates all three points by the same delta
    /// - point: relocates the marker
    /// - polygon/polyline: relocates a single vertex
    ///
    /// Returns None for an out-of-range index.
    pub fn with_control_point(&self, index: usize, target: Point) -> Option<Shape> {
        match self {
            Shape::Rectangle { corners } => {
                if index >= 4 {
                    return None;
                }
                let mut updated = *corners;
                let prev_index = (index + 3) % 4;
                let next_index = (index + 1) % 4;
                let corner = corners[index];
                let prev = corners[prev_index];

                updated[index] = target;
                // One neighbor shares this corner's y, the other its x
                if (prev.y - corner.y).abs() <= (prev.x - corner.x).abs() {
                    updated[prev_index].y = target.y;
                    updated[next_index].x = target.x;
                } else {
                    updated[prev_index].x = target.x;
                    updated[next_index].y = target.y;
                }
                Some(Shape::Rectangle { corners: updated })
            }
            Shape::Circle { center, edge } => match index {
                0 => {
                    let dx = target.x - center.x;
                    let dy = target.y - center.y;
                    Some(Shape::Circle {
                        center: target,
                        edge: edge.translated(dx, dy),
                    })
                }
                1 => Some(Shape::Circle {
                    center: *center,
                    edge: target,
                }),
                _ => None,
            },
            Shape::Ellipse {
                center,
                right,
                bottom,
            } => match index {
                0 => {
                    let dx = target.x - center.x;
                    let dy = target.y - center.y;
                    Some(Shape::Ellipse {
                        center: target,
                        right: right.translated(dx, dy),
                        bottom: bottom.translated(dx, dy),
                    })
                }
                1 => Some(Shape::Ellipse {
                    center: *center,
                    right: Point::new(target.x, center.y),
                    bottom: *bottom,
                }),
                2 => Some(Shape::Ellipse {
                    center: *center,
                    right: *right,
                    bottom: Point::new(center.x, target.y),
                }),
                _ => None,
            },
            Shape::Point { .. } => {
                (index == 0).then_some(Shape::Point { position: target })
            }
            Shape::Polygon { vertices } => {
                let mut updated = vertices.clone();
                let slot = updated.get_mut(index)?;
                *slot = target;
                Some(Shape::Polygon { vertices: updated })
            }
            Shape::Polyline { vertices } => {
                let mut updated = vertices.clone();
                let slot = updated.get_mut(index)?;
                *slot = target;
                Some(Shape::Polyline { vertices: updated })
            }
        }
    }

    /// Append a vertex to a polygon or polyline. No-op for other shapes.
    pub fn push_vertex(&mut self, point: Point) -> bool {
        match self {
            Shape::Polygon { vertices } | Shape::Polyline { vertices } => {
                vertices.push(point);
                true
            }
            _ => false,
        }
    }

    /// Remove the last vertex of a polygon or polyline.
    pub fn pop_vertex(&mut self) -> Option<Point> {
        match self {
            Shape::Polygon { vertices } | Shape::Polyline { vertices } => vertices.pop(),
            _ => None,
        }
    }

    /// Remove a vertex by index from a polygon or polyline.
    pub fn remove_vertex(&mut self, index: usize) -> Option<Point> {
        match self {
            Shape::Polygon { vertices } | Shape::Polyline { vertices } => {
                (index < vertices.len()).then(|| vertices.remove(index))
            }
            _ => None,
        }
    }

    // ========================================================================
    // Outlines
    // ========================================================================

    /// Closed outline of the shape for export, in logical coordinates.
    ///
    /// Circles and ellipses are sampled at a fixed vertex count. Points and
    /// polylines enclose nothing and return None.
    pub fn outline(&self) -> Option<Vec<Point>> {
        match self {
            Shape::Rectangle { corners } => Some(corners.to_vec()),
            Shape::Circle { center, edge } => {
                let r = center.distance_to(edge);
                Some(sample_ellipse(center, r, r))
            }
            Shape::Ellipse {
                center,
                right,
                bottom,
            } => {
                let rx = (right.x - center.x).abs();
                let ry = (bottom.y - center.y).abs();
                Some(sample_ellipse(center, rx, ry))
            }
            Shape::Polygon { vertices } => Some(vertices.clone()),
            Shape::Point { .. } | Shape::Polyline { .. } => None,
        }
    }
}

/// Sample an axis-aligned ellipse outline at a fixed vertex count.
fn sample_ellipse(center: &Point, rx: f32, ry: f32) -> Vec<Point> {
    (0..annotation::OUTLINE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / annotation::OUTLINE_SEGMENTS as f32 * std::f32::consts::TAU;
            Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}
