//! Polygon simplification.
//!
//! Two reduction strategies over vertex sequences:
//! - [`preview_simplify`]: a cheap O(n) corner-preserving pass used while a
//!   segmentation result is being previewed.
//! - [`adaptive_simplify`]: Douglas-Peucker reduction driven by a binary
//!   search over tolerance until the vertex count lands near a caller-chosen
//!   budget.
//!
//! Both preserve the first and last point of the input, so open polylines
//! keep their endpoints and closed outlines keep their anchor vertex.

use serde::{Deserialize, Serialize};

use crate::constants::simplify as defaults;
use crate::geometry::{distance_to_segment, perimeter, Point};

/// Tuning for the adaptive tolerance search.
///
/// Tolerances are percentages of the outline perimeter, so the search is
/// scale-free: the same settings behave identically on a 100 px and a
/// 10000 px contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplifySettings {
    /// Lower tolerance bound (percent of perimeter)
    pub min_tolerance: f32,
    /// Upper tolerance bound (percent of perimeter)
    pub max_tolerance: f32,
    /// Binary search iteration cap
    pub search_iterations: u32,
}

impl Default for SimplifySettings {
    fn default() -> Self {
        Self {
            min_tolerance: defaults::MIN_TOLERANCE,
            max_tolerance: defaults::MAX_TOLERANCE,
            search_iterations: defaults::SEARCH_ITERATIONS,
        }
    }
}

/// Fast corner-preserving reduction for live previews.
///
/// Keeps the first and last point unconditionally. An interior point is kept
/// when the direction change between the segment from the last kept point and
/// the segment to the next point is sharp (normalized dot product below
/// ~0.95, an 18 degree turn), or when it has drifted more than
/// `5 x tolerance_base` from the last kept point. Non-optimal but O(n).
pub fn preview_simplify(points: &[Point], tolerance_base: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let max_gap = defaults::PREVIEW_DISTANCE_FACTOR * tolerance_base;
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    kept.push(points[0]);

    for i in 1..points.len() - 1 {
        let current = points[i];
        let last_kept = kept[kept.len() - 1];
        let next = points[i + 1];

        if turn_dot(&last_kept, &current, &next) < defaults::PREVIEW_CORNER_DOT
            || current.distance_to(&last_kept) > max_gap
        {
            kept.push(current);
        }
    }

    kept.push(points[points.len() - 1]);
    kept
}

/// Normalized dot product between `prev -> current` and `current -> next`.
///
/// Returns 1.0 (no detectable turn) when either segment is degenerate.
fn turn_dot(prev: &Point, current: &Point, next: &Point) -> f32 {
    let ax = current.x - prev.x;
    let ay = current.y - prev.y;
    let bx = next.x - current.x;
    let by = next.y - current.y;

    let a_len = (ax * ax + ay * ay).sqrt();
    let b_len = (bx * bx + by * by).sqrt();
    if a_len <= f32::EPSILON || b_len <= f32::EPSILON {
        return 1.0;
    }

    (ax * bx + ay * by) / (a_len * b_len)
}

/// Reduce a vertex sequence to roughly `target` points.
///
/// Runs Douglas-Peucker repeatedly while binary-searching the tolerance over
/// the configured bounds, preferring the largest tolerance that stays at or
/// above the target. Terminates within the configured iteration cap and
/// returns the closest achievable count when no tolerance hits the target
/// exactly. Closed outlines never drop below 3 vertices, open ones never
/// below 2. Inputs already at or under the target (or degenerate, under 3
/// points) are returned unchanged, which also makes the reduction idempotent
/// at a fixed target.
pub fn adaptive_simplify(
    points: &[Point],
    target: usize,
    closed: bool,
    settings: &SimplifySettings,
) -> Vec<Point> {
    if points.len() < 3 || points.len() <= target {
        return points.to_vec();
    }

    let floor = if closed { 3 } else { 2 };
    let target = target.max(floor);
    let total_length = perimeter(points, closed);
    if total_length <= f32::EPSILON {
        return points.to_vec();
    }

    let mut low = settings.min_tolerance;
    let mut high = settings.max_tolerance;
    // Closest candidates from each side of the target
    let mut best_over: Option<Vec<Point>> = None;
    let mut best_under: Option<Vec<Point>> = None;

    for _ in 0..settings.search_iterations {
        let mid = (low + high) / 2.0;
        let epsilon = mid / 100.0 * total_length;
        let candidate = douglas_peucker(points, epsilon);

        if candidate.len() == target {
            log::debug!(
                "Adaptive simplify hit target: {} -> {} points (tolerance {:.3}%)",
                points.len(),
                candidate.len(),
                mid
            );
            return candidate;
        }

        if candidate.len() > target {
            // Still over budget: push tolerance up
            low = mid;
            let closer = best_over
                .as_ref()
                .is_none_or(|prev| candidate.len() < prev.len());
            if closer {
                best_over = Some(candidate);
            }
        } else {
            // Under budget: back off, but remember it if it stays drawable
            high = mid;
            if candidate.len() >= floor {
                let closer = best_under
                    .as_ref()
                    .is_none_or(|prev| candidate.len() > prev.len());
                if closer {
                    best_under = Some(candidate);
                }
            }
        }
    }

    // Closest achievable count wins; ties go to the larger tolerance
    let result = match (best_under, best_over) {
        (Some(under), Some(over)) => {
            if target - under.len() <= over.len() - target {
                under
            } else {
                over
            }
        }
        (Some(under), None) => under,
        (None, Some(over)) => over,
        (None, None) => points.to_vec(),
    };
    log::debug!(
        "Adaptive simplify settled: {} -> {} points (target {})",
        points.len(),
        result.len(),
        target
    );
    result
}

/// Douglas-Peucker reduction with an absolute deviation tolerance.
///
/// Endpoints are always kept; interior points survive when they deviate from
/// the chord between the kept anchors by more than `epsilon`.
pub fn douglas_peucker(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Explicit stack instead of recursion; dense AI contours can be long
    let mut spans = vec![(0usize, points.len() - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_distance = 0.0;
        let mut max_index = start;
        for i in start + 1..end {
            let d = distance_to_segment(&points[i], &points[start], &points[end]);
            if d > max_distance {
                max_distance = d;
                max_index = i;
            }
        }

        if max_distance > epsilon {
            keep[max_index] = true;
            spans.push((start, max_index));
            spans.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep.iter())
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense sampling of a circle, a stand-in for an AI mask contour.
    fn dense_circle(n: usize, radius: f32) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let angle = i as f32 / n as f32 * std::f32::consts::TAU;
                Point::new(
                    100.0 + radius * angle.cos(),
                    100.0 + radius * angle.sin(),
                )
            })
            .collect()
    }

    #[test]
    fn test_preview_simplify_degenerate_unchanged() {
        let two = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(preview_simplify(&two, 2.0), two);
        assert_eq!(preview_simplify(&[], 2.0), Vec::<Point>::new());
    }

    #[test]
    fn test_preview_simplify_drops_collinear_runs() {
        // Straight run with closely spaced interior points
        let line: Vec<Point> = (0..=10).map(|i| Point::new(i as f32, 0.0)).collect();
        let reduced = preview_simplify(&line, 10.0);

        // Nothing turns and nothing exceeds the distance gate
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0], line[0]);
        assert_eq!(reduced[reduced.len() - 1], line[line.len() - 1]);
    }

    #[test]
    fn test_preview_simplify_keeps_corners() {
        // Square traced with midpoints on each edge
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(10.0, 10.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, 0.1),
        ];
        let reduced = preview_simplify(&square, 10.0);

        // The three interior corners turn 90 degrees and must survive
        assert!(reduced.contains(&Point::new(10.0, 0.0)));
        assert!(reduced.contains(&Point::new(10.0, 10.0)));
        assert!(reduced.contains(&Point::new(0.0, 10.0)));
        // Edge midpoints are straight-ahead and close, so they go
        assert!(!reduced.contains(&Point::new(5.0, 0.0)));
    }

    #[test]
    fn test_preview_simplify_distance_gate() {
        // Long straight run: far-apart points are kept even without a turn
        let line: Vec<Point> = (0..=10).map(|i| Point::new(i as f32 * 100.0, 0.0)).collect();
        let reduced = preview_simplify(&line, 2.0);

        // Every point is >10 units from the last kept one (5 x 2.0)
        assert_eq!(reduced.len(), line.len());
    }

    #[test]
    fn test_douglas_peucker_collinear() {
        let line = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.01),
            Point::new(10.0, 0.0),
        ];
        let reduced = douglas_peucker(&line, 0.5);
        assert_eq!(reduced.len(), 2);

        // Below-tolerance deviation keeps the midpoint
        let kept = douglas_peucker(&line, 0.001);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_adaptive_simplify_degenerate_unchanged() {
        let two = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(
            adaptive_simplify(&two, 20, false, &SimplifySettings::default()),
            two
        );
    }

    #[test]
    fn test_adaptive_simplify_under_target_unchanged() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let result = adaptive_simplify(&square, 20, true, &SimplifySettings::default());
        assert_eq!(result, square);
    }

    #[test]
    fn test_adaptive_simplify_reduces_towards_target() {
        let contour = dense_circle(200, 50.0);
        let settings = SimplifySettings::default();
        let result = adaptive_simplify(&contour, 20, true, &settings);

        assert!(result.len() < contour.len());
        assert!(result.len() >= 3);
        // Near the budget: the search accepts the closest achievable count
        assert!(
            result.len() <= 40,
            "expected a strong reduction, got {} points",
            result.len()
        );
    }

    #[test]
    fn test_adaptive_simplify_preserves_endpoints() {
        let contour = dense_circle(150, 30.0);
        let result = adaptive_simplify(&contour, 15, true, &SimplifySettings::default());

        assert_eq!(result[0], contour[0]);
        assert_eq!(result[result.len() - 1], contour[contour.len() - 1]);
    }

    #[test]
    fn test_adaptive_simplify_idempotent() {
        let contour = dense_circle(200, 50.0);
        let settings = SimplifySettings::default();

        let once = adaptive_simplify(&contour, 20, true, &settings);
        let twice = adaptive_simplify(&once, 20, true, &settings);

        // Second pass sees a sequence already at/under target and returns it
        assert_eq!(once, twice);
    }

    #[test]
    fn test_adaptive_simplify_area_bounded() {
        use crate::geometry::polygon_area;

        let contour = dense_circle(300, 50.0);
        let original_area = polygon_area(&contour);
        let result = adaptive_simplify(&contour, 20, true, &SimplifySettings::default());
        let reduced_area = polygon_area(&result);

        let relative_error = (original_area - reduced_area).abs() / original_area;
        assert!(
            relative_error < 0.2,
            "area drifted {:.1}% after simplification",
            relative_error * 100.0
        );
    }

    #[test]
    fn test_adaptive_simplify_closed_floor() {
        // Tiny target still leaves a drawable closed outline
        let contour = dense_circle(100, 40.0);
        let result = adaptive_simplify(&contour, 3, true, &SimplifySettings::default());
        assert!(result.len() >= 3);
    }
}
