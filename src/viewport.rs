//! Viewport transform between device and logical image coordinates.
//!
//! The viewport owns a scale and a device-space offset. Zooming is centered
//! on the cursor: the logical point under the pointer stays fixed across a
//! zoom step. All functions are pure arithmetic; the engine swaps in the
//! returned viewport.

use serde::{Deserialize, Serialize};

use crate::constants::viewport as defaults;
use crate::geometry::Point;

/// Tuning for zoom and fit behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTuning {
    /// Multiplicative zoom step per wheel notch
    pub zoom_factor: f32,
    /// Smallest allowed scale
    pub min_scale: f32,
    /// Largest allowed scale
    pub max_scale: f32,
    /// Fraction of the container left around the image by reset-to-fit
    pub fit_margin: f32,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            zoom_factor: defaults::ZOOM_FACTOR,
            min_scale: defaults::SCALE_MIN,
            max_scale: defaults::SCALE_MAX,
            fit_margin: defaults::FIT_MARGIN,
        }
    }
}

/// Pan/zoom state mapping logical image coordinates onto the device surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Device pixels per logical pixel
    pub scale: f32,
    /// Device-space translation of the image origin
    pub offset: Point,
}

impl Viewport {
    /// Create a viewport with the given scale and offset.
    pub fn new(scale: f32, offset: Point) -> Self {
        Self { scale, offset }
    }

    /// Identity viewport (scale 1, no offset).
    pub fn identity() -> Self {
        Self::new(1.0, Point::new(0.0, 0.0))
    }

    /// Map a device point into logical image coordinates.
    pub fn to_logical(&self, device: Point) -> Point {
        Point::new(
            (device.x - self.offset.x) / self.scale,
            (device.y - self.offset.y) / self.scale,
        )
    }

    /// Map a logical image point into device coordinates.
    pub fn to_device(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.scale + self.offset.x,
            logical.y * self.scale + self.offset.y,
        )
    }

    /// Map a device point into normalized image coordinates, clamped to [0,1].
    pub fn to_normalized(&self, device: Point, image_width: f32, image_height: f32) -> Point {
        let logical = self.to_logical(device);
        Point::new(
            (logical.x / image_width).clamp(0.0, 1.0),
            (logical.y / image_height).clamp(0.0, 1.0),
        )
    }

    /// Zoom by one step around a device point.
    ///
    /// Positive `delta_sign` zooms in, negative zooms out. The new scale is
    /// clamped to the tuning bounds, and the offset is recomputed so the
    /// logical point under `device` is the same before and after.
    pub fn zoom_at(&self, device: Point, delta_sign: f32, tuning: &ViewportTuning) -> Viewport {
        let factor = if delta_sign > 0.0 {
            tuning.zoom_factor
        } else {
            1.0 / tuning.zoom_factor
        };
        let new_scale = (self.scale * factor).clamp(tuning.min_scale, tuning.max_scale);

        // Logical point under the cursor before the zoom
        let anchor = self.to_logical(device);

        // New offset keeps that point under the cursor
        let offset = Point::new(
            device.x - anchor.x * new_scale,
            device.y - anchor.y * new_scale,
        );

        Viewport::new(new_scale, offset)
    }

    /// Apply a device-space pan delta.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Viewport {
        Viewport::new(self.scale, self.offset.translated(dx, dy))
    }

    /// Fit the image inside a container and center it.
    ///
    /// Picks the largest scale that shows the whole image with the fit
    /// margin applied, capped at 1.0 so the image is never upscaled past
    /// native resolution.
    pub fn reset_to_fit(
        container_width: f32,
        container_height: f32,
        image_width: f32,
        image_height: f32,
        tuning: &ViewportTuning,
    ) -> Viewport {
        if image_width <= 0.0 || image_height <= 0.0 {
            return Viewport::identity();
        }

        let fit = (container_width / image_width).min(container_height / image_height);
        let scale = (fit * tuning.fit_margin).min(1.0);
        let offset = Point::new(
            (container_width - image_width * scale) / 2.0,
            (container_height - image_height * scale) / 2.0,
        );

        Viewport::new(scale, offset)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_identity_roundtrip() {
        let v = Viewport::identity();
        let p = Point::new(42.0, 17.0);
        let there = v.to_device(p);
        let back = v.to_logical(there);

        assert!(approx_eq(back.x, p.x));
        assert!(approx_eq(back.y, p.y));
    }

    #[test]
    fn test_transform_with_scale_and_offset() {
        let v = Viewport::new(2.0, Point::new(10.0, 20.0));

        let device = v.to_device(Point::new(5.0, 5.0));
        assert!(approx_eq(device.x, 20.0));
        assert!(approx_eq(device.y, 30.0));

        let logical = v.to_logical(Point::new(20.0, 30.0));
        assert!(approx_eq(logical.x, 5.0));
        assert!(approx_eq(logical.y, 5.0));
    }

    #[test]
    fn test_zoom_at_preserves_cursor_point() {
        // The logical point under the cursor must not move across a zoom
        let tuning = ViewportTuning::default();
        let v = Viewport::new(1.0, Point::new(50.0, 30.0));
        let cursor = Point::new(150.0, 120.0);

        let before = v.to_logical(cursor);
        let zoomed_in = v.zoom_at(cursor, 1.0, &tuning);
        let after_in = zoomed_in.to_logical(cursor);

        assert!(approx_eq(before.x, after_in.x));
        assert!(approx_eq(before.y, after_in.y));

        let zoomed_out = zoomed_in.zoom_at(cursor, -1.0, &tuning);
        let after_out = zoomed_out.to_logical(cursor);

        assert!(approx_eq(before.x, after_out.x));
        assert!(approx_eq(before.y, after_out.y));
    }

    #[test]
    fn test_zoom_at_changes_scale_by_factor() {
        let tuning = ViewportTuning::default();
        let v = Viewport::identity();

        let zoomed = v.zoom_at(Point::new(0.0, 0.0), 1.0, &tuning);
        assert!(approx_eq(zoomed.scale, tuning.zoom_factor));

        let back = zoomed.zoom_at(Point::new(0.0, 0.0), -1.0, &tuning);
        assert!(approx_eq(back.scale, 1.0));
    }

    #[test]
    fn test_zoom_at_clamps_scale() {
        let tuning = ViewportTuning::default();

        let near_max = Viewport::new(tuning.max_scale * 0.99, Point::new(0.0, 0.0));
        let zoomed = near_max.zoom_at(Point::new(100.0, 100.0), 1.0, &tuning);
        assert!(approx_eq(zoomed.scale, tuning.max_scale));

        let near_min = Viewport::new(tuning.min_scale * 1.01, Point::new(0.0, 0.0));
        let shrunk = near_min.zoom_at(Point::new(100.0, 100.0), -1.0, &tuning);
        assert!(approx_eq(shrunk.scale, tuning.min_scale));
    }

    #[test]
    fn test_reset_to_fit_centers_image() {
        let tuning = ViewportTuning {
            fit_margin: 1.0,
            ..ViewportTuning::default()
        };
        let v = Viewport::reset_to_fit(1000.0, 800.0, 2000.0, 1000.0, &tuning);

        // Width is the limiting dimension: scale 0.5
        assert!(approx_eq(v.scale, 0.5));
        assert!(approx_eq(v.offset.x, 0.0));
        assert!(approx_eq(v.offset.y, 150.0));
    }

    #[test]
    fn test_reset_to_fit_never_upscales() {
        let tuning = ViewportTuning {
            fit_margin: 1.0,
            ..ViewportTuning::default()
        };
        // Small image in a huge container stays at native 1:1
        let v = Viewport::reset_to_fit(4000.0, 4000.0, 100.0, 100.0, &tuning);

        assert!(approx_eq(v.scale, 1.0));
        assert!(approx_eq(v.offset.x, 1950.0));
        assert!(approx_eq(v.offset.y, 1950.0));
    }

    #[test]
    fn test_reset_to_fit_applies_margin() {
        let tuning = ViewportTuning {
            fit_margin: 0.9,
            ..ViewportTuning::default()
        };
        let v = Viewport::reset_to_fit(1000.0, 1000.0, 2000.0, 2000.0, &tuning);
        assert!(approx_eq(v.scale, 0.45));
    }

    #[test]
    fn test_to_normalized_clamps() {
        let v = Viewport::new(1.0, Point::new(0.0, 0.0));

        let inside = v.to_normalized(Point::new(50.0, 25.0), 100.0, 100.0);
        assert!(approx_eq(inside.x, 0.5));
        assert!(approx_eq(inside.y, 0.25));

        let outside = v.to_normalized(Point::new(-10.0, 250.0), 100.0, 100.0);
        assert!(approx_eq(outside.x, 0.0));
        assert!(approx_eq(outside.y, 1.0));
    }

    #[test]
    fn test_pan_by() {
        let v = Viewport::new(2.0, Point::new(10.0, 20.0));
        let panned = v.pan_by(5.0, -10.0);

        assert_eq!(panned.scale, 2.0);
        assert!(approx_eq(panned.offset.x, 15.0));
        assert!(approx_eq(panned.offset.y, 10.0));
    }
}
