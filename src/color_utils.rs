//! Color utility functions for annotation overlays.
//!
//! This module provides color conversion and generation utilities so the
//! same label always renders in the same color, without any stored palette.

use crate::constants::annotation;

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Deterministic RGBA color for a label.
///
/// Hashes the label onto the hue wheel using the golden angle so nearby
/// labels get well-separated colors.
pub fn color_for_label(label: &str) -> [f32; 4] {
    let index = label
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let hue = (index as f32 * annotation::GOLDEN_ANGLE) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    [r, g, b, annotation::DEFAULT_ALPHA]
}
