//! Engine configuration.
//!
//! Every empirically chosen value in the engine (zoom steps, hit radii, the
//! simplification tolerance search) lives here as documented configuration
//! rather than a hard-coded magic number. Defaults come from
//! [`crate::constants`]; embedding shells can serialize the whole thing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{segmentation, simplify, threshold};
use crate::simplify::SimplifySettings;
use crate::viewport::ViewportTuning;

/// Errors for out-of-range configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value that must be strictly positive is not
    #[error("Configuration value '{name}' must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A (min, max) pair is inverted or collapsed
    #[error("Configuration range '{name}' is invalid: min {min} >= max {max}")]
    InvalidRange {
        /// Name of the offending range
        name: &'static str,
        /// Lower bound as configured
        min: f32,
        /// Upper bound as configured
        max: f32,
    },

    /// Vertex budget outside what the segmentation service accepts
    #[error("Target point budget {value} outside accepted range [{min}, {max}]")]
    TargetPointsOutOfRange {
        /// The rejected budget
        value: usize,
        /// Smallest accepted budget
        min: usize,
        /// Largest accepted budget
        max: usize,
    },
}

/// Tuning values for the annotation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Zoom factor, scale clamp, and fit margin
    pub viewport: ViewportTuning,

    /// Adaptive simplification tolerance search
    pub simplify: SimplifySettings,

    /// Vertex budget for AI-returned contours
    pub target_points: usize,

    /// Tolerance base for the preview simplification pass (image pixels)
    pub preview_tolerance_base: f32,

    /// Polygon close distance around the first vertex (device pixels)
    pub polygon_close_radius: f32,

    /// Control point grab radius (device pixels)
    pub handle_hit_radius: f32,

    /// Hit radius for point annotation bodies (device pixels)
    pub point_hit_radius: f32,

    /// Movement below this distance counts as a click (device pixels)
    pub min_drag_distance: f32,

    /// Segmentation request timeout in seconds
    pub segmentation_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportTuning::default(),
            simplify: SimplifySettings::default(),
            target_points: simplify::DEFAULT_TARGET,
            preview_tolerance_base: simplify::PREVIEW_TOLERANCE_BASE,
            polygon_close_radius: threshold::POLYGON_CLOSE,
            handle_hit_radius: threshold::HANDLE_HIT_RADIUS,
            point_hit_radius: threshold::POINT_HIT_RADIUS,
            min_drag_distance: threshold::MIN_DRAG_DISTANCE,
            segmentation_timeout_secs: segmentation::TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inverted ranges and non-positive thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.zoom_factor <= 1.0 {
            return Err(ConfigError::NonPositive {
                name: "viewport.zoom_factor (must exceed 1.0)",
                value: self.viewport.zoom_factor,
            });
        }
        if self.viewport.min_scale <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "viewport.min_scale",
                value: self.viewport.min_scale,
            });
        }
        if self.viewport.min_scale >= self.viewport.max_scale {
            return Err(ConfigError::InvalidRange {
                name: "viewport.scale",
                min: self.viewport.min_scale,
                max: self.viewport.max_scale,
            });
        }
        if self.viewport.fit_margin <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "viewport.fit_margin",
                value: self.viewport.fit_margin,
            });
        }

        if self.simplify.min_tolerance <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "simplify.min_tolerance",
                value: self.simplify.min_tolerance,
            });
        }
        if self.simplify.min_tolerance >= self.simplify.max_tolerance {
            return Err(ConfigError::InvalidRange {
                name: "simplify.tolerance",
                min: self.simplify.min_tolerance,
                max: self.simplify.max_tolerance,
            });
        }

        let min = segmentation::TARGET_POINTS_MIN as usize;
        let max = segmentation::TARGET_POINTS_MAX as usize;
        if self.target_points < min || self.target_points > max {
            return Err(ConfigError::TargetPointsOutOfRange {
                value: self.target_points,
                min,
                max,
            });
        }

        for (name, value) in [
            ("preview_tolerance_base", self.preview_tolerance_base),
            ("polygon_close_radius", self.polygon_close_radius),
            ("handle_hit_radius", self.handle_hit_radius),
            ("point_hit_radius", self.point_hit_radius),
            ("min_drag_distance", self.min_drag_distance),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.segmentation_timeout_secs == 0 {
            return Err(ConfigError::NonPositive {
                name: "segmentation_timeout_secs",
                value: 0.0,
            });
        }

        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_tolerance_range_rejected() {
        let mut config = EngineConfig::default();
        config.simplify.min_tolerance = 10.0;
        config.simplify.max_tolerance = 1.0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "simplify.tolerance", .. })
        ));
    }

    #[test]
    fn test_target_points_bounds() {
        let config = EngineConfig {
            target_points: 5,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TargetPointsOutOfRange { value: 5, .. })
        ));

        let config = EngineConfig {
            target_points: 50,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let config = EngineConfig {
            polygon_close_radius: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "polygon_close_radius", .. })
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default();
        let json = config.to_json().expect("serialize");
        let restored = EngineConfig::from_json(&json).expect("deserialize");
        assert_eq!(config, restored);
    }

    #[test]
    fn test_from_json_validates() {
        let mut config = EngineConfig::default();
        config.target_points = 500;
        let json = serde_json::to_string(&config).unwrap();

        assert!(EngineConfig::from_json(&json).is_err());
    }
}
