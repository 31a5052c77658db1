//! Engine constants for consistent behavior across components.
//!
//! This module centralizes the tuning values used as defaults by the
//! engine configuration: thresholds, zoom limits, simplification bounds,
//! and segmentation request settings.

/// Viewport and zoom constants.
pub mod viewport {
    /// Multiplicative zoom step per wheel notch
    pub const ZOOM_FACTOR: f32 = 1.2;
    /// Maximum viewport scale
    pub const SCALE_MAX: f32 = 20.0;
    /// Minimum viewport scale
    pub const SCALE_MIN: f32 = 0.05;
    /// Margin applied by reset-to-fit so the image does not touch the edges
    pub const FIT_MARGIN: f32 = 0.95;
}

/// Interaction threshold constants.
pub mod threshold {
    /// Polygon close distance around the first vertex (device pixels, zoom independent)
    pub const POLYGON_CLOSE: f32 = 15.0;
    /// Control point hit radius (device pixels, scaled into image space by zoom)
    pub const HANDLE_HIT_RADIUS: f32 = 10.0;
    /// Hit radius for point annotation bodies (device pixels, scaled by zoom)
    pub const POINT_HIT_RADIUS: f32 = 10.0;
    /// Movement below this distance is a click, not a drag (device pixels)
    pub const MIN_DRAG_DISTANCE: f32 = 3.0;
    /// Minimum width/height for a finalized rectangle or ellipse (image pixels)
    pub const MIN_SHAPE_SIZE: f32 = 1.0;
    /// Minimum radius for a finalized circle (image pixels)
    pub const MIN_CIRCLE_RADIUS: f32 = 1.0;
}

/// Polygon simplification constants.
pub mod simplify {
    /// Lower bound of the tolerance binary search (percent of perimeter)
    pub const MIN_TOLERANCE: f32 = 0.5;
    /// Upper bound of the tolerance binary search (percent of perimeter)
    pub const MAX_TOLERANCE: f32 = 5.0;
    /// Iteration cap for the tolerance binary search
    pub const SEARCH_ITERATIONS: u32 = 16;
    /// Default vertex budget for adaptive simplification
    pub const DEFAULT_TARGET: usize = 20;
    /// Dot product below which a preview corner is kept (~18 degree turn)
    pub const PREVIEW_CORNER_DOT: f32 = 0.95;
    /// Preview keeps points farther than this multiple of the tolerance base
    pub const PREVIEW_DISTANCE_FACTOR: f32 = 5.0;
    /// Default tolerance base for preview simplification (image pixels)
    pub const PREVIEW_TOLERANCE_BASE: f32 = 2.0;
}

/// Segmentation request constants.
pub mod segmentation {
    /// Request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 45;
    /// Smallest vertex budget the service accepts
    pub const TARGET_POINTS_MIN: u32 = 10;
    /// Largest vertex budget the service accepts
    pub const TARGET_POINTS_MAX: u32 = 50;
    /// Request path on the service, relative to the base URL
    pub const SEGMENT_PATH: &str = "/api/segment/";
}

/// Annotation rendering and labeling constants.
pub mod annotation {
    /// Label assigned to annotations created without one
    pub const DEFAULT_LABEL: &str = "unlabeled";
    /// Vertex count used when outlining circles and ellipses for export
    pub const OUTLINE_SEGMENTS: usize = 32;
    /// Overlay line width (device pixels)
    pub const LINE_WIDTH: f32 = 2.0;
    /// Overlay line width for the selected annotation (device pixels)
    pub const SELECTED_LINE_WIDTH: f32 = 3.0;
    /// Golden angle for label color generation (degrees)
    pub const GOLDEN_ANGLE: f32 = 137.5;
    /// Overlay color alpha
    pub const DEFAULT_ALPHA: f32 = 0.7;
    /// In-progress preview color alpha
    pub const PREVIEW_ALPHA: f32 = 0.5;
}
