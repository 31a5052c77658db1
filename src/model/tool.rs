//! Annotation tool selectors.

/// Tools available to the engine.
///
/// `Pointer` and `Ai` select behavior rather than a stored shape type: the
/// pointer pans, selects, and drags control points, and an AI click
/// materializes as a polygon annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Selection, control-point editing, and viewport panning
    #[default]
    Pointer,
    /// Axis-aligned rectangle drawing
    Rectangle,
    /// Circle drawing (center plus edge)
    Circle,
    /// Axis-aligned ellipse drawing
    Ellipse,
    /// Single point marker
    Point,
    /// Closed polygon, vertex by vertex
    Polygon,
    /// Open polyline, vertex by vertex
    Polyline,
    /// Point-prompt segmentation via the external service
    Ai,
}

impl Tool {
    /// Get the display name for this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pointer => "Pointer",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Ellipse => "Ellipse",
            Tool::Point => "Point",
            Tool::Polygon => "Polygon",
            Tool::Polyline => "Polyline",
            Tool::Ai => "AI Segment",
        }
    }

    /// Get all available tools.
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Pointer,
            Tool::Rectangle,
            Tool::Circle,
            Tool::Ellipse,
            Tool::Point,
            Tool::Polygon,
            Tool::Polyline,
            Tool::Ai,
        ]
    }

    /// Check if this tool draws a shape directly (not Pointer or Ai).
    pub fn is_drawing_tool(&self) -> bool {
        !matches!(self, Tool::Pointer | Tool::Ai)
    }

    /// Check if this tool collects vertices click by click.
    pub fn is_vertex_tool(&self) -> bool {
        matches!(self, Tool::Polygon | Tool::Polyline)
    }
}
