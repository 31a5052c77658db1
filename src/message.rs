//! Engine message types.
//!
//! Inbound [`Message`]s are the only way state changes: the shell translates
//! raw UI events into messages and feeds them to the engine's reducer, which
//! always operates on current state. Outbound [`EngineEvent`]s are what the
//! shell subscribes to: status text, loading state, segmentation requests to
//! perform, and export payloads to persist.

use crate::export::ExportPayload;
use crate::geometry::Point;
use crate::model::Tool;
use crate::segmentation::{PointPrompt, SegmentationResponse};

/// Pointer buttons the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Draw, select, drag
    Primary,
    /// Vertex removal on a selected polygon/polyline
    Secondary,
}

/// Editing and hotkey keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Cancel the in-progress shape
    Escape,
    /// Force-complete the in-progress polygon/polyline
    Enter,
    /// Remove the last vertex of the in-progress polygon/polyline
    Backspace,
    /// Delete the selected annotation
    Delete,
    /// Tool hotkey character
    Char(char),
}

/// Messages that drive the engine's reducer.
///
/// Pointer positions are in device coordinates; the engine converts through
/// its viewport so the shell never deals with logical image space.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Pointer input
    /// Pointer button pressed at a device position
    PointerDown {
        /// Position on the rendering surface
        device: Point,
        /// Which button went down
        button: PointerButton,
    },
    /// Pointer moved to a device position (button state unchanged)
    PointerMove {
        /// Position on the rendering surface
        device: Point,
    },
    /// Primary pointer button released at a device position
    PointerUp {
        /// Position on the rendering surface
        device: Point,
    },
    /// Wheel scrolled over the surface
    Wheel {
        /// Cursor position the zoom centers on
        device: Point,
        /// Positive zooms in, negative zooms out
        delta_sign: f32,
    },

    // Keyboard input
    /// Key pressed
    KeyPressed(Key),

    // Tool and view control
    /// Tool selected from the toolbar
    ToolSelected(Tool),
    /// Rendering surface resized; refit the image
    ContainerResized {
        /// New surface width in device pixels
        width: f32,
        /// New surface height in device pixels
        height: f32,
    },

    // Annotation metadata
    /// Label assigned to an annotation by id
    LabelChanged {
        /// Target annotation id
        id: String,
        /// New label text
        label: String,
    },

    // Segmentation outcome fed back by the shell
    /// The awaited segmentation call succeeded
    SegmentationCompleted(SegmentationResponse),
    /// The awaited segmentation call failed; payload is the error text
    SegmentationFailed(String),

    // Export
    /// Export the selected annotation
    ExportRequested,
}

/// Outbound events for the embedding shell.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Transient human-readable status message
    Status(String),
    /// User-visible error message
    Error(String),
    /// Segmentation loading indicator changed
    LoadingChanged(bool),
    /// The annotation collection changed; sidebar lists should refresh
    AnnotationsChanged,
    /// Selection moved to this annotation id (None when nothing is selected)
    SelectionChanged(Option<String>),
    /// Perform this segmentation request and feed the outcome back
    SegmentationStarted(PointPrompt),
    /// Export payload ready for the external persister
    ExportReady(ExportPayload),
}
