//! Tool hotkeys.
//!
//! Single-character bindings for tool switching. Key characters reach the
//! engine through the same message type as the editing keys, so the shell
//! only forwards keyboard input and the table here decides what it means.

use serde::{Deserialize, Serialize};

use crate::model::Tool;

/// Character-to-tool hotkey table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Hotkey for the pointer tool
    pub pointer: char,
    /// Hotkey for the rectangle tool
    pub rectangle: char,
    /// Hotkey for the circle tool
    pub circle: char,
    /// Hotkey for the ellipse tool
    pub ellipse: char,
    /// Hotkey for the point tool
    pub point: char,
    /// Hotkey for the polygon tool
    pub polygon: char,
    /// Hotkey for the polyline tool
    pub polyline: char,
    /// Hotkey for the AI segmentation tool
    pub ai: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pointer: 'v',
            rectangle: 'r',
            circle: 'c',
            ellipse: 'e',
            point: 't',
            polygon: 'p',
            polyline: 'l',
            ai: 'a',
        }
    }
}

impl KeyBindings {
    /// Create bindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tool that corresponds to a key press, if any.
    ///
    /// Matching is case-insensitive so bindings work with Shift held.
    pub fn tool_for_key(&self, key: char) -> Option<Tool> {
        let key = key.to_ascii_lowercase();
        Tool::all()
            .iter()
            .copied()
            .find(|tool| self.key_for_tool(*tool) == key)
    }

    /// Get the hotkey for a specific tool.
    pub fn key_for_tool(&self, tool: Tool) -> char {
        match tool {
            Tool::Pointer => self.pointer,
            Tool::Rectangle => self.rectangle,
            Tool::Circle => self.circle,
            Tool::Ellipse => self.ellipse,
            Tool::Point => self.point,
            Tool::Polygon => self.polygon,
            Tool::Polyline => self.polyline,
            Tool::Ai => self.ai,
        }
    }

    /// Set the hotkey for a tool.
    pub fn set_key(&mut self, tool: Tool, key: char) {
        let key = key.to_ascii_lowercase();
        match tool {
            Tool::Pointer => self.pointer = key,
            Tool::Rectangle => self.rectangle = key,
            Tool::Circle => self.circle = key,
            Tool::Ellipse => self.ellipse = key,
            Tool::Point => self.point = key,
            Tool::Polygon => self.polygon = key,
            Tool::Polyline => self.polyline = key,
            Tool::Ai => self.ai = key,
        }
    }

    /// Check whether a key is already bound to another tool.
    ///
    /// Returns the conflicting tool's display name, if any.
    pub fn key_conflict(&self, key: char, exclude: Option<Tool>) -> Option<&'static str> {
        let key = key.to_ascii_lowercase();
        Tool::all()
            .iter()
            .copied()
            .filter(|tool| Some(*tool) != exclude)
            .find(|tool| self.key_for_tool(*tool) == key)
            .map(|tool| tool.name())
    }
}
