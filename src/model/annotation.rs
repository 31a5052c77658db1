//! The annotation entity.

use serde::{Deserialize, Serialize};

use crate::constants::annotation as defaults;
use crate::geometry::Point;
use crate::model::provenance;
use crate::model::shape::Shape;

/// A labeled geometric region or marker over the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique id carrying provenance (see [`crate::model::provenance`])
    pub id: String,
    /// Shape geometry in logical image coordinates
    pub shape: Shape,
    /// False while the shape is still being drawn
    pub completed: bool,
    /// Free-form or taxonomy label
    pub label: String,
    /// At most one annotation is selected at a time; the store enforces this
    pub selected: bool,
}

impl Annotation {
    /// Create an annotation with an explicit id, still in progress.
    pub fn new(id: impl Into<String>, shape: Shape) -> Self {
        Self {
            id: id.into(),
            shape,
            completed: false,
            label: defaults::DEFAULT_LABEL.to_string(),
            selected: false,
        }
    }

    /// Create a hand-drawn annotation with a freshly minted `manual-` id.
    pub fn manual(shape: Shape) -> Self {
        Self::new(provenance::mint_manual_id(), shape)
    }

    /// Builder-style completion flag.
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Builder-style label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Whether the shape satisfies its completion rule right now.
    pub fn can_complete(&self) -> bool {
        self.shape.meets_completion_rule()
    }

    /// Record a hand-edit: AI ids gain `-modified` once, manual ids stay.
    pub fn mark_edited(&mut self) {
        let updated = provenance::edited_id(Some(&self.id));
        if updated != self.id {
            log::debug!("Annotation {} relabeled {} after edit", self.id, updated);
            self.id = updated;
        }
    }

    /// Hit-test the annotation body. In-progress annotations are not
    /// hit-testable; they are manipulated through the drawing state instead.
    pub fn contains(&self, point: &Point, point_hit_radius: f32) -> bool {
        self.completed && self.shape.contains(point, point_hit_radius)
    }
}
