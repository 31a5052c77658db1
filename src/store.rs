//! Annotation storage and selection.
//!
//! The store exclusively owns the annotation collection. Every mutation
//! goes through its methods, which is what upholds the selection invariant
//! (zero or one selected annotation) and keeps z-order meaningful: later
//! annotations render on top and win hit-testing ties.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::Annotation;

/// Storage for the annotations on a single image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationStore {
    /// All annotations in creation order (render order, back to front).
    annotations: Vec<Annotation>,
    /// Dirty flag - set when annotations or selection changes.
    /// Used to avoid rebuilding the overlay scene every frame.
    #[serde(skip)]
    dirty: bool,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            dirty: true, // Start dirty so the first scene build happens
        }
    }

    /// Check if the store has been modified since last clear_dirty().
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Call after rebuilding the scene.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Mark the store as dirty.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Add an annotation on top of the stack and return its id.
    pub fn add(&mut self, annotation: Annotation) -> String {
        let id = annotation.id.clone();
        self.annotations.push(annotation);
        self.mark_dirty();
        id
    }

    /// Remove an annotation by id.
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        self.mark_dirty();
        Some(self.annotations.remove(index))
    }

    /// Remove the selected annotation, if any.
    pub fn remove_selected(&mut self) -> Option<Annotation> {
        let id = self.selected_id()?.to_string();
        self.remove(&id)
    }

    /// Get an annotation by id.
    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Get a mutable reference to an annotation by id.
    ///
    /// The store is marked dirty on the assumption the caller mutates.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        self.mark_dirty();
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    /// Get all annotations in render order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Get the number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Clear all annotations.
    pub fn clear(&mut self) {
        if !self.annotations.is_empty() {
            self.mark_dirty();
        }
        self.annotations.clear();
    }

    /// Select one annotation by id, deselecting every other.
    ///
    /// Passing an unknown id leaves nothing selected.
    pub fn select_only(&mut self, id: &str) {
        for ann in &mut self.annotations {
            ann.selected = ann.id == id;
        }
        self.mark_dirty();
    }

    /// Deselect all annotations.
    pub fn deselect_all(&mut self) {
        for ann in &mut self.annotations {
            ann.selected = false;
        }
        self.mark_dirty();
    }

    /// Toggle selection of one annotation: selecting it deselects the rest,
    /// clicking the already-selected one leaves nothing selected.
    pub fn toggle_select(&mut self, id: &str) {
        let was_selected = self.get(id).is_some_and(|a| a.selected);
        if was_selected {
            self.deselect_all();
        } else {
            self.select_only(id);
        }
    }

    /// The selected annotation, if any.
    pub fn selected(&self) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.selected)
    }

    /// The selected annotation's id, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|a| a.id.as_str())
    }

    /// Topmost completed annotation whose body contains the point.
    pub fn hit_test(&self, point: &Point, point_hit_radius: f32) -> Option<&Annotation> {
        self.annotations
            .iter()
            .rev()
            .find(|ann| ann.contains(point, point_hit_radius))
    }
}
