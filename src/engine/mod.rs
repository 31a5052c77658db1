//! The annotation engine: tool state machine and reducer.
//!
//! All mutation flows through [`AnnotationEngine::update`], which applies one
//! inbound [`Message`] to current state and returns the outbound
//! [`EngineEvent`]s the shell should react to. The reducer is synchronous;
//! the one suspension point in the system (the segmentation network call)
//! lives outside it: an AI click emits `SegmentationStarted` and the shell
//! feeds the outcome back as a message.
//!
//! Input errors (closing a short polygon, deleting with nothing selected)
//! never escape as `Err`; they degrade to no-ops with a status event.

use crate::asset::ImageAsset;
use crate::config::{ConfigError, EngineConfig};
use crate::constants::threshold;
use crate::export;
use crate::geometry::Point;
use crate::keybindings::KeyBindings;
use crate::message::{EngineEvent, Key, Message, PointerButton};
use crate::model::{Annotation, Shape, Tool};
use crate::render::{self, DrawingPreview, Scene};
use crate::segmentation::{self, PointPrompt, SegmentationResponse};
use crate::store::AnnotationStore;
use crate::viewport::Viewport;


/// Where the state machine currently is between pointer events.
#[derive(Debug, Clone, PartialEq)]
enum EditState {
    /// Nothing in flight
    Idle,
    /// Dragging out a rectangle, circle, or ellipse from its anchor
    DrawingShape { id: String, anchor: Point },
    /// Collecting polygon/polyline vertices click by click
    DrawingPolygon { id: String, cursor: Option<Point> },
    /// Pointer went down on a control point; not yet moved far enough to drag
    PotentialDrag {
        id: String,
        index: usize,
        start_device: Point,
    },
    /// Relocating one control point of the selected annotation
    DraggingHandle { id: String, index: usize },
    /// Click-dragging the viewport with the pointer tool
    Panning { last_device: Point },
}

/// The interactive annotation engine.
///
/// Owns the annotation store, the viewport, the active tool, and the
/// in-progress edit state. The embedding shell feeds it messages and draws
/// the [`Scene`] it builds.
pub struct AnnotationEngine {
    config: EngineConfig,
    keybindings: KeyBindings,
    store: AnnotationStore,
    viewport: Viewport,
    tool: Tool,
    edit_state: EditState,
    image: Option<ImageAsset>,
    container: (f32, f32),
    loading: bool,
}

impl Default for AnnotationEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            keybindings: KeyBindings::default(),
            store: AnnotationStore::new(),
            viewport: Viewport::identity(),
            tool: Tool::default(),
            edit_state: EditState::Idle,
            image: None,
            container: (0.0, 0.0),
            loading: false,
        }
    }
}

impl AnnotationEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    // ========================================================================
    // Accessors for the embedding shell
    // ========================================================================

    /// The annotation store (read-only; mutate through messages).
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Current viewport transform.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Currently selected tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether a segmentation request is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tool hotkey table.
    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    /// Mutable hotkey table, for rebinding from a settings surface.
    pub fn keybindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.keybindings
    }

    /// The loaded image, if any.
    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    /// Build the display list for the current state.
    pub fn scene(&self) -> Scene {
        let preview = match &self.edit_state {
            EditState::DrawingPolygon { id, cursor } => Some(DrawingPreview {
                annotation_id: id,
                cursor: *cursor,
            }),
            _ => None,
        };
        render::build_scene(&self.viewport, self.image.as_ref(), &self.store, preview)
    }

    // ========================================================================
    // Image lifecycle
    // ========================================================================

    /// Load a new image: clears the store and fits the viewport.
    pub fn set_image(&mut self, asset: ImageAsset) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        log::info!(
            "Image '{}' loaded at {:?}",
            asset.image_id(),
            asset.dimensions()
        );

        self.edit_state = EditState::Idle;
        self.store.clear();
        self.fit_viewport(&asset);
        self.image = Some(asset);

        events.push(EngineEvent::AnnotationsChanged);
        events.push(EngineEvent::SelectionChanged(None));
        events
    }

    fn fit_viewport(&mut self, asset: &ImageAsset) {
        let (cw, ch) = self.container;
        if cw > 0.0 && ch > 0.0 {
            self.viewport = Viewport::reset_to_fit(
                cw,
                ch,
                asset.width(),
                asset.height(),
                &self.config.viewport,
            );
        }
    }

    // ========================================================================
    // Reducer
    // ========================================================================

    /// Apply one message to current state.
    pub fn update(&mut self, message: Message) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        match message {
            Message::PointerDown { device, button } => {
                self.on_pointer_down(device, button, &mut events);
            }
            Message::PointerMove { device } => {
                self.on_pointer_move(device, &mut events);
            }
            Message::PointerUp { device } => {
                self.on_pointer_up(device, &mut events);
            }
            Message::Wheel { device, delta_sign } => {
                self.viewport = self
                    .viewport
                    .zoom_at(device, delta_sign, &self.config.viewport);
            }
            Message::KeyPressed(key) => {
                self.on_key(key, &mut events);
            }
            Message::ToolSelected(tool) => {
                self.select_tool(tool, &mut events);
            }
            Message::ContainerResized { width, height } => {
                self.container = (width, height);
                if let Some(asset) = self.image.take() {
                    self.fit_viewport(&asset);
                    self.image = Some(asset);
                }
            }
            Message::LabelChanged { id, label } => {
                if let Some(ann) = self.store.get_mut(&id) {
                    ann.label = label;
                    events.push(EngineEvent::AnnotationsChanged);
                }
            }
            Message::SegmentationCompleted(response) => {
                self.on_segmentation_completed(&response, &mut events);
            }
            Message::SegmentationFailed(reason) => {
                log::error!("Segmentation request failed: {reason}");
                self.loading = false;
                events.push(EngineEvent::LoadingChanged(false));
                events.push(EngineEvent::Error(format!("Segmentation failed: {reason}")));
            }
            Message::ExportRequested => {
                self.on_export(&mut events);
            }
        }

        events
    }

    // ========================================================================
    // Pointer handling
    // ========================================================================

    /// Hit radii are given in device pixels; divide by the zoom so grabbing
    /// feels the same at any magnification.
    fn logical_radius(&self, device_px: f32) -> f32 {
        device_px / self.viewport.scale.max(0.1)
    }

    fn on_pointer_down(
        &mut self,
        device: Point,
        button: PointerButton,
        events: &mut Vec<EngineEvent>,
    ) {
        if self.image.is_none() {
            events.push(EngineEvent::Error("No image loaded".to_string()));
            return;
        }
        let logical = self.viewport.to_logical(device);

        if button == PointerButton::Secondary {
            if self.tool == Tool::Pointer {
                self.remove_vertex_at(&logical, events);
            }
            return;
        }

        match self.tool {
            Tool::Pointer => self.pointer_tool_down(device, &logical, events),
            Tool::Rectangle | Tool::Circle | Tool::Ellipse => {
                self.start_drag_shape(logical);
            }
            Tool::Point => self.place_point(logical, events),
            Tool::Polygon | Tool::Polyline => self.vertex_tool_click(device, logical, events),
            Tool::Ai => self.request_segmentation(device, events),
        }
    }

    fn pointer_tool_down(&mut self, device: Point, logical: &Point, events: &mut Vec<EngineEvent>) {
        // A control point of the selected annotation takes priority
        let handle_radius = self.logical_radius(self.config.handle_hit_radius);
        let grabbed = self.store.selected().filter(|a| a.completed).and_then(|ann| {
            ann.shape
                .hit_control_point(logical, handle_radius)
                .map(|index| (ann.id.clone(), index))
        });
        if let Some((id, index)) = grabbed {
            log::debug!("Potential drag on annotation {id}, control point {index}");
            self.edit_state = EditState::PotentialDrag {
                id,
                index,
                start_device: device,
            };
            return;
        }

        // Then an annotation body: toggle selection, no drag
        let body_radius = self.logical_radius(self.config.point_hit_radius);
        if let Some(hit) = self.store.hit_test(logical, body_radius) {
            let id = hit.id.clone();
            self.store.toggle_select(&id);
            let selected = self.store.selected_id().map(String::from);
            log::debug!("Selection toggled to {selected:?}");
            events.push(EngineEvent::SelectionChanged(selected));
            return;
        }

        // Empty canvas: deselect and pan
        if self.store.selected_id().is_some() {
            self.store.deselect_all();
            events.push(EngineEvent::SelectionChanged(None));
        }
        self.edit_state = EditState::Panning {
            last_device: device,
        };
    }

    fn start_drag_shape(&mut self, logical: Point) {
        let shape = match self.tool {
            Tool::Rectangle => Shape::rectangle_from_drag(logical, logical),
            Tool::Circle => Shape::circle_from_drag(logical, logical),
            Tool::Ellipse => Shape::ellipse_from_drag(logical, logical),
            _ => return,
        };
        let id = self.store.add(Annotation::manual(shape));
        log::debug!("Started drawing {} at ({:.1}, {:.1})", self.tool.name(), logical.x, logical.y);
        self.edit_state = EditState::DrawingShape { id, anchor: logical };
    }

    fn place_point(&mut self, logical: Point, events: &mut Vec<EngineEvent>) {
        let annotation = Annotation::manual(Shape::Point { position: logical }).completed(true);
        let id = self.store.add(annotation);
        self.store.select_only(&id);
        log::info!("Point annotation placed at ({:.1}, {:.1})", logical.x, logical.y);

        events.push(EngineEvent::AnnotationsChanged);
        events.push(EngineEvent::SelectionChanged(Some(id)));
        events.push(EngineEvent::Status("Point annotation added".to_string()));
    }

    fn vertex_tool_click(&mut self, device: Point, logical: Point, events: &mut Vec<EngineEvent>) {
        if let EditState::DrawingPolygon { id, .. } = self.edit_state.clone() {
            // Close by clicking near the first vertex: the radius is in
            // device pixels so the gesture is independent of zoom
            if self.tool == Tool::Polygon {
                let close_enough = self
                    .store
                    .get(&id)
                    .and_then(|ann| ann.shape.vertices())
                    .filter(|vertices| vertices.len() >= 3)
                    .map(|vertices| self.viewport.to_device(vertices[0]))
                    .is_some_and(|first| first.distance_to(&device) <= self.config.polygon_close_radius);
                if close_enough {
                    self.complete_vertex_shape(&id, events);
                    return;
                }
            }

            let count = if let Some(ann) = self.store.get_mut(&id) {
                ann.shape.push_vertex(logical);
                ann.shape.vertices().map_or(0, <[Point]>::len)
            } else {
                0
            };
            log::debug!("Vertex {count} added at ({:.1}, {:.1})", logical.x, logical.y);
            events.push(EngineEvent::AnnotationsChanged);
            events.push(EngineEvent::Status(format!("{count} vertices")));
            return;
        }

        // First click creates the annotation
        let shape = match self.tool {
            Tool::Polygon => Shape::Polygon {
                vertices: vec![logical],
            },
            _ => Shape::Polyline {
                vertices: vec![logical],
            },
        };
        let id = self.store.add(Annotation::manual(shape));
        log::info!("{} started at ({:.1}, {:.1})", self.tool.name(), logical.x, logical.y);
        self.edit_state = EditState::DrawingPolygon { id, cursor: None };
        events.push(EngineEvent::AnnotationsChanged);
        events.push(EngineEvent::Status("1 vertex".to_string()));
    }

    fn complete_vertex_shape(&mut self, id: &str, events: &mut Vec<EngineEvent>) {
        let Some(ann) = self.store.get_mut(id) else {
            self.edit_state = EditState::Idle;
            return;
        };
        if !ann.can_complete() {
            log::warn!("Cannot complete {}: too few vertices", ann.shape.kind_name());
            events.push(EngineEvent::Status(
                "Need at least 3 vertices to close a polygon".to_string(),
            ));
            return;
        }

        ann.completed = true;
        let kind = ann.shape.kind_name();
        let count = ann.shape.vertices().map_or(0, <[Point]>::len);
        self.store.select_only(id);
        self.edit_state = EditState::Idle;
        log::info!("{kind} completed with {count} vertices");

        events.push(EngineEvent::AnnotationsChanged);
        events.push(EngineEvent::SelectionChanged(Some(id.to_string())));
        events.push(EngineEvent::Status(format!(
            "{kind} completed ({count} vertices)"
        )));
    }

    fn remove_vertex_at(&mut self, logical: &Point, events: &mut Vec<EngineEvent>) {
        let handle_radius = self.logical_radius(self.config.handle_hit_radius);
        let target = self
            .store
            .selected()
            .filter(|ann| ann.completed && ann.shape.vertices().is_some())
            .and_then(|ann| {
                ann.shape
                    .hit_control_point(logical, handle_radius)
                    .map(|index| (ann.id.clone(), index))
            });
        let Some((id, index)) = target else {
            return;
        };

        let mut renamed = None;
        let mut reopened = false;
        if let Some(ann) = self.store.get_mut(&id) {
            if ann.shape.remove_vertex(index).is_none() {
                return;
            }
            ann.mark_edited();
            // A polygon that drops under 3 vertices is no longer closed
            if !ann.can_complete() {
                ann.completed = false;
                reopened = true;
            }
            if ann.id != id {
                renamed = Some(ann.id.clone());
            }
        }

        log::debug!("Removed vertex {index} from annotation {id}");
        events.push(EngineEvent::AnnotationsChanged);
        if let Some(new_id) = renamed {
            events.push(EngineEvent::SelectionChanged(Some(new_id)));
        }
        if reopened {
            events.push(EngineEvent::Status(
                "Polygon has fewer than 3 vertices and is no longer closed".to_string(),
            ));
        }
    }

    fn on_pointer_move(&mut self, device: Point, events: &mut Vec<EngineEvent>) {
        let logical = self.viewport.to_logical(device);

        match self.edit_state.clone() {
            EditState::DrawingShape { id, anchor } => {
                if let Some(ann) = self.store.get_mut(&id) {
                    ann.shape = match ann.shape {
                        Shape::Rectangle { .. } => Shape::rectangle_from_drag(anchor, logical),
                        Shape::Circle { .. } => Shape::circle_from_drag(anchor, logical),
                        Shape::Ellipse { .. } => Shape::ellipse_from_drag(anchor, logical),
                        ref other => other.clone(),
                    };
                }
            }
            EditState::DrawingPolygon { id, .. } => {
                self.edit_state = EditState::DrawingPolygon {
                    id,
                    cursor: Some(logical),
                };
            }
            EditState::PotentialDrag {
                id,
                index,
                start_device,
            } => {
                // Below the drag threshold a press-release is just a click
                if start_device.distance_to(&device) >= self.config.min_drag_distance {
                    let renamed = self.begin_handle_drag(&id, index, events);
                    self.apply_handle_drag(&renamed, index, logical);
                }
            }
            EditState::DraggingHandle { id, index } => {
                self.apply_handle_drag(&id, index, logical);
            }
            EditState::Panning { last_device } => {
                self.viewport = self
                    .viewport
                    .pan_by(device.x - last_device.x, device.y - last_device.y);
                self.edit_state = EditState::Panning {
                    last_device: device,
                };
            }
            EditState::Idle => {}
        }
    }

    /// Transition PotentialDrag -> DraggingHandle; the first hand-edit of an
    /// AI result changes its id here. Returns the current id.
    fn begin_handle_drag(&mut self, id: &str, index: usize, events: &mut Vec<EngineEvent>) -> String {
        let mut current = id.to_string();
        if let Some(ann) = self.store.get_mut(id) {
            ann.mark_edited();
            current = ann.id.clone();
        }
        if current != id {
            events.push(EngineEvent::SelectionChanged(Some(current.clone())));
        }
        log::info!("Started control point drag on annotation {current}");
        self.edit_state = EditState::DraggingHandle {
            id: current.clone(),
            index,
        };
        current
    }

    fn apply_handle_drag(&mut self, id: &str, index: usize, logical: Point) {
        if let Some(ann) = self.store.get_mut(id) {
            if let Some(updated) = ann.shape.with_control_point(index, logical) {
                ann.shape = updated;
                // The dragged annotation stays selected throughout
                debug_assert!(ann.selected);
            }
        }
    }

    fn on_pointer_up(&mut self, _device: Point, events: &mut Vec<EngineEvent>) {
        match std::mem::replace(&mut self.edit_state, EditState::Idle) {
            EditState::DrawingShape { id, .. } => {
                self.finish_drag_shape(&id, events);
            }
            EditState::DraggingHandle { id, .. } => {
                log::info!("Finished editing annotation {id}");
                events.push(EngineEvent::AnnotationsChanged);
            }
            EditState::PotentialDrag { .. } | EditState::Panning { .. } | EditState::Idle => {}
            // Vertex collection is click-driven; releases don't end it
            polygon @ EditState::DrawingPolygon { .. } => {
                self.edit_state = polygon;
            }
        }
    }

    fn finish_drag_shape(&mut self, id: &str, events: &mut Vec<EngineEvent>) {
        let degenerate = self.store.get(id).is_some_and(|ann| match &ann.shape {
            Shape::Rectangle { .. } | Shape::Ellipse { .. } => {
                ann.shape.bounding_box().is_none_or(|b| {
                    b.width < threshold::MIN_SHAPE_SIZE || b.height < threshold::MIN_SHAPE_SIZE
                })
            }
            Shape::Circle { .. } => {
                ann.shape.radius().is_none_or(|r| r < threshold::MIN_CIRCLE_RADIUS)
            }
            _ => false,
        });

        if degenerate {
            self.store.remove(id);
            log::warn!("Discarded degenerate shape {id}");
            events.push(EngineEvent::AnnotationsChanged);
            events.push(EngineEvent::Status("Shape too small, discarded".to_string()));
            return;
        }

        let kind = if let Some(ann) = self.store.get_mut(id) {
            ann.completed = true;
            ann.shape.kind_name()
        } else {
            return;
        };
        self.store.select_only(id);
        log::info!("{kind} annotation {id} completed");

        events.push(EngineEvent::AnnotationsChanged);
        events.push(EngineEvent::SelectionChanged(Some(id.to_string())));
        events.push(EngineEvent::Status(format!("{kind} added")));
    }

    // ========================================================================
    // Keyboard handling
    // ========================================================================

    fn on_key(&mut self, key: Key, events: &mut Vec<EngineEvent>) {
        match key {
            Key::Escape => self.cancel_in_progress(events),
            Key::Enter => {
                if let EditState::DrawingPolygon { id, .. } = self.edit_state.clone() {
                    self.complete_vertex_shape(&id, events);
                }
            }
            Key::Backspace => self.pop_last_vertex(events),
            Key::Delete => self.delete_selected(events),
            Key::Char(c) => {
                if let Some(tool) = self.keybindings.tool_for_key(c) {
                    self.select_tool(tool, events);
                }
            }
        }
    }

    fn cancel_in_progress(&mut self, events: &mut Vec<EngineEvent>) {
        match std::mem::replace(&mut self.edit_state, EditState::Idle) {
            EditState::DrawingShape { id, .. } | EditState::DrawingPolygon { id, .. } => {
                self.store.remove(&id);
                log::info!("Cancelled in-progress annotation {id}");
                events.push(EngineEvent::AnnotationsChanged);
                events.push(EngineEvent::Status("Drawing cancelled".to_string()));
            }
            other => self.edit_state = other,
        }
    }

    fn pop_last_vertex(&mut self, events: &mut Vec<EngineEvent>) {
        let EditState::DrawingPolygon { id, .. } = self.edit_state.clone() else {
            return;
        };

        let remaining = if let Some(ann) = self.store.get_mut(&id) {
            ann.shape.pop_vertex();
            ann.shape.vertices().map_or(0, <[Point]>::len)
        } else {
            0
        };

        if remaining == 0 {
            // Removing the only vertex cancels the whole shape
            self.store.remove(&id);
            self.edit_state = EditState::Idle;
            events.push(EngineEvent::Status("Drawing cancelled".to_string()));
        } else {
            events.push(EngineEvent::Status(format!("{remaining} vertices")));
        }
        events.push(EngineEvent::AnnotationsChanged);
    }

    fn delete_selected(&mut self, events: &mut Vec<EngineEvent>) {
        if self.edit_state != EditState::Idle {
            return;
        }
        match self.store.remove_selected() {
            Some(removed) => {
                log::info!("Deleted annotation {}", removed.id);
                events.push(EngineEvent::AnnotationsChanged);
                events.push(EngineEvent::SelectionChanged(None));
                events.push(EngineEvent::Status("Annotation deleted".to_string()));
            }
            None => {
                events.push(EngineEvent::Status("Nothing selected".to_string()));
            }
        }
    }

    fn select_tool(&mut self, tool: Tool, events: &mut Vec<EngineEvent>) {
        if tool == self.tool {
            return;
        }
        // Switching tools mid-draw cancels, same as Escape
        self.cancel_in_progress(events);
        log::debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        events.push(EngineEvent::Status(format!("{} tool", tool.name())));
    }

    // ========================================================================
    // Segmentation
    // ========================================================================

    fn request_segmentation(&mut self, device: Point, events: &mut Vec<EngineEvent>) {
        if self.loading {
            log::debug!("Segmentation click ignored: request already in flight");
            events.push(EngineEvent::Status(
                "Segmentation already in progress".to_string(),
            ));
            return;
        }
        let Some(asset) = &self.image else {
            events.push(EngineEvent::Error("No image loaded".to_string()));
            return;
        };

        let normalized = self
            .viewport
            .to_normalized(device, asset.width(), asset.height());
        let prompt = PointPrompt::new(asset.image_id(), normalized, &self.config);
        log::info!(
            "Segmentation requested for '{}' at ({:.3}, {:.3})",
            prompt.image_id,
            prompt.x,
            prompt.y
        );

        self.loading = true;
        events.push(EngineEvent::LoadingChanged(true));
        events.push(EngineEvent::Status("Segmenting region...".to_string()));
        events.push(EngineEvent::SegmentationStarted(prompt));
    }

    fn on_segmentation_completed(
        &mut self,
        response: &SegmentationResponse,
        events: &mut Vec<EngineEvent>,
    ) {
        self.loading = false;
        events.push(EngineEvent::LoadingChanged(false));

        let Some(asset) = &self.image else {
            events.push(EngineEvent::Error(
                "Segmentation result arrived with no image loaded".to_string(),
            ));
            return;
        };
        if !response.success {
            events.push(EngineEvent::Error(
                "Segmentation service reported failure".to_string(),
            ));
            return;
        }

        let Some(annotation) = segmentation::annotation_from_response(
            response,
            asset.width(),
            asset.height(),
            &self.config,
        ) else {
            log::warn!("Segmentation returned no region");
            events.push(EngineEvent::Status(
                "No region found at that point".to_string(),
            ));
            return;
        };

        let count = annotation.shape.vertices().map_or(0, <[Point]>::len);
        let id = self.store.add(annotation);
        self.store.select_only(&id);
        log::info!("Segmentation annotation {id} added with {count} vertices");

        let suffix = if response.cached.unwrap_or(false) {
            " (from cache)"
        } else {
            ""
        };
        events.push(EngineEvent::AnnotationsChanged);
        events.push(EngineEvent::SelectionChanged(Some(id)));
        events.push(EngineEvent::Status(format!(
            "Segmentation produced {count} vertices{suffix}"
        )));
    }

    // ========================================================================
    // Export
    // ========================================================================

    fn on_export(&mut self, events: &mut Vec<EngineEvent>) {
        let Some(asset) = &self.image else {
            events.push(EngineEvent::Error("No image loaded".to_string()));
            return;
        };
        let Some(selected) = self.store.selected() else {
            events.push(EngineEvent::Status("Nothing selected to export".to_string()));
            return;
        };

        match export::export_annotation(selected, asset.image_id()) {
            Ok(payload) => events.push(EngineEvent::ExportReady(payload)),
            Err(err) => {
                log::warn!("Export rejected: {err}");
                events.push(EngineEvent::Error(err.to_string()));
            }
        }
    }
}
