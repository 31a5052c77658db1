//! Scene building for the render loop.
//!
//! The render loop is a pure function of state: given the viewport, the
//! image, the store, and the transient drawing preview, [`build_scene`]
//! produces a device-space display list the embedding shell can draw with
//! whatever surface it has. Nothing here owns mutable state.

use crate::asset::ImageAsset;
use crate::color_utils::color_for_label;
use crate::constants::annotation as style;
use crate::geometry::Point;
use crate::model::{Annotation, Shape};
use crate::store::AnnotationStore;
use crate::viewport::Viewport;

/// Where to draw the image on the device surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Top-left corner in device coordinates
    pub origin: Point,
    /// Scaled width in device pixels
    pub width: f32,
    /// Scaled height in device pixels
    pub height: f32,
}

/// One stroked outline in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Outline vertices in device coordinates
    pub points: Vec<Point>,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
    /// RGBA stroke color
    pub color: [f32; 4],
    /// Stroke width in device pixels
    pub line_width: f32,
    /// Whether this outline belongs to the selected annotation
    pub selected: bool,
}

/// Everything the shell needs to redraw one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Image placement, absent while no image is loaded
    pub image: Option<ImagePlacement>,
    /// Annotation outlines plus the drawing preview, back to front
    pub overlays: Vec<Overlay>,
    /// Control point positions of the selected annotation, device coordinates
    pub handles: Vec<Point>,
}

/// The in-progress annotation and the live cursor position, for previewing.
#[derive(Debug, Clone, Copy)]
pub struct DrawingPreview<'a> {
    /// Id of the annotation still being drawn
    pub annotation_id: &'a str,
    /// Current pointer position in logical coordinates, if known
    pub cursor: Option<Point>,
}

/// Build the display list for the current state.
pub fn build_scene(
    viewport: &Viewport,
    image: Option<&ImageAsset>,
    store: &AnnotationStore,
    preview: Option<DrawingPreview<'_>>,
) -> Scene {
    let placement = image.map(|asset| ImagePlacement {
        origin: viewport.to_device(Point::new(0.0, 0.0)),
        width: asset.width() * viewport.scale,
        height: asset.height() * viewport.scale,
    });

    let in_progress_id = preview.map(|p| p.annotation_id);
    let mut overlays: Vec<Overlay> = store
        .iter()
        .filter(|ann| Some(ann.id.as_str()) != in_progress_id)
        .map(|ann| annotation_overlay(ann, viewport))
        .collect();

    if let Some(preview) = preview {
        if let Some(overlay) = preview_overlay(store, preview, viewport) {
            overlays.push(overlay);
        }
    }

    let handles = store
        .selected()
        .map(|ann| {
            ann.shape
                .control_points()
                .iter()
                .map(|p| viewport.to_device(*p))
                .collect()
        })
        .unwrap_or_default();

    Scene {
        image: placement,
        overlays,
        handles,
    }
}

/// Outline for one stored annotation.
fn annotation_overlay(annotation: &Annotation, viewport: &Viewport) -> Overlay {
    let (points, closed) = shape_outline(&annotation.shape);
    Overlay {
        points: points.iter().map(|p| viewport.to_device(*p)).collect(),
        closed,
        color: color_for_label(&annotation.label),
        line_width: if annotation.selected {
            style::SELECTED_LINE_WIDTH
        } else {
            style::LINE_WIDTH
        },
        selected: annotation.selected,
    }
}

/// Outline for the annotation being drawn, with the cursor appended so the
/// user sees the next edge before clicking.
fn preview_overlay(
    store: &AnnotationStore,
    preview: DrawingPreview<'_>,
    viewport: &Viewport,
) -> Option<Overlay> {
    let annotation = store.get(preview.annotation_id)?;
    let (mut points, _) = shape_outline(&annotation.shape);
    if let Some(cursor) = preview.cursor {
        points.push(cursor);
    }

    let base = color_for_label(&annotation.label);
    Some(Overlay {
        points: points.iter().map(|p| viewport.to_device(*p)).collect(),
        closed: false,
        color: [base[0], base[1], base[2], style::PREVIEW_ALPHA],
        line_width: style::LINE_WIDTH,
        selected: false,
    })
}

/// Logical-space outline for drawing. Open shapes keep their vertex chain;
/// closed shapes use the same sampled outline export does.
fn shape_outline(shape: &Shape) -> (Vec<Point>, bool) {
    match shape {
        Shape::Point { position } => (vec![*position], false),
        Shape::Polyline { vertices } => (vertices.clone(), false),
        Shape::Polygon { vertices } => (vertices.clone(), true),
        _ => (shape.outline().unwrap_or_default(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn asset() -> ImageAsset {
        ImageAsset::from_rgba("img1", RgbaImage::new(100, 50)).expect("asset")
    }

    fn store_with_rect() -> AnnotationStore {
        let mut store = AnnotationStore::new();
        store.add(
            Annotation::new(
                "a",
                Shape::rectangle_from_drag(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            )
            .completed(true),
        );
        store
    }

    #[test]
    fn test_image_placement_follows_viewport() {
        let viewport = Viewport::new(2.0, Point::new(5.0, 7.0));
        let asset = asset();
        let scene = build_scene(&viewport, Some(&asset), &AnnotationStore::new(), None);

        let placement = scene.image.expect("placement");
        assert_eq!(placement.origin, Point::new(5.0, 7.0));
        assert_eq!(placement.width, 200.0);
        assert_eq!(placement.height, 100.0);
    }

    #[test]
    fn test_no_image_no_placement() {
        let scene = build_scene(
            &Viewport::identity(),
            None,
            &AnnotationStore::new(),
            None,
        );
        assert!(scene.image.is_none());
        assert!(scene.overlays.is_empty());
    }

    #[test]
    fn test_overlays_in_device_space() {
        let viewport = Viewport::new(2.0, Point::new(100.0, 0.0));
        let asset = asset();
        let store = store_with_rect();
        let scene = build_scene(&viewport, Some(&asset), &store, None);

        assert_eq!(scene.overlays.len(), 1);
        let overlay = &scene.overlays[0];
        assert!(overlay.closed);
        assert_eq!(overlay.points[0], Point::new(100.0, 0.0));
        assert_eq!(overlay.points[2], Point::new(120.0, 20.0));
    }

    #[test]
    fn test_selected_annotation_gets_handles() {
        let viewport = Viewport::identity();
        let asset = asset();
        let mut store = store_with_rect();

        let scene = build_scene(&viewport, Some(&asset), &store, None);
        assert!(scene.handles.is_empty());

        store.select_only("a");
        let scene = build_scene(&viewport, Some(&asset), &store, None);
        assert_eq!(scene.handles.len(), 4);
        assert!(scene.overlays[0].selected);
        assert_eq!(scene.overlays[0].line_width, style::SELECTED_LINE_WIDTH);
    }

    #[test]
    fn test_drawing_preview_appends_cursor() {
        let viewport = Viewport::identity();
        let asset = asset();
        let mut store = AnnotationStore::new();
        store.add(Annotation::new(
            "wip",
            Shape::Polygon {
                vertices: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            },
        ));

        let scene = build_scene(
            &viewport,
            Some(&asset),
            &store,
            Some(DrawingPreview {
                annotation_id: "wip",
                cursor: Some(Point::new(10.0, 10.0)),
            }),
        );

        assert_eq!(scene.overlays.len(), 1);
        let overlay = &scene.overlays[0];
        assert!(!overlay.closed);
        assert_eq!(overlay.points.len(), 3);
        assert_eq!(overlay.points[2], Point::new(10.0, 10.0));
        assert_eq!(overlay.color[3], style::PREVIEW_ALPHA);
    }
}
