//! GeoJSON export payloads.
//!
//! Export produces a GeoJSON `Feature` whose geometry is the annotation's
//! closed outline in logical image coordinates, with the first vertex
//! repeated at the end of the ring. The engine does not write files; the
//! payload rides an outbound event and the embedding shell persists it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use web_time::{SystemTime, UNIX_EPOCH};

use crate::model::Annotation;

/// Errors when building an export payload.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Shape kind has no enclosed outline to export
    #[error("Annotation type '{kind}' has no exportable outline")]
    NotExportable {
        /// The shape kind name
        kind: &'static str,
    },

    /// Annotation is still being drawn
    #[error("Annotation '{id}' is not completed")]
    Incomplete {
        /// The annotation's id
        id: String,
    },
}

/// A GeoJSON Feature wrapping one annotation outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Always "Feature"
    #[serde(rename = "type")]
    pub feature_type: String,
    /// Polygon geometry with one linear ring
    pub geometry: Geometry,
    /// Label, image identity, and timestamp
    pub properties: Properties,
}

/// GeoJSON Polygon geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Always "Polygon"
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// One linear ring of [x, y] vertices, closed (first == last)
    pub coordinates: Vec<Vec<[f32; 2]>>,
}

/// Feature properties carried alongside the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// The annotation's label
    pub object_type: String,
    /// Which image the outline belongs to
    pub image_id: String,
    /// Unix milliseconds at export time
    pub timestamp: u64,
}

/// One exportable annotation, correlated by id for the external persister.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    /// Id of the exported annotation
    pub annotation_id: String,
    /// The GeoJSON feature to persist
    pub feature: Feature,
}

/// Build the export payload for one completed annotation.
///
/// Only closed outlines export: polygon, rectangle, circle, and ellipse
/// (the curved shapes are outlined at a fixed vertex count). Point and
/// polyline annotations enclose nothing and are rejected.
pub fn export_annotation(
    annotation: &Annotation,
    image_id: &str,
) -> Result<ExportPayload, ExportError> {
    if !annotation.completed {
        return Err(ExportError::Incomplete {
            id: annotation.id.clone(),
        });
    }

    let outline = annotation
        .shape
        .outline()
        .ok_or_else(|| ExportError::NotExportable {
            kind: annotation.shape.kind_name(),
        })?;

    // Close the linear ring
    let mut ring: Vec<[f32; 2]> = outline.iter().map(|p| [p.x, p.y]).collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    log::info!(
        "Exported annotation {} ({} vertices) for image {}",
        annotation.id,
        ring.len().saturating_sub(1),
        image_id
    );

    Ok(ExportPayload {
        annotation_id: annotation.id.clone(),
        feature: Feature {
            feature_type: "Feature".to_string(),
            geometry: Geometry {
                geometry_type: "Polygon".to_string(),
                coordinates: vec![ring],
            },
            properties: Properties {
                object_type: annotation.label.clone(),
                image_id: image_id.to_string(),
                timestamp,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::model::Shape;

    fn polygon_annotation() -> Annotation {
        Annotation::new(
            "seg-1",
            Shape::Polygon {
                vertices: vec![
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 0.0),
                    Point::new(10.0, 10.0),
                ],
            },
        )
        .completed(true)
        .with_label("building")
    }

    #[test]
    fn test_export_closes_ring() {
        let payload = export_annotation(&polygon_annotation(), "img1").expect("payload");

        assert_eq!(payload.annotation_id, "seg-1");
        assert_eq!(payload.feature.feature_type, "Feature");
        assert_eq!(payload.feature.geometry.geometry_type, "Polygon");

        let ring = &payload.feature.geometry.coordinates[0];
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_export_carries_properties() {
        let payload = export_annotation(&polygon_annotation(), "img1").expect("payload");

        assert_eq!(payload.feature.properties.object_type, "building");
        assert_eq!(payload.feature.properties.image_id, "img1");
        assert!(payload.feature.properties.timestamp > 0);
    }

    #[test]
    fn test_export_rejects_point_and_polyline() {
        let point = Annotation::new(
            "manual-1",
            Shape::Point {
                position: Point::new(1.0, 1.0),
            },
        )
        .completed(true);
        assert!(matches!(
            export_annotation(&point, "img1"),
            Err(ExportError::NotExportable { kind: "point" })
        ));

        let line = Annotation::new(
            "manual-2",
            Shape::Polyline {
                vertices: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            },
        )
        .completed(true);
        assert!(matches!(
            export_annotation(&line, "img1"),
            Err(ExportError::NotExportable { kind: "polyline" })
        ));
    }

    #[test]
    fn test_export_rejects_incomplete() {
        let mut ann = polygon_annotation();
        ann.completed = false;
        assert!(matches!(
            export_annotation(&ann, "img1"),
            Err(ExportError::Incomplete { .. })
        ));
    }

    #[test]
    fn test_export_circle_sampled_outline() {
        let circle = Annotation::new(
            "manual-3",
            Shape::circle_from_drag(Point::new(50.0, 50.0), Point::new(60.0, 50.0)),
        )
        .completed(true);

        let payload = export_annotation(&circle, "img1").expect("payload");
        let ring = &payload.feature.geometry.coordinates[0];
        assert_eq!(ring.len(), crate::constants::annotation::OUTLINE_SEGMENTS + 1);
    }

    #[test]
    fn test_export_serializes_geojson_shape() {
        let payload = export_annotation(&polygon_annotation(), "img1").expect("payload");
        let json = serde_json::to_string(&payload.feature).expect("json");

        assert!(json.contains("\"type\":\"Feature\""));
        assert!(json.contains("\"type\":\"Polygon\""));
        assert!(json.contains("\"object_type\":\"building\""));
    }
}
