//! Segmentation service adapter.
//!
//! One point prompt in normalized image coordinates goes out, one polygon in
//! the same normalized space comes back. The engine talks to the service
//! through the [`SegmentationClient`] trait so tests can script responses;
//! [`HttpSegmentationClient`] is the production implementation.
//!
//! Ingestion ([`annotation_from_response`]) denormalizes the polygon to
//! logical pixels, runs the preview and adaptive simplification passes, and
//! wraps the result into a completed polygon annotation. An empty polygon is
//! "no result", not an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::constants::segmentation as defaults;
use crate::geometry::Point;
use crate::message::Message;
use crate::model::{provenance, Annotation, Shape};
use crate::simplify::{adaptive_simplify, preview_simplify};

/// A point-prompt request: where the user clicked, in normalized [0,1] space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPrompt {
    /// Which image to segment
    pub image_id: String,
    /// Normalized x coordinate (0-1)
    pub x: f32,
    /// Normalized y coordinate (0-1)
    pub y: f32,
    /// Ask the service to simplify the contour before returning it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplify: Option<bool>,
    /// Vertex budget hint, clamped to the service's accepted range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_points: Option<u32>,
}

impl PointPrompt {
    /// Prompt at a normalized point with the engine's simplification settings.
    pub fn new(image_id: impl Into<String>, normalized: Point, config: &EngineConfig) -> Self {
        let budget = (config.target_points as u32)
            .clamp(defaults::TARGET_POINTS_MIN, defaults::TARGET_POINTS_MAX);
        Self {
            image_id: image_id.into(),
            x: normalized.x,
            y: normalized.y,
            simplify: Some(true),
            target_points: Some(budget),
        }
    }
}

/// What the segmentation service returns for a point prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationResponse {
    /// Whether the service produced a mask
    pub success: bool,
    /// Contour vertices in normalized [0,1] coordinates; may be empty
    #[serde(default)]
    pub polygon: Vec<[f32; 2]>,
    /// Service-assigned annotation id, if it stored one
    #[serde(default)]
    pub annotation_id: Option<String>,
    /// Whether the result came from the service's embedding cache
    #[serde(default)]
    pub cached: Option<bool>,
}

/// Errors from the segmentation request path.
#[derive(Error, Debug)]
pub enum SegmentationError {
    /// Client could not be constructed
    #[error("Failed to build segmentation client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Segmentation request timed out")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS)
    #[error("Segmentation request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Service answered with a non-success HTTP status
    #[error("Segmentation service returned HTTP {status}")]
    Status {
        /// The HTTP status code
        status: u16,
    },

    /// Response body was not a valid segmentation payload
    #[error("Malformed segmentation response: {0}")]
    Payload(#[source] reqwest::Error),

    /// Service answered but reported that segmentation failed
    #[error("Segmentation service reported failure")]
    ServiceFailure,
}

/// Boundary to the external segmentation service.
#[async_trait]
pub trait SegmentationClient: Send + Sync {
    /// Segment around one normalized point prompt.
    async fn segment(&self, prompt: &PointPrompt)
        -> Result<SegmentationResponse, SegmentationError>;
}

/// HTTP client for the segmentation service.
pub struct HttpSegmentationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSegmentationClient {
    /// Build a client for a service base URL with the configured timeout.
    pub fn new(base_url: impl Into<String>, config: &EngineConfig) -> Result<Self, SegmentationError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.segmentation_timeout_secs))
            .build()
            .map_err(SegmentationError::ClientSetup)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SegmentationClient for HttpSegmentationClient {
    async fn segment(
        &self,
        prompt: &PointPrompt,
    ) -> Result<SegmentationResponse, SegmentationError> {
        let url = format!("{}{}", self.base_url, defaults::SEGMENT_PATH);
        log::debug!(
            "Segmentation request: image={} point=({:.3}, {:.3})",
            prompt.image_id,
            prompt.x,
            prompt.y
        );

        let response = self
            .client
            .post(&url)
            .json(prompt)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SegmentationError::Timeout
                } else {
                    SegmentationError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SegmentationError::Status {
                status: status.as_u16(),
            });
        }

        let payload: SegmentationResponse = response
            .json()
            .await
            .map_err(SegmentationError::Payload)?;

        if !payload.success {
            return Err(SegmentationError::ServiceFailure);
        }

        log::debug!(
            "Segmentation response: {} points, cached={}",
            payload.polygon.len(),
            payload.cached.unwrap_or(false)
        );
        Ok(payload)
    }
}

/// Drive one full round trip for shells that want a single call: the prompt
/// from a `SegmentationStarted` event goes out, and the returned message is
/// fed straight back into the engine.
pub async fn resolve_prompt(client: &dyn SegmentationClient, prompt: &PointPrompt) -> Message {
    match client.segment(prompt).await {
        Ok(response) => Message::SegmentationCompleted(response),
        Err(err) => Message::SegmentationFailed(err.to_string()),
    }
}

/// Convert a service response into a completed polygon annotation.
///
/// Points are denormalized to logical pixels against the image's native
/// dimensions, then reduced with the preview pass and the adaptive search.
/// Returns None when the response carries no polygon ("no result").
pub fn annotation_from_response(
    response: &SegmentationResponse,
    image_width: f32,
    image_height: f32,
    config: &EngineConfig,
) -> Option<Annotation> {
    if response.polygon.is_empty() {
        return None;
    }

    let logical: Vec<Point> = response
        .polygon
        .iter()
        .map(|[x, y]| Point::new(x * image_width, y * image_height))
        .collect();

    let previewed = preview_simplify(&logical, config.preview_tolerance_base);
    let vertices = adaptive_simplify(&previewed, config.target_points, true, &config.simplify);
    if vertices.len() < 3 {
        log::warn!(
            "Segmentation polygon degenerate after simplification ({} points)",
            vertices.len()
        );
        return None;
    }

    let id = response
        .annotation_id
        .clone()
        .unwrap_or_else(provenance::mint_ai_id);

    Some(Annotation::new(id, Shape::Polygon { vertices }).completed(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedClient {
        response: Result<SegmentationResponse, SegmentationError>,
    }

    #[async_trait]
    impl SegmentationClient for ScriptedClient {
        async fn segment(
            &self,
            _prompt: &PointPrompt,
        ) -> Result<SegmentationResponse, SegmentationError> {
            match &self.response {
                Ok(r) => Ok(r.clone()),
                Err(_) => Err(SegmentationError::ServiceFailure),
            }
        }
    }

    fn square_response() -> SegmentationResponse {
        SegmentationResponse {
            success: true,
            polygon: vec![[0.4, 0.4], [0.6, 0.4], [0.6, 0.6], [0.4, 0.6]],
            annotation_id: Some("seg-7".to_string()),
            cached: Some(false),
        }
    }

    #[test]
    fn test_prompt_clamps_target_points() {
        let config = EngineConfig {
            target_points: 500,
            ..EngineConfig::default()
        };
        let prompt = PointPrompt::new("img1", Point::new(0.5, 0.5), &config);
        assert_eq!(prompt.target_points, Some(50));
    }

    #[test]
    fn test_prompt_serializes_wire_format() {
        let prompt = PointPrompt::new("img1", Point::new(0.25, 0.75), &EngineConfig::default());
        let json = serde_json::to_string(&prompt).unwrap();

        assert!(json.contains("\"image_id\":\"img1\""));
        assert!(json.contains("\"x\":0.25"));
        assert!(json.contains("\"target_points\":20"));
    }

    #[test]
    fn test_response_tolerates_missing_optionals() {
        let payload: SegmentationResponse =
            serde_json::from_str(r#"{"success": true, "polygon": []}"#).unwrap();

        assert!(payload.success);
        assert!(payload.polygon.is_empty());
        assert_eq!(payload.annotation_id, None);
        assert_eq!(payload.cached, None);
    }

    #[test]
    fn test_annotation_from_response_denormalizes() {
        let config = EngineConfig::default();
        let ann = annotation_from_response(&square_response(), 1000.0, 500.0, &config)
            .expect("annotation");

        assert_eq!(ann.id, "seg-7");
        assert!(ann.completed);

        let vertices = ann.shape.vertices().expect("polygon vertices");
        assert!(vertices.len() >= 3 && vertices.len() <= 4);
        assert_eq!(vertices[0], Point::new(400.0, 200.0));
    }

    #[test]
    fn test_annotation_from_response_mints_ai_id() {
        let response = SegmentationResponse {
            annotation_id: None,
            ..square_response()
        };
        let ann = annotation_from_response(&response, 100.0, 100.0, &EngineConfig::default())
            .expect("annotation");
        assert!(ann.id.starts_with("ai-"));
    }

    #[test]
    fn test_empty_polygon_is_no_result() {
        let response = SegmentationResponse {
            polygon: Vec::new(),
            ..square_response()
        };
        assert!(
            annotation_from_response(&response, 100.0, 100.0, &EngineConfig::default()).is_none()
        );
    }

    #[test]
    fn test_scripted_client_roundtrip() {
        let client = ScriptedClient {
            response: Ok(square_response()),
        };
        let prompt = PointPrompt::new("img1", Point::new(0.5, 0.5), &EngineConfig::default());

        let result = pollster::block_on(client.segment(&prompt)).expect("response");
        assert_eq!(result.polygon.len(), 4);
    }

    #[test]
    fn test_scripted_client_failure() {
        let client = ScriptedClient {
            response: Err(SegmentationError::ServiceFailure),
        };
        let prompt = PointPrompt::new("img1", Point::new(0.5, 0.5), &EngineConfig::default());

        let result = pollster::block_on(client.segment(&prompt));
        assert!(matches!(result, Err(SegmentationError::ServiceFailure)));
    }

    #[test]
    fn test_resolve_prompt_maps_outcomes_to_messages() {
        let prompt = PointPrompt::new("img1", Point::new(0.5, 0.5), &EngineConfig::default());

        let ok = ScriptedClient {
            response: Ok(square_response()),
        };
        let message = pollster::block_on(resolve_prompt(&ok, &prompt));
        assert!(matches!(message, Message::SegmentationCompleted(r) if r.polygon.len() == 4));

        let failing = ScriptedClient {
            response: Err(SegmentationError::ServiceFailure),
        };
        let message = pollster::block_on(resolve_prompt(&failing, &prompt));
        assert!(matches!(message, Message::SegmentationFailed(_)));
    }
}
