//! SVAT - Segmentation-Assisted Vector Annotation Toolkit
//!
//! An interactive raster-image annotation engine: pan/zoom viewport, a
//! message-driven tool state machine for drawing and editing shapes, and an
//! adapter for point-prompt segmentation services. The engine is headless;
//! an embedding shell feeds it [`message::Message`]s and renders the
//! [`render::Scene`] it builds.

pub mod asset;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod render;
pub mod segmentation;
pub mod simplify;
pub mod store;
pub mod viewport;

pub use engine::AnnotationEngine;
