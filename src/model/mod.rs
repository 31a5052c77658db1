//! Data model for the annotation engine.

mod annotation;
pub mod provenance;
mod shape;
mod tool;

pub use annotation::Annotation;
pub use shape::Shape;
pub use tool::Tool;
