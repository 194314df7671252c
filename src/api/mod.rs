//! The API layer, containing the pipeline stage and response mapping.

pub mod middleware;

pub use middleware::{ValidationConfig, ValidationState, validation_middleware};
