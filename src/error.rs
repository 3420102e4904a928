//! Error types for heartcheck

use thiserror::Error;

/// Errors that can occur while loading artifacts, aligning features or predicting
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {artifact} artifact at {path}: {source}")]
    ArtifactIo {
        artifact: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {artifact} artifact: {message}")]
    Artifact {
        artifact: &'static str,
        message: String,
    },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Shape mismatch in {context}: expected {expected} features, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown category {value:?} for field {field}")]
    UnknownCategory { field: String, value: String },

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}
