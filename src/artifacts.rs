//! Artifact loading
//!
//! The model, scaler and column list are exported from the training process as
//! JSON and read once at startup. Any read or parse failure is returned to the
//! caller; nothing is retried.

use crate::columns::ExpectedColumns;
use crate::config::PredictorConfig;
use crate::error::PredictError;
use crate::model::{Classifier, ModelArtifact};
use crate::scaler::{Scaler, ScalerArtifact};
use std::fs;
use std::path::Path;
use tracing::info;

/// The three read-only artifacts a prediction needs
pub struct ArtifactSet {
    pub columns: ExpectedColumns,
    pub scaler: Box<dyn Scaler>,
    pub model: Box<dyn Classifier>,
}

impl ArtifactSet {
    /// Load every artifact named in `config`
    pub fn load(config: &PredictorConfig) -> Result<Self, PredictError> {
        let columns = load_columns(&config.columns_path)?;
        let scaler = load_scaler(&config.scaler_path)?;
        let model = load_model(&config.model_path)?;

        Ok(Self {
            columns,
            scaler,
            model,
        })
    }

    /// Build the set from in-memory JSON documents
    pub fn from_json(
        model_json: &str,
        scaler_json: &str,
        columns_json: &str,
    ) -> Result<Self, PredictError> {
        Ok(Self {
            columns: parse_columns(columns_json)?,
            scaler: parse_scaler(scaler_json)?,
            model: parse_model(model_json)?,
        })
    }
}

/// Load the column list; a missing or unreadable file is a configuration error
pub fn load_columns(path: &Path) -> Result<ExpectedColumns, PredictError> {
    let json = fs::read_to_string(path).map_err(|e| {
        PredictError::Config(format!(
            "columns artifact at {} could not be read: {}",
            path.display(),
            e
        ))
    })?;
    let columns = parse_columns(&json)?;
    info!(path = %path.display(), columns = columns.len(), "loaded expected columns");
    Ok(columns)
}

pub fn load_scaler(path: &Path) -> Result<Box<dyn Scaler>, PredictError> {
    let scaler = parse_scaler(&read_artifact("scaler", path)?)?;
    info!(path = %path.display(), features = scaler.n_features(), "loaded scaler");
    Ok(scaler)
}

pub fn load_model(path: &Path) -> Result<Box<dyn Classifier>, PredictError> {
    let model = parse_model(&read_artifact("model", path)?)?;
    info!(
        path = %path.display(),
        features = model.n_features(),
        classes = model.classes().len(),
        "loaded classifier"
    );
    Ok(model)
}

/// Parse a JSON array of column names.
///
/// Anything but a non-empty array of distinct, non-empty strings is a
/// configuration error.
pub fn parse_columns(json: &str) -> Result<ExpectedColumns, PredictError> {
    let names: Vec<String> = serde_json::from_str(json).map_err(|e| {
        PredictError::Config(format!("columns artifact is not a list of names: {}", e))
    })?;
    ExpectedColumns::new(names)
}

pub fn parse_scaler(json: &str) -> Result<Box<dyn Scaler>, PredictError> {
    let artifact: ScalerArtifact =
        serde_json::from_str(json).map_err(|e| PredictError::Artifact {
            artifact: "scaler",
            message: e.to_string(),
        })?;
    artifact.into_scaler()
}

pub fn parse_model(json: &str) -> Result<Box<dyn Classifier>, PredictError> {
    let artifact: ModelArtifact =
        serde_json::from_str(json).map_err(|e| PredictError::Artifact {
            artifact: "model",
            message: e.to_string(),
        })?;
    artifact.into_classifier()
}

fn read_artifact(artifact: &'static str, path: &Path) -> Result<String, PredictError> {
    fs::read_to_string(path).map_err(|source| PredictError::ArtifactIo {
        artifact,
        path: path.display().to_string(),
        source,
    })
}
