//! Feature scaling
//!
//! This module applies the fitted scaler that was exported alongside the model.
//! - Standardization: `(x - mean) / scale`
//! - Zero scale treated as 1 so constant training columns pass through centred
//! - Batch width checked against the fitted width

use crate::error::PredictError;
use serde::{Deserialize, Serialize};

/// Fitted numeric transform applied to aligned feature vectors
pub trait Scaler: Send + Sync {
    /// Number of features the scaler was fitted on
    fn n_features(&self) -> usize;

    /// Transform a batch of rows in expected-column order
    fn transform(&self, batch: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, PredictError>;

    /// Column names recorded at fit time, if the exporter kept them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Standardizing scaler with per-column mean and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Create a scaler, rejecting mismatched or non-finite parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, PredictError> {
        let scaler = Self {
            mean,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self, PredictError> {
        self.feature_names = Some(names);
        self.validate()?;
        Ok(self)
    }

    /// Check internal consistency of deserialized parameters
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.mean.is_empty() {
            return Err(PredictError::Artifact {
                artifact: "scaler",
                message: "mean is empty".to_string(),
            });
        }
        if self.mean.len() != self.scale.len() {
            return Err(PredictError::Artifact {
                artifact: "scaler",
                message: format!(
                    "mean has {} entries but scale has {}",
                    self.mean.len(),
                    self.scale.len()
                ),
            });
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(PredictError::Artifact {
                    artifact: "scaler",
                    message: format!(
                        "{} feature names for {} fitted columns",
                        names.len(),
                        self.mean.len()
                    ),
                });
            }
        }
        if self
            .mean
            .iter()
            .chain(self.scale.iter())
            .any(|v| !v.is_finite())
        {
            return Err(PredictError::Artifact {
                artifact: "scaler",
                message: "mean and scale must be finite".to_string(),
            });
        }
        Ok(())
    }

    fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        if row.len() != self.mean.len() {
            return Err(PredictError::ShapeMismatch {
                context: "scaler",
                expected: self.mean.len(),
                actual: row.len(),
            });
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, batch: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, PredictError> {
        batch.iter().map(|row| self.transform_row(row)).collect()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

/// Serialized scaler artifact, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
}

impl ScalerArtifact {
    /// Validate and turn the artifact into a usable scaler
    pub fn into_scaler(self) -> Result<Box<dyn Scaler>, PredictError> {
        match self {
            ScalerArtifact::Standard(scaler) => {
                scaler.validate()?;
                Ok(Box::new(scaler))
            }
        }
    }
}
