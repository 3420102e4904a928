//! Pipeline orchestration
//!
//! This module provides the public prediction API for heartcheck.
//! It takes a raw form submission through alignment, scaling and
//! classification to a [`RiskAssessment`].

use crate::artifacts::ArtifactSet;
use crate::columns::ExpectedColumns;
use crate::config::PredictorConfig;
use crate::encoder::ReportEncoder;
use crate::error::PredictError;
use crate::features::{self, AlignedFeatures};
use crate::model::Classifier;
use crate::scaler::Scaler;
use crate::types::{RawInput, RiskAssessment, RiskLabel};
use tracing::{debug, info, warn};

/// Predict from a raw JSON input with artifacts read from `config`.
///
/// Loads the artifacts on every call; use [`HeartRiskPredictor`] to load once
/// and serve many requests.
///
/// # Returns
/// The JSON result envelope produced by [`ReportEncoder`]
///
/// # Example
/// ```ignore
/// let report = predict_risk_json(
///     r#"{"Age": 40, "RestingBP": 120, ...}"#,
///     &PredictorConfig::from_dir("models"),
/// )?;
/// ```
pub fn predict_risk_json(raw_json: &str, config: &PredictorConfig) -> Result<String, PredictError> {
    let predictor = HeartRiskPredictor::load(config)?;
    predictor.predict_json(raw_json)
}

/// Read-only prediction context: column contract, fitted scaler and classifier.
///
/// Built once at startup and passed by reference to every request.
pub struct HeartRiskPredictor {
    columns: ExpectedColumns,
    scaler: Box<dyn Scaler>,
    model: Box<dyn Classifier>,
    strict_categories: bool,
    encoder: ReportEncoder,
}

impl HeartRiskPredictor {
    /// Load artifacts from disk and cross-check them
    pub fn load(config: &PredictorConfig) -> Result<Self, PredictError> {
        let artifacts = ArtifactSet::load(config)?;
        Self::new(artifacts, config.strict_categories)
    }

    /// Cross-check an artifact set and wrap it.
    ///
    /// Fails when the scaler or model width differs from the column count, or
    /// when the scaler's recorded feature names disagree with the columns. Column
    /// drift is logged, and is fatal only when `strict_categories` is set.
    pub fn new(artifacts: ArtifactSet, strict_categories: bool) -> Result<Self, PredictError> {
        let ArtifactSet {
            columns,
            scaler,
            model,
        } = artifacts;

        if scaler.n_features() != columns.len() {
            return Err(PredictError::Config(format!(
                "scaler was fitted on {} features but {} columns are expected",
                scaler.n_features(),
                columns.len()
            )));
        }
        if model.n_features() != columns.len() {
            return Err(PredictError::Config(format!(
                "model takes {} features but {} columns are expected",
                model.n_features(),
                columns.len()
            )));
        }
        if let Some(names) = scaler.feature_names() {
            if names != columns.as_slice() {
                return Err(PredictError::Config(
                    "scaler feature names do not match expected columns".to_string(),
                ));
            }
        }

        check_column_drift(&columns, strict_categories)?;

        info!(
            columns = columns.len(),
            strict = strict_categories,
            "heart risk predictor ready"
        );

        Ok(Self {
            columns,
            scaler,
            model,
            strict_categories,
            encoder: ReportEncoder::new(),
        })
    }

    pub fn columns(&self) -> &ExpectedColumns {
        &self.columns
    }

    pub fn encoder(&self) -> &ReportEncoder {
        &self.encoder
    }

    /// Align a raw input, applying strictness
    pub fn align(&self, raw: &RawInput) -> Result<AlignedFeatures, PredictError> {
        if self.strict_categories {
            raw.ensure_known_categories()?;
        }

        Ok(features::align_with_report(raw, &self.columns))
    }

    /// Predict a single submission
    pub fn predict(&self, raw: &RawInput) -> Result<RiskAssessment, PredictError> {
        let mut assessments = self.predict_batch(std::slice::from_ref(raw))?;
        assessments
            .pop()
            .ok_or_else(|| PredictError::PredictionFailed("classifier returned no label".to_string()))
    }

    /// Predict many submissions in one scaler and classifier call
    pub fn predict_batch(&self, inputs: &[RawInput]) -> Result<Vec<RiskAssessment>, PredictError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let aligned = inputs
            .iter()
            .map(|raw| self.align(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let batch: Vec<Vec<f64>> = aligned
            .iter()
            .map(|a| a.vector.as_slice().to_vec())
            .collect();

        let scaled = self.scaler.transform(&batch).map_err(prediction_failed)?;
        let labels = self.model.predict(&scaled).map_err(prediction_failed)?;
        let proba = self.model.predict_proba(&scaled).map_err(prediction_failed)?;

        if labels.len() != inputs.len() {
            return Err(PredictError::PredictionFailed(format!(
                "classifier returned {} labels for {} inputs",
                labels.len(),
                inputs.len()
            )));
        }

        let assessments: Vec<RiskAssessment> = aligned
            .into_iter()
            .zip(labels)
            .enumerate()
            .map(|(idx, (aligned, prediction))| RiskAssessment {
                label: RiskLabel::from_class(prediction),
                prediction,
                confidence_pct: proba
                    .as_ref()
                    .and_then(|rows| rows.get(idx))
                    .and_then(|row| confidence_pct(row)),
                dropped_indicators: aligned.dropped,
            })
            .collect();

        debug!(count = assessments.len(), "scored batch");
        Ok(assessments)
    }

    /// Parse a JSON input, predict, and encode the result envelope
    pub fn predict_json(&self, raw_json: &str) -> Result<String, PredictError> {
        let raw: RawInput =
            serde_json::from_str(raw_json).map_err(|e| PredictError::ParseError(e.to_string()))?;
        let assessment = self.predict(&raw)?;
        self.encoder.encode_to_json(&assessment)
    }
}

/// Log drift between `columns` and the input form, or reject it when `strict`
pub fn check_column_drift(columns: &ExpectedColumns, strict: bool) -> Result<(), PredictError> {
    let drift = columns.check_drift();
    if drift.is_clean() {
        return Ok(());
    }
    if strict {
        return Err(PredictError::Config(format!(
            "expected columns drift from input form: {}",
            drift.summary()
        )));
    }
    warn!(drift = %drift.summary(), "expected columns drift from input form");
    Ok(())
}

/// Highest class probability as a percentage
fn confidence_pct(row: &[f64]) -> Option<f64> {
    row.iter()
        .copied()
        .fold(None, |best: Option<f64>, p| match best {
            Some(b) if b >= p => Some(b),
            _ => Some(p),
        })
        .map(|p| p * 100.0)
}

fn prediction_failed(e: PredictError) -> PredictError {
    match e {
        PredictError::PredictionFailed(_) => e,
        other => PredictError::PredictionFailed(other.to_string()),
    }
}
