//! Result encoding
//!
//! This module wraps a [`RiskAssessment`] in the JSON envelope handed back to
//! the presentation layer: producer metadata, timestamp, and the headline and
//! advice text shown to the user.

use crate::error::PredictError;
use crate::types::{RiskAssessment, RiskLabel};
use crate::{HEARTCHECK_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report envelope version
pub const REPORT_VERSION: &str = "1.0.0";

/// Shown with every result
pub const DISCLAIMER: &str = "This tool is for educational purposes only and should not replace professional medical advice.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// JSON envelope around a single assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub assessment: RiskAssessment,
    pub headline: String,
    pub advice: String,
    pub disclaimer: String,
}

/// Encoder for producing result envelopes
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn encode(&self, assessment: &RiskAssessment) -> RiskReport {
        RiskReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: HEARTCHECK_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            assessment: assessment.clone(),
            headline: headline(assessment.label).to_string(),
            advice: advice(assessment.label).to_string(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(&self, assessment: &RiskAssessment) -> Result<String, PredictError> {
        let report = self.encode(assessment);
        serde_json::to_string_pretty(&report).map_err(PredictError::JsonError)
    }
}

pub fn headline(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::HighRisk => "High Risk of Heart Disease",
        RiskLabel::LowRisk => "Low Risk of Heart Disease",
    }
}

pub fn advice(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::HighRisk => {
            "Please consult with a healthcare professional for proper evaluation and guidance."
        }
        RiskLabel::LowRisk => {
            "Your inputs suggest a lower risk of heart disease. Maintain a healthy lifestyle and regular check-ups."
        }
    }
}
