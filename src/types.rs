//! Core types for the heartcheck pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw form input, the field catalogue, the aligned feature vector and
//! the final risk assessment.

use crate::columns::ExpectedColumns;
use crate::error::PredictError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric or ordinal input fields, inserted verbatim under their column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    RestingBp,
    Cholesterol,
    FastingBs,
    MaxHr,
    Oldpeak,
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        NumericField::Age,
        NumericField::RestingBp,
        NumericField::Cholesterol,
        NumericField::FastingBs,
        NumericField::MaxHr,
        NumericField::Oldpeak,
    ];

    /// Column name used by the trained model
    pub fn column(&self) -> &'static str {
        match self {
            NumericField::Age => "Age",
            NumericField::RestingBp => "RestingBP",
            NumericField::Cholesterol => "Cholesterol",
            NumericField::FastingBs => "FastingBS",
            NumericField::MaxHr => "MaxHR",
            NumericField::Oldpeak => "Oldpeak",
        }
    }

    /// Inclusive range accepted by the input form.
    ///
    /// The alignment pipeline never checks this; it is the caller's contract.
    pub fn range(&self) -> (f64, f64) {
        match self {
            NumericField::Age => (18.0, 100.0),
            NumericField::RestingBp => (80.0, 200.0),
            NumericField::Cholesterol => (100.0, 600.0),
            NumericField::FastingBs => (0.0, 1.0),
            NumericField::MaxHr => (60.0, 220.0),
            NumericField::Oldpeak => (0.0, 6.0),
        }
    }

    /// Value the input form starts with
    pub fn default_value(&self) -> f64 {
        match self {
            NumericField::Age => 40.0,
            NumericField::RestingBp => 120.0,
            NumericField::Cholesterol => 200.0,
            NumericField::FastingBs => 0.0,
            NumericField::MaxHr => 150.0,
            NumericField::Oldpeak => 1.0,
        }
    }
}

/// Categorical input fields, one-hot expanded into indicator columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Sex,
    ChestPainType,
    RestingEcg,
    ExerciseAngina,
    StSlope,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Sex,
        CategoricalField::ChestPainType,
        CategoricalField::RestingEcg,
        CategoricalField::ExerciseAngina,
        CategoricalField::StSlope,
    ];

    /// Base name shared by every indicator column of this field
    pub fn base_name(&self) -> &'static str {
        match self {
            CategoricalField::Sex => "Sex",
            CategoricalField::ChestPainType => "ChestPainType",
            CategoricalField::RestingEcg => "RestingECG",
            CategoricalField::ExerciseAngina => "ExerciseAngina",
            CategoricalField::StSlope => "ST_Slope",
        }
    }

    /// Enumerated categories the input form offers
    pub fn domain(&self) -> &'static [&'static str] {
        match self {
            CategoricalField::Sex => &["M", "F"],
            CategoricalField::ChestPainType => &["ATA", "NAP", "TA", "ASY"],
            CategoricalField::RestingEcg => &["Normal", "ST", "LVH"],
            CategoricalField::ExerciseAngina => &["Y", "N"],
            CategoricalField::StSlope => &["Up", "Flat", "Down"],
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.domain().contains(&value)
    }

    /// First option of the form's selector
    pub fn default_value(&self) -> &'static str {
        self.domain()[0]
    }
}

/// Raw attribute values for a single form submission.
///
/// Categorical values are kept as the caller's strings so that values outside
/// the enumerated domain still reach the alignment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "RestingBP")]
    pub resting_bp: f64,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: f64,
    #[serde(rename = "FastingBS")]
    pub fasting_bs: f64,
    #[serde(rename = "MaxHR")]
    pub max_hr: f64,
    #[serde(rename = "Oldpeak")]
    pub oldpeak: f64,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: String,
    #[serde(rename = "RestingECG")]
    pub resting_ecg: String,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: String,
    #[serde(rename = "ST_Slope")]
    pub st_slope: String,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            age: NumericField::Age.default_value(),
            resting_bp: NumericField::RestingBp.default_value(),
            cholesterol: NumericField::Cholesterol.default_value(),
            fasting_bs: NumericField::FastingBs.default_value(),
            max_hr: NumericField::MaxHr.default_value(),
            oldpeak: NumericField::Oldpeak.default_value(),
            sex: CategoricalField::Sex.default_value().to_string(),
            chest_pain_type: CategoricalField::ChestPainType.default_value().to_string(),
            resting_ecg: CategoricalField::RestingEcg.default_value().to_string(),
            exercise_angina: CategoricalField::ExerciseAngina.default_value().to_string(),
            st_slope: CategoricalField::StSlope.default_value().to_string(),
        }
    }
}

impl RawInput {
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Age => self.age,
            NumericField::RestingBp => self.resting_bp,
            NumericField::Cholesterol => self.cholesterol,
            NumericField::FastingBs => self.fasting_bs,
            NumericField::MaxHr => self.max_hr,
            NumericField::Oldpeak => self.oldpeak,
        }
    }

    pub fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Sex => &self.sex,
            CategoricalField::ChestPainType => &self.chest_pain_type,
            CategoricalField::RestingEcg => &self.resting_ecg,
            CategoricalField::ExerciseAngina => &self.exercise_angina,
            CategoricalField::StSlope => &self.st_slope,
        }
    }

    /// Parse a JSON array of inputs
    pub fn parse_array(json: &str) -> Result<Vec<RawInput>, PredictError> {
        serde_json::from_str(json).map_err(|e| PredictError::ParseError(e.to_string()))
    }

    /// Parse NDJSON (one input object per line); blank lines are skipped
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawInput>, PredictError> {
        let mut inputs = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let input = serde_json::from_str::<RawInput>(trimmed).map_err(|e| {
                PredictError::ParseError(format!("line {}: {}", line_num + 1, e))
            })?;
            inputs.push(input);
        }
        Ok(inputs)
    }

    /// Fail on the first categorical value outside its enumerated domain
    pub fn ensure_known_categories(&self) -> Result<(), PredictError> {
        match self.unknown_categories().into_iter().next() {
            Some((field, value)) => Err(PredictError::UnknownCategory {
                field: field.base_name().to_string(),
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Categorical fields whose value lies outside the enumerated domain
    pub fn unknown_categories(&self) -> Vec<(CategoricalField, &str)> {
        CategoricalField::ALL
            .iter()
            .map(|field| (*field, self.categorical(*field)))
            .filter(|(field, value)| !field.contains(value))
            .collect()
    }
}

/// Numeric vector positionally aligned to an [`ExpectedColumns`] contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Rebuild the column-name mapping this vector was projected from
    pub fn to_mapping(&self, columns: &ExpectedColumns) -> HashMap<String, f64> {
        columns
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    /// Value of a named column, if the column is part of the contract
    pub fn get(&self, columns: &ExpectedColumns, name: &str) -> Option<f64> {
        columns
            .position(name)
            .and_then(|idx| self.values.get(idx).copied())
    }
}

/// Binary risk label derived from the classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    HighRisk,
    LowRisk,
}

impl RiskLabel {
    /// Class `1` is the positive (disease) class; everything else is low risk
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            RiskLabel::HighRisk
        } else {
            RiskLabel::LowRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::HighRisk => "high_risk",
            RiskLabel::LowRisk => "low_risk",
        }
    }
}

/// Outcome of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    /// Raw class returned by the classifier
    pub prediction: i64,
    /// Highest class probability as a percentage, when the model exposes probabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_pct: Option<f64>,
    /// Indicator columns synthesized from the input but absent from the model's columns
    #[serde(default)]
    pub dropped_indicators: Vec<String>,
}
