//! Expected column contract
//!
//! The trained model fixes both the one-hot vocabulary and the order of its
//! input columns. [`ExpectedColumns`] carries that contract unchanged, and
//! [`ColumnDrift`] compares it against the categorical domains the input form
//! offers so a mismatch is caught when the artifacts are loaded.

use crate::error::PredictError;
use crate::types::{CategoricalField, NumericField};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Ordered, immutable list of column names the model was trained on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ExpectedColumns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ExpectedColumns {
    /// Validate and wrap a column list.
    ///
    /// Fails when the list is empty, contains an empty name or repeats a name.
    pub fn new(names: Vec<String>) -> Result<Self, PredictError> {
        if names.is_empty() {
            return Err(PredictError::Config(
                "expected columns list is empty".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(PredictError::Config(format!(
                    "expected column at position {} has an empty name",
                    position
                )));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(PredictError::Config(format!(
                    "expected column {:?} appears more than once",
                    name
                )));
            }
        }

        Ok(Self { names, index })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Compare the contract against the form's field catalogue
    pub fn check_drift(&self) -> ColumnDrift {
        let mut drift = ColumnDrift::default();
        let mut producible: HashSet<String> = HashSet::new();

        for field in NumericField::ALL {
            producible.insert(field.column().to_string());
            if !self.contains(field.column()) {
                drift.missing_numeric.push(field.column().to_string());
            }
        }

        for field in CategoricalField::ALL {
            let absent: Vec<String> = field
                .domain()
                .iter()
                .map(|value| IndicatorColumn::name_for(field, value))
                .inspect(|name| {
                    producible.insert(name.clone());
                })
                .filter(|name| !self.contains(name))
                .collect();

            // A single absent category is the reference level of a
            // drop-first encoding and still carries signal (all zeros).
            match absent.len() {
                0 => {}
                1 => drift.reference_categories.extend(absent),
                _ => drift.missing_indicators.extend(absent),
            }
        }

        drift.unmapped_columns = self
            .iter()
            .filter(|name| !producible.contains(*name))
            .map(str::to_string)
            .collect();

        drift
    }
}

impl TryFrom<Vec<String>> for ExpectedColumns {
    type Error = PredictError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<ExpectedColumns> for Vec<String> {
    fn from(columns: ExpectedColumns) -> Self {
        columns.names
    }
}

/// One-hot column identified by its field and selected category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorColumn {
    pub field: CategoricalField,
    pub value: String,
}

impl IndicatorColumn {
    pub fn new(field: CategoricalField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// `<base>_<value>`, e.g. `Sex_F`
    pub fn name_for(field: CategoricalField, value: &str) -> String {
        format!("{}_{}", field.base_name(), value)
    }

    pub fn name(&self) -> String {
        Self::name_for(self.field, &self.value)
    }
}

/// Differences between the form's field catalogue and a column contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnDrift {
    /// One absent category per field, treated as the encoding's reference level
    pub reference_categories: Vec<String>,
    /// Indicator columns the form can produce but the model never sees
    pub missing_indicators: Vec<String>,
    /// Numeric columns the model does not take
    pub missing_numeric: Vec<String>,
    /// Model columns no form field can populate; always zero-filled
    pub unmapped_columns: Vec<String>,
}

impl ColumnDrift {
    pub fn is_clean(&self) -> bool {
        self.missing_indicators.is_empty()
            && self.missing_numeric.is_empty()
            && self.unmapped_columns.is_empty()
    }

    /// One-line summary for logs and error messages
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing_indicators.is_empty() {
            parts.push(format!(
                "missing indicators [{}]",
                self.missing_indicators.join(", ")
            ));
        }
        if !self.missing_numeric.is_empty() {
            parts.push(format!(
                "missing numeric [{}]",
                self.missing_numeric.join(", ")
            ));
        }
        if !self.unmapped_columns.is_empty() {
            parts.push(format!(
                "unmapped columns [{}]",
                self.unmapped_columns.join(", ")
            ));
        }
        if parts.is_empty() {
            "no drift".to_string()
        } else {
            parts.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn columns(names: &[&str]) -> Result<ExpectedColumns, PredictError> {
        ExpectedColumns::new(names.iter().map(|s| s.to_string()).collect())
    }

    /// Column layout of a drop-first one-hot encoding of the heart dataset
    fn drop_first_columns() -> ExpectedColumns {
        columns(&[
            "Age",
            "RestingBP",
            "Cholesterol",
            "FastingBS",
            "MaxHR",
            "Oldpeak",
            "Sex_M",
            "ChestPainType_ATA",
            "ChestPainType_NAP",
            "ChestPainType_TA",
            "RestingECG_Normal",
            "RestingECG_ST",
            "ExerciseAngina_Y",
            "ST_Slope_Flat",
            "ST_Slope_Up",
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_columns_rejected() {
        let err = columns(&[]).unwrap_err();
        assert!(matches!(err, PredictError::Config(_)));
    }

    #[test]
    fn test_duplicate_and_blank_names_rejected() {
        assert!(matches!(
            columns(&["Age", "Age"]).unwrap_err(),
            PredictError::Config(_)
        ));
        assert!(matches!(
            columns(&["Age", ""]).unwrap_err(),
            PredictError::Config(_)
        ));
    }

    #[test]
    fn test_order_preserved() {
        let cols = columns(&["Sex_F", "Age", "MaxHR"]).unwrap();
        let names: Vec<&str> = cols.iter().collect();
        assert_eq!(names, vec!["Sex_F", "Age", "MaxHR"]);
        assert_eq!(cols.position("MaxHR"), Some(2));
        assert_eq!(cols.position("Oldpeak"), None);
    }

    #[test]
    fn test_deserialize_validates() {
        let cols: ExpectedColumns = serde_json::from_str(r#"["Age", "Sex_M"]"#).unwrap();
        assert_eq!(cols.len(), 2);

        assert!(serde_json::from_str::<ExpectedColumns>("[]").is_err());
        assert_eq!(
            serde_json::to_string(&cols).unwrap(),
            r#"["Age","Sex_M"]"#
        );
    }

    #[test]
    fn test_indicator_name() {
        let indicator = IndicatorColumn::new(CategoricalField::StSlope, "Flat");
        assert_eq!(indicator.name(), "ST_Slope_Flat");
        assert_eq!(
            IndicatorColumn::name_for(CategoricalField::Sex, "F"),
            "Sex_F"
        );
    }

    #[test]
    fn test_drop_first_layout_is_clean() {
        let drift = drop_first_columns().check_drift();
        assert!(drift.is_clean(), "{}", drift.summary());
        assert_eq!(
            drift.reference_categories,
            vec![
                "Sex_F",
                "ChestPainType_ASY",
                "RestingECG_LVH",
                "ExerciseAngina_N",
                "ST_Slope_Down"
            ]
        );
    }

    #[test]
    fn test_drift_detected() {
        let cols = columns(&[
            "Age",
            "RestingBP",
            "Cholesterol",
            "FastingBS",
            "MaxHR",
            "Sex_M",
            "ChestPainType_ATA",
            "RestingECG_Normal",
            "RestingECG_ST",
            "ExerciseAngina_Y",
            "ST_Slope_Flat",
            "ST_Slope_Up",
            "ChestPainType_Typical",
        ])
        .unwrap();

        let drift = cols.check_drift();
        assert!(!drift.is_clean());
        assert_eq!(drift.missing_numeric, vec!["Oldpeak"]);
        assert_eq!(
            drift.missing_indicators,
            vec!["ChestPainType_NAP", "ChestPainType_TA", "ChestPainType_ASY"]
        );
        assert_eq!(drift.unmapped_columns, vec!["ChestPainType_Typical"]);
        assert!(drift.summary().contains("unmapped columns [ChestPainType_Typical]"));
    }
}
