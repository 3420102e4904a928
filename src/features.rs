//! Feature alignment
//!
//! This module turns a raw form submission into the exact feature vector the
//! trained model expects:
//! - Numeric fields copied verbatim
//! - Categorical fields one-hot expanded into `<field>_<value>` indicators
//! - Every expected column not populated from the input zero-filled
//! - Values projected in expected-column order
//!
//! Indicators that the column contract does not list are dropped by the
//! projection. They are reported in [`AlignedFeatures::dropped`] but never
//! treated as an error here.

use crate::columns::{ExpectedColumns, IndicatorColumn};
use crate::error::PredictError;
use crate::types::{CategoricalField, FeatureVector, NumericField, RawInput};
use std::collections::HashMap;
use tracing::debug;

/// Feature vector together with the indicator columns the projection discarded
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFeatures {
    pub vector: FeatureVector,
    pub dropped: Vec<String>,
}

/// Build the name-to-value mapping before projection.
///
/// The mapping holds every numeric column, one indicator per categorical field
/// and a zero for each expected column that neither of those populated. It can
/// contain names outside `columns`.
pub fn build_mapping(raw: &RawInput, columns: &ExpectedColumns) -> HashMap<String, f64> {
    let mut mapping: HashMap<String, f64> = HashMap::new();

    for field in NumericField::ALL {
        mapping.insert(field.column().to_string(), raw.numeric(field));
    }

    for indicator in selected_indicators(raw) {
        mapping.insert(indicator.name(), 1.0);
    }

    for name in columns.iter() {
        mapping.entry(name.to_string()).or_insert(0.0);
    }

    mapping
}

/// Read `mapping` strictly in expected-column order
pub fn project(mapping: &HashMap<String, f64>, columns: &ExpectedColumns) -> FeatureVector {
    let values = columns
        .iter()
        .map(|name| mapping.get(name).copied().unwrap_or(0.0))
        .collect();
    FeatureVector::new(values)
}

/// Align a raw input to the column contract
pub fn align(raw: &RawInput, columns: &ExpectedColumns) -> FeatureVector {
    project(&build_mapping(raw, columns), columns)
}

/// Align a raw input and report which synthesized indicators were dropped
pub fn align_with_report(raw: &RawInput, columns: &ExpectedColumns) -> AlignedFeatures {
    let vector = align(raw, columns);

    let dropped: Vec<String> = selected_indicators(raw)
        .into_iter()
        .map(|indicator| indicator.name())
        .filter(|name| !columns.contains(name))
        .collect();

    if !dropped.is_empty() {
        debug!(dropped = ?dropped, "indicator columns absent from expected columns");
    }

    AlignedFeatures { vector, dropped }
}

/// Align against an untyped column list, validating it first
pub fn align_columns(raw: &RawInput, columns: &[String]) -> Result<FeatureVector, PredictError> {
    let columns = ExpectedColumns::new(columns.to_vec())?;
    Ok(align(raw, &columns))
}

/// The single indicator each categorical field contributes
fn selected_indicators(raw: &RawInput) -> Vec<IndicatorColumn> {
    CategoricalField::ALL
        .iter()
        .map(|field| IndicatorColumn::new(*field, raw.categorical(*field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn columns(names: &[&str]) -> ExpectedColumns {
        ExpectedColumns::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn scenario_input() -> RawInput {
        RawInput {
            age: 40.0,
            resting_bp: 120.0,
            cholesterol: 200.0,
            fasting_bs: 0.0,
            max_hr: 150.0,
            oldpeak: 1.0,
            sex: "F".to_string(),
            chest_pain_type: "ATA".to_string(),
            resting_ecg: "Normal".to_string(),
            exercise_angina: "N".to_string(),
            st_slope: "Up".to_string(),
        }
    }

    fn scenario_columns() -> ExpectedColumns {
        columns(&[
            "Age",
            "RestingBP",
            "Cholesterol",
            "FastingBS",
            "MaxHR",
            "Oldpeak",
            "Sex_F",
            "ChestPainType_ATA",
            "RestingECG_Normal",
            "ExerciseAngina_N",
            "ST_Slope_Up",
        ])
    }

    /// Every indicator of the full domain, numeric columns interleaved out of order
    fn full_columns() -> ExpectedColumns {
        let mut names: Vec<String> = Vec::new();
        for field in CategoricalField::ALL {
            for value in field.domain() {
                names.push(IndicatorColumn::name_for(field, value));
            }
        }
        for (i, field) in NumericField::ALL.iter().enumerate() {
            names.insert(i * 3, field.column().to_string());
        }
        ExpectedColumns::new(names).unwrap()
    }

    #[test]
    fn test_basic_scenario() {
        let vector = align(&scenario_input(), &scenario_columns());
        assert_eq!(
            vector.as_slice(),
            &[40.0, 120.0, 200.0, 0.0, 150.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_unselected_category_is_zero() {
        let mut names: Vec<String> = scenario_columns().as_slice().to_vec();
        names.insert(7, "Sex_M".to_string());
        let cols = ExpectedColumns::new(names).unwrap();

        let vector = align(&scenario_input(), &cols);
        assert_eq!(vector.len(), 12);
        assert_eq!(vector.as_slice()[7], 0.0);
        assert_eq!(vector.get(&cols, "Sex_M"), Some(0.0));
        assert_eq!(vector.get(&cols, "Sex_F"), Some(1.0));
    }

    #[test]
    fn test_unlisted_category_is_dropped() {
        let raw = RawInput {
            chest_pain_type: "NAP".to_string(),
            ..scenario_input()
        };
        let cols = scenario_columns();

        let aligned = align_with_report(&raw, &cols);
        assert_eq!(aligned.vector.get(&cols, "ChestPainType_ATA"), Some(0.0));
        assert_eq!(aligned.dropped, vec!["ChestPainType_NAP".to_string()]);
        assert_eq!(
            aligned.vector.as_slice(),
            &[40.0, 120.0, 200.0, 0.0, 150.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_dropped_indicator_matches_omitted_field() {
        let raw = RawInput {
            chest_pain_type: "NAP".to_string(),
            ..scenario_input()
        };
        let cols = scenario_columns();

        let mut without_field = build_mapping(&raw, &cols);
        without_field.remove("ChestPainType_NAP");

        assert_eq!(align(&raw, &cols), project(&without_field, &cols));
    }

    #[test]
    fn test_out_of_domain_value_is_absorbed() {
        let raw = RawInput {
            resting_ecg: "Abnormal".to_string(),
            ..scenario_input()
        };
        let cols = full_columns();

        let aligned = align_with_report(&raw, &cols);
        assert_eq!(aligned.vector.len(), cols.len());
        assert_eq!(aligned.dropped, vec!["RestingECG_Abnormal".to_string()]);
        for value in CategoricalField::RestingEcg.domain() {
            let name = IndicatorColumn::name_for(CategoricalField::RestingEcg, value);
            assert_eq!(aligned.vector.get(&cols, &name), Some(0.0));
        }
    }

    #[test]
    fn test_length_matches_columns() {
        for cols in [scenario_columns(), full_columns(), columns(&["MaxHR"])] {
            assert_eq!(align(&scenario_input(), &cols).len(), cols.len());
        }
    }

    #[test]
    fn test_order_fidelity() {
        let raw = RawInput {
            sex: "M".to_string(),
            chest_pain_type: "ASY".to_string(),
            exercise_angina: "Y".to_string(),
            st_slope: "Flat".to_string(),
            ..scenario_input()
        };
        let cols = full_columns();

        let mapping = build_mapping(&raw, &cols);
        let vector = project(&mapping, &cols);

        let expected: HashMap<String, f64> = mapping
            .into_iter()
            .filter(|(name, _)| cols.contains(name))
            .collect();
        assert_eq!(vector.to_mapping(&cols), expected);
    }

    #[test]
    fn test_idempotent() {
        let cols = full_columns();
        let raw = scenario_input();
        assert_eq!(align(&raw, &cols), align(&raw, &cols));
    }

    #[test]
    fn test_zero_fill() {
        let raw = scenario_input();
        let cols = full_columns();
        let vector = align(&raw, &cols);

        let touched: Vec<String> = NumericField::ALL
            .iter()
            .map(|f| f.column().to_string())
            .chain(
                CategoricalField::ALL
                    .iter()
                    .map(|f| IndicatorColumn::name_for(*f, raw.categorical(*f))),
            )
            .collect();

        for (name, value) in cols.iter().zip(vector.as_slice()) {
            if !touched.iter().any(|t| t == name) {
                assert_eq!(*value, 0.0, "column {} should be zero", name);
            }
        }
    }

    #[test]
    fn test_numeric_values_not_clamped() {
        let raw = RawInput {
            age: 7.0,
            cholesterol: 0.0,
            oldpeak: -2.6,
            ..scenario_input()
        };
        let cols = scenario_columns();
        let vector = align(&raw, &cols);

        assert_eq!(vector.get(&cols, "Age"), Some(7.0));
        assert_eq!(vector.get(&cols, "Cholesterol"), Some(0.0));
        assert_eq!(vector.get(&cols, "Oldpeak"), Some(-2.6));
    }

    #[test]
    fn test_numeric_column_not_in_contract_is_dropped() {
        let cols = columns(&["Sex_F", "Age"]);
        let vector = align(&scenario_input(), &cols);
        assert_eq!(vector.as_slice(), &[1.0, 40.0]);
    }

    #[test]
    fn test_align_columns_rejects_empty() {
        let err = align_columns(&scenario_input(), &[]).unwrap_err();
        assert!(matches!(err, PredictError::Config(_)));
    }

    #[test]
    fn test_align_columns_untyped() {
        let names: Vec<String> = vec!["Oldpeak".into(), "ST_Slope_Up".into(), "Sex_M".into()];
        let vector = align_columns(&scenario_input(), &names).unwrap();
        assert_eq!(vector.as_slice(), &[1.0, 1.0, 0.0]);
    }

    /// Every column a form can populate plus names no field maps to
    fn column_universe() -> Vec<String> {
        let mut names: Vec<String> = NumericField::ALL
            .iter()
            .map(|f| f.column().to_string())
            .collect();
        for field in CategoricalField::ALL {
            for value in field.domain() {
                names.push(IndicatorColumn::name_for(field, value));
            }
        }
        names.push("Unmapped_Extra".to_string());
        names.push("ChestPainType_Typical".to_string());
        names
    }

    fn arb_columns() -> impl Strategy<Value = ExpectedColumns> {
        let universe = column_universe();
        let len = universe.len();
        proptest::sample::subsequence(universe, 1..=len)
            .prop_shuffle()
            .prop_map(|names| ExpectedColumns::new(names).unwrap())
    }

    fn arb_category(field: CategoricalField) -> impl Strategy<Value = String> {
        prop_oneof![
            3 => proptest::sample::select(field.domain()).prop_map(str::to_string),
            1 => "[A-Za-z]{1,8}",
        ]
    }

    prop_compose! {
        fn arb_raw_input()(
            age in -50.0f64..200.0,
            resting_bp in 0.0f64..400.0,
            cholesterol in -10.0f64..900.0,
            fasting_bs in 0.0f64..=1.0,
            max_hr in 0.0f64..300.0,
            oldpeak in -5.0f64..10.0,
            sex in arb_category(CategoricalField::Sex),
            chest_pain_type in arb_category(CategoricalField::ChestPainType),
            resting_ecg in arb_category(CategoricalField::RestingEcg),
            exercise_angina in arb_category(CategoricalField::ExerciseAngina),
            st_slope in arb_category(CategoricalField::StSlope),
        ) -> RawInput {
            RawInput {
                age,
                resting_bp,
                cholesterol,
                fasting_bs,
                max_hr,
                oldpeak,
                sex,
                chest_pain_type,
                resting_ecg,
                exercise_angina,
                st_slope,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_length_matches_columns(raw in arb_raw_input(), cols in arb_columns()) {
            prop_assert_eq!(align(&raw, &cols).len(), cols.len());
        }

        #[test]
        fn prop_order_fidelity(raw in arb_raw_input(), cols in arb_columns()) {
            let mapping = build_mapping(&raw, &cols);
            let vector = align(&raw, &cols);
            for (idx, name) in cols.iter().enumerate() {
                prop_assert_eq!(Some(vector.as_slice()[idx]), mapping.get(name).copied());
            }
        }

        #[test]
        fn prop_idempotent(raw in arb_raw_input(), cols in arb_columns()) {
            prop_assert_eq!(align(&raw, &cols), align(&raw, &cols));
        }

        #[test]
        fn prop_populated_values_and_zero_fill(raw in arb_raw_input(), cols in arb_columns()) {
            let vector = align(&raw, &cols);

            for field in NumericField::ALL {
                if cols.contains(field.column()) {
                    prop_assert_eq!(vector.get(&cols, field.column()), Some(raw.numeric(field)));
                }
            }

            let selected: Vec<String> = CategoricalField::ALL
                .iter()
                .map(|f| IndicatorColumn::name_for(*f, raw.categorical(*f)))
                .collect();

            for (name, value) in cols.iter().zip(vector.as_slice()) {
                let numeric = NumericField::ALL.iter().any(|f| f.column() == name);
                if selected.iter().any(|s| s == name) {
                    prop_assert_eq!(*value, 1.0);
                } else if !numeric {
                    prop_assert_eq!(*value, 0.0, "column {} should be zero", name);
                }
            }
        }

        #[test]
        fn prop_unlisted_indicators_dropped(raw in arb_raw_input(), cols in arb_columns()) {
            let aligned = align_with_report(&raw, &cols);

            let expected: Vec<String> = CategoricalField::ALL
                .iter()
                .map(|f| IndicatorColumn::name_for(*f, raw.categorical(*f)))
                .filter(|name| !cols.contains(name))
                .collect();
            prop_assert_eq!(&aligned.dropped, &expected);

            let mut without_dropped = build_mapping(&raw, &cols);
            for name in &expected {
                without_dropped.remove(name);
            }
            prop_assert_eq!(aligned.vector, project(&without_dropped, &cols));
        }
    }
}
