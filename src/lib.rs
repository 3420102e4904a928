//! heartcheck - Feature alignment and risk inference for heart disease classifiers
//!
//! heartcheck turns a patient form submission into the exact feature vector a
//! pre-trained classifier expects, then runs the exported scaler and model:
//! raw input → one-hot alignment → scaling → classification → result envelope.
//!
//! ## Modules
//!
//! - **Alignment**: [`features`] and [`columns`] own the column contract
//! - **Inference**: [`scaler`], [`model`] and [`artifacts`] execute the exported artifacts
//! - **Serving**: [`pipeline::HeartRiskPredictor`] ties everything together

pub mod artifacts;
pub mod columns;
pub mod config;
pub mod encoder;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod scaler;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use columns::{ColumnDrift, ExpectedColumns, IndicatorColumn};
pub use config::PredictorConfig;
pub use error::PredictError;
pub use features::{align, align_columns, align_with_report, AlignedFeatures};
pub use pipeline::{check_column_drift, predict_risk_json, HeartRiskPredictor};
pub use types::{CategoricalField, FeatureVector, NumericField, RawInput, RiskAssessment, RiskLabel};

/// heartcheck version embedded in all reports
pub const HEARTCHECK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "heartcheck";
