//! heartcheck CLI - Command-line front end for heartcheck
//!
//! Commands:
//! - assess: Score a single form submission given as flags
//! - predict: Score a batch of raw inputs (batch mode)
//! - align: Show the aligned feature vector for each input
//! - doctor: Diagnose artifacts and column drift
//! - schema: Print input/output schema information

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use heartcheck::artifacts::{load_columns, load_model, load_scaler};
use heartcheck::encoder::{advice, headline, RiskReport, DISCLAIMER};
use heartcheck::model::Classifier;
use heartcheck::scaler::Scaler;
use heartcheck::{
    check_column_drift, CategoricalField, ColumnDrift, ExpectedColumns, HeartRiskPredictor,
    NumericField, PredictError, PredictorConfig, RawInput, HEARTCHECK_VERSION, PRODUCER_NAME,
};

/// heartcheck - Heart disease risk from patient vital signs
#[derive(Parser)]
#[command(name = "heartcheck")]
#[command(version = HEARTCHECK_VERSION)]
#[command(about = "Align patient inputs and score them with a pre-trained classifier", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ArtifactArgs {
    /// Directory holding the default artifact files
    #[arg(long, default_value = ".")]
    artifacts: PathBuf,

    /// JSON config file (overrides --artifacts)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model artifact path
    #[arg(long)]
    model: Option<PathBuf>,

    /// Scaler artifact path
    #[arg(long)]
    scaler: Option<PathBuf>,

    /// Expected columns artifact path
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Reject unknown categories and column drift
    #[arg(long)]
    strict: bool,
}

impl ArtifactArgs {
    fn resolve(&self) -> Result<PredictorConfig, PredictError> {
        let mut config = match &self.config {
            Some(path) => PredictorConfig::from_file(path)?,
            None => PredictorConfig::from_dir(&self.artifacts),
        };

        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(scaler) = &self.scaler {
            config.scaler_path = scaler.clone();
        }
        if let Some(columns) = &self.columns {
            config.columns_path = columns.clone();
        }
        if self.strict {
            config.strict_categories = true;
        }

        debug!(
            model = %config.model_path.display(),
            scaler = %config.scaler_path.display(),
            columns = %config.columns_path.display(),
            "resolved artifact locations"
        );
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single form submission
    Assess {
        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Age in years
        #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(18..=100))]
        age: u32,

        /// Sex
        #[arg(long, default_value = "M", value_parser = ["M", "F"])]
        sex: String,

        /// Chest pain type
        #[arg(long, default_value = "ATA", value_parser = ["ATA", "NAP", "TA", "ASY"])]
        chest_pain: String,

        /// Resting blood pressure (mm Hg)
        #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(80..=200))]
        resting_bp: u32,

        /// Serum cholesterol (mg/dL)
        #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(100..=600))]
        cholesterol: u32,

        /// Fasting blood sugar > 120 mg/dL (0 or 1)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=1))]
        fasting_bs: u32,

        /// Resting ECG result
        #[arg(long, default_value = "Normal", value_parser = ["Normal", "ST", "LVH"])]
        resting_ecg: String,

        /// Maximum heart rate achieved
        #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u32).range(60..=220))]
        max_hr: u32,

        /// Exercise-induced angina
        #[arg(long, default_value = "Y", value_parser = ["Y", "N"])]
        exercise_angina: String,

        /// ST depression induced by exercise (0.0 - 6.0)
        #[arg(long, default_value_t = 1.0, value_parser = parse_oldpeak)]
        oldpeak: f64,

        /// Slope of the peak exercise ST segment
        #[arg(long, default_value = "Up", value_parser = ["Up", "Flat", "Down"])]
        st_slope: String,

        /// Print the JSON report instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Score a batch of raw inputs (batch mode)
    Predict {
        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Show the aligned feature vector for each input
    Align {
        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,
    },

    /// Diagnose artifacts and column drift
    Doctor {
        #[command(flatten)]
        artifacts: ArtifactArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one input per line)
    Ndjson,
    /// JSON array of inputs
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Raw form input
    Input,
    /// Risk report envelope
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: Cli) -> Result<(), CliFailure> {
    match cli.command {
        Commands::Assess {
            artifacts,
            age,
            sex,
            chest_pain,
            resting_bp,
            cholesterol,
            fasting_bs,
            resting_ecg,
            max_hr,
            exercise_angina,
            oldpeak,
            st_slope,
            json,
        } => {
            let raw = RawInput {
                age: f64::from(age),
                resting_bp: f64::from(resting_bp),
                cholesterol: f64::from(cholesterol),
                fasting_bs: f64::from(fasting_bs),
                max_hr: f64::from(max_hr),
                oldpeak,
                sex,
                chest_pain_type: chest_pain,
                resting_ecg,
                exercise_angina,
                st_slope,
            };
            cmd_assess(&artifacts, &raw, json)
        }

        Commands::Predict {
            artifacts,
            input,
            output,
            input_format,
            output_format,
        } => cmd_predict(&artifacts, &input, &output, input_format, output_format),

        Commands::Align {
            artifacts,
            input,
            input_format,
        } => cmd_align(&artifacts, &input, input_format),

        Commands::Doctor { artifacts, json } => cmd_doctor(&artifacts, json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_assess(artifacts: &ArtifactArgs, raw: &RawInput, json: bool) -> Result<(), CliFailure> {
    let predictor = HeartRiskPredictor::load(&artifacts.resolve()?)?;
    let assessment = predictor.predict(raw)?;

    if json {
        println!("{}", predictor.encoder().encode_to_json(&assessment)?);
        return Ok(());
    }

    println!("Heart Risk Assessment");
    println!("=====================");
    println!("Result:     {}", headline(assessment.label));
    if let Some(confidence) = assessment.confidence_pct {
        println!("Confidence: {:.1}%", confidence);
    }
    println!("Advice:     {}", advice(assessment.label));
    if !assessment.dropped_indicators.is_empty() {
        println!(
            "Note:       model has no column for {}",
            assessment.dropped_indicators.join(", ")
        );
    }
    println!();
    println!("{}", DISCLAIMER);

    Ok(())
}

fn cmd_predict(
    artifacts: &ArtifactArgs,
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), CliFailure> {
    let inputs = read_inputs(input, &input_format)?;
    if inputs.is_empty() {
        return Err(CliFailure::NoInputs);
    }

    let predictor = HeartRiskPredictor::load(&artifacts.resolve()?)?;
    let assessments = predictor.predict_batch(&inputs)?;
    info!(count = assessments.len(), "scored inputs");

    let reports: Vec<RiskReport> = assessments
        .iter()
        .map(|a| predictor.encoder().encode(a))
        .collect();

    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_align(
    artifacts: &ArtifactArgs,
    input: &Path,
    input_format: InputFormat,
) -> Result<(), CliFailure> {
    let inputs = read_inputs(input, &input_format)?;
    if inputs.is_empty() {
        return Err(CliFailure::NoInputs);
    }

    let config = artifacts.resolve()?;
    let columns = load_columns(&config.columns_path)?;
    check_column_drift(&columns, config.strict_categories)?;

    for (index, raw) in inputs.iter().enumerate() {
        if config.strict_categories {
            raw.ensure_known_categories()?;
        }

        let aligned = heartcheck::align_with_report(raw, &columns);
        let record = AlignmentRecord {
            index,
            columns: &columns,
            vector: aligned.vector.as_slice(),
            dropped: &aligned.dropped,
        };
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}

fn cmd_doctor(artifacts: &ArtifactArgs, json: bool) -> Result<(), CliFailure> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "heartcheck_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("heartcheck version {}", HEARTCHECK_VERSION),
    });

    let config = match artifacts.resolve() {
        Ok(config) => config,
        Err(e) => {
            checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            });
            return finish_doctor(checks, None, json);
        }
    };

    let columns = match load_columns(&config.columns_path) {
        Ok(columns) => {
            checks.push(DoctorCheck {
                name: "columns".to_string(),
                status: CheckStatus::Ok,
                message: format!("{} expected columns", columns.len()),
            });
            Some(columns)
        }
        Err(e) => {
            checks.push(DoctorCheck {
                name: "columns".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            });
            None
        }
    };

    let scaler_width = match load_scaler(&config.scaler_path) {
        Ok(scaler) => {
            checks.push(DoctorCheck {
                name: "scaler".to_string(),
                status: CheckStatus::Ok,
                message: format!("scaler fitted on {} features", scaler.n_features()),
            });
            Some(scaler.n_features())
        }
        Err(e) => {
            checks.push(DoctorCheck {
                name: "scaler".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            });
            None
        }
    };

    let model_width = match load_model(&config.model_path) {
        Ok(model) => {
            checks.push(DoctorCheck {
                name: "model".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "classifier over {} features, classes {:?}",
                    model.n_features(),
                    model.classes()
                ),
            });
            Some(model.n_features())
        }
        Err(e) => {
            checks.push(DoctorCheck {
                name: "model".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            });
            None
        }
    };

    let mut column_drift = None;
    if let Some(columns) = &columns {
        checks.extend(shape_checks(columns, scaler_width, model_width));
        let drift = columns.check_drift();
        checks.push(drift_check(&drift, config.strict_categories));
        column_drift = Some(drift);
    }

    // Check stdin is available (for batch input piped from a form)
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (batch mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    finish_doctor(checks, column_drift, json)
}

fn shape_checks(
    columns: &ExpectedColumns,
    scaler_width: Option<usize>,
    model_width: Option<usize>,
) -> Vec<DoctorCheck> {
    let mut checks = Vec::new();

    for (name, width) in [("scaler_shape", scaler_width), ("model_shape", model_width)] {
        if let Some(width) = width {
            let (status, message) = if width == columns.len() {
                (CheckStatus::Ok, format!("{} features match columns", width))
            } else {
                (
                    CheckStatus::Error,
                    format!("{} features but {} columns expected", width, columns.len()),
                )
            };
            checks.push(DoctorCheck {
                name: name.to_string(),
                status,
                message,
            });
        }
    }

    checks
}

fn drift_check(drift: &ColumnDrift, strict: bool) -> DoctorCheck {
    if drift.is_clean() {
        let message = if drift.reference_categories.is_empty() {
            "every form category has a column".to_string()
        } else {
            format!(
                "no drift (reference categories: {})",
                drift.reference_categories.join(", ")
            )
        };
        DoctorCheck {
            name: "column_drift".to_string(),
            status: CheckStatus::Ok,
            message,
        }
    } else {
        DoctorCheck {
            name: "column_drift".to_string(),
            status: if strict {
                CheckStatus::Error
            } else {
                CheckStatus::Warning
            },
            message: drift.summary(),
        }
    }
}

fn finish_doctor(
    checks: Vec<DoctorCheck>,
    column_drift: Option<ColumnDrift>,
    json: bool,
) -> Result<(), CliFailure> {
    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: HEARTCHECK_VERSION.to_string(),
        column_drift,
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("heartcheck Doctor Report");
        println!("========================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CliFailure::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), CliFailure> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input: one object per patient");
                println!();
                println!("Numeric fields (range enforced by the form, not the pipeline):");
                for field in NumericField::ALL {
                    let (lo, hi) = field.range();
                    println!(
                        "  - {:<12} {} to {} (default {})",
                        field.column(),
                        lo,
                        hi,
                        field.default_value()
                    );
                }
                println!();
                println!("Categorical fields (one-hot expanded to <field>_<value>):");
                for field in CategoricalField::ALL {
                    println!("  - {:<15} {}", field.base_name(), field.domain().join(" | "));
                }
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output: risk report envelope");
                println!();
                println!("- report_version: Envelope version (1.0.0)");
                println!("- producer: {{ name, version, instance_id }}");
                println!("- computed_at_utc: RFC 3339 timestamp");
                println!("- assessment:");
                println!("  - label: high_risk | low_risk");
                println!("  - prediction: raw classifier class");
                println!("  - confidence_pct: highest class probability x 100 (optional)");
                println!("  - dropped_indicators: input categories the model has no column for");
                println!("- headline, advice, disclaimer: display text");
            }
        }
    }

    Ok(())
}

// Helper functions

fn parse_oldpeak(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    let (lo, hi) = NumericField::Oldpeak.range();
    if !(lo..=hi).contains(&value) {
        return Err(format!("{value} is not in {lo}..={hi}"));
    }
    Ok(value)
}

fn read_inputs(input: &Path, input_format: &InputFormat) -> Result<Vec<RawInput>, CliFailure> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let inputs = match input_format {
        InputFormat::Ndjson => RawInput::parse_ndjson(&input_data)?,
        InputFormat::Json => RawInput::parse_array(&input_data)?,
    };
    debug!(count = inputs.len(), "parsed inputs");
    Ok(inputs)
}

fn format_output(reports: &[RiskReport], format: &OutputFormat) -> Result<String, CliFailure> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)?),
    }
}

fn get_input_json_schema() -> String {
    let mut properties = serde_json::Map::new();
    for field in NumericField::ALL {
        let (lo, hi) = field.range();
        properties.insert(
            field.column().to_string(),
            serde_json::json!({ "type": "number", "minimum": lo, "maximum": hi }),
        );
    }
    for field in CategoricalField::ALL {
        properties.insert(
            field.base_name().to_string(),
            serde_json::json!({ "type": "string", "enum": field.domain() }),
        );
    }

    let required: Vec<&str> = NumericField::ALL
        .iter()
        .map(|f| f.column())
        .chain(CategoricalField::ALL.iter().map(|f| f.base_name()))
        .collect();

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "heartcheck.raw_input.v1",
        "description": "Patient form submission",
        "type": "object",
        "required": required,
        "properties": properties
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "heartcheck.risk_report.v1",
        "description": "heartcheck risk report envelope",
        "type": "object",
        "required": ["report_version", "producer", "computed_at_utc", "assessment"],
        "properties": {
            "report_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "computed_at_utc": { "type": "string", "format": "date-time" },
            "assessment": {
                "type": "object",
                "required": ["label", "prediction", "dropped_indicators"],
                "properties": {
                    "label": { "type": "string", "enum": ["high_risk", "low_risk"] },
                    "prediction": { "type": "integer" },
                    "confidence_pct": { "type": "number", "minimum": 0, "maximum": 100 },
                    "dropped_indicators": { "type": "array", "items": { "type": "string" } }
                }
            },
            "headline": { "type": "string" },
            "advice": { "type": "string" },
            "disclaimer": { "type": "string" }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum CliFailure {
    Io(io::Error),
    Predict(PredictError),
    Json(serde_json::Error),
    NoInputs,
    DoctorFailed,
}

impl From<io::Error> for CliFailure {
    fn from(e: io::Error) -> Self {
        CliFailure::Io(e)
    }
}

impl From<PredictError> for CliFailure {
    fn from(e: PredictError) -> Self {
        CliFailure::Predict(e)
    }
}

impl From<serde_json::Error> for CliFailure {
    fn from(e: serde_json::Error) -> Self {
        CliFailure::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CliFailure> for CliError {
    fn from(e: CliFailure) -> Self {
        match e {
            CliFailure::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CliFailure::Predict(e) => {
                let (code, hint) = match &e {
                    PredictError::Config(_) => ("CONFIG_ERROR", "Run 'heartcheck doctor' to inspect the artifacts"),
                    PredictError::ArtifactIo { .. } | PredictError::Artifact { .. } => {
                        ("ARTIFACT_ERROR", "Check --artifacts or the individual artifact paths")
                    }
                    PredictError::ParseError(_) | PredictError::JsonError(_) => {
                        ("PARSE_ERROR", "Run 'heartcheck schema input' for the expected fields")
                    }
                    PredictError::UnknownCategory { .. } => {
                        ("UNKNOWN_CATEGORY", "Use one of the categories listed by 'heartcheck schema input'")
                    }
                    PredictError::ShapeMismatch { .. } | PredictError::PredictionFailed(_) => {
                        ("PREDICTION_FAILED", "Check that the artifacts come from the same training run")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            CliFailure::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CliFailure::NoInputs => CliError {
                code: "NO_INPUTS".to_string(),
                message: "No inputs found".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CliFailure::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct AlignmentRecord<'a> {
    index: usize,
    columns: &'a ExpectedColumns,
    vector: &'a [f64],
    dropped: &'a [String],
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_drift: Option<ColumnDrift>,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
