//! Predictor configuration
//!
//! Locations of the three exported artifacts plus how strictly categorical
//! input is treated. Paths in a config file are resolved relative to the file.

use crate::error::PredictError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name of the exported classifier
pub const DEFAULT_MODEL_FILE: &str = "knn_heart_model.json";

/// Default file name of the exported scaler
pub const DEFAULT_SCALER_FILE: &str = "heart_scaler.json";

/// Default file name of the expected column list
pub const DEFAULT_COLUMNS_FILE: &str = "heart_columns.json";

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCALER_FILE)
}

fn default_columns_path() -> PathBuf {
    PathBuf::from(DEFAULT_COLUMNS_FILE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
    #[serde(default = "default_columns_path")]
    pub columns_path: PathBuf,
    /// Reject categorical values outside the form's domains and column drift
    /// instead of silently dropping the signal
    #[serde(default)]
    pub strict_categories: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
            columns_path: default_columns_path(),
            strict_categories: false,
        }
    }
}

impl PredictorConfig {
    /// Default artifact file names inside `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model_path: dir.join(DEFAULT_MODEL_FILE),
            scaler_path: dir.join(DEFAULT_SCALER_FILE),
            columns_path: dir.join(DEFAULT_COLUMNS_FILE),
            strict_categories: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PredictError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file; relative artifact paths resolve against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PredictError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PredictError::ArtifactIo {
            artifact: "config",
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        match path.parent() {
            Some(base) if !base.as_os_str().is_empty() => Ok(config.relative_to(base)),
            _ => Ok(config),
        }
    }

    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            model_path: resolve(self.model_path),
            scaler_path: resolve(self.scaler_path),
            columns_path: resolve(self.columns_path),
            strict_categories: self.strict_categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_dir() {
        let config = PredictorConfig::from_dir("/opt/models");
        assert_eq!(
            config.model_path,
            PathBuf::from("/opt/models/knn_heart_model.json")
        );
        assert_eq!(
            config.columns_path,
            PathBuf::from("/opt/models/heart_columns.json")
        );
        assert!(!config.strict_categories);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PredictorConfig::from_json(r#"{"strict_categories": true}"#).unwrap();
        assert_eq!(
            config,
            PredictorConfig {
                strict_categories: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_file_paths_resolve_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heartcheck.json");
        fs::write(
            &path,
            r#"{"model_path": "models/knn.json", "scaler_path": "/abs/scaler.json"}"#,
        )
        .unwrap();

        let config = PredictorConfig::from_file(&path).unwrap();
        assert_eq!(config.model_path, dir.path().join("models/knn.json"));
        assert_eq!(config.scaler_path, PathBuf::from("/abs/scaler.json"));
        assert_eq!(config.columns_path, dir.path().join(DEFAULT_COLUMNS_FILE));
    }

    #[test]
    fn test_missing_file() {
        let err = PredictorConfig::from_file("/nonexistent/heartcheck.json").unwrap_err();
        assert!(matches!(err, PredictError::ArtifactIo { artifact: "config", .. }));
    }
}
