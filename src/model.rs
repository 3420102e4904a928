//! Classifier execution
//!
//! The classifier is trained elsewhere and exported as JSON. This module runs
//! the exported model in-process; it never fits or updates it.

use crate::error::PredictError;
use serde::{Deserialize, Serialize};

/// Trained binary classifier over scaled feature vectors
pub trait Classifier: Send + Sync {
    /// Number of features each row must carry
    fn n_features(&self) -> usize;

    /// Class labels in probability-column order
    fn classes(&self) -> &[i64];

    /// Predict one class per row
    fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<i64>, PredictError>;

    /// Per-class probabilities, when the model supports them
    fn predict_proba(&self, _batch: &[Vec<f64>]) -> Result<Option<Vec<Vec<f64>>>, PredictError> {
        Ok(None)
    }
}

/// Neighbour vote weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnnWeights {
    #[default]
    Uniform,
    /// Inverse Euclidean distance; an exact match takes the whole vote
    Distance,
}

fn default_neighbors() -> usize {
    5
}

/// k-nearest-neighbours classifier holding its (already scaled) training set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnClassifier {
    #[serde(default = "default_neighbors")]
    pub n_neighbors: usize,
    #[serde(default)]
    pub weights: KnnWeights,
    pub classes: Vec<i64>,
    pub samples: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

impl KnnClassifier {
    /// Check internal consistency of deserialized parameters
    pub fn validate(&self) -> Result<(), PredictError> {
        let invalid = |message: String| PredictError::Artifact {
            artifact: "model",
            message,
        };

        if self.samples.is_empty() {
            return Err(invalid("training samples are empty".to_string()));
        }
        if self.labels.len() != self.samples.len() {
            return Err(invalid(format!(
                "{} labels for {} samples",
                self.labels.len(),
                self.samples.len()
            )));
        }
        if self.n_neighbors == 0 || self.n_neighbors > self.samples.len() {
            return Err(invalid(format!(
                "n_neighbors must be between 1 and {}, got {}",
                self.samples.len(),
                self.n_neighbors
            )));
        }

        let width = self.samples[0].len();
        if width == 0 {
            return Err(invalid("training samples have no features".to_string()));
        }
        if let Some(pos) = self.samples.iter().position(|s| s.len() != width) {
            return Err(invalid(format!(
                "sample {} has {} features, expected {}",
                pos,
                self.samples[pos].len(),
                width
            )));
        }
        if self.samples.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid("training samples must be finite".to_string()));
        }

        if self.classes.is_empty() {
            return Err(invalid("classes are empty".to_string()));
        }
        for (i, class) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(class) {
                return Err(invalid(format!("class {} listed twice", class)));
            }
        }
        if let Some(label) = self.labels.iter().find(|l| !self.classes.contains(l)) {
            return Err(invalid(format!("label {} is not a known class", label)));
        }

        Ok(())
    }

    fn check_row(&self, row: &[f64]) -> Result<(), PredictError> {
        if row.len() != self.n_features() {
            return Err(PredictError::ShapeMismatch {
                context: "classifier",
                expected: self.n_features(),
                actual: row.len(),
            });
        }
        if let Some(pos) = row.iter().position(|v| !v.is_finite()) {
            return Err(PredictError::PredictionFailed(format!(
                "feature {} is not finite ({})",
                pos, row[pos]
            )));
        }
        Ok(())
    }

    /// Indices and distances of the k nearest samples, nearest first.
    ///
    /// Equal distances keep training order.
    fn neighbors(&self, row: &[f64]) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| (idx, euclidean(row, sample)))
            .collect();

        distances.sort_by(|a, b| a.1.total_cmp(&b.1));
        distances.truncate(self.n_neighbors);
        distances
    }

    fn row_proba(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        self.check_row(row)?;

        let neighbors = self.neighbors(row);
        let exact_match = neighbors.iter().any(|(_, d)| *d == 0.0);

        let mut votes = vec![0.0; self.classes.len()];
        for (idx, distance) in &neighbors {
            let weight = match self.weights {
                KnnWeights::Uniform => 1.0,
                KnnWeights::Distance if exact_match => {
                    if *distance == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                KnnWeights::Distance => 1.0 / distance,
            };

            let label = self.labels[*idx];
            if let Some(class_idx) = self.classes.iter().position(|c| *c == label) {
                votes[class_idx] += weight;
            }
        }

        let total: f64 = votes.iter().sum();
        if total > 0.0 {
            for v in votes.iter_mut() {
                *v /= total;
            }
        }
        Ok(votes)
    }
}

impl Classifier for KnnClassifier {
    fn n_features(&self) -> usize {
        self.samples.first().map(Vec::len).unwrap_or(0)
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<i64>, PredictError> {
        batch
            .iter()
            .map(|row| {
                let proba = self.row_proba(row)?;
                Ok(self.classes[argmax(&proba)])
            })
            .collect()
    }

    fn predict_proba(&self, batch: &[Vec<f64>]) -> Result<Option<Vec<Vec<f64>>>, PredictError> {
        let rows = batch
            .iter()
            .map(|row| self.row_proba(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(rows))
    }
}

/// Serialized model artifact, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Knn(KnnClassifier),
}

impl ModelArtifact {
    /// Validate and turn the artifact into a usable classifier
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, PredictError> {
        match self {
            ModelArtifact::Knn(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Index of the largest value; the earliest wins ties
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_model(k: usize, weights: KnnWeights) -> KnnClassifier {
        KnnClassifier {
            n_neighbors: k,
            weights,
            classes: vec![0, 1],
            samples: vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![2.0, 0.0],
                vec![10.0, 0.0],
                vec![11.0, 0.0],
            ],
            labels: vec![0, 0, 1, 1, 1],
        }
    }

    #[test]
    fn test_majority_vote() {
        let model = line_model(3, KnnWeights::Uniform);
        let preds = model
            .predict(&[vec![0.2, 0.0], vec![10.5, 0.0]])
            .unwrap();
        assert_eq!(preds, vec![0, 1]);
    }

    #[test]
    fn test_uniform_probabilities() {
        let model = line_model(3, KnnWeights::Uniform);
        let proba = model.predict_proba(&[vec![0.9, 0.0]]).unwrap().unwrap();

        // neighbours: x=1 (0), x=0 (0), x=2 (1)
        assert!((proba[0][0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((proba[0][1] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_weighting() {
        let model = line_model(3, KnnWeights::Distance);
        let proba = model.predict_proba(&[vec![1.9, 0.0]]).unwrap().unwrap();

        // neighbours: x=2 (d=0.1, class 1), x=1 (d=0.9), x=0 (d=1.9)
        let w1 = 1.0 / 0.1;
        let w0 = 1.0 / 0.9 + 1.0 / 1.9;
        assert!((proba[0][1] - w1 / (w0 + w1)).abs() < 1e-9);
        assert_eq!(model.predict(&[vec![1.9, 0.0]]).unwrap(), vec![1]);
    }

    #[test]
    fn test_exact_match_takes_vote() {
        let model = line_model(3, KnnWeights::Distance);
        let proba = model.predict_proba(&[vec![2.0, 0.0]]).unwrap().unwrap();
        assert_eq!(proba[0], vec![0.0, 1.0]);
    }

    #[test]
    fn test_tie_prefers_first_class() {
        let model = line_model(4, KnnWeights::Uniform);
        // neighbours of x=1.5: x=1, x=2, x=0, x=10 -> two votes each
        assert_eq!(model.predict(&[vec![1.5, 0.0]]).unwrap(), vec![0]);
    }

    #[test]
    fn test_width_mismatch() {
        let model = line_model(3, KnnWeights::Uniform);
        let err = model.predict(&[vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            PredictError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_row_rejected() {
        let model = line_model(1, KnnWeights::Uniform);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = model.predict(&[vec![0.0, bad]]).unwrap_err();
            assert!(matches!(err, PredictError::PredictionFailed(_)));
            assert!(model.predict_proba(&[vec![bad, 0.0]]).is_err());
        }
    }

    #[test]
    fn test_validation() {
        let mut model = line_model(3, KnnWeights::Uniform);
        assert!(model.validate().is_ok());

        model.n_neighbors = 6;
        assert!(model.validate().is_err());

        let mut model = line_model(3, KnnWeights::Uniform);
        model.labels[0] = 2;
        assert!(model.validate().is_err());

        let mut model = line_model(3, KnnWeights::Uniform);
        model.samples[1].push(0.0);
        assert!(model.validate().is_err());

        let mut model = line_model(3, KnnWeights::Uniform);
        model.classes = vec![0, 1, 0];
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_artifact_defaults() {
        let json = r#"{
            "kind": "knn",
            "classes": [0, 1],
            "samples": [[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]],
            "labels": [0, 0, 0, 1, 1, 1]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        let ModelArtifact::Knn(knn) = &artifact;
        assert_eq!(knn.n_neighbors, 5);
        assert_eq!(knn.weights, KnnWeights::Uniform);

        let model = artifact.into_classifier().unwrap();
        assert_eq!(model.n_features(), 1);
        assert_eq!(model.classes(), &[0, 1]);
        assert_eq!(model.predict(&[vec![0.0], vec![5.0]]).unwrap(), vec![0, 1]);
    }
}
