//! The predictor capability and its artifact-backed implementation.

use std::path::Path;

use crate::error::{ModelInferenceError, Result};
use crate::parser;
use crate::types::*;

/// Anything that can score a single feature row.
///
/// ## Design Note
/// - `Send + Sync` lets one registry serve concurrent callers without locks
/// - Implementations must be pure: same row in, same prediction out
/// - Tests implement this directly to inject deterministic stubs
pub trait Predictor: Send + Sync {
    /// Returns the name of this predictor (for logging/debugging)
    fn name(&self) -> &str;

    /// Input columns in the order the model was trained on.
    ///
    /// `None` means the predictor does not declare a schema.
    fn input_columns(&self) -> Option<Vec<&str>> {
        None
    }

    /// Score one row.
    fn predict(&self, row: &FeatureRow) -> std::result::Result<Prediction, ModelInferenceError>;
}

/// Predictor backed by a validated `ModelArtifact`.
///
/// Fields stay private so every instance has gone through `parser::validate`;
/// inference relies on that for bounds-safe indexing.
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    name: String,
    artifact: ModelArtifact,
}

impl ArtifactPredictor {
    /// Read and validate the artifact for `task` at `path`
    pub fn load(path: &Path, task: ModelTask) -> Result<Self> {
        let artifact = parser::read_artifact(path, task)?;
        Ok(Self::named(artifact))
    }

    /// Wrap an in-memory artifact after validating it against its own task
    pub fn from_artifact(artifact: ModelArtifact) -> std::result::Result<Self, String> {
        parser::validate(&artifact, artifact.task)?;
        Ok(Self::named(artifact))
    }

    fn named(artifact: ModelArtifact) -> Self {
        let name = format!("{}/{}", artifact.task, artifact.estimator.kind());
        Self { name, artifact }
    }

    /// Turn a row into the estimator's feature vector
    fn encode(&self, row: &FeatureRow) -> std::result::Result<Vec<f64>, ModelInferenceError> {
        let expected: Vec<&str> = self.artifact.inputs.iter().map(InputSpec::name).collect();
        let found = row.columns();
        if expected != found {
            return Err(ModelInferenceError::SchemaMismatch {
                model: self.name.clone(),
                expected: expected.iter().map(|c| c.to_string()).collect(),
                found: found.iter().map(|c| c.to_string()).collect(),
            });
        }

        let width = self.artifact.inputs.iter().map(InputSpec::width).sum();
        let mut encoded = Vec::with_capacity(width);

        for (spec, (column, value)) in self.artifact.inputs.iter().zip(row.iter()) {
            match (spec, value) {
                (InputSpec::Numeric { mean, scale, .. }, FeatureValue::Number(x)) => {
                    if !x.is_finite() {
                        return Err(self.non_finite(&format!("column {}", column)));
                    }
                    encoded.push((x - mean) / scale);
                }
                (InputSpec::Categorical { categories, .. }, FeatureValue::Category(label)) => {
                    let hot = categories.iter().position(|c| c == label).ok_or_else(|| {
                        ModelInferenceError::UnknownCategory {
                            model: self.name.clone(),
                            column: column.to_string(),
                            value: label.clone(),
                        }
                    })?;
                    encoded.extend((0..categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
                }
                (InputSpec::Numeric { .. }, other) => {
                    return Err(self.type_mismatch(column, "numeric", other));
                }
                (InputSpec::Categorical { .. }, other) => {
                    return Err(self.type_mismatch(column, "categorical", other));
                }
            }
        }

        Ok(encoded)
    }

    fn type_mismatch(
        &self,
        column: &str,
        expected: &'static str,
        found: &FeatureValue,
    ) -> ModelInferenceError {
        ModelInferenceError::TypeMismatch {
            model: self.name.clone(),
            column: column.to_string(),
            expected,
            found: found.kind(),
        }
    }

    fn non_finite(&self, location: &str) -> ModelInferenceError {
        ModelInferenceError::NonFinite {
            model: self.name.clone(),
            location: location.to_string(),
        }
    }

    /// Label of the best class; fails if any score is non-finite
    fn pick_class(
        &self,
        classes: &[String],
        scores: &[f64],
    ) -> std::result::Result<Prediction, ModelInferenceError> {
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(self.non_finite("class scores"));
        }
        Ok(Prediction::Label(classes[argmax(scores)].clone()))
    }

    fn evaluate(&self, x: &[f64]) -> std::result::Result<Prediction, ModelInferenceError> {
        let prediction = match &self.artifact.estimator {
            Estimator::LinearRegression {
                intercept,
                coefficients,
            } => Prediction::Value(intercept + dot(coefficients, x)),
            Estimator::LogisticRegression {
                classes,
                intercepts,
                coefficients,
            } => {
                // Softmax is monotone, so the argmax of the raw scores is the
                // most probable class
                let scores: Vec<f64> = intercepts
                    .iter()
                    .zip(coefficients)
                    .map(|(b, w)| b + dot(w, x))
                    .collect();
                return self.pick_class(classes, &scores);
            }
            Estimator::TreeEnsemble { classes, trees } => {
                let mut mean = vec![0.0; classes.as_ref().map_or(1, Vec::len)];
                for tree in trees {
                    for (acc, v) in mean.iter_mut().zip(leaf(tree, x)) {
                        *acc += v;
                    }
                }
                let n = trees.len() as f64;
                mean.iter_mut().for_each(|v| *v /= n);

                match classes {
                    Some(classes) => return self.pick_class(classes, &mean),
                    None => Prediction::Value(mean[0]),
                }
            }
        };

        match prediction {
            Prediction::Value(v) if !v.is_finite() => Err(self.non_finite("output")),
            prediction => Ok(prediction),
        }
    }
}

impl Predictor for ArtifactPredictor {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_columns(&self) -> Option<Vec<&str>> {
        Some(self.artifact.inputs.iter().map(InputSpec::name).collect())
    }

    fn predict(&self, row: &FeatureRow) -> std::result::Result<Prediction, ModelInferenceError> {
        let x = self.encode(row)?;
        self.evaluate(&x)
    }
}

fn dot(w: &[f64], x: &[f64]) -> f64 {
    w.iter().zip(x).map(|(a, b)| a * b).sum()
}

/// Index of the largest score; ties go to the earliest class
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, s) in scores.iter().enumerate().skip(1) {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}

fn leaf<'a>(tree: &'a Tree, x: &[f64]) -> &'a [f64] {
    let mut index = 0;
    loop {
        match &tree.nodes[index] {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                index = if x[*feature] <= *threshold { *left } else { *right };
            }
            Node::Leaf { value } => return value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str) -> InputSpec {
        InputSpec::Numeric {
            name: name.to_string(),
            mean: 0.0,
            scale: 1.0,
        }
    }

    fn categorical(name: &str, categories: &[&str]) -> InputSpec {
        InputSpec::Categorical {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn leaf_node(value: &[f64]) -> Node {
        Node::Leaf {
            value: value.to_vec(),
        }
    }

    fn wait_time_predictor() -> ArtifactPredictor {
        ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::WaitTime,
            inputs: vec![
                InputSpec::Numeric {
                    name: "queue_length".to_string(),
                    mean: 10.0,
                    scale: 2.0,
                },
                categorical("time_slot", &["Lunch", "Dinner"]),
            ],
            estimator: Estimator::LinearRegression {
                intercept: 1.0,
                coefficients: vec![0.5, 2.0, 3.0],
            },
        })
        .unwrap()
    }

    fn prep_tree_predictor() -> ArtifactPredictor {
        let tree = |threshold: f64| Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold,
                    left: 1,
                    right: 2,
                },
                leaf_node(&[0.0, 0.0, 1.0]),
                leaf_node(&[1.0, 0.0, 0.0]),
            ],
        };
        ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::PrepLevel,
            inputs: vec![numeric("historical_orders")],
            estimator: Estimator::TreeEnsemble {
                classes: Some(vec!["High".into(), "Medium".into(), "Low".into()]),
                trees: vec![tree(40.0), tree(60.0), tree(80.0)],
            },
        })
        .unwrap()
    }

    #[test]
    fn test_linear_standardises_and_one_hot_encodes() {
        let predictor = wait_time_predictor();
        let row = FeatureRow::new().with("queue_length", 14.0).with("time_slot", "Dinner");

        // 1.0 + 0.5 * (14 - 10) / 2 + 3.0
        assert_eq!(predictor.predict(&row).unwrap(), Prediction::Value(5.0));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let predictor = wait_time_predictor();
        let row = FeatureRow::new().with("queue_length", 14.0).with("time_slot", "Brunch");

        match predictor.predict(&row) {
            Err(ModelInferenceError::UnknownCategory { column, value, .. }) => {
                assert_eq!(column, "time_slot");
                assert_eq!(value, "Brunch");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_reordered_columns_are_rejected() {
        let predictor = wait_time_predictor();
        let row = FeatureRow::new().with("time_slot", "Lunch").with("queue_length", 14.0);

        assert!(matches!(
            predictor.predict(&row),
            Err(ModelInferenceError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let predictor = wait_time_predictor();
        let row = FeatureRow::new().with("queue_length", "ten").with("time_slot", "Lunch");

        assert!(matches!(
            predictor.predict(&row),
            Err(ModelInferenceError::TypeMismatch {
                expected: "numeric",
                found: "categorical",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let predictor = wait_time_predictor();
        let row = FeatureRow::new().with("queue_length", f64::NAN).with("time_slot", "Lunch");

        assert!(matches!(
            predictor.predict(&row),
            Err(ModelInferenceError::NonFinite { .. })
        ));
    }

    fn overflowing_logistic_predictor() -> ArtifactPredictor {
        ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::PrepLevel,
            inputs: vec![numeric("a"), numeric("b")],
            estimator: Estimator::LogisticRegression {
                classes: vec!["High".into(), "Medium".into()],
                intercepts: vec![0.0, 0.0],
                coefficients: vec![vec![0.0, 0.0], vec![2.0, -2.0]],
            },
        })
        .unwrap()
    }

    #[test]
    fn test_nan_class_score_is_rejected() {
        let predictor = overflowing_logistic_predictor();
        // 2e308 - 2e308 overflows both terms and leaves NaN
        let row = FeatureRow::new().with("a", 1e308).with("b", 1e308);

        match predictor.predict(&row) {
            Err(ModelInferenceError::NonFinite { location, .. }) => {
                assert_eq!(location, "class scores")
            }
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }

    #[test]
    fn test_infinite_class_score_is_rejected() {
        let predictor = overflowing_logistic_predictor();
        let row = FeatureRow::new().with("a", 1e308).with("b", -1e308);

        assert!(matches!(
            predictor.predict(&row),
            Err(ModelInferenceError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_infinite_leaf_scores_are_rejected() {
        let predictor = ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::PrepLevel,
            inputs: vec![numeric("historical_orders")],
            estimator: Estimator::TreeEnsemble {
                classes: Some(vec!["High".into(), "Low".into()]),
                trees: vec![
                    Tree {
                        nodes: vec![leaf_node(&[1e308, 0.0])],
                    },
                    Tree {
                        nodes: vec![leaf_node(&[1e308, 0.0])],
                    },
                ],
            },
        })
        .unwrap();

        // The sum overflows before averaging
        let row = FeatureRow::new().with("historical_orders", 1.0);
        assert!(matches!(
            predictor.predict(&row),
            Err(ModelInferenceError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_forest_votes_by_mean_class_score() {
        let predictor = prep_tree_predictor();
        let predict = |orders: f64| {
            let row = FeatureRow::new().with("historical_orders", orders);
            predictor.predict(&row).unwrap()
        };

        // All three trees say Low
        assert_eq!(predict(10.0), Prediction::Label("Low".into()));
        // Two of three trees say High
        assert_eq!(predict(70.0), Prediction::Label("High".into()));
        assert_eq!(predict(100.0), Prediction::Label("High".into()));
        // One of three says High
        assert_eq!(predict(50.0), Prediction::Label("Low".into()));
    }

    #[test]
    fn test_regression_forest_averages_leaves() {
        let predictor = ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::Demand,
            inputs: vec![numeric("historical_orders")],
            estimator: Estimator::TreeEnsemble {
                classes: None,
                trees: vec![
                    Tree {
                        nodes: vec![leaf_node(&[10.0])],
                    },
                    Tree {
                        nodes: vec![
                            Node::Split {
                                feature: 0,
                                threshold: 50.0,
                                left: 1,
                                right: 2,
                            },
                            leaf_node(&[20.0]),
                            leaf_node(&[40.0]),
                        ],
                    },
                ],
            },
        })
        .unwrap();

        let row = FeatureRow::new().with("historical_orders", 50.0);
        assert_eq!(predictor.predict(&row).unwrap(), Prediction::Value(15.0));
        let row = FeatureRow::new().with("historical_orders", 51.0);
        assert_eq!(predictor.predict(&row).unwrap(), Prediction::Value(25.0));
    }

    #[test]
    fn test_logistic_picks_highest_score() {
        let predictor = ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::PrepLevel,
            inputs: vec![numeric("item_popularity")],
            estimator: Estimator::LogisticRegression {
                classes: vec!["High".into(), "Medium".into(), "Low".into()],
                intercepts: vec![-2.0, 0.0, 2.0],
                coefficients: vec![vec![4.0], vec![0.0], vec![-4.0]],
            },
        })
        .unwrap();

        let row = FeatureRow::new().with("item_popularity", 0.9);
        assert_eq!(predictor.predict(&row).unwrap(), Prediction::Label("High".into()));
        let row = FeatureRow::new().with("item_popularity", 0.1);
        assert_eq!(predictor.predict(&row).unwrap(), Prediction::Label("Low".into()));
    }

    #[test]
    fn test_argmax_prefers_first_on_tie() {
        assert_eq!(argmax(&[0.5, 0.5, 0.1]), 0);
        assert_eq!(argmax(&[0.1, 0.5, 0.5]), 1);
    }

    #[test]
    fn test_from_artifact_rejects_invalid() {
        let result = ArtifactPredictor::from_artifact(ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::Demand,
            inputs: vec![],
            estimator: Estimator::LinearRegression {
                intercept: 0.0,
                coefficients: vec![],
            },
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_declares_input_columns() {
        let predictor = wait_time_predictor();
        assert_eq!(
            predictor.input_columns(),
            Some(vec!["queue_length", "time_slot"])
        );
        assert_eq!(predictor.name(), "wait_time/linear_regression");
    }
}
