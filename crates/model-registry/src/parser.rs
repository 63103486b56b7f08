//! Reading and validating model artifacts.
//!
//! Artifacts are JSON documents (see `types::ModelArtifact`). Parsing only
//! proves the document has the right shape; `validate` then checks every
//! dimension the predictor relies on, so inference never indexes out of
//! bounds or loops on a malformed tree.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{ModelLoadError, Result};
use crate::types::*;

/// Read, parse and validate the artifact for `task` at `path`
pub fn read_artifact(path: &Path, task: ModelTask) -> Result<ModelArtifact> {
    if !path.is_file() {
        return Err(ModelLoadError::NotFound {
            task,
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let artifact = parse_artifact(&content).map_err(|source| ModelLoadError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    validate(&artifact, task).map_err(|reason| ModelLoadError::Incompatible {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(artifact)
}

/// Parse an artifact document without validating it
pub fn parse_artifact(content: &str) -> serde_json::Result<ModelArtifact> {
    serde_json::from_str(content)
}

/// Check that an artifact can be served for `task`.
///
/// Returns a human-readable reason on failure.
pub fn validate(artifact: &ModelArtifact, task: ModelTask) -> std::result::Result<(), String> {
    if artifact.format_version != FORMAT_VERSION {
        return Err(format!(
            "unsupported format_version {} (expected {})",
            artifact.format_version, FORMAT_VERSION
        ));
    }
    if artifact.task != task {
        return Err(format!(
            "artifact is for task {} but was loaded as {}",
            artifact.task, task
        ));
    }

    let width = validate_inputs(&artifact.inputs)?;
    validate_estimator(&artifact.estimator, width)?;

    match (task, artifact.estimator.is_classifier()) {
        (ModelTask::PrepLevel, false) => Err("prep_level model must be a classifier".to_string()),
        (ModelTask::Demand | ModelTask::WaitTime, true) => {
            Err(format!("{} model must be a regressor", task))
        }
        _ => Ok(()),
    }
}

/// Validate input specs and return the encoded feature width
fn validate_inputs(inputs: &[InputSpec]) -> std::result::Result<usize, String> {
    if inputs.is_empty() {
        return Err("artifact declares no inputs".to_string());
    }

    let mut seen = HashSet::new();
    for input in inputs {
        if !seen.insert(input.name()) {
            return Err(format!("duplicate input column {}", input.name()));
        }
        match input {
            InputSpec::Numeric { name, mean, scale } => {
                if !mean.is_finite() || !scale.is_finite() {
                    return Err(format!("non-finite scaling for column {}", name));
                }
                if *scale == 0.0 {
                    return Err(format!("zero scale for column {}", name));
                }
            }
            InputSpec::Categorical { name, categories } => {
                if categories.is_empty() {
                    return Err(format!("no categories for column {}", name));
                }
                let unique: HashSet<&String> = categories.iter().collect();
                if unique.len() != categories.len() {
                    return Err(format!("duplicate categories for column {}", name));
                }
            }
        }
    }

    Ok(inputs.iter().map(InputSpec::width).sum())
}

fn validate_estimator(estimator: &Estimator, width: usize) -> std::result::Result<(), String> {
    match estimator {
        Estimator::LinearRegression {
            intercept,
            coefficients,
        } => {
            check_finite("intercept", std::slice::from_ref(intercept))?;
            check_width("coefficients", coefficients.len(), width)?;
            check_finite("coefficients", coefficients)
        }
        Estimator::LogisticRegression {
            classes,
            intercepts,
            coefficients,
        } => {
            validate_classes(classes)?;
            check_width("intercepts", intercepts.len(), classes.len())?;
            check_finite("intercepts", intercepts)?;
            check_width("coefficient rows", coefficients.len(), classes.len())?;
            for row in coefficients {
                check_width("coefficients", row.len(), width)?;
                check_finite("coefficients", row)?;
            }
            Ok(())
        }
        Estimator::TreeEnsemble { classes, trees } => {
            if trees.is_empty() {
                return Err("tree ensemble has no trees".to_string());
            }
            let leaf_width = match classes {
                Some(classes) => {
                    validate_classes(classes)?;
                    classes.len()
                }
                None => 1,
            };
            for (index, tree) in trees.iter().enumerate() {
                validate_tree(tree, width, leaf_width)
                    .map_err(|e| format!("tree {}: {}", index, e))?;
            }
            Ok(())
        }
    }
}

fn validate_classes(classes: &[String]) -> std::result::Result<(), String> {
    if classes.is_empty() {
        return Err("classifier declares no classes".to_string());
    }
    let unique: HashSet<&String> = classes.iter().collect();
    if unique.len() != classes.len() {
        return Err("duplicate class labels".to_string());
    }
    Ok(())
}

/// Children must come after their parent, which rules out cycles
fn validate_tree(tree: &Tree, width: usize, leaf_width: usize) -> std::result::Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("no nodes".to_string());
    }
    let count = tree.nodes.len();
    for (index, node) in tree.nodes.iter().enumerate() {
        match node {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= width {
                    return Err(format!(
                        "node {} splits on feature {} but only {} features exist",
                        index, feature, width
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", index));
                }
                for child in [*left, *right] {
                    if child <= index || child >= count {
                        return Err(format!("node {} has invalid child {}", index, child));
                    }
                }
            }
            Node::Leaf { value } => {
                check_width("leaf value", value.len(), leaf_width)
                    .map_err(|e| format!("node {}: {}", index, e))?;
                check_finite("leaf value", value).map_err(|e| format!("node {}: {}", index, e))?;
            }
        }
    }
    Ok(())
}

fn check_width(what: &str, found: usize, expected: usize) -> std::result::Result<(), String> {
    if found != expected {
        return Err(format!("{} has length {} but expected {}", what, found, expected));
    }
    Ok(())
}

fn check_finite(what: &str, values: &[f64]) -> std::result::Result<(), String> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(format!("{} contains a non-finite value", what));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_time_artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: FORMAT_VERSION,
            task: ModelTask::WaitTime,
            inputs: vec![
                InputSpec::Numeric {
                    name: "queue_length".to_string(),
                    mean: 0.0,
                    scale: 1.0,
                },
                InputSpec::Categorical {
                    name: "time_slot".to_string(),
                    categories: vec!["Lunch".to_string(), "Dinner".to_string()],
                },
            ],
            estimator: Estimator::LinearRegression {
                intercept: 1.0,
                coefficients: vec![0.5, 2.0, 3.0],
            },
        }
    }

    #[test]
    fn test_parse_numeric_defaults() {
        let json = r#"{
            "format_version": 1,
            "task": "wait_time",
            "inputs": [{"name": "queue_length", "type": "numeric"}],
            "estimator": {"kind": "linear_regression", "intercept": 0.0, "coefficients": [1.0]}
        }"#;

        let artifact = parse_artifact(json).unwrap();
        match &artifact.inputs[0] {
            InputSpec::Numeric { mean, scale, .. } => {
                assert_eq!(*mean, 0.0);
                assert_eq!(*scale, 1.0);
            }
            other => panic!("unexpected input spec {:?}", other),
        }
        assert!(validate(&artifact, ModelTask::WaitTime).is_ok());
    }

    #[test]
    fn test_parse_tree_nodes() {
        let json = r#"{
            "format_version": 1,
            "task": "prep_level",
            "inputs": [{"name": "historical_orders", "type": "numeric"}],
            "estimator": {
                "kind": "tree_ensemble",
                "classes": ["High", "Low"],
                "trees": [{"nodes": [
                    {"feature": 0, "threshold": 40.0, "left": 1, "right": 2},
                    {"value": [0.0, 1.0]},
                    {"value": [1.0, 0.0]}
                ]}]
            }
        }"#;

        let artifact = parse_artifact(json).unwrap();
        assert!(validate(&artifact, ModelTask::PrepLevel).is_ok());
        match &artifact.estimator {
            Estimator::TreeEnsemble { trees, .. } => {
                assert!(matches!(trees[0].nodes[0], Node::Split { left: 1, right: 2, .. }));
                assert!(matches!(trees[0].nodes[1], Node::Leaf { .. }));
            }
            other => panic!("unexpected estimator {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_estimator_kind() {
        let json = r#"{
            "format_version": 1,
            "task": "demand",
            "inputs": [{"name": "x", "type": "numeric"}],
            "estimator": {"kind": "neural_net"}
        }"#;
        assert!(parse_artifact(json).is_err());
    }

    #[test]
    fn test_valid_artifact() {
        assert!(validate(&wait_time_artifact(), ModelTask::WaitTime).is_ok());
    }

    #[test]
    fn test_rejects_wrong_task() {
        let err = validate(&wait_time_artifact(), ModelTask::Demand).unwrap_err();
        assert!(err.contains("wait_time"));
    }

    #[test]
    fn test_rejects_format_version() {
        let mut artifact = wait_time_artifact();
        artifact.format_version = 2;
        assert!(validate(&artifact, ModelTask::WaitTime).unwrap_err().contains("format_version"));
    }

    #[test]
    fn test_rejects_coefficient_width() {
        let mut artifact = wait_time_artifact();
        artifact.estimator = Estimator::LinearRegression {
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        };
        let err = validate(&artifact, ModelTask::WaitTime).unwrap_err();
        assert!(err.contains("coefficients"));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let mut artifact = wait_time_artifact();
        artifact.inputs.push(InputSpec::Numeric {
            name: "queue_length".to_string(),
            mean: 0.0,
            scale: 1.0,
        });
        assert!(validate(&artifact, ModelTask::WaitTime).unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_rejects_zero_scale() {
        let mut artifact = wait_time_artifact();
        artifact.inputs[0] = InputSpec::Numeric {
            name: "queue_length".to_string(),
            mean: 0.0,
            scale: 0.0,
        };
        assert!(validate(&artifact, ModelTask::WaitTime).unwrap_err().contains("zero scale"));
    }

    #[test]
    fn test_rejects_backward_tree_edge() {
        let mut artifact = wait_time_artifact();
        artifact.estimator = Estimator::TreeEnsemble {
            classes: None,
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: 0,
                        threshold: 1.0,
                        left: 0,
                        right: 1,
                    },
                    Node::Leaf { value: vec![1.0] },
                ],
            }],
        };
        let err = validate(&artifact, ModelTask::WaitTime).unwrap_err();
        assert!(err.contains("invalid child"));
    }

    #[test]
    fn test_rejects_classifier_for_regression_task() {
        let mut artifact = wait_time_artifact();
        artifact.estimator = Estimator::LogisticRegression {
            classes: vec!["High".to_string()],
            intercepts: vec![0.0],
            coefficients: vec![vec![0.0, 0.0, 0.0]],
        };
        let err = validate(&artifact, ModelTask::WaitTime).unwrap_err();
        assert!(err.contains("regressor"));
    }
}
