//! Core types shared by the registry and its callers.
//!
//! - `ModelTask` names the three prediction tasks and their artifact files
//! - `FeatureRow` / `FeatureValue` are the single-row inputs a predictor scores
//! - `Prediction` is what a predictor hands back
//! - `ModelArtifact` and friends describe the JSON artifact layout on disk

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Tasks
// =============================================================================

/// Directory under the project root that holds the model artifacts
pub const MODELS_DIR: &str = "models";

/// Artifact format version understood by this runtime
pub const FORMAT_VERSION: u32 = 1;

/// The three prediction tasks served by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTask {
    Demand,
    WaitTime,
    PrepLevel,
}

impl ModelTask {
    pub const ALL: [ModelTask; 3] = [ModelTask::Demand, ModelTask::WaitTime, ModelTask::PrepLevel];

    /// File name of this task's artifact inside `MODELS_DIR`
    pub fn file_name(self) -> &'static str {
        match self {
            ModelTask::Demand => "model_demand.json",
            ModelTask::WaitTime => "model_waittime.json",
            ModelTask::PrepLevel => "model_prep_level.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelTask::Demand => "demand",
            ModelTask::WaitTime => "wait_time",
            ModelTask::PrepLevel => "prep_level",
        }
    }
}

impl fmt::Display for ModelTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Feature rows
// =============================================================================

/// One cell of a feature row
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

impl FeatureValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureValue::Number(_) => "numeric",
            FeatureValue::Category(_) => "categorical",
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        FeatureValue::Number(f64::from(value))
    }
}

/// Flags are encoded the way the models were trained: 0 or 1
impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Number(if value { 1.0 } else { 0.0 })
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Category(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Category(value)
    }
}

/// A single-row table with a fixed column order.
///
/// Column order is significant: predictors compare it against the order
/// their model was trained on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    cells: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Append a column (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        self.cells.push((name.into(), value.into()));
    }

    pub fn columns(&self) -> Vec<&str> {
        self.cells.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.cells
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// =============================================================================
// Predictions
// =============================================================================

/// Output of a single predictor call
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Regression output
    Value(f64),
    /// Classification output
    Label(String),
}

impl Prediction {
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Prediction::Value(v) => Some(*v),
            Prediction::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Prediction::Label(label) => Some(label),
            Prediction::Value(_) => None,
        }
    }
}

// =============================================================================
// Artifact layout
// =============================================================================

/// A trained predictor as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub task: ModelTask,
    /// Input columns in training order
    pub inputs: Vec<InputSpec>,
    pub estimator: Estimator,
}

/// How one input column is encoded before it reaches the estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputSpec {
    /// Standardised as `(x - mean) / scale`
    Numeric {
        name: String,
        #[serde(default)]
        mean: f64,
        #[serde(default = "default_scale")]
        scale: f64,
    },
    /// One-hot encoded over `categories`
    Categorical { name: String, categories: Vec<String> },
}

fn default_scale() -> f64 {
    1.0
}

impl InputSpec {
    pub fn name(&self) -> &str {
        match self {
            InputSpec::Numeric { name, .. } | InputSpec::Categorical { name, .. } => name,
        }
    }

    /// Number of encoded features this column expands to
    pub fn width(&self) -> usize {
        match self {
            InputSpec::Numeric { .. } => 1,
            InputSpec::Categorical { categories, .. } => categories.len(),
        }
    }
}

/// The estimator that maps encoded features to an output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LinearRegression {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Multinomial logistic regression; one coefficient row per class
    LogisticRegression {
        classes: Vec<String>,
        intercepts: Vec<f64>,
        coefficients: Vec<Vec<f64>>,
    },
    /// One or more decision trees; averaged for regression, voted by mean
    /// class score for classification
    TreeEnsemble {
        #[serde(default)]
        classes: Option<Vec<String>>,
        trees: Vec<Tree>,
    },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LinearRegression { .. } => "linear_regression",
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::TreeEnsemble { .. } => "tree_ensemble",
        }
    }

    pub fn is_classifier(&self) -> bool {
        match self {
            Estimator::LinearRegression { .. } => false,
            Estimator::LogisticRegression { .. } => true,
            Estimator::TreeEnsemble { classes, .. } => classes.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    /// Node 0 is the root
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Go `left` when `x[feature] <= threshold`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}
