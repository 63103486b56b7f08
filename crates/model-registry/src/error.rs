//! Error types for the model-registry crate.
//!
//! Two families live here:
//! - `ModelLoadError` is raised while reading artifacts at startup. It is fatal:
//!   a registry is never built from a partial set of models.
//! - `ModelInferenceError` is raised when a loaded model rejects a feature row.
//!   Inference is deterministic, so callers never retry it.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ModelTask;

/// Errors that can occur while loading model artifacts
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// Artifact file does not exist under the models directory
    #[error("{task} model not found at {path}")]
    NotFound { task: ModelTask, path: PathBuf },

    /// I/O error occurred while reading an artifact
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not match the artifact layout
    #[error("corrupt model artifact {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact parsed but cannot be served by this runtime
    ///
    /// Covers unsupported format versions, a task mismatch and inconsistent
    /// dimensions.
    #[error("incompatible model artifact {path}: {reason}")]
    Incompatible { path: PathBuf, reason: String },

    /// A loaded model was trained on different columns than the feature
    /// view that will feed it
    #[error("{task} model expects columns [{}] but its feature view provides [{}]", expected.join(", "), provided.join(", "))]
    SchemaMismatch {
        task: ModelTask,
        expected: Vec<String>,
        provided: Vec<String>,
    },
}

/// Errors raised by a predictor while scoring one feature row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelInferenceError {
    /// Row columns differ from the columns the model was trained on
    #[error("{model}: expected columns [{}], got [{}]", expected.join(", "), found.join(", "))]
    SchemaMismatch {
        model: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Categorical value outside the model's trained vocabulary
    #[error("{model}: unknown category '{value}' for column {column}")]
    UnknownCategory {
        model: String,
        column: String,
        value: String,
    },

    /// Numeric value where a category was expected, or the other way around
    #[error("{model}: column {column} expects a {expected} value, got {found}")]
    TypeMismatch {
        model: String,
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Input or output value was NaN or infinite
    #[error("{model}: non-finite value in {location}")]
    NonFinite { model: String, location: String },

    /// The model produced something the caller cannot interpret
    #[error("{model}: unexpected output: {reason}")]
    UnexpectedOutput { model: String, reason: String },
}

/// Convenience type alias for loading Results in this crate
pub type Result<T> = std::result::Result<T, ModelLoadError>;
