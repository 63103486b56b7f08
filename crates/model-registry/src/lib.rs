//! # Model Registry Crate
//!
//! Loads the three trained canteen models (demand, wait time, prep level)
//! and exposes them behind a uniform `Predictor` capability.
//!
//! ## Main Components
//!
//! - **types**: Tasks, feature rows, predictions and the artifact layout
//! - **parser**: Read and validate JSON artifacts
//! - **predictor**: The `Predictor` trait and `ArtifactPredictor`
//! - **registry**: `ModelRegistry`, loaded once and shared read-only
//! - **error**: `ModelLoadError` and `ModelInferenceError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use model_registry::{FeatureRow, ModelRegistry};
//! use std::path::Path;
//!
//! // Reads models/model_demand.json, models/model_waittime.json and
//! // models/model_prep_level.json under the project root
//! let registry = ModelRegistry::load(Path::new("."))?;
//!
//! let row = FeatureRow::new()
//!     .with("queue_length", 10u32)
//!     .with("time_slot", "Lunch");
//! let prediction = registry.wait_time().predict(&row)?;
//! ```

pub mod error;
pub mod parser;
pub mod predictor;
pub mod registry;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ModelInferenceError, ModelLoadError, Result};
pub use predictor::{ArtifactPredictor, Predictor};
pub use registry::ModelRegistry;
pub use types::{
    Estimator, FORMAT_VERSION, FeatureRow, FeatureValue, InputSpec, MODELS_DIR, ModelArtifact,
    ModelTask, Node, Prediction, Tree,
};
