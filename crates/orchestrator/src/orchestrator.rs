//! # Recommendation Orchestrator
//!
//! Turns one input record into three predictions:
//! 1. Project the demand view and score it
//! 2. Project the wait-time view and score it
//! 3. Project the prep-level view and classify it
//!
//! The three steps are independent. Wait time never sees predicted demand
//! and neither does the prep-level classifier; its model is trained on item
//! attributes alone. Any failure fails the whole call, there are no partial
//! results and no retries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use features::{
    DemandView, FeatureView, InputRecord, MenuItem, MissingFeatureError, PrepLevelView, RawRecord,
    RecordError, WaitTimeView,
};
use model_registry::{ModelInferenceError, ModelLoadError, ModelRegistry, ModelTask, Predictor};

/// How much of an item to pre-prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrepLevel {
    High,
    Medium,
    Low,
}

impl PrepLevel {
    pub const ALL: [PrepLevel; 3] = [PrepLevel::High, PrepLevel::Medium, PrepLevel::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            PrepLevel::High => "High",
            PrepLevel::Medium => "Medium",
            PrepLevel::Low => "Low",
        }
    }
}

impl FromStr for PrepLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(PrepLevel::High),
            "Medium" => Ok(PrepLevel::Medium),
            "Low" => Ok(PrepLevel::Low),
            _ => Err(format!("'{}' is not one of High/Medium/Low", s)),
        }
    }
}

impl fmt::Display for PrepLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three predictions for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub item: MenuItem,
    /// Expected plates; not clamped
    pub demand: f64,
    /// Expected minutes; not clamped
    pub wait_time: f64,
    pub prep_level: PrepLevel,
}

/// Errors surfaced by `recommend`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error(transparent)]
    MissingFeature(#[from] MissingFeatureError),

    #[error("invalid value for {field}: {value}")]
    InvalidFeature { field: &'static str, value: String },

    #[error("model inference failed: {0}")]
    Inference(#[from] ModelInferenceError),
}

impl From<RecordError> for RecommendError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Missing(missing) => RecommendError::MissingFeature(missing),
            RecordError::InvalidValue { field, value } => {
                RecommendError::InvalidFeature { field, value }
            }
        }
    }
}

/// Coordinates the three models for one (context, item) record at a time
#[derive(Debug, Clone)]
pub struct RecommendationOrchestrator {
    registry: ModelRegistry,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over a loaded registry
    ///
    /// Every predictor that declares its training columns must match its
    /// feature view exactly, names and order. Predictors without a declared
    /// schema are accepted as is.
    pub fn new(registry: ModelRegistry) -> Result<Self, ModelLoadError> {
        check_schema::<DemandView>(ModelTask::Demand, registry.demand())?;
        check_schema::<WaitTimeView>(ModelTask::WaitTime, registry.wait_time())?;
        check_schema::<PrepLevelView>(ModelTask::PrepLevel, registry.prep_level())?;
        Ok(Self { registry })
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Main entry point: predict demand, wait time and prep level for a record
    pub fn recommend(&self, input: &InputRecord) -> Result<PredictionResult, RecommendError> {
        let demand = self.predict_demand(input)?;
        let wait_time = self.predict_wait_time(input)?;
        let prep_level = self.predict_prep_level(input)?;

        debug!(
            "{} @ {} {}: demand={:.2} wait_time={:.2} prep_level={}",
            input.item, input.day_of_week, input.time_slot, demand, wait_time, prep_level
        );

        Ok(PredictionResult {
            item: input.item.clone(),
            demand,
            wait_time,
            prep_level,
        })
    }

    /// Same as `recommend` for an untyped record.
    ///
    /// The record is fully parsed before any model runs, so an incomplete
    /// record never reaches inference.
    pub fn recommend_raw(&self, raw: &RawRecord) -> Result<PredictionResult, RecommendError> {
        let input = InputRecord::from_raw(raw)?;
        self.recommend(&input)
    }

    fn predict_demand(&self, input: &InputRecord) -> Result<f64, ModelInferenceError> {
        let predictor = self.registry.demand();
        let row = DemandView::project(input).to_row();
        let prediction = predictor.predict(&row)?;
        prediction
            .as_value()
            .ok_or_else(|| unexpected(predictor, "expected a numeric demand, got a label"))
    }

    fn predict_wait_time(&self, input: &InputRecord) -> Result<f64, ModelInferenceError> {
        let predictor = self.registry.wait_time();
        let row = WaitTimeView::project(input).to_row();
        let prediction = predictor.predict(&row)?;
        prediction
            .as_value()
            .ok_or_else(|| unexpected(predictor, "expected a numeric wait time, got a label"))
    }

    fn predict_prep_level(&self, input: &InputRecord) -> Result<PrepLevel, ModelInferenceError> {
        let predictor = self.registry.prep_level();
        let row = PrepLevelView::project(input).to_row();
        let prediction = predictor.predict(&row)?;
        let label = prediction
            .as_label()
            .ok_or_else(|| unexpected(predictor, "expected a prep level label, got a number"))?;
        label
            .parse()
            .map_err(|reason: String| unexpected(predictor, &reason))
    }
}

fn unexpected(predictor: &dyn Predictor, reason: &str) -> ModelInferenceError {
    ModelInferenceError::UnexpectedOutput {
        model: predictor.name().to_string(),
        reason: reason.to_string(),
    }
}

fn check_schema<V: FeatureView>(
    task: ModelTask,
    predictor: &dyn Predictor,
) -> Result<(), ModelLoadError> {
    let Some(expected) = predictor.input_columns() else {
        return Ok(());
    };
    if expected != V::COLUMNS {
        return Err(ModelLoadError::SchemaMismatch {
            task,
            expected: expected.iter().map(|c| c.to_string()).collect(),
            provided: V::COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    }
    Ok(())
}
