//! ModelRegistry construction.
//!
//! The registry is the only long-lived owner of the models. It is built once
//! at startup and never mutated afterwards, so it is cheap to clone and safe
//! to share between threads.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::predictor::{ArtifactPredictor, Predictor};
use crate::types::{MODELS_DIR, ModelTask};

/// Holder of the three predictors, one per task
#[derive(Clone)]
pub struct ModelRegistry {
    demand: Arc<dyn Predictor>,
    wait_time: Arc<dyn Predictor>,
    prep_level: Arc<dyn Predictor>,
}

impl ModelRegistry {
    /// Load all three artifacts from `<project_root>/models`.
    ///
    /// Steps:
    /// 1. Resolve the three artifact paths
    /// 2. Read and validate them in parallel
    /// 3. Fail as a whole if any one of them fails
    pub fn load(project_root: &Path) -> Result<Self> {
        let start = Instant::now();
        let models_dir = project_root.join(MODELS_DIR);
        info!("Loading models from {}", models_dir.display());

        let load =
            |task: ModelTask| ArtifactPredictor::load(&models_dir.join(task.file_name()), task);

        let ((demand, wait_time), prep_level) = rayon::join(
            || rayon::join(|| load(ModelTask::Demand), || load(ModelTask::WaitTime)),
            || load(ModelTask::PrepLevel),
        );

        // Nothing escapes unless all three loaded
        let demand = demand?;
        let wait_time = wait_time?;
        let prep_level = prep_level?;

        info!(
            "Loaded models [{}, {}, {}] in {:.2?}",
            demand.name(),
            wait_time.name(),
            prep_level.name(),
            start.elapsed()
        );

        Ok(Self::from_predictors(
            Arc::new(demand),
            Arc::new(wait_time),
            Arc::new(prep_level),
        ))
    }

    /// Build a registry from already constructed predictors
    pub fn from_predictors(
        demand: Arc<dyn Predictor>,
        wait_time: Arc<dyn Predictor>,
        prep_level: Arc<dyn Predictor>,
    ) -> Self {
        Self {
            demand,
            wait_time,
            prep_level,
        }
    }

    pub fn demand(&self) -> &dyn Predictor {
        self.demand.as_ref()
    }

    pub fn wait_time(&self) -> &dyn Predictor {
        self.wait_time.as_ref()
    }

    pub fn prep_level(&self) -> &dyn Predictor {
        self.prep_level.as_ref()
    }

    pub fn get(&self, task: ModelTask) -> &dyn Predictor {
        match task {
            ModelTask::Demand => self.demand(),
            ModelTask::WaitTime => self.wait_time(),
            ModelTask::PrepLevel => self.prep_level(),
        }
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("demand", &self.demand.name())
            .field("wait_time", &self.wait_time.name())
            .field("prep_level", &self.prep_level.name())
            .finish()
    }
}
