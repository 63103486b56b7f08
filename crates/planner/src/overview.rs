//! Single-item and all-items recommendation views.

use features::MenuItem;
use orchestrator::{PredictionResult, RecommendError, RecommendationOrchestrator};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::bounds::{self, BoundsError};
use crate::context::{ItemProfile, OperatingContext, build_record};
use crate::menu::{adjust_for_slot, menu_items};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error("{item}: {source}")]
    Recommend {
        item: MenuItem,
        #[source]
        source: RecommendError,
    },
}

/// Predictions for one item exactly as entered (no slot adjustment)
#[instrument(skip_all, fields(item = %item, slot = %context.time_slot))]
pub fn recommend_single(
    orchestrator: &RecommendationOrchestrator,
    context: &OperatingContext,
    item: &MenuItem,
    profile: &ItemProfile,
) -> Result<PredictionResult, PlanError> {
    bounds::check_context(context)?;
    bounds::check_profile(profile)?;

    let record = build_record(context, item, profile);
    orchestrator.recommend(&record).map_err(|source| PlanError::Recommend {
        item: item.clone(),
        source,
    })
}

/// Predictions for every menu item, in menu order.
///
/// Each item's profile goes through `adjust_for_slot` first. Items are
/// scored one after another and the first failure aborts the overview.
#[instrument(skip_all, fields(day = %context.day_of_week, slot = %context.time_slot))]
pub fn overview(
    orchestrator: &RecommendationOrchestrator,
    context: &OperatingContext,
    profile: &ItemProfile,
) -> Result<Vec<PredictionResult>, PlanError> {
    bounds::check_context(context)?;
    bounds::check_profile(profile)?;

    let mut results = Vec::with_capacity(crate::menu::MENU.len());
    for item in menu_items() {
        let adjusted = adjust_for_slot(context, &item, profile);
        let record = build_record(context, &item, &adjusted);
        let result = orchestrator
            .recommend(&record)
            .map_err(|source| PlanError::Recommend {
                item: item.clone(),
                source,
            })?;
        results.push(result);
    }

    debug!("Overview complete for {} items", results.len());
    Ok(results)
}
