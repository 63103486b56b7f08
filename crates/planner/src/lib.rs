//! # Planner Crate
//!
//! Everything the dashboard does around the core orchestrator:
//!
//! - **context**: Operating context and item profile, with dashboard defaults
//! - **menu**: The default menu and per-slot input adjustments
//! - **bounds**: Input domains checked before any model runs
//! - **overview**: Single-item and all-items views
//!
//! ## Example Usage
//!
//! ```ignore
//! use planner::{ItemProfile, OperatingContext, load_orchestrator, overview};
//! use std::path::Path;
//!
//! let orchestrator = load_orchestrator(Path::new("."))?;
//! let rows = overview(&orchestrator, &OperatingContext::default(), &ItemProfile::default())?;
//! for row in rows {
//!     println!("{}: {:.1} plates, {}", row.item, row.demand, row.prep_level);
//! }
//! ```

use std::path::Path;

use model_registry::{ModelLoadError, ModelRegistry};
use orchestrator::RecommendationOrchestrator;

pub mod bounds;
pub mod context;
pub mod menu;
pub mod overview;

pub use bounds::BoundsError;
pub use context::{ItemProfile, OperatingContext, build_record};
pub use menu::{MENU, adjust_for_slot, menu_items};
pub use overview::{PlanError, overview, recommend_single};

/// Load the registry under `project_root` and wrap it in an orchestrator.
///
/// Fails if any model is missing, corrupt or trained on other columns.
pub fn load_orchestrator(
    project_root: &Path,
) -> Result<RecommendationOrchestrator, ModelLoadError> {
    let registry = ModelRegistry::load(project_root)?;
    RecommendationOrchestrator::new(registry)
}
