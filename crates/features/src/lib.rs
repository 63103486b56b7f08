//! Typed inputs and per-model feature views for the canteen planner.
//!
//! This crate provides:
//! - `InputRecord`, the typed (context, item) record, and its raw-map parser
//! - `FeatureView` and the three views the models are trained on
//! - `MissingFeatureError` / `RecordError` for incomplete or malformed input
//!
//! ## Architecture
//! A request flows through three stages:
//! 1. A raw record (flat JSON object) becomes an `InputRecord`
//! 2. Each view projects the fields its model needs
//! 3. `to_row` lays the view out in the model's column order
//!
//! ## Example Usage
//! ```ignore
//! use features::{DemandView, FeatureView, InputRecord};
//!
//! let record = InputRecord::from_raw(&raw)?;
//! let row = DemandView::project(&record).to_row();
//! let demand = registry.demand().predict(&row)?;
//! ```

pub mod error;
pub mod record;
pub mod traits;
pub mod types;
pub mod views;

// Re-export main types
pub use error::{MissingFeatureError, RecordError, UnknownLabel};
pub use record::RawRecord;
pub use traits::FeatureView;
pub use types::{DayOfWeek, InputRecord, MenuItem, TimeSlot, Weather};
pub use views::{DemandView, PrepLevelView, WaitTimeView};
