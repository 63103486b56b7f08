//! Core trait for model-specific projections of an input record.

use model_registry::FeatureRow;

use crate::types::InputRecord;

/// A fixed-schema, single-row projection of an `InputRecord`.
///
/// ## Design Note
/// - `COLUMNS` is the training schema of one model, in training order
/// - `to_row` must emit exactly `COLUMNS`, in that order; the models are
///   trained against this order and reordering would silently mispredict
pub trait FeatureView: Sized {
    /// Name of the view (for logging/debugging)
    const NAME: &'static str;

    /// Column names in model order
    const COLUMNS: &'static [&'static str];

    /// Copy the fields this view needs out of a record
    fn project(record: &InputRecord) -> Self;

    /// Lay the view out as a feature row
    fn to_row(&self) -> FeatureRow;
}
