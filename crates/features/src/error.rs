//! Error types for building input records.

use thiserror::Error;

/// One or more required fields were absent from a raw record.
///
/// Fields are listed in `InputRecord::FIELDS` order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required feature(s): {}", fields.join(", "))]
pub struct MissingFeatureError {
    pub fields: Vec<&'static str>,
}

/// Errors that can occur while turning a raw record into an `InputRecord`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error(transparent)]
    Missing(#[from] MissingFeatureError),

    /// A field was present but its value could not be used
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// A label did not name any variant of a categorical field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}
