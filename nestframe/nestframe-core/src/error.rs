//! Error types for the schema and frame layer.

use crate::schema::ColumnKind;

/// Error returned by structural, lookup and aggregation operations.
///
/// Every operation is copy-on-write, so a failed call leaves its input
/// DataFrame untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// A column name or path did not resolve at some nesting level.
    #[error("column '{path}' not found")]
    ColumnNotFound { path: String },

    /// A structural invariant was broken (duplicate names, row count mismatch, invalid nesting).
    #[error("schema violation: {detail}")]
    SchemaViolation { detail: String },

    /// Row or position index outside `[0, size)`.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Operation not supported by the kind of column it was called on.
    #[error("operation '{operation}' is not supported by {kind} columns")]
    UnsupportedOperation {
        operation: &'static str,
        kind: ColumnKind,
    },

    /// Aggregator invoked on incompatible types, or a comparison that was
    /// required to succeed found the schemas incomparable.
    #[error("incompatible types: {detail}")]
    Aggregation { detail: String },
}

impl FrameError {
    pub(crate) fn violation(detail: impl Into<String>) -> Self {
        Self::SchemaViolation {
            detail: detail.into(),
        }
    }

    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::ColumnNotFound { path: path.into() }
    }

    /// Convenience constructor for [`FrameError::Aggregation`].
    pub fn aggregation(detail: impl Into<String>) -> Self {
        Self::Aggregation {
            detail: detail.into(),
        }
    }
}

/// Returned by typed accessors on [`Value`](crate::Value) when the stored
/// variant differs from the requested one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
