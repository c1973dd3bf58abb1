use arrow::error::ArrowError;
use nestframe_core::{FrameError, ValueTypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("column '{column}' has type {data_type}, which has no Arrow representation")]
    UnsupportedType { column: String, data_type: String },
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("value type mismatch: {0}")]
    ValueType(#[from] ValueTypeError),
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
