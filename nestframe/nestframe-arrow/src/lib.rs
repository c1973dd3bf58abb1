//! Arrow integration layer for `nestframe`.
//!
//! This crate has two responsibilities:
//! 1. Convert a `nestframe-core` [`DataFrameSchema`](nestframe_core::DataFrameSchema)
//!    to an Arrow `Schema`.
//! 2. Convert a [`DataFrame`](nestframe_core::DataFrame) to an Arrow `RecordBatch`.
//!
//! Nesting maps directly: group columns are structs, frame columns are lists
//! of structs.
//!
//! # Typical Flow
//! ```rust
//! use nestframe_arrow::{frame_to_record_batch, schema_to_arrow};
//! use nestframe_core::{DataFrame, ValueColumn};
//!
//! let df = DataFrame::new(vec![ValueColumn::from_values("x", [1, 2, 3]).into()]).unwrap();
//! let schema = schema_to_arrow(&df.schema()).unwrap();
//! let batch = frame_to_record_batch(&df).unwrap();
//! assert_eq!(batch.schema().as_ref(), &schema);
//! assert_eq!(batch.num_rows(), 3);
//! ```
pub mod arrow_convert;
pub mod error;
pub mod schema_convert;

/// Re-export of [`arrow_convert::frame_to_record_batch`].
pub use arrow_convert::frame_to_record_batch;
/// Re-export of [`error::ArrowConvertError`].
pub use error::ArrowConvertError;
/// Re-export of [`schema_convert::schema_to_arrow`].
pub use schema_convert::schema_to_arrow;
