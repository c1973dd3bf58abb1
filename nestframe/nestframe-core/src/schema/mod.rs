//! Column and frame schemas, structural comparison and intersection.

mod column;
mod compare;
mod format;
mod frame;
mod intersect;

pub use column::{ColumnKind, ColumnSchema};
pub use compare::{CompareMode, CompareResult};
pub use format::format_schema;
pub use frame::DataFrameSchema;
pub use intersect::intersect_schemas;
