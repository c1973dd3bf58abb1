//! Core of `nestframe`: a typed, immutable, columnar data frame with nested
//! columns.
//!
//! This crate provides the value and type model ([`Value`] / [`DataType`]),
//! the schema tree ([`DataFrameSchema`] / [`ColumnSchema`]) with structural
//! comparison and intersection, the three column kinds and the [`DataFrame`]
//! container with grouping, concatenation and flattening.

mod column;
mod error;
mod extract;
mod frame;
mod group_by;
mod reshape;
mod schema;
mod types;
mod value;

pub use column::{Cell, Column, FrameColumn, GroupColumn, ValueColumn};
pub use error::{FrameError, ValueTypeError};
pub use extract::extract_schema;
pub use frame::{DataFrame, DataRow};
pub use group_by::GroupBy;
pub use reshape::{FramePolicy, concat};
pub use schema::{
    ColumnKind, ColumnSchema, CompareMode, CompareResult, DataFrameSchema, format_schema,
    intersect_schemas,
};
pub use types::{CellType, DataType, ValueType, unify_all_numbers, unify_numbers};
pub use value::Value;
