//! Typed in-memory data frames with nested columns.
//!
//! Re-exports [`core`] (values, schemas, columns, frames) and, with the
//! `arrow` feature, [`arrow`]. Adds the aggregation engine, statistics on
//! columns and frames, and aggregation and pivoting of grouped frames.
//!
//! ```
//! use nestframe::{AggSpec, GroupedAggregation, aggregation::Aggregators};
//! use nestframe::core::{DataFrame, Value, ValueColumn};
//!
//! let pets = DataFrame::new(vec![
//!     ValueColumn::from_values("animal", ["cat", "dog", "cat"].map(String::from)).into(),
//!     ValueColumn::from_values("count", [1, 2, 3]).into(),
//! ])
//! .unwrap();
//!
//! let totals = pets
//!     .group_by(&["animal"])
//!     .unwrap()
//!     .aggregate(&[AggSpec::new(Aggregators::sum()).columns(["count"])])
//!     .unwrap();
//! let count = totals.get("count").unwrap().as_value().unwrap();
//! assert_eq!(count.values(), &[Value::I32(4), Value::I32(2)]);
//! ```
pub mod aggregation;
mod grouped;
mod stats;

pub use grouped::{AggSpec, GroupedAggregation};
#[cfg(feature = "arrow")]
pub use nestframe_arrow as arrow;
pub use nestframe_core as core;
pub use stats::{ColumnStatistics, FrameStatistics};
