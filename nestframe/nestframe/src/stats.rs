//! Shorthand statistics on columns and frames.

use std::sync::Arc;

use nestframe_core::{DataFrame, FrameError, Value, ValueColumn};

use crate::aggregation::{Aggregator, Aggregators};

/// Statistics over the values of a single column. Nulls are ignored.
///
/// `mean` and `std` keep NaN values (any NaN yields NaN); `std` uses one
/// delta degree of freedom.
pub trait ColumnStatistics {
    fn min(&self) -> Result<Option<Value>, FrameError>;
    fn max(&self) -> Result<Option<Value>, FrameError>;
    fn sum(&self) -> Result<Option<Value>, FrameError>;
    fn mean(&self) -> Result<Option<Value>, FrameError>;
    fn std(&self) -> Result<Option<Value>, FrameError>;
    fn median(&self) -> Result<Option<Value>, FrameError>;
}

impl ColumnStatistics for ValueColumn {
    fn min(&self) -> Result<Option<Value>, FrameError> {
        Aggregators::min().aggregate(self)
    }

    fn max(&self) -> Result<Option<Value>, FrameError> {
        Aggregators::max().aggregate(self)
    }

    fn sum(&self) -> Result<Option<Value>, FrameError> {
        Aggregators::sum().aggregate(self)
    }

    fn mean(&self) -> Result<Option<Value>, FrameError> {
        Aggregators::mean(false).aggregate(self)
    }

    fn std(&self) -> Result<Option<Value>, FrameError> {
        Aggregators::std(false, 1).aggregate(self)
    }

    fn median(&self) -> Result<Option<Value>, FrameError> {
        Aggregators::median().aggregate(self)
    }
}

/// The same statistics across several value columns of a frame, addressed
/// by (possibly dotted) path.
pub trait FrameStatistics {
    fn min(&self, columns: &[&str]) -> Result<Option<Value>, FrameError>;
    fn max(&self, columns: &[&str]) -> Result<Option<Value>, FrameError>;
    fn sum(&self, columns: &[&str]) -> Result<Option<Value>, FrameError>;
    fn mean(&self, columns: &[&str]) -> Result<Option<Value>, FrameError>;
    fn std(&self, columns: &[&str]) -> Result<Option<Value>, FrameError>;
    fn median(&self, columns: &[&str]) -> Result<Option<Value>, FrameError>;
}

impl FrameStatistics for DataFrame {
    fn min(&self, columns: &[&str]) -> Result<Option<Value>, FrameError> {
        aggregate_paths(self, &Aggregators::min(), columns)
    }

    fn max(&self, columns: &[&str]) -> Result<Option<Value>, FrameError> {
        aggregate_paths(self, &Aggregators::max(), columns)
    }

    fn sum(&self, columns: &[&str]) -> Result<Option<Value>, FrameError> {
        aggregate_paths(self, &Aggregators::sum(), columns)
    }

    fn mean(&self, columns: &[&str]) -> Result<Option<Value>, FrameError> {
        aggregate_paths(self, &Aggregators::mean(false), columns)
    }

    fn std(&self, columns: &[&str]) -> Result<Option<Value>, FrameError> {
        aggregate_paths(self, &Aggregators::std(false, 1), columns)
    }

    fn median(&self, columns: &[&str]) -> Result<Option<Value>, FrameError> {
        aggregate_paths(self, &Aggregators::median(), columns)
    }
}

pub(crate) fn value_columns<'a>(
    frame: &'a DataFrame,
    paths: &[impl AsRef<str>],
) -> Result<Vec<&'a ValueColumn>, FrameError> {
    paths
        .iter()
        .map(|path| frame.get_path(path.as_ref())?.as_value())
        .collect()
}

fn aggregate_paths(
    frame: &DataFrame,
    aggregator: &Arc<dyn Aggregator>,
    columns: &[&str],
) -> Result<Option<Value>, FrameError> {
    aggregator.aggregate_columns(&value_columns(frame, columns)?)
}
