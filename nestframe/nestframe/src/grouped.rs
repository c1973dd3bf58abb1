//! Aggregation and pivoting of grouped frames.

use std::{collections::HashSet, fmt, sync::Arc};

use rayon::prelude::*;

use nestframe_core::{
    Column, DataFrame, DataType, FrameError, GroupBy, GroupColumn, Value, ValueColumn,
};

use crate::{aggregation::Aggregator, stats::value_columns};

/// One output column of a grouped aggregation: an aggregator, the columns it
/// reads and an optional output name.
///
/// ```
/// use nestframe::{AggSpec, aggregation::Aggregators};
///
/// let spec = AggSpec::new(Aggregators::sum()).columns(["a", "b"]).named("total");
/// assert_eq!(spec.output_name(), "total");
/// ```
#[derive(Clone)]
pub struct AggSpec {
    aggregator: Arc<dyn Aggregator>,
    columns: Vec<String>,
    name: Option<String>,
}

impl AggSpec {
    pub fn new(aggregator: Arc<dyn Aggregator>) -> Self {
        Self {
            aggregator,
            columns: Vec::new(),
            name: None,
        }
    }

    /// Columns to aggregate, as (possibly dotted) paths.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn aggregator(&self) -> &Arc<dyn Aggregator> {
        &self.aggregator
    }

    /// The explicit name, else the single input column, else the aggregator name.
    pub fn output_name(&self) -> String {
        match (&self.name, self.columns.as_slice()) {
            (Some(name), _) => name.clone(),
            (None, [column]) => column.clone(),
            (None, _) => self.aggregator.name().to_string(),
        }
    }

    fn inputs<'a>(&self, frame: &'a DataFrame) -> Result<Vec<&'a ValueColumn>, FrameError> {
        if self.columns.is_empty() {
            return Err(FrameError::aggregation(format!(
                "no columns selected for {}",
                self.aggregator.name()
            )));
        }
        value_columns(frame, &self.columns)
    }

    /// Aggregate of the selected columns of `frame`, `Null` if there is none.
    pub fn evaluate(&self, frame: &DataFrame) -> Result<Value, FrameError> {
        let result = self.aggregator.aggregate_columns(&self.inputs(frame)?)?;
        Ok(result.unwrap_or(Value::Null))
    }

    /// Element type of the aggregate over the selected columns of `frame`.
    pub fn return_type(&self, frame: &DataFrame) -> Result<DataType, FrameError> {
        let inputs = self.inputs(frame)?;
        let types: Vec<&DataType> = inputs.iter().map(|c| c.data_type()).collect();
        Ok(self.aggregator.columns_return_type(&types))
    }
}

impl fmt::Debug for AggSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggSpec")
            .field("aggregator", &self.aggregator.name())
            .field("columns", &self.columns)
            .field("name", &self.name)
            .finish()
    }
}

/// Aggregation over the groups of a [`GroupBy`].
pub trait GroupedAggregation {
    /// Key columns followed by one value column per spec, one row per group.
    fn aggregate(&self, specs: &[AggSpec]) -> Result<DataFrame, FrameError>;

    /// Key columns followed by a group column named `column`. It holds one
    /// value column per distinct value of `column` (first-seen order) with
    /// the aggregate of the matching rows; missing combinations are null.
    fn pivot(&self, column: &str, spec: &AggSpec) -> Result<DataFrame, FrameError>;
}

impl GroupedAggregation for GroupBy {
    fn aggregate(&self, specs: &[AggSpec]) -> Result<DataFrame, FrameError> {
        let mut result = self.keys().clone();
        for spec in specs {
            let values = self
                .groups()
                .par_iter()
                .map(|group| spec.evaluate(group))
                .collect::<Result<Vec<_>, _>>()?;
            let data_type = match self.groups().first() {
                Some(group) => spec.return_type(group)?,
                None => DataType::Nothing,
            };
            let name = spec.output_name();
            result = result.add(&name, ValueColumn::new(name.as_str(), data_type, values)?)?;
        }
        tracing::debug!(
            groups = self.len(),
            columns = specs.len(),
            "aggregated groups"
        );
        Ok(result)
    }

    fn pivot(&self, column: &str, spec: &AggSpec) -> Result<DataFrame, FrameError> {
        let mut seen = HashSet::new();
        let mut pivot_values = Vec::new();
        for group in self.groups() {
            for value in group.get_path(column)?.as_value()?.values() {
                if seen.insert(value.clone()) {
                    pivot_values.push(value.clone());
                }
            }
        }

        // One row of cells per group, one cell per pivot value.
        let cells = self
            .groups()
            .par_iter()
            .map(|group| {
                let pivot = group.get_path(column)?.as_value()?;
                pivot_values
                    .iter()
                    .map(|target| {
                        let mask: Vec<bool> =
                            pivot.values().iter().map(|v| v == target).collect();
                        if !mask.contains(&true) {
                            return Ok(Value::Null);
                        }
                        spec.evaluate(&group.filter(&mask)?)
                    })
                    .collect::<Result<Vec<_>, FrameError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let data_type = match self.groups().first() {
            Some(group) => spec.return_type(group)?,
            None => DataType::Nothing,
        };
        let columns = pivot_column_names(&pivot_values)
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let values = cells.iter().map(|row| row[i].clone()).collect();
                ValueColumn::new(name, data_type.clone(), values).map(Column::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pivoted = if columns.is_empty() {
            DataFrame::empty(self.len())
        } else {
            DataFrame::new(columns)?
        };
        tracing::debug!(
            column,
            values = pivot_values.len(),
            groups = self.len(),
            "pivoted groups"
        );

        self.keys().add(column, GroupColumn::new(column, pivoted))
    }
}

/// Column name per pivot value. Values that print alike (`1` as i32 and i64)
/// get their type appended, then an ordinal if still taken.
fn pivot_column_names(values: &[Value]) -> Vec<String> {
    let mut taken = HashSet::new();
    values
        .iter()
        .map(|value| {
            let plain = value.to_string();
            let mut name = plain.clone();
            if taken.contains(&name) {
                name = format!("{plain} ({})", value.data_type());
            }
            let base = name.clone();
            let mut ordinal = 2;
            while taken.contains(&name) {
                name = format!("{base} #{ordinal}");
                ordinal += 1;
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}
