use rayon::prelude::*;

use nestframe_core::{DataType, FrameError, Value, ValueColumn, unify_all_numbers};

use super::aggregator::{Aggregator, Reducer, non_null, unified_type, widen_all};

/// Two-step aggregation restricted to number columns.
///
/// Partial results are converted to their unified number type before the
/// second step, so `i32` and `i64` columns sum as `i64`.
pub struct NumbersAggregator {
    name: String,
    return_type: fn(&DataType) -> DataType,
    reduce: Reducer,
}

impl NumbersAggregator {
    pub fn new(
        name: impl Into<String>,
        return_type: fn(&DataType) -> DataType,
        reduce: Reducer,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            reduce,
        }
    }

    fn require_numbers(&self, data_type: &DataType) -> Result<(), FrameError> {
        if data_type.is_number() || *data_type == DataType::Nothing {
            return Ok(());
        }
        Err(FrameError::aggregation(format!(
            "{} requires number columns, found {data_type}",
            self.name
        )))
    }
}

impl Aggregator for NumbersAggregator {
    fn name(&self) -> &str {
        &self.name
    }

    fn preserves_type(&self) -> bool {
        false
    }

    fn return_type(&self, input: &DataType) -> DataType {
        (self.return_type)(input)
    }

    fn columns_return_type(&self, inputs: &[&DataType]) -> DataType {
        match unify_all_numbers(inputs.iter().copied()) {
            Some(unified) => self.return_type(&unified),
            None => self.return_type(&DataType::Number),
        }
    }

    fn aggregate_values(
        &self,
        values: &[Value],
        data_type: &DataType,
    ) -> Result<Option<Value>, FrameError> {
        self.require_numbers(data_type)?;
        (self.reduce)(&non_null(values), data_type)
    }

    fn aggregate_columns(&self, columns: &[&ValueColumn]) -> Result<Option<Value>, FrameError> {
        for column in columns {
            self.require_numbers(column.data_type())?;
        }
        let partial: Vec<Option<Value>> = columns
            .par_iter()
            .map(|column| self.aggregate(column))
            .collect::<Result<_, _>>()?;
        let partial: Vec<Value> = partial.into_iter().flatten().collect();

        let types: Vec<DataType> = partial.iter().map(Value::data_type).collect();
        let unified = unified_type(&self.name, &types.iter().collect::<Vec<_>>());
        let widened = widen_all(&self.name, partial, &unified)?;
        let refs: Vec<&Value> = widened.iter().collect();
        (self.reduce)(&refs, &unified)
    }
}
