use rayon::prelude::*;

use nestframe_core::{DataType, FrameError, Value, ValueColumn};

use super::aggregator::{Aggregator, Reducer, common_type, non_null};

/// Aggregates every column on its own, then reduces the partial results.
///
/// Suited to reductions like `min` and `max` whose result is one of the
/// input values.
pub struct TwoStepAggregator {
    name: String,
    preserves_type: bool,
    return_type: fn(&DataType) -> DataType,
    step_one: Reducer,
    step_two: Reducer,
}

impl TwoStepAggregator {
    pub fn new(
        name: impl Into<String>,
        preserves_type: bool,
        return_type: fn(&DataType) -> DataType,
        step_one: Reducer,
        step_two: Reducer,
    ) -> Self {
        Self {
            name: name.into(),
            preserves_type,
            return_type,
            step_one,
            step_two,
        }
    }

    /// Same reduction for both steps.
    pub fn preserving(name: impl Into<String>, reduce: Reducer) -> Self {
        Self::new(name, true, DataType::clone, reduce.clone(), reduce)
    }
}

impl Aggregator for TwoStepAggregator {
    fn name(&self) -> &str {
        &self.name
    }

    fn preserves_type(&self) -> bool {
        self.preserves_type
    }

    fn return_type(&self, input: &DataType) -> DataType {
        (self.return_type)(input)
    }

    fn columns_return_type(&self, inputs: &[&DataType]) -> DataType {
        self.return_type(&common_type(inputs))
    }

    fn aggregate_values(
        &self,
        values: &[Value],
        data_type: &DataType,
    ) -> Result<Option<Value>, FrameError> {
        (self.step_one)(&non_null(values), data_type)
    }

    fn aggregate_columns(&self, columns: &[&ValueColumn]) -> Result<Option<Value>, FrameError> {
        let partial: Vec<Option<Value>> = columns
            .par_iter()
            .map(|column| self.aggregate(column))
            .collect::<Result<_, _>>()?;
        let partial: Vec<Value> = partial.into_iter().flatten().collect();

        let types: Vec<DataType> = partial.iter().map(Value::data_type).collect();
        let data_type = common_type(&types.iter().collect::<Vec<_>>());
        let refs: Vec<&Value> = partial.iter().collect();
        (self.step_two)(&refs, &data_type)
    }
}
