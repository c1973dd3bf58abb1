use nestframe_core::{DataType, FrameError, Value, ValueColumn};

use super::aggregator::{Aggregator, Reducer, non_null, unified_type, widen_all};

/// Pools the values of all columns and reduces them in one pass.
///
/// Needed by reductions that cannot be combined from partial results, such
/// as `median` or `std`.
pub struct FlatteningAggregator {
    name: String,
    preserves_type: bool,
    return_type: fn(&DataType) -> DataType,
    reduce: Reducer,
}

impl FlatteningAggregator {
    pub fn new(
        name: impl Into<String>,
        preserves_type: bool,
        return_type: fn(&DataType) -> DataType,
        reduce: Reducer,
    ) -> Self {
        Self {
            name: name.into(),
            preserves_type,
            return_type,
            reduce,
        }
    }

    pub fn preserving(name: impl Into<String>, reduce: Reducer) -> Self {
        Self::new(name, true, DataType::clone, reduce)
    }
}

impl Aggregator for FlatteningAggregator {
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
        self.return_type(&unified_type(&self.name, inputs))
    }

    fn aggregate_values(
        &self,
        values: &[Value],
        data_type: &DataType,
    ) -> Result<Option<Value>, FrameError> {
        (self.reduce)(&non_null(values), data_type)
    }

    fn aggregate_columns(&self, columns: &[&ValueColumn]) -> Result<Option<Value>, FrameError> {
        if let [column] = columns {
            return self.aggregate(column);
        }
        let types: Vec<&DataType> = columns.iter().map(|c| c.data_type()).collect();
        let target = unified_type(&self.name, &types);
        let pooled = columns
            .iter()
            .flat_map(|c| c.non_null())
            .cloned()
            .collect::<Vec<_>>();
        let pooled = widen_all(&self.name, pooled, &target)?;
        let refs: Vec<&Value> = pooled.iter().collect();
        (self.reduce)(&refs, &target)
    }
}
