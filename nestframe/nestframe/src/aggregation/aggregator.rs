use std::sync::Arc;

use nestframe_core::{DataType, FrameError, Value, ValueColumn, ValueType, unify_all_numbers};

/// Reduction over non-null values of a known element type.
pub type Reducer =
    Arc<dyn Fn(&[&Value], &DataType) -> Result<Option<Value>, FrameError> + Send + Sync>;

/// A named reduction over the values of one or more value columns.
///
/// Nulls are filtered out before reducing. `None` means the input was empty
/// and the aggregator has no neutral element.
pub trait Aggregator: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the result has the element type of the input.
    fn preserves_type(&self) -> bool;

    /// Result type for input of element type `input`.
    fn return_type(&self, input: &DataType) -> DataType;

    /// Result type when aggregating columns of the given element types.
    fn columns_return_type(&self, inputs: &[&DataType]) -> DataType;

    /// Reduce a raw sequence of values of element type `data_type`.
    fn aggregate_values(
        &self,
        values: &[Value],
        data_type: &DataType,
    ) -> Result<Option<Value>, FrameError>;

    /// Reduce several columns into one value.
    fn aggregate_columns(&self, columns: &[&ValueColumn]) -> Result<Option<Value>, FrameError>;

    fn aggregate(&self, column: &ValueColumn) -> Result<Option<Value>, FrameError> {
        self.aggregate_values(column.values(), column.data_type())
    }
}

pub(crate) fn non_null(values: &[Value]) -> Vec<&Value> {
    values.iter().filter(|v| !v.is_null()).collect()
}

/// Common type of several input types; see [`unify_all_numbers`].
///
/// All-number inputs unify to a primitive number type with a warning when
/// `i64` values end up as `f64`. Anything else takes the common supertype.
pub(crate) fn unified_type(aggregator: &str, types: &[&DataType]) -> DataType {
    match unify_all_numbers(types.iter().copied()) {
        Some(unified) => {
            if unified == DataType::F64 && types.contains(&&DataType::I64) {
                tracing::warn!(
                    aggregator,
                    "converting i64 values to f64, loss of precision may occur"
                );
            }
            unified
        }
        None => common_type(types),
    }
}

pub(crate) fn common_type(types: &[&DataType]) -> DataType {
    ValueType::common(types.iter().map(|t| ValueType::non_null((*t).clone()))).data_type
}

/// Convert numbers to `target`; other values are kept as they are.
pub(crate) fn widen_all(
    aggregator: &str,
    values: impl IntoIterator<Item = Value>,
    target: &DataType,
) -> Result<Vec<Value>, FrameError> {
    values
        .into_iter()
        .map(|value| {
            if !target.is_primitive_number() || !value.is_number() {
                return Ok(value);
            }
            value.widen_to(target).ok_or_else(|| {
                FrameError::aggregation(format!(
                    "{aggregator}: cannot convert {value} to {target}"
                ))
            })
        })
        .collect()
}
