use arrow::datatypes::DataType;
use nestframe_core::{DataType as CoreType, Value, ValueTypeError};

pub(super) enum ScalarValue<'a> {
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Utf8(Option<&'a str>),
}

/// Read `value` as the scalar stored by an Arrow column of type `dt`,
/// widening narrower numbers. `None` for non-scalar Arrow types.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: &'a Value,
) -> Result<Option<ScalarValue<'a>>, ValueTypeError> {
    Ok(Some(match dt {
        DataType::Null if value.is_null() => ScalarValue::Null,
        DataType::Null => return Err(value.type_mismatch("Null")),
        DataType::Boolean => ScalarValue::Boolean(value.try_bool()?),
        DataType::Int8 => ScalarValue::Int8(value.try_i8()?),
        DataType::Int16 => ScalarValue::Int16(widened(value, &CoreType::I16, Value::try_i16)?),
        DataType::Int32 => ScalarValue::Int32(widened(value, &CoreType::I32, Value::try_i32)?),
        DataType::Int64 => ScalarValue::Int64(widened(value, &CoreType::I64, Value::try_i64)?),
        DataType::Float32 => {
            ScalarValue::Float32(widened(value, &CoreType::F32, Value::try_f32)?)
        }
        DataType::Float64 => {
            ScalarValue::Float64(widened(value, &CoreType::F64, Value::try_f64)?)
        }
        DataType::Utf8 => ScalarValue::Utf8(value.try_str()?),
        _ => return Ok(None),
    }))
}

fn widened<T>(
    value: &Value,
    target: &CoreType,
    read: fn(&Value) -> Result<Option<T>, ValueTypeError>,
) -> Result<Option<T>, ValueTypeError> {
    read(value).or_else(|err| match value.widen_to(target) {
        Some(wide) => read(&wide),
        None => Err(err),
    })
}
