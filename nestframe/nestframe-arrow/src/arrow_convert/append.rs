use arrow::{
    array::{
        ArrayBuilder, BooleanBuilder, Float32Builder, Float64Builder, Int8Builder, Int16Builder,
        Int32Builder, Int64Builder, ListBuilder, NullBuilder, StringBuilder, StructBuilder,
    },
    datatypes::{DataType, Fields},
};
use nestframe_core::{Cell, DataFrame, DataRow, FrameError, Value, ValueTypeError};

use super::scalar::{ScalarValue, scalar_value_for_datatype};
use crate::error::ArrowConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .expect(concat!("expected builder type: ", stringify!($T)))
    };
}

fn append_scalar_dyn(builder: &mut Box<dyn ArrayBuilder>, scalar: &ScalarValue<'_>) {
    match scalar {
        ScalarValue::Null => cast_builder!(builder, NullBuilder).append_null(),
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder).append_option(*v),
        ScalarValue::Int8(v) => cast_builder!(builder, Int8Builder).append_option(*v),
        ScalarValue::Int16(v) => cast_builder!(builder, Int16Builder).append_option(*v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder).append_option(*v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder).append_option(*v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder).append_option(*v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder).append_option(*v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder).append_option(*v),
    }
}

fn append_list_elements(
    child_builder: &mut Box<dyn ArrayBuilder>,
    elem_dt: &DataType,
    value: &Value,
) -> Result<bool, ValueTypeError> {
    match value {
        Value::List(items) => {
            for item in items {
                append_value_to_builder(child_builder, elem_dt, item)?;
            }
            Ok(true)
        }
        Value::Null => Ok(false),
        _ => Err(value.type_mismatch("List")),
    }
}

/// Append a scalar or list value.
pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &Value,
) -> Result<(), ValueTypeError> {
    if let Some(scalar) = scalar_value_for_datatype(dt, value)? {
        append_scalar_dyn(builder, &scalar);
        return Ok(());
    }

    match dt {
        DataType::List(field) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            let valid = append_list_elements(b.values(), field.data_type(), value)?;
            b.append(valid);
        }
        DataType::Struct(fields) if value.is_null() => {
            append_null_row(cast_builder!(builder, StructBuilder), fields)?;
        }
        other => return Err(value.type_mismatch(other.to_string())),
    }
    Ok(())
}

/// Append one cell of a column: a value, a group row or a nested frame.
pub(super) fn append_cell(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    cell: &Cell<'_>,
) -> Result<(), ArrowConvertError> {
    match (cell, dt) {
        (Cell::Value(value), _) => append_value_to_builder(builder, dt, value)?,
        (Cell::Row(row), DataType::Struct(fields)) => {
            let b = cast_builder!(builder, StructBuilder);
            append_row(b, fields, row)?;
        }
        (Cell::Frame(frame), DataType::List(field)) => {
            let DataType::Struct(fields) = field.data_type() else {
                return Err(nested_mismatch("frame", dt));
            };
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            let valid = append_frame_rows(b.values(), fields, frame)?;
            b.append(valid);
        }
        (Cell::Row(_), _) => return Err(nested_mismatch("group", dt)),
        (Cell::Frame(_), _) => return Err(nested_mismatch("frame", dt)),
    }
    Ok(())
}

fn nested_mismatch(kind: &str, dt: &DataType) -> ArrowConvertError {
    ValueTypeError::new(dt.to_string(), kind).into()
}

/// Absent frames become null list entries; other frames append every row.
fn append_frame_rows(
    values: &mut Box<dyn ArrayBuilder>,
    fields: &Fields,
    frame: &DataFrame,
) -> Result<bool, ArrowConvertError> {
    if frame.is_absent() {
        return Ok(false);
    }
    let b = cast_builder!(values, StructBuilder);
    for row in frame.rows() {
        append_row(b, fields, &row)?;
    }
    Ok(true)
}

/// Project `row` onto `fields`; columns missing from the row are null, which
/// requires a nullable field.
fn append_row(
    sb: &mut StructBuilder,
    fields: &Fields,
    row: &DataRow<'_>,
) -> Result<(), ArrowConvertError> {
    for (i, field) in fields.iter().enumerate() {
        let child = &mut sb.field_builders_mut()[i];
        match row.get(field.name()) {
            Ok(cell) => append_cell(child, field.data_type(), &cell)?,
            Err(FrameError::ColumnNotFound { .. }) if field.is_nullable() => {
                append_value_to_builder(child, field.data_type(), &Value::Null)?
            }
            Err(FrameError::ColumnNotFound { path }) => {
                return Err(FrameError::SchemaViolation {
                    detail: format!("row has no column '{path}' for a non-nullable field"),
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        }
    }
    sb.append(true);
    Ok(())
}

fn append_null_row(sb: &mut StructBuilder, fields: &Fields) -> Result<(), ValueTypeError> {
    for (i, field) in fields.iter().enumerate() {
        append_value_to_builder(&mut sb.field_builders_mut()[i], field.data_type(), &Value::Null)?;
    }
    sb.append(false);
    Ok(())
}
