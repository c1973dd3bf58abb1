use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Fields, Schema};
use nestframe_core::{ColumnSchema, DataFrameSchema, DataType as CoreType};

use crate::error::ArrowConvertError;

/// Converts a [`DataFrameSchema`] into an Arrow `Schema`.
///
/// Value columns map to primitive or `List` types, group columns to a
/// non-null `Struct` and frame columns to a `List` of non-null `Struct`
/// items. The mixed `number` and `any` types have no Arrow counterpart and
/// fail with [`ArrowConvertError::UnsupportedType`].
pub fn schema_to_arrow(schema: &DataFrameSchema) -> Result<Schema, ArrowConvertError> {
    Ok(Schema::new(fields(schema)?))
}

pub(crate) fn fields(schema: &DataFrameSchema) -> Result<Fields, ArrowConvertError> {
    schema
        .iter()
        .map(|(name, column)| column_field(name, column))
        .collect::<Result<Vec<_>, _>>()
        .map(Fields::from)
}

fn column_field(name: &str, column: &ColumnSchema) -> Result<Field, ArrowConvertError> {
    Ok(match column {
        ColumnSchema::Value(value_type) => Field::new(
            name,
            value_datatype(name, &value_type.data_type)?,
            value_type.nullable || value_type.data_type == CoreType::Nothing,
        ),
        ColumnSchema::Group { schema, .. } => {
            Field::new(name, DataType::Struct(fields(schema)?), false)
        }
        ColumnSchema::Frame {
            schema, nullable, ..
        } => Field::new(
            name,
            DataType::List(Arc::new(Field::new(
                "item",
                DataType::Struct(fields(schema)?),
                false,
            ))),
            *nullable,
        ),
    })
}

fn value_datatype(name: &str, data_type: &CoreType) -> Result<DataType, ArrowConvertError> {
    Ok(match data_type {
        CoreType::Nothing => DataType::Null,
        CoreType::Bool => DataType::Boolean,
        CoreType::I8 => DataType::Int8,
        CoreType::I16 => DataType::Int16,
        CoreType::I32 => DataType::Int32,
        CoreType::I64 => DataType::Int64,
        CoreType::F32 => DataType::Float32,
        CoreType::F64 => DataType::Float64,
        CoreType::String => DataType::Utf8,
        CoreType::List(element) => DataType::List(Arc::new(Field::new(
            "item",
            value_datatype(name, &element.data_type)?,
            element.nullable || element.data_type == CoreType::Nothing,
        ))),
        CoreType::Number | CoreType::Any => {
            return Err(ArrowConvertError::UnsupportedType {
                column: name.to_string(),
                data_type: data_type.to_string(),
            });
        }
    })
}
