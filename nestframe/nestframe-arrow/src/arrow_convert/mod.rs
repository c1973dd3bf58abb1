//! Conversion from a [`DataFrame`] to an Arrow `RecordBatch`.
//!
//! The batch schema is [`schema_to_arrow`](crate::schema_to_arrow) applied to
//! the frame's extracted schema.

mod append;
mod builder;
mod scalar;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::DataType;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use nestframe_core::{Column, DataFrame};

use crate::error::ArrowConvertError;

/// Convert a frame to a RecordBatch with one Arrow column per named column.
///
/// Group columns become `StructArray`s. Frame columns become `ListArray`s of
/// structs projected onto the column's memoized schema; absent cells are null
/// list entries. Columns with an empty name are skipped, as in schema
/// extraction.
pub fn frame_to_record_batch(frame: &DataFrame) -> Result<RecordBatch, ArrowConvertError> {
    let schema = Arc::new(crate::schema_convert::schema_to_arrow(&frame.schema())?);
    let columns = frame
        .columns()
        .iter()
        .filter(|column| !column.name().is_empty());

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for (column, field) in columns.zip(schema.fields().iter()) {
        arrays.push(build_array_from_column(
            field.data_type(),
            column,
            frame.nrow(),
        )?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(frame.nrow()));
    Ok(RecordBatch::try_new_with_options(schema, arrays, &options)?)
}

fn build_array_from_column(
    dt: &DataType,
    column: &Column,
    nrow: usize,
) -> Result<ArrayRef, ArrowConvertError> {
    let capacity = match dt {
        DataType::List(_) => nrow.saturating_mul(4),
        _ => nrow,
    };
    let mut builder = builder::make_builder(dt, capacity)?;
    for index in 0..nrow {
        append::append_cell(&mut builder, dt, &column.get(index)?)?;
    }
    Ok(builder.finish())
}
