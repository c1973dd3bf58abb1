//! Schema extraction from live frames, and frames built from declared schemas.

use crate::{
    column::{Column, FrameColumn, GroupColumn, ValueColumn},
    error::FrameError,
    frame::DataFrame,
    schema::{ColumnSchema, CompareMode, CompareResult, DataFrameSchema},
    value::Value,
};

/// Derive the schema of `frame`, recursing through groups.
///
/// Columns with an empty name are placeholders and are skipped. Frame columns
/// report their memoized nested schema.
pub fn extract_schema(frame: &DataFrame) -> DataFrameSchema {
    DataFrameSchema::from_unique(
        frame
            .columns()
            .iter()
            .filter(|column| !column.name().is_empty())
            .map(|column| (column.name().to_owned(), column.schema()))
            .collect(),
    )
}

impl Column {
    pub fn schema(&self) -> ColumnSchema {
        match self {
            Column::Value(c) => ColumnSchema::Value(c.value_type().clone()),
            Column::Group(c) => ColumnSchema::group(extract_schema(c.frame())),
            Column::Frame(c) => ColumnSchema::frame(c.schema().clone(), c.nullable()),
        }
    }
}

impl DataFrame {
    pub fn schema(&self) -> DataFrameSchema {
        extract_schema(self)
    }

    /// Check that this frame conforms to a declared schema.
    ///
    /// The frame conforms if its schema `Matches` or `IsDerived` from
    /// `expected` (extra columns or narrower types are fine). Anything else
    /// fails with [`FrameError::Aggregation`].
    pub fn check_schema(
        &self,
        expected: &DataFrameSchema,
        mode: CompareMode,
    ) -> Result<(), FrameError> {
        match self.schema().compare_with(expected, mode) {
            CompareResult::Matches | CompareResult::IsDerived => Ok(()),
            other => Err(FrameError::aggregation(format!(
                "frame does not conform to the expected schema (comparison result {other:?})"
            ))),
        }
    }
}

impl DataFrameSchema {
    /// A frame of `nrow` rows with this schema, every leaf filled with nulls.
    ///
    /// Non-nullable value columns can only be built for `nrow == 0`.
    pub fn empty_frame(&self, nrow: usize) -> Result<DataFrame, FrameError> {
        if self.is_empty() {
            return Ok(DataFrame::empty(nrow));
        }
        let columns = self
            .iter()
            .map(|(name, schema)| schema.null_filled_column(name, nrow))
            .collect::<Result<Vec<_>, _>>()?;
        DataFrame::with_nrow(columns, nrow)
    }
}

impl ColumnSchema {
    /// A column of `nrow` empty cells conforming to this schema.
    ///
    /// Value cells are null, group rows recurse, frame cells are absent when
    /// the column is nullable and empty tables of the nested schema otherwise.
    pub fn null_filled_column(&self, name: &str, nrow: usize) -> Result<Column, FrameError> {
        Ok(match self {
            ColumnSchema::Value(value_type) => {
                ValueColumn::with_type(name, value_type.clone(), vec![Value::Null; nrow])?.into()
            }
            ColumnSchema::Group { schema, .. } => {
                GroupColumn::new(name, schema.empty_frame(nrow)?).into()
            }
            ColumnSchema::Frame {
                schema, nullable, ..
            } => {
                let cell = if *nullable {
                    DataFrame::empty(0)
                } else {
                    schema.empty_frame(0)?
                };
                FrameColumn::with_schema(name, vec![cell; nrow], schema.clone(), *nullable).into()
            }
        })
    }
}
