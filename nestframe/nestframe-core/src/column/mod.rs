//! Column storage: scalar values, nested rows and nested tables.

mod frame;
mod group;
mod value;

use std::ops::Range;

pub use frame::FrameColumn;
pub use group::GroupColumn;
pub use value::ValueColumn;

use crate::{
    error::FrameError,
    frame::{DataFrame, DataRow},
    schema::ColumnKind,
    value::Value,
};

/// A named column of one of the three kinds.
#[derive(Debug, Clone)]
pub enum Column {
    Value(ValueColumn),
    Group(GroupColumn),
    Frame(FrameColumn),
}

/// One cell read from a [`Column`].
#[derive(Debug, Clone)]
pub enum Cell<'a> {
    Value(&'a Value),
    Row(DataRow<'a>),
    Frame(&'a DataFrame),
}

impl Cell<'_> {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Cell::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Value(c) => c.name(),
            Column::Group(c) => c.name(),
            Column::Frame(c) => c.name(),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Column::Value(c) => c.size(),
            Column::Group(c) => c.size(),
            Column::Frame(c) => c.size(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Value(_) => ColumnKind::Value,
            Column::Group(_) => ColumnKind::Group,
            Column::Frame(_) => ColumnKind::Frame,
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Column::Value(c) => c.nullable(),
            Column::Group(_) => false,
            Column::Frame(c) => c.nullable(),
        }
    }

    pub fn get(&self, index: usize) -> Result<Cell<'_>, FrameError> {
        Ok(match self {
            Column::Value(c) => Cell::Value(c.get(index)?),
            Column::Group(c) => Cell::Row(c.get(index)?),
            Column::Frame(c) => Cell::Frame(c.get(index)?),
        })
    }

    /// Same data under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Column {
        match self {
            Column::Value(c) => Column::Value(c.renamed(name)),
            Column::Group(c) => Column::Group(c.renamed(name)),
            Column::Frame(c) => Column::Frame(c.renamed(name)),
        }
    }

    /// Rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Result<Column, FrameError> {
        Ok(match self {
            Column::Value(c) => Column::Value(c.take(indices)?),
            Column::Group(c) => Column::Group(c.take(indices)?),
            Column::Frame(c) => Column::Frame(c.take(indices)?),
        })
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Column, FrameError> {
        check_range(&range, self.size())?;
        self.take(&range.collect::<Vec<_>>())
    }

    /// Rows where `mask` is true. The mask must cover every row.
    pub fn filter(&self, mask: &[bool]) -> Result<Column, FrameError> {
        self.take(&mask_indices(mask, self.size())?)
    }

    /// Resolve a path of child names below this column through nested groups.
    ///
    /// An empty path yields the column itself. Frame cells are independent
    /// tables, so a frame column cannot be resolved into.
    pub fn resolve(&self, path: &[&str]) -> Result<&Column, FrameError> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(self);
        };
        match self {
            Column::Value(_) => Err(FrameError::not_found(format!("{}.{first}", self.name()))),
            Column::Group(c) => c
                .frame()
                .get(first)
                .map_err(|_| FrameError::not_found(format!("{}.{first}", self.name())))?
                .resolve(rest)
                .map_err(|err| match err {
                    FrameError::ColumnNotFound { path } => {
                        FrameError::not_found(format!("{}.{path}", self.name()))
                    }
                    other => other,
                }),
            Column::Frame(_) => Err(self.unsupported("resolve")),
        }
    }

    pub fn as_value(&self) -> Result<&ValueColumn, FrameError> {
        match self {
            Column::Value(c) => Ok(c),
            _ => Err(self.unsupported("as_value")),
        }
    }

    pub fn as_group(&self) -> Result<&GroupColumn, FrameError> {
        match self {
            Column::Group(c) => Ok(c),
            _ => Err(self.unsupported("as_group")),
        }
    }

    pub fn as_frame(&self) -> Result<&FrameColumn, FrameError> {
        match self {
            Column::Frame(c) => Ok(c),
            _ => Err(self.unsupported("as_frame")),
        }
    }

    pub fn unsupported(&self, operation: &'static str) -> FrameError {
        FrameError::UnsupportedOperation {
            operation,
            kind: self.kind(),
        }
    }
}

impl From<ValueColumn> for Column {
    fn from(column: ValueColumn) -> Self {
        Column::Value(column)
    }
}

impl From<GroupColumn> for Column {
    fn from(column: GroupColumn) -> Self {
        Column::Group(column)
    }
}

impl From<FrameColumn> for Column {
    fn from(column: FrameColumn) -> Self {
        Column::Frame(column)
    }
}

pub(crate) fn check_range(range: &Range<usize>, size: usize) -> Result<(), FrameError> {
    if range.end > size {
        return Err(FrameError::IndexOutOfRange {
            index: range.end,
            size,
        });
    }
    if range.start > range.end {
        return Err(FrameError::IndexOutOfRange {
            index: range.start,
            size: range.end,
        });
    }
    Ok(())
}

pub(crate) fn mask_indices(mask: &[bool], size: usize) -> Result<Vec<usize>, FrameError> {
    if mask.len() != size {
        return Err(FrameError::violation(format!(
            "filter mask has {} entries for {size} rows",
            mask.len()
        )));
    }
    Ok(mask
        .iter()
        .enumerate()
        .filter_map(|(i, keep)| keep.then_some(i))
        .collect())
}
