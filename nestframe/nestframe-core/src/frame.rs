//! The DataFrame container and row views over it.

use std::{collections::HashSet, ops::Range, sync::Arc};

use crate::{
    column::{Cell, Column, check_range, mask_indices},
    error::FrameError,
    value::Value,
};

/// Ordered collection of uniquely named columns of equal length.
///
/// A DataFrame is immutable. Every structural operation returns a new frame
/// that shares the data of untouched columns with its input.
#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: Arc<[Column]>,
    nrow: usize,
}

impl DataFrame {
    /// Build a frame from columns.
    ///
    /// Fails with [`FrameError::SchemaViolation`] on duplicate names or
    /// differing column sizes.
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        let nrow = columns.first().map_or(0, Column::size);
        Self::with_nrow(columns, nrow)
    }

    /// A frame without columns. `nrow` rows are still tracked so the frame can
    /// stand in for a group of that many empty rows.
    pub fn empty(nrow: usize) -> Self {
        Self {
            columns: Arc::from(Vec::new()),
            nrow,
        }
    }

    pub(crate) fn with_nrow(columns: Vec<Column>, nrow: usize) -> Result<Self, FrameError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(FrameError::violation(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
            if column.size() != nrow {
                return Err(FrameError::violation(format!(
                    "column '{}' has {} rows, expected {nrow}",
                    column.name(),
                    column.size()
                )));
            }
        }
        Ok(Self {
            columns: columns.into(),
            nrow,
        })
    }

    /// Rebuild with new columns, keeping the row count unless the frame is
    /// absent (no columns, no rows), in which case the columns define it.
    fn rebuild(&self, columns: Vec<Column>) -> Result<Self, FrameError> {
        if self.is_absent() {
            Self::new(columns)
        } else {
            Self::with_nrow(columns, self.nrow)
        }
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// No columns and no rows; the representation of a missing frame cell.
    pub fn is_absent(&self) -> bool {
        self.columns.is_empty() && self.nrow == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    fn position(&self, name: &str) -> Result<usize, FrameError> {
        self.columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| FrameError::not_found(name))
    }

    /// Top-level column by name.
    pub fn get(&self, name: &str) -> Result<&Column, FrameError> {
        self.position(name).map(|i| &self.columns[i])
    }

    pub fn column_at(&self, index: usize) -> Result<&Column, FrameError> {
        self.columns.get(index).ok_or(FrameError::IndexOutOfRange {
            index,
            size: self.ncol(),
        })
    }

    /// Column by dotted path through nested groups, e.g. `"name.first"`.
    pub fn get_path(&self, path: &str) -> Result<&Column, FrameError> {
        self.get_by_path(&path.split('.').collect::<Vec<_>>())
    }

    pub fn get_by_path(&self, path: &[&str]) -> Result<&Column, FrameError> {
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| FrameError::not_found(""))?;
        self.get(first)?.resolve(rest)
    }

    pub fn row(&self, index: usize) -> Result<DataRow<'_>, FrameError> {
        if index >= self.nrow {
            return Err(FrameError::IndexOutOfRange {
                index,
                size: self.nrow,
            });
        }
        Ok(DataRow { frame: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = DataRow<'_>> {
        (0..self.nrow).map(move |index| DataRow { frame: self, index })
    }

    /// Frame with the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Self, FrameError> {
        let columns = names
            .iter()
            .map(|name| self.get(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_nrow(columns, self.nrow)
    }

    /// Append `column` under `name`.
    pub fn add(&self, name: &str, column: impl Into<Column>) -> Result<Self, FrameError> {
        let mut columns = self.columns.to_vec();
        columns.push(column.into().renamed(name));
        self.rebuild(columns)
    }

    /// Frame without the named columns. Every name must exist.
    pub fn remove(&self, names: &[&str]) -> Result<Self, FrameError> {
        for name in names {
            self.position(name)?;
        }
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.contains(&c.name()))
            .cloned()
            .collect();
        Self::with_nrow(columns, self.nrow)
    }

    pub fn rename(&self, old: &str, new: &str) -> Result<Self, FrameError> {
        let index = self.position(old)?;
        let mut columns = self.columns.to_vec();
        columns[index] = columns[index].renamed(new);
        Self::with_nrow(columns, self.nrow)
    }

    /// Insert `column` under `name` before `position` (`ncol` appends).
    pub fn insert(
        &self,
        name: &str,
        position: usize,
        column: impl Into<Column>,
    ) -> Result<Self, FrameError> {
        if position > self.ncol() {
            return Err(FrameError::IndexOutOfRange {
                index: position,
                size: self.ncol() + 1,
            });
        }
        let mut columns = self.columns.to_vec();
        columns.insert(position, column.into().renamed(name));
        self.rebuild(columns)
    }

    /// Move the named column so it ends up at `position`.
    pub fn move_to(&self, name: &str, position: usize) -> Result<Self, FrameError> {
        let from = self.position(name)?;
        if position >= self.ncol() {
            return Err(FrameError::IndexOutOfRange {
                index: position,
                size: self.ncol(),
            });
        }
        let mut columns = self.columns.to_vec();
        let column = columns.remove(from);
        columns.insert(position, column);
        Self::with_nrow(columns, self.nrow)
    }

    /// Rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Result<Self, FrameError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.nrow) {
            return Err(FrameError::IndexOutOfRange {
                index,
                size: self.nrow,
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| c.take(indices))
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_nrow(columns, indices.len())
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Self, FrameError> {
        check_range(&range, self.nrow)?;
        self.take(&range.collect::<Vec<_>>())
    }

    /// Rows where `mask` is true. The mask must cover every row.
    pub fn filter(&self, mask: &[bool]) -> Result<Self, FrameError> {
        self.take(&mask_indices(mask, self.nrow)?)
    }
}

/// Borrowed view of one row of a [`DataFrame`].
#[derive(Debug, Clone, Copy)]
pub struct DataRow<'a> {
    frame: &'a DataFrame,
    index: usize,
}

impl<'a> DataRow<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.frame
    }

    pub fn get(&self, name: &str) -> Result<Cell<'a>, FrameError> {
        self.frame.get(name)?.get(self.index)
    }

    /// Scalar cell of a value column.
    pub fn value(&self, name: &str) -> Result<&'a Value, FrameError> {
        self.frame.get(name)?.as_value()?.get(self.index)
    }

    /// Cell by dotted path through nested groups.
    pub fn get_path(&self, path: &str) -> Result<Cell<'a>, FrameError> {
        self.frame.get_path(path)?.get(self.index)
    }

    /// `(name, cell)` pairs in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&'a str, Cell<'a>)> + 'a {
        let index = self.index;
        self.frame
            .columns
            .iter()
            .map(move |column| (column.name(), cell_at(column, index)))
    }
}

/// `index` is below the owning frame's row count, which every column shares.
fn cell_at(column: &Column, index: usize) -> Cell<'_> {
    match column {
        Column::Value(c) => Cell::Value(&c.values()[index]),
        Column::Group(c) => Cell::Row(DataRow {
            frame: c.frame(),
            index,
        }),
        Column::Frame(c) => Cell::Frame(&c.frames()[index]),
    }
}
