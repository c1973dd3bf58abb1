use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result},
};

use super::{ColumnSchema, CompareMode, CompareResult};
use crate::error::FrameError;

/// Ordered mapping from column name to [`ColumnSchema`].
///
/// Names are unique within one level; nested levels have their own namespace.
/// Equality is order-independent (`compare(other) == Matches`).
#[derive(Debug, Clone, Default)]
pub struct DataFrameSchema {
    columns: Vec<(String, ColumnSchema)>,
}

impl DataFrameSchema {
    /// Build a schema, rejecting duplicate names with [`FrameError::SchemaViolation`].
    pub fn new<N: Into<String>>(
        columns: impl IntoIterator<Item = (N, ColumnSchema)>,
    ) -> std::result::Result<Self, FrameError> {
        let columns: Vec<(String, ColumnSchema)> = columns
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();
        let mut seen = HashSet::with_capacity(columns.len());
        for (name, _) in &columns {
            if !seen.insert(name.as_str()) {
                return Err(FrameError::violation(format!(
                    "duplicate column name '{name}' in schema"
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Caller guarantees unique names.
    pub(crate) fn from_unique(columns: Vec<(String, ColumnSchema)>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnSchema)> {
        self.columns
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve a column through nested groups and frames.
    pub fn get_path(&self, path: &[&str]) -> std::result::Result<&ColumnSchema, FrameError> {
        let (first, rest) = path
            .split_first()
            .ok_or_else(|| FrameError::not_found(""))?;
        let mut current = self
            .get(first)
            .ok_or_else(|| FrameError::not_found(*first))?;
        for (depth, name) in rest.iter().enumerate() {
            current = current
                .nested()
                .and_then(|nested| nested.get(name))
                .ok_or_else(|| FrameError::not_found(path[..depth + 2].join(".")))?;
        }
        Ok(current)
    }

    /// Lenient comparison of `self` (A) against `other` (B).
    pub fn compare(&self, other: &DataFrameSchema) -> CompareResult {
        self.compare_with(other, CompareMode::Lenient)
    }

    /// Columns only in A contribute `IsDerived`, columns only in B contribute
    /// `IsSuper`, shared columns contribute their own comparison. Stops as
    /// soon as the accumulated result is `None`.
    pub fn compare_with(&self, other: &DataFrameSchema, mode: CompareMode) -> CompareResult {
        if std::ptr::eq(self, other) {
            return CompareResult::Matches;
        }
        let mut result = CompareResult::Matches;
        for (name, schema) in &self.columns {
            let step = match other.get(name) {
                Some(other_schema) => schema.compare(other_schema, mode),
                None => CompareResult::IsDerived,
            };
            result = result.combine(step);
            if result == CompareResult::None {
                return result;
            }
        }
        for (name, _) in &other.columns {
            if !self.contains(name) {
                result = result.combine(CompareResult::IsSuper);
                if result == CompareResult::None {
                    return result;
                }
            }
        }
        result
    }
}

impl PartialEq for DataFrameSchema {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == CompareResult::Matches
    }
}

impl Display for DataFrameSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&super::format_schema(self))
    }
}
