//! Partitioning of rows by key.

use std::collections::HashMap;

use crate::{
    column::{FrameColumn, ValueColumn},
    error::FrameError,
    frame::{DataFrame, DataRow},
    value::Value,
};

/// Rows of a frame partitioned by key.
///
/// Groups appear in the order their key is first seen; rows keep their
/// original relative order within a group.
#[derive(Debug, Clone)]
pub struct GroupBy {
    keys: DataFrame,
    groups: Vec<DataFrame>,
    lookup: HashMap<Vec<Value>, usize>,
}

impl DataFrame {
    /// Group rows by the values of one or more value columns (dotted paths
    /// reach into groups).
    pub fn group_by(&self, keys: &[&str]) -> Result<GroupBy, FrameError> {
        let key_columns = keys
            .iter()
            .map(|path| self.get_path(path)?.as_value())
            .collect::<Result<Vec<_>, _>>()?;
        let partition = Partition::build(self.nrow(), |row| {
            Ok(key_columns
                .iter()
                .map(|column| column.values()[row].clone())
                .collect())
        })?;
        let keys = DataFrame::with_nrow(
            key_columns
                .iter()
                .map(|column| column.take(&partition.first_rows).map(Into::into))
                .collect::<Result<Vec<_>, _>>()?,
            partition.keys.len(),
        )?;
        GroupBy::from_partition(self, keys, partition)
    }

    /// Group rows by a computed key, stored in a key column called `name`.
    pub fn group_by_with<F>(&self, name: &str, selector: F) -> Result<GroupBy, FrameError>
    where
        F: Fn(DataRow<'_>) -> Result<Value, FrameError>,
    {
        let partition = Partition::build(self.nrow(), |row| {
            Ok(vec![selector(self.row(row)?)?])
        })?;
        let key_values = partition
            .keys
            .iter()
            .map(|key| key[0].clone())
            .collect();
        let keys = DataFrame::new(vec![ValueColumn::infer(name, key_values).into()])?;
        GroupBy::from_partition(self, keys, partition)
    }
}

struct Partition {
    keys: Vec<Vec<Value>>,
    first_rows: Vec<usize>,
    rows: Vec<Vec<usize>>,
    lookup: HashMap<Vec<Value>, usize>,
}

impl Partition {
    fn build(
        nrow: usize,
        mut key_of: impl FnMut(usize) -> Result<Vec<Value>, FrameError>,
    ) -> Result<Self, FrameError> {
        let mut partition = Partition {
            keys: Vec::new(),
            first_rows: Vec::new(),
            rows: Vec::new(),
            lookup: HashMap::new(),
        };
        for row in 0..nrow {
            let key = key_of(row)?;
            match partition.lookup.get(&key) {
                Some(&group) => partition.rows[group].push(row),
                None => {
                    partition.lookup.insert(key.clone(), partition.keys.len());
                    partition.keys.push(key);
                    partition.first_rows.push(row);
                    partition.rows.push(vec![row]);
                }
            }
        }
        Ok(partition)
    }
}

impl GroupBy {
    fn from_partition(
        source: &DataFrame,
        keys: DataFrame,
        partition: Partition,
    ) -> Result<Self, FrameError> {
        let groups = partition
            .rows
            .iter()
            .map(|rows| source.take(rows))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            rows = source.nrow(),
            groups = groups.len(),
            "partitioned rows into groups"
        );
        Ok(Self {
            keys,
            groups,
            lookup: partition.lookup,
        })
    }

    /// One row per distinct key, in first-seen order.
    pub fn keys(&self) -> &DataFrame {
        &self.keys
    }

    /// Sub-frames of the source, parallel to [`keys`](Self::keys).
    pub fn groups(&self) -> &[DataFrame] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group for a key, given as one value per key column.
    pub fn get(&self, key: &[Value]) -> Option<&DataFrame> {
        self.lookup.get(key).map(|&i| &self.groups[i])
    }

    /// `(key row, group)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (DataRow<'_>, &DataFrame)> {
        self.keys.rows().zip(self.groups.iter())
    }

    /// Keys followed by a frame column `name` holding each group.
    pub fn into_frame(self, name: &str) -> Result<DataFrame, FrameError> {
        self.keys.add(name, FrameColumn::new(name, self.groups))
    }
}
