use crate::{
    column::{Column, FrameColumn, GroupColumn, ValueColumn},
    error::FrameError,
    frame::DataFrame,
    types::ValueType,
};

/// What [`DataFrame::flatten`] does with frame columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePolicy {
    #[default]
    Keep,
    Drop,
}

/// Stack the rows of several frames.
///
/// Only columns present in every input survive, in the order of the first
/// input. Value columns take the common type of their inputs, group columns
/// are concatenated recursively and frame cells are appended. A column whose
/// kind differs between inputs is a [`FrameError::SchemaViolation`].
pub fn concat(frames: &[DataFrame]) -> Result<DataFrame, FrameError> {
    let Some(first) = frames.first() else {
        return Ok(DataFrame::empty(0));
    };
    let nrow = frames.iter().map(DataFrame::nrow).sum();
    let mut columns = Vec::new();
    for name in first.column_names() {
        let parts = frames
            .iter()
            .map(|frame| frame.get(name).ok())
            .collect::<Option<Vec<_>>>();
        match parts {
            Some(parts) => columns.push(concat_columns(name, &parts)?),
            None => tracing::debug!(column = name, "column dropped by concat"),
        }
    }
    DataFrame::with_nrow(columns, nrow)
}

fn concat_columns(name: &str, parts: &[&Column]) -> Result<Column, FrameError> {
    let kind = parts[0].kind();
    if let Some(other) = parts.iter().find(|c| c.kind() != kind) {
        return Err(FrameError::violation(format!(
            "cannot concatenate column '{name}': {kind} and {} columns",
            other.kind()
        )));
    }
    Ok(match parts[0] {
        Column::Value(_) => {
            let columns = parts
                .iter()
                .map(|c| c.as_value())
                .collect::<Result<Vec<_>, _>>()?;
            let value_type =
                ValueType::common(columns.iter().map(|c| c.value_type().clone()));
            let values = columns
                .iter()
                .flat_map(|c| c.values().iter().cloned())
                .collect();
            ValueColumn::with_type(name, value_type, values)?.into()
        }
        Column::Group(_) => {
            let children = parts
                .iter()
                .map(|c| c.as_group().map(|g| g.frame().clone()))
                .collect::<Result<Vec<_>, _>>()?;
            GroupColumn::new(name, concat(&children)?).into()
        }
        Column::Frame(_) => {
            let frames = parts
                .iter()
                .map(|c| c.as_frame())
                .collect::<Result<Vec<_>, _>>()?;
            FrameColumn::concat(name, &frames).into()
        }
    })
}

impl DataFrame {
    /// Rows of `self` followed by rows of `other`; see [`concat`].
    pub fn concat(&self, other: &DataFrame) -> Result<DataFrame, FrameError> {
        concat(&[self.clone(), other.clone()])
    }

    /// Replace every group column by its leaf columns, named
    /// `parent{separator}child`. Frame columns are kept or dropped according
    /// to `policy`. Colliding names are a [`FrameError::SchemaViolation`].
    pub fn flatten(&self, separator: &str, policy: FramePolicy) -> Result<DataFrame, FrameError> {
        let mut columns = Vec::new();
        flatten_into(self, "", separator, policy, &mut columns);
        DataFrame::with_nrow(columns, self.nrow())
    }
}

fn flatten_into(
    frame: &DataFrame,
    prefix: &str,
    separator: &str,
    policy: FramePolicy,
    out: &mut Vec<Column>,
) {
    for column in frame.columns() {
        let name = format!("{prefix}{}", column.name());
        match column {
            Column::Group(group) => flatten_into(
                group.frame(),
                &format!("{name}{separator}"),
                separator,
                policy,
                out,
            ),
            Column::Frame(_) if policy == FramePolicy::Drop => {}
            _ => out.push(column.renamed(name)),
        }
    }
}
