use super::{ColumnKind, ColumnSchema, DataFrameSchema};
use crate::types::{DataType, ValueType};

/// Common shape of several schemas.
///
/// Only columns present in every input survive, in the order of the first
/// input. Per column:
/// - kinds disagree: `Value(any)`, nullable if any input is nullable;
/// - value columns: narrowest common supertype, nullable if any input is;
/// - frame columns: intersection of the non-empty nested schemas, nullable if any input is;
/// - group columns: intersection of the nested schemas.
///
/// An empty input yields an empty schema.
pub fn intersect_schemas<'a>(
    schemas: impl IntoIterator<Item = &'a DataFrameSchema>,
) -> DataFrameSchema {
    let mut schemas = schemas.into_iter();
    let Some(first) = schemas.next() else {
        return DataFrameSchema::empty();
    };

    let mut collected: Vec<(&str, Vec<&ColumnSchema>)> = first
        .iter()
        .map(|(name, column)| (name, vec![column]))
        .collect();

    for schema in schemas {
        collected.retain_mut(|(name, found)| match schema.get(*name) {
            Some(column) => {
                found.push(column);
                true
            }
            None => {
                let dropped: &str = name;
                tracing::debug!(column = dropped, "column dropped by schema intersection");
                false
            }
        });
    }

    DataFrameSchema::from_unique(
        collected
            .into_iter()
            .map(|(name, found)| (name.to_owned(), unify_column(&found)))
            .collect(),
    )
}

fn unify_column(found: &[&ColumnSchema]) -> ColumnSchema {
    let nullable = found.iter().any(|c| c.nullable());
    let kind = found.first().map_or(ColumnKind::Value, |c| c.kind());
    if found.iter().any(|c| c.kind() != kind) {
        return ColumnSchema::value(DataType::Any, nullable);
    }

    let content_type = common_content_type(found);
    match kind {
        ColumnKind::Value => ColumnSchema::Value(ValueType::common(found.iter().filter_map(
            |c| match c {
                ColumnSchema::Value(t) => Some(t.clone()),
                _ => None,
            },
        ))),
        ColumnKind::Group => ColumnSchema::Group {
            schema: intersect_schemas(found.iter().filter_map(|c| c.nested())),
            content_type,
        },
        ColumnKind::Frame => ColumnSchema::Frame {
            schema: intersect_schemas(
                found
                    .iter()
                    .filter_map(|c| c.nested())
                    .filter(|nested| !nested.is_empty()),
            ),
            nullable,
            content_type,
        },
    }
}

fn common_content_type(found: &[&ColumnSchema]) -> Option<String> {
    let first = found.first()?.content_type()?;
    found
        .iter()
        .all(|c| c.content_type() == Some(first))
        .then(|| first.to_owned())
}
