use std::fmt::{self, Display, Formatter};

use super::{CompareMode, CompareResult, DataFrameSchema};
use crate::types::{DataType, ValueType};

/// The three column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Value,
    Group,
    Frame,
}

impl Display for ColumnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnKind::Value => "value",
            ColumnKind::Group => "group",
            ColumnKind::Frame => "frame",
        })
    }
}

/// Static shape of one column.
///
/// `content_type` names an optional declared marker type for nested rows or
/// tables; it is informational and takes no part in equality or comparison.
#[derive(Debug, Clone)]
pub enum ColumnSchema {
    /// Scalar column.
    Value(ValueType),
    /// Every cell is a labeled row of `schema`. Groups are never nullable.
    Group {
        schema: DataFrameSchema,
        content_type: Option<String>,
    },
    /// Every cell is a sub-table whose rows conform to `schema`.
    Frame {
        schema: DataFrameSchema,
        nullable: bool,
        content_type: Option<String>,
    },
}

impl ColumnSchema {
    pub fn value(data_type: DataType, nullable: bool) -> Self {
        ColumnSchema::Value(ValueType::new(data_type, nullable))
    }

    pub fn group(schema: DataFrameSchema) -> Self {
        ColumnSchema::Group {
            schema,
            content_type: None,
        }
    }

    pub fn frame(schema: DataFrameSchema, nullable: bool) -> Self {
        ColumnSchema::Frame {
            schema,
            nullable,
            content_type: None,
        }
    }

    /// Attach a content type marker. No effect on value columns.
    pub fn with_content_type(self, marker: impl Into<String>) -> Self {
        match self {
            ColumnSchema::Value(_) => self,
            ColumnSchema::Group { schema, .. } => ColumnSchema::Group {
                schema,
                content_type: Some(marker.into()),
            },
            ColumnSchema::Frame {
                schema, nullable, ..
            } => ColumnSchema::Frame {
                schema,
                nullable,
                content_type: Some(marker.into()),
            },
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnSchema::Value(_) => ColumnKind::Value,
            ColumnSchema::Group { .. } => ColumnKind::Group,
            ColumnSchema::Frame { .. } => ColumnKind::Frame,
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            ColumnSchema::Value(t) => t.nullable,
            ColumnSchema::Group { .. } => false,
            ColumnSchema::Frame { nullable, .. } => *nullable,
        }
    }

    /// Nested schema of a group or frame column.
    pub fn nested(&self) -> Option<&DataFrameSchema> {
        match self {
            ColumnSchema::Value(_) => None,
            ColumnSchema::Group { schema, .. } | ColumnSchema::Frame { schema, .. } => Some(schema),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            ColumnSchema::Value(_) => None,
            ColumnSchema::Group { content_type, .. } | ColumnSchema::Frame { content_type, .. } => {
                content_type.as_deref()
            }
        }
    }

    /// Compare `self` (A) against `other` (B).
    ///
    /// Kind mismatch is always `None`. Value types must be identical in
    /// [`CompareMode::Strict`]; in [`CompareMode::Lenient`] a narrower A is
    /// `IsDerived` and a wider A is `IsSuper`. Nested schemas are compared
    /// recursively with the same mode.
    pub fn compare(&self, other: &ColumnSchema, mode: CompareMode) -> CompareResult {
        match (self, other) {
            (ColumnSchema::Value(a), ColumnSchema::Value(b)) => compare_value_types(a, b, mode),
            (ColumnSchema::Group { schema: a, .. }, ColumnSchema::Group { schema: b, .. }) => {
                a.compare_with(b, mode)
            }
            (
                ColumnSchema::Frame {
                    schema: a,
                    nullable: a_nullable,
                    ..
                },
                ColumnSchema::Frame {
                    schema: b,
                    nullable: b_nullable,
                    ..
                },
            ) => {
                let nullability = match (*a_nullable, *b_nullable) {
                    (x, y) if x == y => CompareResult::Matches,
                    _ if mode == CompareMode::Strict => return CompareResult::None,
                    (false, true) => CompareResult::IsDerived,
                    _ => CompareResult::IsSuper,
                };
                nullability.combine(a.compare_with(b, mode))
            }
            _ => CompareResult::None,
        }
    }
}

fn compare_value_types(a: &ValueType, b: &ValueType, mode: CompareMode) -> CompareResult {
    if a == b {
        return CompareResult::Matches;
    }
    match mode {
        CompareMode::Strict => CompareResult::None,
        CompareMode::Lenient if a.is_subtype_of(b) => CompareResult::IsDerived,
        CompareMode::Lenient if b.is_subtype_of(a) => CompareResult::IsSuper,
        CompareMode::Lenient => CompareResult::None,
    }
}

/// Strict structural equality: same kind, same nullability, identical value
/// type or recursively equal nested schema.
impl PartialEq for ColumnSchema {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other, CompareMode::Strict) == CompareResult::Matches
    }
}
