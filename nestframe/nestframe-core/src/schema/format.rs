use super::{ColumnSchema, DataFrameSchema};

const INDENT: usize = 4;

/// Render a schema as indented text, one column per line:
///
/// ```text
/// age: i32
/// name:
///     first: string
///     last: string?
/// visits: *
///     city: string
/// ```
///
/// Value columns render as `name: type`, groups as `name:` and frames as
/// `name: *`, each followed by their nested columns one level deeper. Lines
/// are joined by `\n` without a trailing newline.
pub fn format_schema(schema: &DataFrameSchema) -> String {
    let mut lines = Vec::new();
    collect_lines(schema, 0, &mut lines);
    lines.join("\n")
}

fn collect_lines(schema: &DataFrameSchema, indent: usize, out: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    for (name, column) in schema.iter() {
        match column {
            ColumnSchema::Value(value_type) => out.push(format!("{pad}{name}: {value_type}")),
            ColumnSchema::Group { schema, .. } => {
                out.push(format!("{pad}{name}:"));
                collect_lines(schema, indent + INDENT, out);
            }
            ColumnSchema::Frame { schema, .. } => {
                out.push(format!("{pad}{name}: *"));
                collect_lines(schema, indent + INDENT, out);
            }
        }
    }
}
