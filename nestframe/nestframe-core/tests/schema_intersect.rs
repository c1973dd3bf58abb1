use nestframe_core::{ColumnSchema, DataFrameSchema, DataType, intersect_schemas};

fn schema(columns: Vec<(&str, ColumnSchema)>) -> DataFrameSchema {
    DataFrameSchema::new(columns).unwrap()
}

fn value(data_type: DataType) -> ColumnSchema {
    ColumnSchema::value(data_type, false)
}

fn names(schema: &DataFrameSchema) -> Vec<&str> {
    schema.names().collect()
}

#[test]
fn intersection_of_identical_schemas_is_idempotent() {
    let s = schema(vec![
        ("a", value(DataType::I32)),
        ("b", ColumnSchema::value(DataType::String, true)),
        ("c", value(DataType::F64)),
    ]);

    let result = intersect_schemas([&s, &s, &s]);
    assert_eq!(result, s);
    assert_eq!(names(&result), ["a", "b", "c"]);
}

#[test]
fn columns_missing_from_any_schema_are_dropped() {
    let ab = schema(vec![("a", value(DataType::I32)), ("b", value(DataType::Bool))]);
    let ac = schema(vec![("a", value(DataType::I32)), ("c", value(DataType::String))]);

    let result = intersect_schemas([&ab, &ac]);
    assert_eq!(names(&result), ["a"]);
    assert_eq!(result.get("a"), Some(&value(DataType::I32)));
}

#[test]
fn output_follows_first_schema_order() {
    let ba = schema(vec![("b", value(DataType::Bool)), ("a", value(DataType::I32))]);
    let ab = schema(vec![("a", value(DataType::I32)), ("b", value(DataType::Bool))]);

    assert_eq!(names(&intersect_schemas([&ba, &ab])), ["b", "a"]);
    assert_eq!(names(&intersect_schemas([&ab, &ba])), ["a", "b"]);
}

#[test]
fn value_types_unify_to_common_supertype() {
    let ints = schema(vec![
        ("x", value(DataType::I32)),
        ("y", value(DataType::I32)),
        ("z", value(DataType::String)),
    ]);
    let mixed = schema(vec![
        ("x", ColumnSchema::value(DataType::I64, true)),
        ("y", value(DataType::Nothing)),
        ("z", value(DataType::Bool)),
    ]);

    let result = intersect_schemas([&ints, &mixed]);
    assert_eq!(
        result.get("x"),
        Some(&ColumnSchema::value(DataType::Number, true))
    );
    assert_eq!(result.get("y"), Some(&value(DataType::I32)));
    assert_eq!(result.get("z"), Some(&value(DataType::Any)));
}

#[test]
fn kind_mismatch_collapses_to_any() {
    let grouped = schema(vec![(
        "x",
        ColumnSchema::group(schema(vec![("a", value(DataType::I32))])),
    )]);
    let scalar = schema(vec![("x", ColumnSchema::value(DataType::I32, true))]);

    let result = intersect_schemas([&grouped, &scalar]);
    assert_eq!(result.get("x"), Some(&ColumnSchema::value(DataType::Any, true)));

    let framed = schema(vec![(
        "x",
        ColumnSchema::frame(schema(vec![("a", value(DataType::I32))]), false),
    )]);
    let result = intersect_schemas([&grouped, &framed]);
    assert_eq!(result.get("x"), Some(&value(DataType::Any)));
}

#[test]
fn frame_columns_intersect_non_empty_nested_schemas() {
    let frame = |nested: DataFrameSchema, nullable| schema(vec![("f", ColumnSchema::frame(nested, nullable))]);
    let ab = frame(
        schema(vec![("a", value(DataType::I32)), ("b", value(DataType::String))]),
        false,
    );
    let a = frame(schema(vec![("a", value(DataType::I32))]), false);
    let empty = frame(DataFrameSchema::empty(), true);

    let result = intersect_schemas([&ab, &a, &empty]);
    assert_eq!(
        result.get("f"),
        Some(&ColumnSchema::frame(
            schema(vec![("a", value(DataType::I32))]),
            true
        ))
    );
}

#[test]
fn group_columns_intersect_recursively() {
    let group = |nested: DataFrameSchema| schema(vec![("g", ColumnSchema::group(nested))]);
    let left = group(schema(vec![
        ("a", value(DataType::I16)),
        ("b", value(DataType::Bool)),
    ]));
    let right = group(schema(vec![("a", value(DataType::F32))]));

    let result = intersect_schemas([&left, &right]);
    let nested = result.get("g").and_then(ColumnSchema::nested).unwrap();
    assert_eq!(names(nested), ["a"]);
    assert_eq!(nested.get("a"), Some(&value(DataType::Number)));
    assert!(!result.get("g").unwrap().nullable());
}

#[test]
fn content_type_survives_only_when_all_agree() {
    let marked = |marker: &str| {
        schema(vec![(
            "g",
            ColumnSchema::group(DataFrameSchema::empty()).with_content_type(marker),
        )])
    };
    let same = intersect_schemas([&marked("Point"), &marked("Point")]);
    assert_eq!(same.get("g").unwrap().content_type(), Some("Point"));

    let different = intersect_schemas([&marked("Point"), &marked("Line")]);
    assert_eq!(different.get("g").unwrap().content_type(), None);
}

#[test]
fn empty_input_yields_empty_schema() {
    let none: [&DataFrameSchema; 0] = [];
    assert!(intersect_schemas(none).is_empty());
}
