use nestframe_core::{
    ColumnKind, ColumnSchema, DataFrame, DataType, FrameError, GroupColumn, Value, ValueColumn,
};

fn pets() -> DataFrame {
    DataFrame::new(vec![
        ValueColumn::from_values("animal", ["cat", "cat", "dog"].map(String::from)).into(),
        ValueColumn::from_values("count", [1, 3, 2]).into(),
    ])
    .unwrap()
}

fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.get(name).unwrap().as_value().unwrap().typed::<String>().unwrap()
}

fn ints(df: &DataFrame, name: &str) -> Vec<Option<i32>> {
    df.get(name).unwrap().as_value().unwrap().typed::<i32>().unwrap()
}

#[test]
fn groups_follow_first_seen_key_order() -> Result<(), FrameError> {
    let grouped = pets().group_by(&["animal"])?;

    assert_eq!(grouped.len(), 2);
    assert_eq!(
        strings(grouped.keys(), "animal"),
        [Some("cat".to_string()), Some("dog".to_string())]
    );
    assert_eq!(ints(&grouped.groups()[0], "count"), [Some(1), Some(3)]);
    assert_eq!(ints(&grouped.groups()[1], "count"), [Some(2)]);

    let dogs = grouped.get(&[Value::from("dog")]).unwrap();
    assert_eq!(dogs.nrow(), 1);
    assert!(grouped.get(&[Value::from("cow")]).is_none());
    Ok(())
}

#[test]
fn keys_keep_their_column_type() -> Result<(), FrameError> {
    let grouped = pets().group_by(&["animal"])?;
    assert_eq!(
        grouped.keys().schema().get("animal"),
        Some(&ColumnSchema::value(DataType::String, false))
    );
    Ok(())
}

#[test]
fn groups_by_several_keys() -> Result<(), FrameError> {
    let df = DataFrame::new(vec![
        ValueColumn::from_values("a", [1, 1, 2, 1]).into(),
        ValueColumn::from_cells("b", [Some(true), None, Some(true), None]).into(),
        ValueColumn::from_values("v", [10, 20, 30, 40]).into(),
    ])?;

    let grouped = df.group_by(&["a", "b"])?;
    assert_eq!(grouped.len(), 3);
    assert_eq!(ints(grouped.keys(), "a"), [Some(1), Some(1), Some(2)]);
    let nulls = grouped.get(&[Value::I32(1), Value::Null]).unwrap();
    assert_eq!(ints(nulls, "v"), [Some(20), Some(40)]);
    Ok(())
}

#[test]
fn groups_by_nested_column_path() -> Result<(), FrameError> {
    let df = DataFrame::new(vec![
        GroupColumn::new("info", pets()).into(),
        ValueColumn::from_values("id", [1, 2, 3]).into(),
    ])?;

    let grouped = df.group_by(&["info.animal"])?;
    assert_eq!(grouped.len(), 2);
    assert_eq!(ints(&grouped.groups()[0], "id"), [Some(1), Some(2)]);
    Ok(())
}

#[test]
fn groups_by_computed_key() -> Result<(), FrameError> {
    let grouped = pets().group_by_with("odd", |row| {
        let count = row.value("count")?.try_i32().ok().flatten().unwrap_or(0);
        Ok(Value::Bool(count % 2 == 1))
    })?;

    assert_eq!(
        grouped.keys().get("odd")?.as_value()?.typed::<bool>().unwrap(),
        [Some(true), Some(false)]
    );
    assert_eq!(grouped.groups()[0].nrow(), 2);
    Ok(())
}

#[test]
fn grouping_into_a_frame_column() -> Result<(), FrameError> {
    let df = pets().group_by(&["animal"])?.into_frame("rows")?;

    assert_eq!(df.column_names().collect::<Vec<_>>(), ["animal", "rows"]);
    let rows = df.get("rows")?;
    assert_eq!(rows.kind(), ColumnKind::Frame);
    assert_eq!(rows.schema().nested(), Some(&pets().schema()));
    assert_eq!(rows.as_frame()?.get(0)?.nrow(), 2);
    Ok(())
}

#[test]
fn grouping_empty_frame_yields_no_groups() -> Result<(), FrameError> {
    let grouped = pets().take(&[])?.group_by(&["animal"])?;
    assert!(grouped.is_empty());
    assert_eq!(grouped.keys().nrow(), 0);
    Ok(())
}

#[test]
fn grouping_requires_value_columns() {
    let df = DataFrame::new(vec![GroupColumn::new("info", pets()).into()]).unwrap();

    assert!(matches!(
        df.group_by(&["missing"]),
        Err(FrameError::ColumnNotFound { .. })
    ));
    assert!(matches!(
        df.group_by(&["info"]),
        Err(FrameError::UnsupportedOperation {
            kind: ColumnKind::Group,
            ..
        })
    ));
}
