use nestframe_core::{
    ColumnSchema, DataFrame, DataType, FrameColumn, FrameError, FramePolicy, GroupColumn,
    ValueColumn, concat,
};

fn names(df: &DataFrame) -> Vec<&str> {
    df.column_names().collect()
}

#[test]
fn concat_stacks_shared_columns() -> Result<(), FrameError> {
    let top = DataFrame::new(vec![
        ValueColumn::from_values("a", [1, 2]).into(),
        ValueColumn::from_values("b", [true, false]).into(),
        ValueColumn::from_values("only_top", [0, 0]).into(),
    ])?;
    let bottom = DataFrame::new(vec![
        ValueColumn::from_cells("b", [None::<bool>]).into(),
        ValueColumn::from_values("a", [3]).into(),
    ])?;

    let stacked = concat(&[top, bottom])?;
    assert_eq!(stacked.nrow(), 3);
    assert_eq!(names(&stacked), ["a", "b"]);
    assert_eq!(
        stacked.schema().get("b"),
        Some(&ColumnSchema::value(DataType::Bool, true))
    );
    assert_eq!(
        stacked.get("a")?.as_value()?.typed::<i32>().unwrap(),
        [Some(1), Some(2), Some(3)]
    );
    Ok(())
}

#[test]
fn concat_unifies_value_types() -> Result<(), FrameError> {
    let ints = DataFrame::new(vec![ValueColumn::from_values("x", [1]).into()])?;
    let floats = DataFrame::new(vec![ValueColumn::from_values("x", [0.5]).into()])?;

    let stacked = ints.concat(&floats)?;
    assert_eq!(
        stacked.schema().get("x"),
        Some(&ColumnSchema::value(DataType::Number, false))
    );
    Ok(())
}

#[test]
fn concat_recurses_into_groups_and_appends_frames() -> Result<(), FrameError> {
    let part = |n: i32| -> Result<DataFrame, FrameError> {
        let inner = DataFrame::new(vec![ValueColumn::from_values("v", [n]).into()])?;
        DataFrame::new(vec![
            GroupColumn::new("g", inner.clone()).into(),
            FrameColumn::new("f", vec![inner]).into(),
        ])
    };

    let stacked = concat(&[part(1)?, part(2)?])?;
    assert_eq!(stacked.nrow(), 2);
    assert_eq!(
        stacked.get_path("g.v")?.as_value()?.typed::<i32>().unwrap(),
        [Some(1), Some(2)]
    );
    assert_eq!(stacked.get("f")?.as_frame()?.frames().len(), 2);
    Ok(())
}

#[test]
fn concat_rejects_kind_mismatch() {
    let scalar = DataFrame::new(vec![ValueColumn::from_values("x", [1]).into()]).unwrap();
    let nested = DataFrame::new(vec![GroupColumn::new("x", scalar.clone()).into()]).unwrap();

    assert!(matches!(
        concat(&[scalar, nested]),
        Err(FrameError::SchemaViolation { .. })
    ));
}

#[test]
fn concat_of_nothing_is_absent() -> Result<(), FrameError> {
    assert!(concat(&[])?.is_absent());
    Ok(())
}

fn nested() -> DataFrame {
    let name = DataFrame::new(vec![
        ValueColumn::from_values("first", ["Ann".to_string()]).into(),
        ValueColumn::from_values("last", ["Lee".to_string()]).into(),
    ])
    .unwrap();
    let address = DataFrame::new(vec![
        GroupColumn::new("name", name).into(),
        ValueColumn::from_values("zip", [1000]).into(),
    ])
    .unwrap();
    DataFrame::new(vec![
        ValueColumn::from_values("id", [1]).into(),
        GroupColumn::new("who", address).into(),
        FrameColumn::new("orders", vec![DataFrame::empty(0)]).into(),
    ])
    .unwrap()
}

#[test]
fn flatten_expands_groups_into_prefixed_columns() -> Result<(), FrameError> {
    let flat = nested().flatten("_", FramePolicy::Keep)?;
    assert_eq!(
        names(&flat),
        ["id", "who_name_first", "who_name_last", "who_zip", "orders"]
    );

    let dropped = nested().flatten(".", FramePolicy::Drop)?;
    assert_eq!(
        names(&dropped),
        ["id", "who.name.first", "who.name.last", "who.zip"]
    );
    assert_eq!(dropped.nrow(), 1);
    Ok(())
}

#[test]
fn flatten_reports_name_collisions() -> Result<(), FrameError> {
    let df = nested().add("who_zip", ValueColumn::from_values("who_zip", [9]))?;
    assert!(matches!(
        df.flatten("_", FramePolicy::Keep),
        Err(FrameError::SchemaViolation { .. })
    ));
    Ok(())
}
