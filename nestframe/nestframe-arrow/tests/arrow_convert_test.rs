use arrow::array::{Array, Float64Array, Int32Array, ListArray, NullArray, StringArray, StructArray};
use nestframe_arrow::{ArrowConvertError, frame_to_record_batch, schema_to_arrow};
use nestframe_core::{
    DataFrame, DataType, FrameColumn, GroupColumn, Value, ValueColumn, ValueType,
};

fn ns(values: &[i32]) -> DataFrame {
    DataFrame::new(vec![ValueColumn::from_values("n", values.iter().copied()).into()]).unwrap()
}

fn people() -> DataFrame {
    let name = DataFrame::new(vec![
        ValueColumn::from_values("first", ["Alice", "Bob", "Charlie"].map(String::from)).into(),
    ])
    .unwrap();
    DataFrame::new(vec![
        ValueColumn::from_values("age", [15, 45, 20]).into(),
        ValueColumn::from_cells(
            "city",
            [Some("London".to_string()), Some("Dubai".to_string()), None],
        )
        .into(),
        GroupColumn::new("name", name).into(),
        FrameColumn::new("visits", vec![ns(&[1, 2]), DataFrame::empty(0), ns(&[3])]).into(),
    ])
    .unwrap()
}

#[test]
fn frame_to_record_batch_converts_all_column_kinds() {
    let df = people();
    let batch = frame_to_record_batch(&df).unwrap();

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(batch.num_columns(), 4);
    assert_eq!(batch.schema().as_ref(), &schema_to_arrow(&df.schema()).unwrap());

    let age = batch.column(0).as_any().downcast_ref::<Int32Array>().unwrap();
    assert_eq!(age.values().to_vec(), vec![15, 45, 20]);

    let city = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(city.value(0), "London");
    assert!(city.is_null(2));

    let name = batch.column(2).as_any().downcast_ref::<StructArray>().unwrap();
    let first = name
        .column_by_name("first")
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(first.value(2), "Charlie");

    let visits = batch.column(3).as_any().downcast_ref::<ListArray>().unwrap();
    assert_eq!(visits.value_length(0), 2);
    assert!(visits.is_null(1));
    let last = visits.value(2);
    let last = last.as_any().downcast_ref::<StructArray>().unwrap();
    let n = last.column(0).as_any().downcast_ref::<Int32Array>().unwrap();
    assert_eq!(n.value(0), 3);
}

#[test]
fn frame_cells_are_projected_onto_the_common_schema() {
    let wide = DataFrame::new(vec![
        ValueColumn::from_values("n", [7]).into(),
        ValueColumn::from_values("extra", [0.5]).into(),
    ])
    .unwrap();
    let df = DataFrame::new(vec![FrameColumn::new("f", vec![wide, ns(&[8, 9])]).into()]).unwrap();

    let batch = frame_to_record_batch(&df).unwrap();
    let f = batch.column(0).as_any().downcast_ref::<ListArray>().unwrap();
    let cells = f.values().as_any().downcast_ref::<StructArray>().unwrap();
    assert_eq!(cells.num_columns(), 1);
    assert_eq!(cells.len(), 3);
}

#[test]
fn list_and_nothing_columns_convert() {
    let tags = ValueColumn::new(
        "tags",
        DataType::list(ValueType::non_null(DataType::String)),
        vec![
            Value::List(vec![Value::from("a"), Value::from("b")]),
            Value::List(vec![]),
            Value::Null,
        ],
    )
    .unwrap();
    let nothing = ValueColumn::new("z", DataType::Nothing, vec![Value::Null; 3]).unwrap();
    let scores = ValueColumn::from_cells("score", [Some(1.5), None, Some(2.5)]);
    let df = DataFrame::new(vec![tags.into(), nothing.into(), scores.into()]).unwrap();

    let batch = frame_to_record_batch(&df).unwrap();
    let tags = batch.column(0).as_any().downcast_ref::<ListArray>().unwrap();
    assert_eq!(tags.value_length(0), 2);
    assert_eq!(tags.value_length(1), 0);
    assert!(tags.is_null(2));

    let z = batch.column(1).as_any().downcast_ref::<NullArray>().unwrap();
    assert_eq!(z.len(), 3);

    let scores = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
    assert!(scores.is_null(1));
    assert_eq!(scores.value(2), 2.5);
}

#[test]
fn columnless_frame_keeps_row_count() {
    let batch = frame_to_record_batch(&DataFrame::empty(4)).unwrap();
    assert_eq!(batch.num_rows(), 4);
    assert_eq!(batch.num_columns(), 0);
}

#[test]
fn mixed_type_columns_are_rejected() {
    let df = DataFrame::new(vec![
        ValueColumn::infer("x", vec![Value::I32(1), Value::from("a")]).into(),
    ])
    .unwrap();

    match frame_to_record_batch(&df) {
        Err(ArrowConvertError::UnsupportedType { column, .. }) => assert_eq!(column, "x"),
        other => panic!("unexpected result: {other:?}"),
    }
}
