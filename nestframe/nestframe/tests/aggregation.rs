use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use nestframe::{
    ColumnStatistics, FrameStatistics,
    aggregation::{Aggregator, AggregatorOptionSwitch, Aggregators},
    core::{DataFrame, DataType, FrameError, Value, ValueColumn},
};

fn numbers() -> DataFrame {
    DataFrame::new(vec![
        ValueColumn::from_values("a", [1, 2]).into(),
        ValueColumn::from_values("b", [10_i64, 20]).into(),
        ValueColumn::from_values("c", [0.5, 0.25]).into(),
    ])
    .unwrap()
}

fn f64_of(value: Option<Value>) -> f64 {
    match value {
        Some(Value::F64(v)) => v,
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn sum_promotes_across_columns() -> Result<(), FrameError> {
    let df = numbers();

    assert_eq!(df.sum(&["a", "b"])?, Some(Value::I64(33)));
    assert_eq!(df.sum(&["a", "c"])?, Some(Value::F64(3.75)));

    let sum = Aggregators::sum();
    assert_eq!(
        sum.columns_return_type(&[&DataType::I32, &DataType::I64]),
        DataType::I64
    );
    assert_eq!(
        sum.columns_return_type(&[&DataType::I32, &DataType::F64]),
        DataType::F64
    );
    Ok(())
}

#[test]
fn sum_of_empty_input_is_zero_of_result_type() -> Result<(), FrameError> {
    let ints = ValueColumn::from_cells::<i32>("x", [None, None]);
    assert_eq!(ints.sum()?, Some(Value::I32(0)));

    let longs = ValueColumn::from_cells::<i64>("x", []);
    assert_eq!(longs.sum()?, Some(Value::I64(0)));

    let small = ValueColumn::from_values("x", [100_i8, 100]);
    assert_eq!(small.sum()?, Some(Value::I32(200)));
    Ok(())
}

#[test]
fn sum_rejects_overflow_and_non_numbers() {
    let overflowing = ValueColumn::from_values("x", [i32::MAX, 1]);
    match overflowing.sum() {
        Err(FrameError::Aggregation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }

    let names = ValueColumn::from_values("x", ["a".to_string()]);
    match names.sum() {
        Err(FrameError::Aggregation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn sum_ignores_nulls_in_raw_values() -> Result<(), FrameError> {
    let values = [Value::I32(1), Value::Null, Value::I32(2)];
    let total = Aggregators::sum().aggregate_values(&values, &DataType::I32)?;
    assert_eq!(total, Some(Value::I32(3)));
    Ok(())
}

#[test]
fn median_keeps_input_type() -> Result<(), FrameError> {
    assert_eq!(ValueColumn::from_values("x", [1, 2, 3, 4]).median()?, Some(Value::I32(2)));
    assert_eq!(
        ValueColumn::from_values("x", [1.0, 2.0, 3.0, 4.0]).median()?,
        Some(Value::F64(2.5))
    );
    assert_eq!(ValueColumn::from_values("x", [3, 1, 2]).median()?, Some(Value::I32(2)));

    let words = ValueColumn::from_values("x", ["b", "d", "a", "c"].map(String::from));
    assert_eq!(words.median()?, Some(Value::from("b")));

    assert_eq!(ValueColumn::from_cells::<i32>("x", [None]).median()?, None);
    Ok(())
}

#[test]
fn median_pools_all_columns() -> Result<(), FrameError> {
    let df = DataFrame::new(vec![
        ValueColumn::from_values("a", [1, 2, 3]).into(),
        ValueColumn::from_values("b", [100_i64]).into(),
    ])?;
    // Pooled and widened: [1, 2, 3, 100] as i64.
    assert_eq!(df.median(&["a", "b"])?, Some(Value::I64(2)));
    Ok(())
}

#[test]
fn percentile_interpolates_floats() -> Result<(), FrameError> {
    let xs = ValueColumn::from_values("x", [1.0, 2.0, 3.0, 5.0]);
    assert_eq!(Aggregators::percentile(25.0).aggregate(&xs)?, Some(Value::F64(1.75)));
    assert_eq!(Aggregators::percentile(100.0).aggregate(&xs)?, Some(Value::F64(5.0)));

    match Aggregators::percentile(150.0).aggregate(&xs) {
        Err(FrameError::Aggregation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn mean_handles_nan_per_option() -> Result<(), FrameError> {
    let xs = ValueColumn::from_values("x", [1.0, f64::NAN, 3.0]);

    assert!(f64_of(Aggregators::mean(false).aggregate(&xs)?).is_nan());
    assert_eq!(f64_of(Aggregators::mean(true).aggregate(&xs)?), 2.0);

    let empty = ValueColumn::from_cells::<f64>("x", [None]);
    assert!(f64_of(empty.mean()?).is_nan());

    let ints = ValueColumn::from_values("x", [1, 2]);
    assert_eq!(f64_of(ints.mean()?), 1.5);
    Ok(())
}

#[test]
fn mean_across_columns_averages_column_means() -> Result<(), FrameError> {
    let df = DataFrame::new(vec![
        ValueColumn::from_values("a", [1.0, 3.0]).into(),
        ValueColumn::from_values("b", [10.0]).into(),
    ])?;
    assert_eq!(f64_of(df.mean(&["a", "b"])?), 6.0);
    Ok(())
}

#[test]
fn std_uses_delta_degrees_of_freedom() -> Result<(), FrameError> {
    let xs = ValueColumn::from_values("x", [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

    let population = f64_of(Aggregators::std(false, 0).aggregate(&xs)?);
    assert!((population - 2.0).abs() < 1e-12);

    let sample = f64_of(xs.std()?);
    assert!((sample - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);

    let single = ValueColumn::from_values("x", [1.0]);
    assert!(f64_of(single.std()?).is_nan());

    let with_nan = ValueColumn::from_values("x", [1.0, f64::NAN, 3.0]);
    assert!(f64_of(Aggregators::std(false, 1).aggregate(&with_nan)?).is_nan());
    let skipped = f64_of(Aggregators::std(true, 1).aggregate(&with_nan)?);
    assert!((skipped - 2.0_f64.sqrt()).abs() < 1e-12);
    Ok(())
}

#[test]
fn min_and_max_preserve_type() -> Result<(), FrameError> {
    let xs = ValueColumn::from_cells("x", [Some(3), None, Some(1), Some(2)]);
    assert_eq!(xs.min()?, Some(Value::I32(1)));
    assert_eq!(xs.max()?, Some(Value::I32(3)));

    let words = ValueColumn::from_values("x", ["pear", "apple"].map(String::from));
    assert_eq!(words.min()?, Some(Value::from("apple")));

    assert_eq!(ValueColumn::from_cells::<i32>("x", [None]).max()?, None);
    Ok(())
}

#[test]
fn min_and_max_propagate_nan() -> Result<(), FrameError> {
    let xs = ValueColumn::from_values("x", [1.0, f64::NAN, 3.0]);
    assert!(f64_of(xs.min()?).is_nan());
    assert!(f64_of(xs.max()?).is_nan());
    Ok(())
}

#[test]
fn min_across_columns_compares_numerically() -> Result<(), FrameError> {
    let df = numbers();
    assert_eq!(df.min(&["a", "b"])?, Some(Value::I32(1)));
    assert_eq!(df.max(&["a", "b"])?, Some(Value::I64(20)));
    assert_eq!(
        Aggregators::min().columns_return_type(&[&DataType::I32, &DataType::I64]),
        DataType::Number
    );
    Ok(())
}

#[test]
fn min_rejects_incomparable_values() {
    let mixed = ValueColumn::infer("x", vec![Value::I32(1), Value::from("a")]);
    match mixed.min() {
        Err(FrameError::Aggregation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn median_orders_mixed_numbers_and_rejects_mixed_kinds() -> Result<(), FrameError> {
    let numbers = ValueColumn::infer("x", vec![Value::I32(3), Value::F64(1.5), Value::I64(2)]);
    assert_eq!(numbers.median()?, Some(Value::I64(2)));

    let mixed = ValueColumn::infer(
        "x",
        vec![Value::I32(2), Value::from("a"), Value::I32(1), Value::from("b")],
    );
    match mixed.median() {
        Err(FrameError::Aggregation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    match Aggregators::percentile(90.0).aggregate(&mixed) {
        Err(FrameError::Aggregation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn statistics_resolve_dotted_paths() -> Result<(), FrameError> {
    let inner = DataFrame::new(vec![ValueColumn::from_values("n", [4, 5]).into()])?;
    let df = DataFrame::new(vec![
        nestframe::core::GroupColumn::new("g", inner).into(),
    ])?;
    assert_eq!(df.sum(&["g.n"])?, Some(Value::I32(9)));

    match df.sum(&["g.missing"]) {
        Err(FrameError::ColumnNotFound { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    match df.sum(&["g"]) {
        Err(FrameError::UnsupportedOperation { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn option_switch_memoizes_per_option() {
    assert!(Arc::ptr_eq(&Aggregators::mean(true), &Aggregators::mean(true)));
    assert!(!Arc::ptr_eq(&Aggregators::mean(true), &Aggregators::mean(false)));
    assert!(Arc::ptr_eq(&Aggregators::std(false, 1), &Aggregators::std(false, 1)));
    assert!(!Arc::ptr_eq(&Aggregators::std(false, 1), &Aggregators::std(false, 0)));
    assert!(Arc::ptr_eq(&Aggregators::sum(), &Aggregators::sum()));
}

static BUILT: AtomicUsize = AtomicUsize::new(0);

fn counting_factory(skip_na: bool) -> Arc<dyn Aggregator> {
    BUILT.fetch_add(1, Ordering::SeqCst);
    Aggregators::mean(skip_na)
}

#[test]
fn option_switch_builds_each_option_once() {
    let switch = AggregatorOptionSwitch::new(counting_factory);
    assert!(switch.is_empty());

    switch.get(true);
    switch.get(true);
    switch.get(false);
    switch.get(true);

    assert_eq!(switch.len(), 2);
    assert_eq!(BUILT.load(Ordering::SeqCst), 2);
}

#[test]
fn aggregator_metadata() {
    let median = Aggregators::median();
    assert_eq!(median.name(), "median");
    assert!(median.preserves_type());
    assert_eq!(median.return_type(&DataType::I16), DataType::I16);

    let mean = Aggregators::mean(false);
    assert!(!mean.preserves_type());
    assert_eq!(mean.return_type(&DataType::I32), DataType::F64);

    assert_eq!(Aggregators::sum().return_type(&DataType::I8), DataType::I32);
    assert_eq!(Aggregators::sum().return_type(&DataType::F32), DataType::F32);
}
