use std::sync::{Arc, LazyLock};

use nestframe_core::{DataType, Value};

use super::{
    aggregator::{Aggregator, Reducer},
    flattening::FlatteningAggregator,
    math,
    numbers::NumbersAggregator,
    switch::AggregatorOptionSwitch,
    two_step::TwoStepAggregator,
};

static MIN: LazyLock<Arc<dyn Aggregator>> = LazyLock::new(|| {
    let reduce: Reducer = Arc::new(math::min);
    Arc::new(TwoStepAggregator::preserving("min", reduce))
});

static MAX: LazyLock<Arc<dyn Aggregator>> = LazyLock::new(|| {
    let reduce: Reducer = Arc::new(math::max);
    Arc::new(TwoStepAggregator::preserving("max", reduce))
});

static SUM: LazyLock<Arc<dyn Aggregator>> = LazyLock::new(|| {
    let reduce: Reducer = Arc::new(math::sum);
    Arc::new(NumbersAggregator::new("sum", math::sum_type, reduce))
});

static MEDIAN: LazyLock<Arc<dyn Aggregator>> = LazyLock::new(|| {
    let reduce: Reducer = Arc::new(math::median);
    Arc::new(FlatteningAggregator::preserving("median", reduce))
});

static MEAN: LazyLock<AggregatorOptionSwitch<bool>> =
    LazyLock::new(|| AggregatorOptionSwitch::new(mean_with));

static STD: LazyLock<AggregatorOptionSwitch<(bool, usize)>> =
    LazyLock::new(|| AggregatorOptionSwitch::new(std_with));

/// Keyed by the bit pattern of the percentile.
static PERCENTILE: LazyLock<AggregatorOptionSwitch<u64>> =
    LazyLock::new(|| AggregatorOptionSwitch::new(percentile_of));

fn mean_with(skip_na: bool) -> Arc<dyn Aggregator> {
    let reduce: Reducer = Arc::new(move |values: &[&Value], data_type: &DataType| {
        math::mean(values, data_type, skip_na)
    });
    Arc::new(NumbersAggregator::new("mean", to_f64, reduce))
}

fn std_with((skip_na, ddof): (bool, usize)) -> Arc<dyn Aggregator> {
    let reduce: Reducer = Arc::new(move |values: &[&Value], data_type: &DataType| {
        math::std(values, data_type, skip_na, ddof)
    });
    Arc::new(FlatteningAggregator::new("std", false, to_f64, reduce))
}

fn percentile_of(bits: u64) -> Arc<dyn Aggregator> {
    let p = f64::from_bits(bits);
    let reduce: Reducer = Arc::new(move |values: &[&Value], data_type: &DataType| {
        math::percentile(values, data_type, p)
    });
    Arc::new(FlatteningAggregator::preserving("percentile", reduce))
}

fn to_f64(_: &DataType) -> DataType {
    DataType::F64
}

/// Registry of the built-in aggregators.
///
/// Every accessor returns a shared instance; parameterized aggregators are
/// memoized per option value.
pub struct Aggregators;

impl Aggregators {
    /// Smallest value. NaN wins over every other value.
    pub fn min() -> Arc<dyn Aggregator> {
        Arc::clone(&MIN)
    }

    /// Largest value. NaN wins over every other value.
    pub fn max() -> Arc<dyn Aggregator> {
        Arc::clone(&MAX)
    }

    /// Sum of numbers; `0` of the result type for an empty input.
    pub fn sum() -> Arc<dyn Aggregator> {
        Arc::clone(&SUM)
    }

    /// Mean as `f64`. With `skip_na` NaN values are ignored, otherwise any NaN
    /// makes the result NaN.
    pub fn mean(skip_na: bool) -> Arc<dyn Aggregator> {
        MEAN.get(skip_na)
    }

    pub fn std(skip_na: bool, ddof: usize) -> Arc<dyn Aggregator> {
        STD.get((skip_na, ddof))
    }

    /// Middle value, keeping the input type; see [`Aggregators::percentile`].
    pub fn median() -> Arc<dyn Aggregator> {
        Arc::clone(&MEDIAN)
    }

    /// `p`-th percentile with `p` in `0..=100`. Floats interpolate between
    /// neighbours, other types take the lower one.
    pub fn percentile(p: f64) -> Arc<dyn Aggregator> {
        PERCENTILE.get(p.to_bits())
    }
}
