//! Reductions behind the built-in aggregators.
//!
//! Every function receives only non-null values together with their element
//! type.

use std::cmp::Ordering;

use nestframe_core::{DataType, FrameError, Value, unify_all_numbers};

fn require_numbers(aggregator: &str, data_type: &DataType) -> Result<(), FrameError> {
    if data_type.is_number() || *data_type == DataType::Nothing {
        Ok(())
    } else {
        Err(FrameError::aggregation(format!(
            "{aggregator} requires numbers, found {data_type}"
        )))
    }
}

fn not_a_number(aggregator: &str, value: &Value) -> FrameError {
    FrameError::aggregation(format!("{aggregator}: {value} is not a number"))
}

/// Declared element type, or the unified runtime type for a mixed `Number` column.
fn effective_number_type(values: &[&Value], data_type: &DataType) -> DataType {
    if *data_type != DataType::Number {
        return data_type.clone();
    }
    let types: Vec<DataType> = values.iter().map(|v| v.data_type()).collect();
    unify_all_numbers(&types).unwrap_or(DataType::Number)
}

fn warn_if_lossy(aggregator: &str, values: &[&Value], data_type: &DataType) {
    let has_longs = match data_type {
        DataType::I64 => true,
        DataType::Number => values.iter().any(|v| matches!(v, Value::I64(_))),
        _ => false,
    };
    if has_longs {
        tracing::warn!(
            aggregator,
            "converting i64 values to f64, loss of precision may occur"
        );
    }
}

/// Floats of the input, with NaN either skipped or short-circuiting to `None`.
fn floats(
    aggregator: &str,
    values: &[&Value],
    skip_na: bool,
) -> Result<Option<Vec<f64>>, FrameError> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        let x = value.as_f64().ok_or_else(|| not_a_number(aggregator, value))?;
        if x.is_nan() {
            if skip_na {
                continue;
            }
            return Ok(None);
        }
        out.push(x);
    }
    Ok(Some(out))
}

fn extreme(
    aggregator: &str,
    values: &[&Value],
    keep: Ordering,
) -> Result<Option<Value>, FrameError> {
    if let Some(nan) = values.iter().find(|v| v.is_nan()) {
        return Ok(Some((*nan).clone()));
    }
    let mut best: Option<&Value> = None;
    for &value in values {
        best = Some(match best {
            None => value,
            Some(current) => match value.compare(current) {
                Some(ordering) if ordering == keep => value,
                Some(_) => current,
                None => {
                    return Err(FrameError::aggregation(format!(
                        "{aggregator}: cannot compare {current} with {value}"
                    )));
                }
            },
        });
    }
    Ok(best.cloned())
}

pub(crate) fn min(values: &[&Value], _data_type: &DataType) -> Result<Option<Value>, FrameError> {
    extreme("min", values, Ordering::Less)
}

pub(crate) fn max(values: &[&Value], _data_type: &DataType) -> Result<Option<Value>, FrameError> {
    extreme("max", values, Ordering::Greater)
}

/// Result type of `sum`: small integers accumulate as `i32`.
pub(crate) fn sum_type(data_type: &DataType) -> DataType {
    match data_type {
        DataType::Nothing | DataType::I8 | DataType::I16 | DataType::I32 => DataType::I32,
        other => other.clone(),
    }
}

pub(crate) fn sum(values: &[&Value], data_type: &DataType) -> Result<Option<Value>, FrameError> {
    require_numbers("sum", data_type)?;
    let target = sum_type(&effective_number_type(values, data_type));
    let overflow = || FrameError::aggregation(format!("sum overflows {target}"));

    let total = match target {
        DataType::I32 => {
            let mut acc: i32 = 0;
            for value in values {
                let x = value
                    .as_i64()
                    .and_then(|x| i32::try_from(x).ok())
                    .ok_or_else(|| not_a_number("sum", value))?;
                acc = acc.checked_add(x).ok_or_else(overflow)?;
            }
            Value::I32(acc)
        }
        DataType::I64 => {
            let mut acc: i64 = 0;
            for value in values {
                let x = value.as_i64().ok_or_else(|| not_a_number("sum", value))?;
                acc = acc.checked_add(x).ok_or_else(overflow)?;
            }
            Value::I64(acc)
        }
        DataType::F32 => {
            let mut acc: f32 = 0.0;
            for value in values {
                let x = value.as_f64().ok_or_else(|| not_a_number("sum", value))?;
                acc += x as f32;
            }
            Value::F32(acc)
        }
        _ => {
            let mut acc: f64 = 0.0;
            for value in values {
                acc += value.as_f64().ok_or_else(|| not_a_number("sum", value))?;
            }
            Value::F64(acc)
        }
    };
    Ok(Some(total))
}

/// Arithmetic mean as `f64`; NaN for an empty input.
pub(crate) fn mean(
    values: &[&Value],
    data_type: &DataType,
    skip_na: bool,
) -> Result<Option<Value>, FrameError> {
    require_numbers("mean", data_type)?;
    warn_if_lossy("mean", values, data_type);
    let Some(xs) = floats("mean", values, skip_na)? else {
        return Ok(Some(Value::F64(f64::NAN)));
    };
    let result = if xs.is_empty() {
        f64::NAN
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    };
    Ok(Some(Value::F64(result)))
}

/// Standard deviation with `ddof` delta degrees of freedom (Welford's method).
/// NaN when there are no more values than `ddof`.
pub(crate) fn std(
    values: &[&Value],
    data_type: &DataType,
    skip_na: bool,
    ddof: usize,
) -> Result<Option<Value>, FrameError> {
    require_numbers("std", data_type)?;
    warn_if_lossy("std", values, data_type);
    let Some(xs) = floats("std", values, skip_na)? else {
        return Ok(Some(Value::F64(f64::NAN)));
    };
    if xs.len() <= ddof {
        return Ok(Some(Value::F64(f64::NAN)));
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, x) in xs.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    let variance = m2 / (xs.len() - ddof) as f64;
    Ok(Some(Value::F64(variance.sqrt())))
}

/// Total order over `values`, which must be NaN-free and all integers, all
/// numbers, all strings or all booleans.
fn total_order(
    aggregator: &str,
    values: &[&Value],
) -> Result<fn(&Value, &Value) -> Ordering, FrameError> {
    if values.iter().all(|v| v.as_i64().is_some()) {
        return Ok(|a: &Value, b: &Value| a.as_i64().cmp(&b.as_i64()));
    }
    if values.iter().all(|v| v.is_number()) {
        return Ok(|a: &Value, b: &Value| match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        });
    }
    let same_kind = values.iter().all(|v| matches!(v, Value::String(_)))
        || values.iter().all(|v| matches!(v, Value::Bool(_)));
    if same_kind {
        return Ok(|a: &Value, b: &Value| a.compare(b).unwrap_or(Ordering::Equal));
    }
    let first = values[0];
    let other = values
        .iter()
        .find(|v| first.compare(v).is_none())
        .copied()
        .unwrap_or(first);
    Err(FrameError::aggregation(format!(
        "{aggregator}: cannot compare {first} with {other}"
    )))
}

/// `p`-th percentile (0..=100) of comparable values.
///
/// Between two neighbours, floats interpolate linearly; all other types take
/// the lower one so the result is always a value of the input type.
pub(crate) fn percentile(
    values: &[&Value],
    _data_type: &DataType,
    p: f64,
) -> Result<Option<Value>, FrameError> {
    if !(0.0..=100.0).contains(&p) {
        return Err(FrameError::aggregation(format!(
            "percentile must be in 0..=100, got {p}"
        )));
    }
    if let Some(nan) = values.iter().find(|v| v.is_nan()) {
        return Ok(Some((*nan).clone()));
    }
    if values.is_empty() {
        return Ok(None);
    }

    let order = total_order("percentile", values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| order(a, b));

    let position = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let result = match (sorted[lower], sorted[upper]) {
        _ if lower == upper => sorted[lower].clone(),
        (Value::F64(a), Value::F64(b)) => Value::F64(a + (b - a) * fraction),
        (Value::F32(a), Value::F32(b)) => Value::F32(a + (b - a) * fraction as f32),
        (low, _) => low.clone(),
    };
    Ok(Some(result))
}

pub(crate) fn median(values: &[&Value], data_type: &DataType) -> Result<Option<Value>, FrameError> {
    percentile(values, data_type, 50.0)
}
