//! Aggregation kernels over one group's column values
//!
//! Missing cells are skipped by the reducing kernels and passed through as
//! missing by the cumulative ones. `integral` asks for integer output on
//! int32 and boolean columns; those columns are folded in `i64` and only
//! fall back to `f64` when a checked operation overflows.

use num_traits::ToPrimitive;

use crate::core::Value;

fn numbers(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_f64).collect()
}

/// Non-missing cells as integers, or `None` if any of them is not whole
fn integers(values: &[Value]) -> Option<Vec<i64>> {
    values
        .iter()
        .filter(|v| !v.is_na())
        .map(Value::as_i64)
        .collect()
}

fn emit(x: f64, integral: bool) -> Value {
    if integral && x.fract() == 0.0 {
        if let Some(i) = x.to_i64() {
            return Value::Int(i);
        }
    }
    Value::Float(x)
}

/// Number of non-missing cells
pub fn count(values: &[Value]) -> Value {
    let n = values.iter().filter(|v| !v.is_na()).count();
    Value::from(n)
}

pub fn sum(values: &[Value], integral: bool) -> Value {
    if integral {
        let total = integers(values)
            .and_then(|ints| ints.into_iter().try_fold(0i64, i64::checked_add));
        if let Some(total) = total {
            return Value::Int(total);
        }
    }
    emit(numbers(values).iter().sum(), integral)
}

pub fn mean(values: &[Value]) -> Value {
    let valid = numbers(values);
    if valid.is_empty() {
        return Value::NA;
    }
    Value::Float(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Sample variance (n - 1)
pub fn var(values: &[Value]) -> Value {
    let valid = numbers(values);
    if valid.len() <= 1 {
        return Value::NA;
    }
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    let variance =
        valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (valid.len() - 1) as f64;
    Value::Float(variance)
}

/// Sample standard deviation (n - 1)
pub fn std(values: &[Value]) -> Value {
    match var(values) {
        Value::Float(variance) => Value::Float(variance.sqrt()),
        other => other,
    }
}

pub fn median(values: &[Value]) -> Value {
    let mut sorted = numbers(values);
    if sorted.is_empty() {
        return Value::NA;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Value::Float((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Value::Float(sorted[mid])
    }
}

/// Longest run in a sorted slice; the first (smallest) wins ties
fn most_frequent<T: Copy + PartialEq>(sorted: &[T]) -> Option<T> {
    let mut best = *sorted.first()?;
    let mut best_run = 0;
    let mut run_start = 0;
    for i in 1..=sorted.len() {
        if i == sorted.len() || sorted[i] != sorted[run_start] {
            let run = i - run_start;
            if run > best_run {
                best_run = run;
                best = sorted[run_start];
            }
            run_start = i;
        }
    }
    Some(best)
}

/// Most frequent value; ties go to the smallest
pub fn mode(values: &[Value], integral: bool) -> Value {
    if integral {
        if let Some(mut ints) = integers(values) {
            ints.sort_unstable();
            return most_frequent(&ints).map(Value::Int).unwrap_or(Value::NA);
        }
    }
    let mut sorted = numbers(values);
    sorted.sort_by(f64::total_cmp);
    most_frequent(&sorted)
        .map(|x| emit(x, integral))
        .unwrap_or(Value::NA)
}

pub fn min(values: &[Value], integral: bool) -> Value {
    if integral {
        if let Some(ints) = integers(values) {
            return ints.into_iter().min().map(Value::Int).unwrap_or(Value::NA);
        }
    }
    numbers(values)
        .into_iter()
        .reduce(f64::min)
        .map(|x| emit(x, integral))
        .unwrap_or(Value::NA)
}

pub fn max(values: &[Value], integral: bool) -> Value {
    if integral {
        if let Some(ints) = integers(values) {
            return ints.into_iter().max().map(Value::Int).unwrap_or(Value::NA);
        }
    }
    numbers(values)
        .into_iter()
        .reduce(f64::max)
        .map(|x| emit(x, integral))
        .unwrap_or(Value::NA)
}

/// Running fold in `i64`; `None` if a cell is not whole or a step overflows
fn running_int<F>(values: &[Value], fold: F) -> Option<Vec<Value>>
where
    F: Fn(i64, i64) -> Option<i64>,
{
    let mut acc: Option<i64> = None;
    values
        .iter()
        .map(|value| {
            if value.is_na() {
                return Some(Value::NA);
            }
            let x = value.as_i64()?;
            let next = match acc {
                Some(a) => fold(a, x)?,
                None => x,
            };
            acc = Some(next);
            Some(Value::Int(next))
        })
        .collect()
}

fn running<F>(values: &[Value], integral: bool, fold: F) -> Vec<Value>
where
    F: Fn(f64, f64) -> f64,
{
    let mut acc: Option<f64> = None;
    values
        .iter()
        .map(|value| match value.as_f64() {
            Some(x) => {
                let next = match acc {
                    Some(a) => fold(a, x),
                    None => x,
                };
                acc = Some(next);
                emit(next, integral)
            }
            None => Value::NA,
        })
        .collect()
}

pub fn cumsum(values: &[Value], integral: bool) -> Vec<Value> {
    if integral {
        if let Some(out) = running_int(values, i64::checked_add) {
            return out;
        }
    }
    running(values, integral, |a, x| a + x)
}

pub fn cumprod(values: &[Value], integral: bool) -> Vec<Value> {
    if integral {
        if let Some(out) = running_int(values, i64::checked_mul) {
            return out;
        }
    }
    running(values, integral, |a, x| a * x)
}

/// Running extreme; `replaces(candidate, current)` decides a strict swap,
/// so an equal later value never replaces the first-seen one
fn running_extreme<F>(values: &[Value], replaces: F) -> Vec<Value>
where
    F: Fn(&Value, &Value) -> bool,
{
    let mut best: Option<&Value> = None;
    values
        .iter()
        .map(|value| {
            if value.as_f64().is_none() {
                return Value::NA;
            }
            let swap = match best {
                Some(current) => replaces(value, current),
                None => true,
            };
            if swap {
                best = Some(value);
            }
            best.cloned().unwrap_or(Value::NA)
        })
        .collect()
}

/// Numeric order that compares two whole numbers exactly
fn numeric_cmp(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.total_cmp(b),
    }
}

pub fn cummin(values: &[Value]) -> Vec<Value> {
    running_extreme(values, |x, current| numeric_cmp(x, current).is_lt())
}

pub fn cummax(values: &[Value]) -> Vec<Value> {
    running_extreme(values, |x, current| numeric_cmp(x, current).is_gt())
}
