use std::cmp::Ordering;
use std::fmt::{self, Display};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::dtype::DType;
use crate::error::{Error, Result};

/// A single cell of a frame
///
/// `NA` is the one and only missing-value sentinel. Floating NaN, `None`
/// and JSON `null` all normalize to it on the way in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    NA,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn is_na(&self) -> bool {
        matches!(self, Value::NA)
    }

    /// Numeric view of the cell
    ///
    /// Booleans count as 0/1 and number-looking strings are parsed.
    /// Returns `None` for missing cells and non-numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::NA => None,
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => parse_number(s),
        }
    }

    /// Integer view of the cell, only when the value is integral
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            other => other
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .and_then(|f| f.to_i64()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Replace a floating NaN by the missing sentinel
    pub(crate) fn normalized(self) -> Value {
        match self {
            Value::Float(f) if f.is_nan() => Value::NA,
            other => other,
        }
    }

    /// Total order used by sorting aggregations (median, mode)
    ///
    /// Missing cells sort first, numbers compare numerically, strings
    /// lexicographically, and numbers sort before strings.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::NA, Value::NA) => Ordering::Equal,
            (Value::NA, _) => Ordering::Less,
            (_, Value::NA) => Ordering::Greater,
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.to_string().cmp(&b.to_string()),
            },
        }
    }

    /// Convert the cell to the representation of `dtype`
    pub fn cast(&self, dtype: DType) -> Result<Value> {
        if self.is_na() {
            return Ok(Value::NA);
        }
        let fail = || Error::InvalidCast {
            value: self.to_string(),
            dtype: dtype.to_string(),
        };
        match dtype {
            DType::String => Ok(Value::Str(self.to_string())),
            DType::Int32 => {
                let i = match self {
                    Value::Str(s) if parse_bool(s).is_some() => parse_bool(s).map(i64::from),
                    other => other.as_i64(),
                }
                .ok_or_else(fail)?;
                let narrowed = num_traits::cast::<i64, i32>(i).ok_or_else(fail)?;
                Ok(Value::Int(i64::from(narrowed)))
            }
            DType::Float32 => self.as_f64().map(Value::Float).ok_or_else(fail),
            DType::Boolean => match self {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::Str(s) => parse_bool(s).map(Value::Bool).ok_or_else(fail),
                other => match other.as_f64() {
                    Some(f) if f == 0.0 => Ok(Value::Bool(false)),
                    Some(f) if f == 1.0 => Ok(Value::Bool(true)),
                    _ => Err(fail()),
                },
            },
            DType::Undefined => Err(Error::unsupported("as_type", "dtype undefined")),
        }
    }
}

/// Parse a number-looking string
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a boolean-looking string ("true"/"false", any case)
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::NA, Value::NA) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::NA => write!(f, "NaN"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        v.to_i64().map(Value::Int).unwrap_or(Value::Float(v as f64))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v).normalized()
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::from(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::NA,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::NA,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::from).unwrap_or(Value::NA),
            },
            serde_json::Value::String(s) => Value::Str(s),
            // nested structures are kept as their JSON text
            other => Value::Str(other.to_string()),
        }
    }
}

/// Row label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{}", i),
            Label::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Int(v)
    }
}

impl From<i32> for Label {
    fn from(v: i32) -> Self {
        Label::Int(i64::from(v))
    }
}

impl From<usize> for Label {
    fn from(v: usize) -> Self {
        v.to_i64()
            .map(Label::Int)
            .unwrap_or_else(|| Label::Str(v.to_string()))
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::Str(v.to_string())
    }
}

impl From<String> for Label {
    fn from(v: String) -> Self {
        Label::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_normalizes_to_na() {
        assert!(Value::from(f64::NAN).is_na());
        assert!(Value::from(None::<i32>).is_na());
        assert!(Value::from(serde_json::Value::Null).is_na());
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(Value::from("2.5").as_f64(), Some(2.5));
        assert_eq!(Value::from(true).as_f64(), Some(1.0));
        assert_eq!(Value::from("dog").as_f64(), None);
        assert_eq!(Value::Float(3.0).as_i64(), Some(3));
        assert_eq!(Value::Float(3.5).as_i64(), None);
    }

    #[test]
    fn test_cast() {
        assert_eq!(Value::from("7").cast(DType::Int32).unwrap(), Value::Int(7));
        assert_eq!(Value::Int(1).cast(DType::Boolean).unwrap(), Value::Bool(true));
        assert_eq!(Value::Int(3).cast(DType::String).unwrap(), Value::from("3"));
        assert!(Value::from("dog").cast(DType::Float32).is_err());
        assert!(Value::Int(i64::MAX).cast(DType::Int32).is_err());
        assert!(Value::NA.cast(DType::Int32).unwrap().is_na());
    }

    #[test]
    fn test_total_cmp_orders_missing_first() {
        let mut values = vec![Value::Int(3), Value::NA, Value::Float(1.5), Value::from("a")];
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(
            values,
            vec![Value::NA, Value::Float(1.5), Value::Int(3), Value::from("a")]
        );
    }

    #[test]
    fn test_json_roundtrip_writes_null() {
        let text = serde_json::to_string(&vec![Value::Int(1), Value::NA]).unwrap();
        assert_eq!(text, "[1,null]");
    }
}
