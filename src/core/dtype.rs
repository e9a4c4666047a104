//! Column data types and sample-based dtype inference

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::data_value::{parse_bool, parse_number, Value};
use crate::error::Error;

/// Declared or inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    String,
    Int32,
    Float32,
    Boolean,
    Undefined,
}

impl DType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::String => "string",
            DType::Int32 => "int32",
            DType::Float32 => "float32",
            DType::Boolean => "boolean",
            DType::Undefined => "undefined",
        }
    }

    /// Whether numeric aggregations accept this dtype
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int32 | DType::Float32 | DType::Boolean)
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(DType::String),
            "int32" => Ok(DType::Int32),
            "float32" => Ok(DType::Float32),
            "boolean" => Ok(DType::Boolean),
            "undefined" => Ok(DType::Undefined),
            other => Err(Error::unsupported(other, "dtype names")),
        }
    }
}

/// How a single sampled cell looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Missing,
    Boolean,
    Integral,
    Fractional,
    /// whole number outside the int32 range
    Wide,
    Text,
}

fn classify(value: &Value) -> CellKind {
    let numeric = |f: f64| {
        if f.fract() != 0.0 {
            CellKind::Fractional
        } else if f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
            CellKind::Integral
        } else {
            CellKind::Wide
        }
    };
    match value {
        Value::NA => CellKind::Missing,
        Value::Bool(_) => CellKind::Boolean,
        Value::Int(i) if i32::try_from(*i).is_ok() => CellKind::Integral,
        Value::Int(_) => CellKind::Wide,
        Value::Float(f) if f.is_nan() => CellKind::Missing,
        Value::Float(f) => numeric(*f),
        Value::Str(s) => match parse_number(s) {
            Some(f) => numeric(f),
            None if parse_bool(s).is_some() => CellKind::Boolean,
            None => CellKind::Text,
        },
    }
}

/// Infer the dtype of one column from at most `sample_limit` leading cells
///
/// Precedence: any text wins (`string`), then all-boolean (`boolean`), then
/// a fractional value, a whole number outside the int32 range or a missing
/// cell forces `float32`, otherwise `int32`. A sample made only of missing cells is `string`; an empty
/// column is `undefined`.
pub fn infer_dtype(values: &[Value], sample_limit: usize) -> DType {
    let limit = sample_limit.max(1).min(values.len());
    if limit == 0 {
        return DType::Undefined;
    }

    let mut saw_missing = false;
    let mut saw_bool = false;
    let mut saw_integral = false;
    let mut saw_fraction = false;

    for value in &values[..limit] {
        match classify(value) {
            CellKind::Text => return DType::String,
            CellKind::Missing => saw_missing = true,
            CellKind::Boolean => saw_bool = true,
            CellKind::Integral => saw_integral = true,
            CellKind::Fractional | CellKind::Wide => saw_fraction = true,
        }
    }

    let saw_number = saw_integral || saw_fraction;
    if !saw_number && !saw_bool {
        // every sampled cell is missing
        return DType::String;
    }
    if saw_bool && !saw_number {
        return DType::Boolean;
    }
    if saw_fraction || saw_missing {
        return DType::Float32;
    }
    DType::Int32
}

/// Infer one dtype per column of a column-major table
pub fn infer_dtypes(columns: &[Vec<Value>], sample_limit: usize) -> Vec<DType> {
    if sample_limit == 0 {
        log::warn!("dtype sample limit of 0 requested, sampling one row instead");
    }
    let dtypes: Vec<DType> = columns
        .iter()
        .map(|col| infer_dtype(col, sample_limit))
        .collect();
    log::debug!(
        "inferred {} dtypes with a sample limit of {}",
        dtypes.len(),
        sample_limit
    );
    dtypes
}
