//! Concatenation of frames along rows or columns

use std::fmt::{self, Display};

use crate::core::Value;
use crate::dataframe::base::DataFrame;
use crate::dataframe::naming::ColumnNamer;
use crate::error::{Error, Result};

/// Axis for concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Stack rows; axis 0
    Rows,
    /// Place columns side by side; axis 1
    Columns,
}

impl TryFrom<usize> for Axis {
    type Error = Error;

    fn try_from(axis: usize) -> Result<Self> {
        match axis {
            0 => Ok(Axis::Rows),
            1 => Ok(Axis::Columns),
            other => Err(Error::InvalidInput(format!(
                "axis must be 0 or 1, found {}",
                other
            ))),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => f.write_str("rows"),
            Axis::Columns => f.write_str("columns"),
        }
    }
}

/// Concatenate frames along an axis
///
/// Missing cells created by mismatched shapes are filled with `NA`. The
/// result always carries a fresh positional index.
///
/// # Arguments
/// * `frames` - Slice of DataFrames to concatenate
/// * `axis` - Axis along which to concatenate (Rows or Columns)
///
/// # Returns
/// Concatenated DataFrame, or `InvalidInput` when `frames` is empty
///
/// # Example
/// ```ignore
/// use ndframe::{concat, Axis};
///
/// let stacked = concat(&[&january, &february], Axis::Rows)?;
/// ```
pub fn concat(frames: &[&DataFrame], axis: Axis) -> Result<DataFrame> {
    let first = frames.first().ok_or_else(|| {
        Error::InvalidInput("concat requires at least one frame".to_string())
    })?;

    let result = match axis {
        Axis::Rows => concat_rows(frames, first)?,
        Axis::Columns => concat_columns(frames, first)?,
    };
    log::debug!(
        "concatenated {} frames along {} into {:?}",
        frames.len(),
        axis,
        result.shape()
    );
    Ok(result)
}

/// Stack rows, taking the union of columns in first-seen order
fn concat_rows(frames: &[&DataFrame], first: &DataFrame) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    let mut data: Vec<Vec<Value>> = Vec::new();
    let mut total = 0;

    for frame in frames {
        for (name, values) in frame.columns.iter().zip(&frame.data) {
            let pos = match names.iter().position(|n| n == name) {
                Some(pos) => pos,
                None => {
                    // backfill rows contributed by earlier frames
                    names.push(name.clone());
                    data.push(vec![Value::NA; total]);
                    names.len() - 1
                }
            };
            data[pos].extend(values.iter().cloned());
        }
        total += frame.row_count();
        for col in data.iter_mut() {
            col.resize(total, Value::NA);
        }
    }

    let mut result = DataFrame::from_parts(names, data, None, first.config.clone())?;
    result.is_series = result.column_count() == 1;
    Ok(result)
}

/// Place columns side by side, renaming repeats and padding short columns
fn concat_columns(frames: &[&DataFrame], first: &DataFrame) -> Result<DataFrame> {
    let mut namer = ColumnNamer::new();
    let mut names: Vec<String> = Vec::new();
    let mut data: Vec<Vec<Value>> = Vec::new();

    for frame in frames {
        for (name, values) in frame.columns.iter().zip(&frame.data) {
            names.push(namer.assign(name));
            data.push(values.clone());
        }
    }

    let longest = data.iter().map(Vec::len).max().unwrap_or(0);
    for col in data.iter_mut() {
        col.resize(longest, Value::NA);
    }

    DataFrame::from_parts(names, data, None, first.config.clone())
}
