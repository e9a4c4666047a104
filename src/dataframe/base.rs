use std::collections::HashSet;

use crate::config::FrameConfig;
use crate::core::{infer_dtype, infer_dtypes, DType, Label, Value};
use crate::dataframe::input::{FrameData, FrameOptions};
use crate::error::{Error, Result};
use crate::index::Index;
use crate::series::Series;

/// Labeled, typed, column-major table
///
/// A Series is the one-column case with `is_series` set. Relational
/// operators never mutate their inputs; they return new frames.
#[derive(Debug, Clone)]
pub struct DataFrame {
    /// Column-major cells, one vector per column
    pub(crate) data: Vec<Vec<Value>>,
    /// Column labels, unique
    pub(crate) columns: Vec<String>,
    /// Row labels, unique
    pub(crate) index: Index,
    /// One dtype per column
    pub(crate) dtypes: Vec<DType>,
    pub(crate) is_series: bool,
    pub(crate) config: FrameConfig,
}

impl DataFrame {
    /// Build a frame from any supported input shape
    ///
    /// Missing `columns` become `"0"`, `"1"`, ... and a missing `index`
    /// becomes the positions `0..rows`. Dtypes are inferred unless given.
    pub fn new(data: FrameData, options: FrameOptions) -> Result<Self> {
        let FrameOptions {
            index,
            columns,
            dtypes,
            config,
            is_series,
        } = options;

        let columnar = data.into_columnar()?;
        let row_count = columnar.row_count;
        let mut values = columnar.data;

        let names = match columns {
            Some(names) => {
                if values.is_empty() && row_count == 0 {
                    // no rows to derive a width from; labels define it
                    values = vec![Vec::new(); names.len()];
                }
                if names.len() != values.len() {
                    return Err(Error::ShapeMismatch(format!(
                        "{} column labels supplied for {} columns of data",
                        names.len(),
                        values.len()
                    )));
                }
                names
            }
            None => columnar
                .names
                .unwrap_or_else(|| (0..values.len()).map(|i| i.to_string()).collect()),
        };
        check_unique_columns(&names)?;

        let is_series = is_series || columnar.is_series;
        if is_series && names.len() != 1 {
            return Err(Error::ShapeMismatch(format!(
                "a series holds exactly one column, found {}",
                names.len()
            )));
        }

        let index = match index {
            Some(labels) => {
                if labels.len() != row_count {
                    return Err(Error::ShapeMismatch(format!(
                        "{} index labels supplied for {} rows",
                        labels.len(),
                        row_count
                    )));
                }
                Index::new(labels)?
            }
            None => Index::range(row_count),
        };

        let dtypes = match dtypes {
            Some(dtypes) => {
                if dtypes.len() != names.len() {
                    return Err(Error::ShapeMismatch(format!(
                        "{} dtypes supplied for {} columns",
                        dtypes.len(),
                        names.len()
                    )));
                }
                dtypes
            }
            None => infer_dtypes(&values, config.dtype_sample_limit),
        };

        Ok(DataFrame {
            data: values,
            columns: names,
            index,
            dtypes,
            is_series,
            config,
        })
    }

    /// Frame with no rows and no columns
    pub fn empty() -> Self {
        DataFrame {
            data: Vec::new(),
            columns: Vec::new(),
            index: Index::range(0),
            dtypes: Vec::new(),
            is_series: false,
            config: FrameConfig::default(),
        }
    }

    /// Assemble a frame from already-resolved columns, inferring dtypes
    pub(crate) fn from_parts(
        columns: Vec<String>,
        data: Vec<Vec<Value>>,
        index: Option<Index>,
        config: FrameConfig,
    ) -> Result<Self> {
        check_unique_columns(&columns)?;
        let row_count = data.first().map(Vec::len).unwrap_or(0);
        if data.len() != columns.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} column labels for {} columns of data",
                columns.len(),
                data.len()
            )));
        }
        if let Some((name, col)) = columns
            .iter()
            .zip(&data)
            .find(|(_, col)| col.len() != row_count)
        {
            return Err(Error::ShapeMismatch(format!(
                "column '{}' has {} values, expected {}",
                name,
                col.len(),
                row_count
            )));
        }
        let index = match index {
            Some(index) if index.len() == row_count => index,
            Some(index) => {
                return Err(Error::ShapeMismatch(format!(
                    "{} index labels for {} rows",
                    index.len(),
                    row_count
                )))
            }
            None => Index::range(row_count),
        };
        let dtypes = infer_dtypes(&data, config.dtype_sample_limit);
        Ok(DataFrame {
            data,
            columns,
            index,
            dtypes,
            is_series: false,
            config,
        })
    }

    /// Rows as vectors of cells
    pub fn values(&self) -> Vec<Vec<Value>> {
        (0..self.row_count())
            .map(|row| self.data.iter().map(|col| col[row].clone()).collect())
            .collect()
    }

    /// Columns as vectors of cells
    pub fn column_major_values(&self) -> &[Vec<Value>] {
        &self.data
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn dtypes(&self) -> &[DType] {
        &self.dtypes
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Number of cells
    pub fn size(&self) -> usize {
        self.row_count() * self.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_series(&self) -> bool {
        self.is_series
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of a column label
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::KeyNotFound(format!("column '{}'", name)))
    }

    pub fn column_values(&self, name: &str) -> Result<&[Value]> {
        let pos = self.column_position(name)?;
        Ok(&self.data[pos])
    }

    /// Dtype of one column
    pub fn column_dtype(&self, name: &str) -> Result<DType> {
        let pos = self.column_position(name)?;
        Ok(self.dtypes[pos])
    }

    /// One column as a Series sharing this frame's index
    pub fn column(&self, name: &str) -> Result<Series> {
        let pos = self.column_position(name)?;
        Ok(Series::from_frame_unchecked(DataFrame {
            data: vec![self.data[pos].clone()],
            columns: vec![name.to_string()],
            index: self.index.clone(),
            dtypes: vec![self.dtypes[pos]],
            is_series: true,
            config: self.config.clone(),
        }))
    }

    /// Cells of one row
    pub fn row(&self, pos: usize) -> Result<Vec<Value>> {
        if pos >= self.row_count() {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                size: self.row_count(),
            });
        }
        Ok(self.data.iter().map(|col| col[pos].clone()).collect())
    }

    /// Replace every row; row count and width must stay the same
    pub fn set_values(&mut self, rows: Vec<Vec<Value>>) -> Result<()> {
        if rows.len() != self.row_count() {
            return Err(Error::RowLengthMismatch {
                expected: self.row_count(),
                found: rows.len(),
            });
        }
        let width = self.column_count();
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(Error::ColumnLengthMismatch {
                expected: width,
                found: row.len(),
            });
        }

        let mut data: Vec<Vec<Value>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for row in rows {
            for (col, cell) in data.iter_mut().zip(row) {
                col.push(cell.normalized());
            }
        }
        self.data = data;
        self.reinfer_dtypes();
        Ok(())
    }

    /// Replace every column; column count and length must stay the same
    pub fn set_column_values(&mut self, columns: Vec<Vec<Value>>) -> Result<()> {
        if columns.len() != self.column_count() {
            return Err(Error::ColumnLengthMismatch {
                expected: self.column_count(),
                found: columns.len(),
            });
        }
        if let Some(col) = columns.iter().find(|col| col.len() != self.row_count()) {
            return Err(Error::RowLengthMismatch {
                expected: self.row_count(),
                found: col.len(),
            });
        }
        self.data = columns
            .into_iter()
            .map(|col| col.into_iter().map(Value::normalized).collect())
            .collect();
        self.reinfer_dtypes();
        Ok(())
    }

    /// Replace the row labels
    pub fn set_index<L: Into<Label>>(&mut self, labels: impl IntoIterator<Item = L>) -> Result<()> {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.row_count() {
            return Err(Error::ShapeMismatch(format!(
                "{} index labels supplied for {} rows",
                labels.len(),
                self.row_count()
            )));
        }
        self.index = Index::new(labels)?;
        Ok(())
    }

    /// Restore the default positional index
    pub fn reset_index(&self) -> DataFrame {
        let mut frame = self.clone();
        frame.index = Index::range(self.row_count());
        frame
    }

    /// Append a column at the end
    pub fn add_column<V: Into<Value>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        let name = name.into();
        if self.contains_column(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        let values: Vec<Value> = values
            .into_iter()
            .map(|v| v.into().normalized())
            .collect();

        if self.columns.is_empty() && self.row_count() == 0 {
            self.index = Index::range(values.len());
        } else if values.len() != self.row_count() {
            return Err(Error::RowLengthMismatch {
                expected: self.row_count(),
                found: values.len(),
            });
        }

        self.dtypes
            .push(infer_dtype(&values, self.config.dtype_sample_limit));
        self.data.push(values);
        self.columns.push(name);
        self.is_series = self.is_series && self.columns.len() == 1;
        Ok(())
    }

    /// New frame without the named columns
    pub fn drop_columns(&self, names: &[&str]) -> Result<DataFrame> {
        let mut drop = HashSet::with_capacity(names.len());
        for name in names {
            drop.insert(self.column_position(name)?);
        }
        let keep: Vec<usize> = (0..self.column_count())
            .filter(|pos| !drop.contains(pos))
            .collect();
        Ok(self.select_positions(&keep))
    }

    /// New frame with only the named columns, in the order given
    pub fn select_columns(&self, names: &[&str]) -> Result<DataFrame> {
        let positions = names
            .iter()
            .map(|name| self.column_position(name))
            .collect::<Result<Vec<_>>>()?;
        check_unique_columns(&names.iter().map(|n| n.to_string()).collect::<Vec<_>>())?;
        Ok(self.select_positions(&positions))
    }

    fn select_positions(&self, positions: &[usize]) -> DataFrame {
        DataFrame {
            data: positions.iter().map(|&p| self.data[p].clone()).collect(),
            columns: positions.iter().map(|&p| self.columns[p].clone()).collect(),
            index: self.index.clone(),
            dtypes: positions.iter().map(|&p| self.dtypes[p]).collect(),
            is_series: self.is_series && positions.len() == 1,
            config: self.config.clone(),
        }
    }

    /// New frame with columns renamed by `(old, new)` pairs
    pub fn rename_columns(&self, pairs: &[(&str, &str)]) -> Result<DataFrame> {
        let mut columns = self.columns.clone();
        for (old, new) in pairs {
            let pos = self.column_position(old)?;
            columns[pos] = new.to_string();
        }
        check_unique_columns(&columns)?;
        let mut frame = self.clone();
        frame.columns = columns;
        Ok(frame)
    }

    /// Rows at the given positions, keeping their labels
    pub fn iloc(&self, positions: &[usize]) -> Result<DataFrame> {
        let index = self.index.take(positions)?;
        let data = self
            .data
            .iter()
            .map(|col| positions.iter().map(|&p| col[p].clone()).collect())
            .collect();
        Ok(DataFrame {
            data,
            columns: self.columns.clone(),
            index,
            dtypes: self.dtypes.clone(),
            is_series: self.is_series,
            config: self.config.clone(),
        })
    }

    /// Rows with the given labels
    pub fn loc(&self, labels: &[Label]) -> Result<DataFrame> {
        let positions = labels
            .iter()
            .map(|label| {
                self.index
                    .get_loc(label)
                    .ok_or_else(|| Error::KeyNotFound(format!("index label '{}'", label)))
            })
            .collect::<Result<Vec<_>>>()?;
        self.iloc(&positions)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> DataFrame {
        let end = n.min(self.row_count());
        let positions: Vec<usize> = (0..end).collect();
        self.slice_rows(&positions)
    }

    /// Last `n` rows
    pub fn tail(&self, n: usize) -> DataFrame {
        let start = self.row_count().saturating_sub(n);
        let positions: Vec<usize> = (start..self.row_count()).collect();
        self.slice_rows(&positions)
    }

    fn slice_rows(&self, positions: &[usize]) -> DataFrame {
        // positions come from a range inside the frame and labels are unique
        match self.iloc(positions) {
            Ok(frame) => frame,
            Err(_) => DataFrame::empty(),
        }
    }

    /// Cast one column to a declared dtype
    pub fn as_type(&self, name: &str, dtype: DType) -> Result<DataFrame> {
        let pos = self.column_position(name)?;
        let cast = self.data[pos]
            .iter()
            .map(|cell| cell.cast(dtype))
            .collect::<Result<Vec<_>>>()?;
        let mut frame = self.clone();
        frame.data[pos] = cast;
        frame.dtypes[pos] = dtype;
        Ok(frame)
    }

    /// Rows as JSON objects keyed by column label
    pub fn to_json_records(&self) -> Result<serde_json::Value> {
        let records = (0..self.row_count())
            .map(|row| -> Result<serde_json::Value> {
                let mut record = serde_json::Map::with_capacity(self.column_count());
                for (name, col) in self.columns.iter().zip(&self.data) {
                    record.insert(name.clone(), serde_json::to_value(&col[row])?);
                }
                Ok(serde_json::Value::Object(record))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(serde_json::Value::Array(records))
    }

    /// Columns as a JSON object of arrays
    pub fn to_json_columns(&self) -> Result<serde_json::Value> {
        let mut object = serde_json::Map::with_capacity(self.column_count());
        for (name, col) in self.columns.iter().zip(&self.data) {
            object.insert(name.clone(), serde_json::to_value(col)?);
        }
        Ok(serde_json::Value::Object(object))
    }

    fn reinfer_dtypes(&mut self) {
        self.dtypes = infer_dtypes(&self.data, self.config.dtype_sample_limit);
    }
}

impl Default for DataFrame {
    fn default() -> Self {
        DataFrame::empty()
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
            && self.index == other.index
            && self.dtypes == other.dtypes
            && self.data == other.data
    }
}

pub(crate) fn check_unique_columns(names: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(
            FrameData::from_rows(vec![
                vec![Value::Int(1), Value::from("dog"), Value::Float(1.5)],
                vec![Value::Int(3), Value::from("fog"), Value::NA],
            ]),
            FrameOptions::new().columns(["A", "B", "C"]),
        )
        .unwrap()
    }

    #[test]
    fn test_default_labels() {
        let df = DataFrame::new(
            FrameData::from_rows(vec![vec![1, 2], vec![3, 4]]),
            FrameOptions::new(),
        )
        .unwrap();
        assert_eq!(df.columns(), &["0", "1"]);
        assert_eq!(df.index().values(), &[Label::Int(0), Label::Int(1)]);
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.size(), 4);
    }

    #[test]
    fn test_inferred_dtypes() {
        let df = sample();
        assert_eq!(df.dtypes(), &[DType::Int32, DType::String, DType::Float32]);
    }

    #[test]
    fn test_set_values_reinfers() {
        let mut df = sample();
        df.set_values(vec![
            vec![Value::Float(0.5), Value::Int(1), Value::Int(2)],
            vec![Value::Float(1.5), Value::Int(3), Value::Int(4)],
        ])
        .unwrap();
        assert_eq!(df.dtypes(), &[DType::Float32, DType::Int32, DType::Int32]);
    }

    #[test]
    fn test_set_column_values_checks_counts() {
        let mut df = sample();
        let err = df.set_column_values(vec![vec![Value::Int(1), Value::Int(2)]]);
        assert!(matches!(
            err,
            Err(Error::ColumnLengthMismatch { expected: 3, found: 1 })
        ));
        let err = df.set_column_values(vec![vec![Value::NA]; 3]);
        assert!(matches!(
            err,
            Err(Error::RowLengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_add_and_drop_columns() {
        let mut df = sample();
        df.add_column("D", vec![true, false]).unwrap();
        assert_eq!(df.column_dtype("D").unwrap(), DType::Boolean);
        assert!(matches!(
            df.add_column("D", vec![1, 2]),
            Err(Error::DuplicateColumn(_))
        ));
        let dropped = df.drop_columns(&["B", "D"]).unwrap();
        assert_eq!(dropped.columns(), &["A", "C"]);
        assert!(df.drop_columns(&["Z"]).is_err());
    }

    #[test]
    fn test_loc_and_iloc() {
        let mut df = sample();
        df.set_index(["x", "y"]).unwrap();
        let row = df.loc(&[Label::from("y")]).unwrap();
        assert_eq!(row.values(), vec![vec![Value::Int(3), Value::from("fog"), Value::NA]]);
        assert!(df.iloc(&[5]).is_err());
        assert!(matches!(df.loc(&[Label::from("q")]), Err(Error::KeyNotFound(_))));
    }

    #[test]
    fn test_json_views() {
        let df = sample();
        let records = df.to_json_records().unwrap();
        assert_eq!(
            records,
            serde_json::json!([
                {"A": 1, "B": "dog", "C": 1.5},
                {"A": 3, "B": "fog", "C": null}
            ])
        );
    }
}
