//! Construction inputs for frames
//!
//! Every supported input shape is a variant of [`FrameData`]; it is resolved
//! exactly once into column-major storage by [`FrameData::into_columnar`].

use crate::config::FrameConfig;
use crate::core::{DType, Label, Value};
use crate::error::{Error, Result};

/// Raw data handed to the frame constructor
#[derive(Debug, Clone, PartialEq)]
pub enum FrameData {
    /// Array of rows, every row the same width
    Rows(Vec<Vec<Value>>),
    /// Array of scalars; always a single column
    Scalars(Vec<Value>),
    /// Array of row objects, keys become columns
    Records(Vec<Vec<(String, Value)>>),
    /// Object of named column arrays
    Columns(Vec<(String, Vec<Value>)>),
}

/// Column-major form of a [`FrameData`]
#[derive(Debug)]
pub(crate) struct Columnar {
    pub data: Vec<Vec<Value>>,
    pub names: Option<Vec<String>>,
    pub row_count: usize,
    pub is_series: bool,
}

impl FrameData {
    pub fn from_rows<R, V>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FrameData::Rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn from_scalars<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        FrameData::Scalars(values.into_iter().map(Into::into).collect())
    }

    pub fn from_records<R, K, V>(records: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        FrameData::Records(
            records
                .into_iter()
                .map(|record| {
                    record
                        .into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect()
                })
                .collect(),
        )
    }

    pub fn from_columns<C, K, V>(columns: impl IntoIterator<Item = (K, C)>) -> Self
    where
        C: IntoIterator<Item = V>,
        K: Into<String>,
        V: Into<Value>,
    {
        FrameData::Columns(
            columns
                .into_iter()
                .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Map a parsed JSON document onto one of the input shapes
    ///
    /// Arrays of arrays become rows, arrays of objects become records,
    /// arrays of scalars become a single column and an object of arrays
    /// becomes named columns.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        match json {
            Json::Array(items) => {
                if items.iter().all(|item| item.is_array()) {
                    let rows = items
                        .into_iter()
                        .map(|item| match item {
                            Json::Array(cells) => cells.into_iter().map(Value::from).collect(),
                            _ => Vec::new(),
                        })
                        .collect();
                    Ok(FrameData::Rows(rows))
                } else if items.iter().all(|item| item.is_object()) {
                    let records = items
                        .into_iter()
                        .map(|item| match item {
                            Json::Object(map) => map
                                .into_iter()
                                .map(|(k, v)| (k, Value::from(v)))
                                .collect(),
                            _ => Vec::new(),
                        })
                        .collect();
                    Ok(FrameData::Records(records))
                } else if items.iter().all(|item| !item.is_array() && !item.is_object()) {
                    Ok(FrameData::Scalars(items.into_iter().map(Value::from).collect()))
                } else {
                    Err(Error::InvalidInput(
                        "JSON array mixes rows, records and scalars".to_string(),
                    ))
                }
            }
            Json::Object(map) => {
                let mut columns = Vec::with_capacity(map.len());
                for (name, column) in map {
                    match column {
                        Json::Array(cells) => {
                            columns.push((name, cells.into_iter().map(Value::from).collect()))
                        }
                        other => {
                            return Err(Error::InvalidInput(format!(
                                "column '{}' must be a JSON array, found {}",
                                name, other
                            )))
                        }
                    }
                }
                Ok(FrameData::Columns(columns))
            }
            other => Err(Error::InvalidInput(format!(
                "cannot build a frame from JSON scalar {}",
                other
            ))),
        }
    }

    /// Resolve into column-major storage, checking the shape on the way
    pub(crate) fn into_columnar(self) -> Result<Columnar> {
        match self {
            FrameData::Rows(rows) => {
                let width = rows.first().map(Vec::len).unwrap_or(0);
                let row_count = rows.len();
                let mut data: Vec<Vec<Value>> =
                    (0..width).map(|_| Vec::with_capacity(row_count)).collect();
                for (i, row) in rows.into_iter().enumerate() {
                    if row.len() != width {
                        return Err(Error::ShapeMismatch(format!(
                            "row {} has {} cells, expected {}",
                            i,
                            row.len(),
                            width
                        )));
                    }
                    for (col, cell) in data.iter_mut().zip(row) {
                        col.push(cell.normalized());
                    }
                }
                Ok(Columnar {
                    data,
                    names: None,
                    row_count,
                    is_series: false,
                })
            }
            FrameData::Scalars(values) => {
                let row_count = values.len();
                Ok(Columnar {
                    data: vec![values.into_iter().map(Value::normalized).collect()],
                    names: None,
                    row_count,
                    is_series: true,
                })
            }
            FrameData::Records(records) => {
                let mut names: Vec<String> = Vec::new();
                for record in &records {
                    for (key, _) in record {
                        if !names.contains(key) {
                            names.push(key.clone());
                        }
                    }
                }
                let row_count = records.len();
                let mut data: Vec<Vec<Value>> = vec![vec![Value::NA; row_count]; names.len()];
                for (row, record) in records.into_iter().enumerate() {
                    for (key, value) in record {
                        if let Some(col) = names.iter().position(|name| *name == key) {
                            data[col][row] = value.normalized();
                        }
                    }
                }
                Ok(Columnar {
                    data,
                    names: Some(names),
                    row_count,
                    is_series: false,
                })
            }
            FrameData::Columns(columns) => {
                let row_count = columns.first().map(|(_, col)| col.len()).unwrap_or(0);
                let mut names = Vec::with_capacity(columns.len());
                let mut data = Vec::with_capacity(columns.len());
                for (name, values) in columns {
                    if values.len() != row_count {
                        return Err(Error::ShapeMismatch(format!(
                            "column '{}' has {} values, expected {}",
                            name,
                            values.len(),
                            row_count
                        )));
                    }
                    names.push(name);
                    data.push(values.into_iter().map(Value::normalized).collect());
                }
                Ok(Columnar {
                    data,
                    names: Some(names),
                    row_count,
                    is_series: false,
                })
            }
        }
    }
}

impl TryFrom<serde_json::Value> for FrameData {
    type Error = Error;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        FrameData::from_json(json)
    }
}

/// Optional labels, dtypes and settings for the frame constructor
#[derive(Debug, Clone, Default)]
pub struct FrameOptions {
    pub index: Option<Vec<Label>>,
    pub columns: Option<Vec<String>>,
    pub dtypes: Option<Vec<DType>>,
    pub config: FrameConfig,
    pub is_series: bool,
}

impl FrameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index<L: Into<Label>>(mut self, labels: impl IntoIterator<Item = L>) -> Self {
        self.index = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn columns<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn dtypes(mut self, dtypes: impl IntoIterator<Item = DType>) -> Self {
        self.dtypes = Some(dtypes.into_iter().collect());
        self
    }

    pub fn config(mut self, config: FrameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn series(mut self) -> Self {
        self.is_series = true;
        self
    }
}
