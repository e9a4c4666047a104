use std::fmt::{self, Display};

use crate::core::{DType, Label, Value};
use crate::dataframe::{DataFrame, FrameData, FrameOptions};
use crate::error::{Error, Result};
use crate::index::Index;

/// Series: a named one-column frame
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    frame: DataFrame,
}

impl Series {
    /// Build a series; an unnamed series is called `"0"`
    pub fn new<V: Into<Value>>(
        values: impl IntoIterator<Item = V>,
        name: Option<String>,
    ) -> Result<Self> {
        let name = name.unwrap_or_else(|| "0".to_string());
        let frame = DataFrame::new(
            FrameData::from_scalars(values),
            FrameOptions::new().columns([name]).series(),
        )?;
        Ok(Series { frame })
    }

    /// Replace the row labels
    pub fn with_index<L: Into<Label>>(mut self, labels: impl IntoIterator<Item = L>) -> Result<Self> {
        self.frame.set_index(labels)?;
        Ok(self)
    }

    pub(crate) fn from_frame_unchecked(frame: DataFrame) -> Self {
        Series { frame }
    }

    pub fn values(&self) -> &[Value] {
        &self.frame.data[0]
    }

    pub fn name(&self) -> &str {
        &self.frame.columns[0]
    }

    pub fn dtype(&self) -> DType {
        self.frame.dtypes[0]
    }

    pub fn index(&self) -> &Index {
        self.frame.index()
    }

    pub fn len(&self) -> usize {
        self.frame.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a position
    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.values().get(pos)
    }

    /// Copy out as a one-column frame
    pub fn to_frame(&self) -> DataFrame {
        let mut frame = self.frame.clone();
        frame.is_series = false;
        frame
    }

    pub fn into_frame(self) -> DataFrame {
        let mut frame = self.frame;
        frame.is_series = false;
        frame
    }

    /// Borrow the underlying one-column frame
    pub fn as_frame(&self) -> &DataFrame {
        &self.frame
    }
}

impl TryFrom<DataFrame> for Series {
    type Error = Error;

    fn try_from(mut frame: DataFrame) -> Result<Self> {
        if frame.column_count() != 1 {
            return Err(Error::ShapeMismatch(format!(
                "a series holds exactly one column, found {}",
                frame.column_count()
            )));
        }
        frame.is_series = true;
        Ok(Series { frame })
    }
}

impl Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.frame, f)
    }
}
