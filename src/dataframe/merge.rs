//! Database-style joins of two frames on shared key columns
//!
//! Each side is indexed by composite key; every matching key emits the
//! cross product of the rows sharing it, and a key present on one side only
//! is padded with missing cells for the other side.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::core::Value;
use crate::dataframe::base::DataFrame;
use crate::dataframe::key::CompositeKey;
use crate::dataframe::naming::ColumnNamer;
use crate::error::{Error, Result};

/// Join type for merge operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// Only keys present on both sides
    #[default]
    Inner,
    /// Every left key
    Left,
    /// Every right key
    Right,
    /// Every key of either side
    Outer,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "inner",
            JoinType::Left => "left",
            JoinType::Right => "right",
            JoinType::Outer => "outer",
        }
    }
}

impl Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "right" => Ok(JoinType::Right),
            "outer" => Ok(JoinType::Outer),
            other => Err(Error::unsupported(other, "merge")),
        }
    }
}

/// Key columns and join type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeOptions {
    pub on: Vec<String>,
    pub how: JoinType,
}

impl MergeOptions {
    pub fn new<S: Into<String>>(on: impl IntoIterator<Item = S>, how: JoinType) -> Self {
        MergeOptions {
            on: on.into_iter().map(Into::into).collect(),
            how,
        }
    }
}

/// Rows of one side sharing a key
#[derive(Debug)]
struct KeyEntry {
    /// Key-column cells as first seen
    comb_values: Vec<Value>,
    /// Non-key cells of each row with this key, in input order
    filters: Vec<Vec<Value>>,
}

/// One side's rows indexed by composite key
#[derive(Debug)]
struct KeyTable {
    order: Vec<CompositeKey>,
    entries: HashMap<CompositeKey, KeyEntry>,
    /// Positions of the non-key columns
    others: Vec<usize>,
}

impl KeyTable {
    fn build(df: &DataFrame, on: &[String], side: &str) -> Result<Self> {
        let key_positions = on
            .iter()
            .map(|name| {
                df.column_position(name).map_err(|_| {
                    Error::KeyNotFound(format!("column '{}' in {} frame", name, side))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let others: Vec<usize> = (0..df.column_count())
            .filter(|pos| !key_positions.contains(pos))
            .collect();

        let mut order = Vec::new();
        let mut entries: HashMap<CompositeKey, KeyEntry> = HashMap::new();
        for row in 0..df.row_count() {
            let (key, comb_values) = CompositeKey::from_row(&df.data, &key_positions, row);
            let filter: Vec<Value> = others.iter().map(|&p| df.data[p][row].clone()).collect();
            match entries.get_mut(&key) {
                Some(entry) => entry.filters.push(filter),
                None => {
                    order.push(key.clone());
                    entries.insert(
                        key,
                        KeyEntry {
                            comb_values,
                            filters: vec![filter],
                        },
                    );
                }
            }
        }

        Ok(KeyTable {
            order,
            entries,
            others,
        })
    }
}

/// Join `left` and `right` on the columns in `options.on`
///
/// Output columns are the key columns once, then the left non-key columns,
/// then the right non-key columns; a repeated name gets a `_N` suffix.
///
/// # Arguments
/// * `left` - Left DataFrame
/// * `right` - Right DataFrame
/// * `options` - Key columns and join type
///
/// # Returns
/// Merged DataFrame with a fresh positional index, or `InvalidInput` when
/// no key is given and `KeyNotFound` when a key is missing on either side
///
/// # Example
/// ```ignore
/// use ndframe::{merge, JoinType, MergeOptions};
///
/// let options = MergeOptions::new(["id"], JoinType::Left);
/// let joined = merge(&orders, &customers, &options)?;
/// ```
pub fn merge(left: &DataFrame, right: &DataFrame, options: &MergeOptions) -> Result<DataFrame> {
    if options.on.is_empty() {
        return Err(Error::InvalidInput(
            "merge requires at least one key column".to_string(),
        ));
    }
    let left_table = KeyTable::build(left, &options.on, "left")?;
    let right_table = KeyTable::build(right, &options.on, "right")?;

    let mut namer = ColumnNamer::new();
    let mut names: Vec<String> = Vec::new();
    for name in &options.on {
        names.push(namer.assign(name));
    }
    for &pos in &left_table.others {
        names.push(namer.assign(&left.columns[pos]));
    }
    for &pos in &right_table.others {
        names.push(namer.assign(&right.columns[pos]));
    }

    let keys: Vec<&CompositeKey> = match options.how {
        JoinType::Inner => left_table
            .order
            .iter()
            .filter(|key| right_table.entries.contains_key(*key))
            .collect(),
        JoinType::Left => left_table.order.iter().collect(),
        JoinType::Right => right_table.order.iter().collect(),
        JoinType::Outer => left_table
            .order
            .iter()
            .chain(
                right_table
                    .order
                    .iter()
                    .filter(|key| !left_table.entries.contains_key(*key)),
            )
            .collect(),
    };

    let left_pad = vec![vec![Value::NA; left_table.others.len()]];
    let right_pad = vec![vec![Value::NA; right_table.others.len()]];

    let mut data: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    for key in keys {
        let left_entry = left_table.entries.get(key);
        let right_entry = right_table.entries.get(key);
        let comb_values = match (left_entry, right_entry) {
            (Some(entry), _) | (None, Some(entry)) => &entry.comb_values,
            (None, None) => continue,
        };
        let left_rows = left_entry.map(|e| &e.filters).unwrap_or(&left_pad);
        let right_rows = right_entry.map(|e| &e.filters).unwrap_or(&right_pad);
        log::trace!(
            "key '{}': {} left x {} right rows",
            key,
            left_rows.len(),
            right_rows.len()
        );

        for left_row in left_rows {
            for right_row in right_rows {
                let cells = comb_values.iter().chain(left_row).chain(right_row);
                for (col, cell) in data.iter_mut().zip(cells) {
                    col.push(cell.clone());
                }
            }
        }
    }

    let merged = DataFrame::from_parts(names, data, None, left.config.clone())?;
    log::debug!(
        "{} merge on {:?}: {} x {} rows -> {} rows",
        options.how,
        options.on,
        left.row_count(),
        right.row_count(),
        merged.row_count()
    );
    Ok(merged)
}

impl DataFrame {
    /// Join with `right` on shared key columns
    pub fn merge(&self, right: &DataFrame, on: &[&str], how: JoinType) -> Result<DataFrame> {
        merge(self, right, &MergeOptions::new(on.iter().copied(), how))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataframe::{FrameData, FrameOptions};

    fn frame(columns: Vec<(&str, Vec<Value>)>) -> DataFrame {
        DataFrame::new(FrameData::from_columns(columns), FrameOptions::new()).unwrap()
    }

    #[test]
    fn test_join_type_parse() {
        assert_eq!("outer".parse::<JoinType>().unwrap(), JoinType::Outer);
        assert_eq!(JoinType::default(), JoinType::Inner);
        assert!(matches!(
            "cross".parse::<JoinType>(),
            Err(Error::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_missing_key_names_side() {
        let left = frame(vec![("k", vec![Value::Int(1)])]);
        let right = frame(vec![("j", vec![Value::Int(1)])]);
        let err = left.merge(&right, &["k"], JoinType::Inner).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(ref msg) if msg.contains("right")));
    }

    #[test]
    fn test_colliding_columns_get_suffix() {
        let left = frame(vec![
            ("k", vec![Value::Int(1)]),
            ("v", vec![Value::Int(10)]),
        ]);
        let right = frame(vec![
            ("v", vec![Value::Int(20)]),
            ("k", vec![Value::Int(1)]),
        ]);
        let merged = left.merge(&right, &["k"], JoinType::Inner).unwrap();
        assert_eq!(merged.columns(), &["k", "v", "v_1"]);
        assert_eq!(
            merged.values(),
            vec![vec![Value::Int(1), Value::Int(10), Value::Int(20)]]
        );
    }

    #[test]
    fn test_fan_out_is_cross_product() {
        let left = frame(vec![
            ("k", vec![Value::from("a"), Value::from("a")]),
            ("x", vec![Value::Int(1), Value::Int(2)]),
        ]);
        let right = frame(vec![
            ("k", vec![Value::from("a"), Value::from("a"), Value::from("b")]),
            ("y", vec![Value::Int(3), Value::Int(4), Value::Int(5)]),
        ]);
        let merged = left.merge(&right, &["k"], JoinType::Inner).unwrap();
        assert_eq!(merged.row_count(), 4);
        assert_eq!(
            merged.column_values("y").unwrap(),
            &[Value::Int(3), Value::Int(4), Value::Int(3), Value::Int(4)]
        );
    }
}
