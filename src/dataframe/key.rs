//! Typed composite keys for group-by and merge
//!
//! Key cells keep their type, so the string `"1"` and the number `1` never
//! land in the same group. Integral floats are folded into integers so
//! `1` and `1.0` do.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use num_traits::ToPrimitive;

use crate::core::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyCell {
    NA,
    Bool(bool),
    Int(i64),
    /// bit pattern of a non-integral float
    Float(u64),
    Str(String),
}

impl From<&Value> for KeyCell {
    fn from(value: &Value) -> Self {
        match value {
            Value::NA => KeyCell::NA,
            Value::Bool(b) => KeyCell::Bool(*b),
            Value::Int(i) => KeyCell::Int(*i),
            Value::Float(f) if f.is_nan() => KeyCell::NA,
            Value::Float(f) => match f.to_i64().filter(|i| *i as f64 == *f) {
                Some(i) => KeyCell::Int(i),
                None => KeyCell::Float(f.to_bits()),
            },
            Value::Str(s) => KeyCell::Str(s.clone()),
        }
    }
}

/// Hashable tuple of key-column cells for one row
#[derive(Debug, Clone)]
pub struct CompositeKey {
    cells: Vec<KeyCell>,
    /// `_`-joined rendering, kept for messages and `Display`
    label: String,
}

impl CompositeKey {
    pub fn new(values: &[Value]) -> Self {
        let label = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("_");
        CompositeKey {
            cells: values.iter().map(KeyCell::from).collect(),
            label,
        }
    }

    /// Key of row `row` over the given column positions
    pub(crate) fn from_row(data: &[Vec<Value>], positions: &[usize], row: usize) -> (Self, Vec<Value>) {
        let values: Vec<Value> = positions.iter().map(|&p| data[p][row].clone()).collect();
        (CompositeKey::new(&values), values)
    }
}

impl PartialEq for CompositeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for CompositeKey {}

impl Hash for CompositeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_number_do_not_collide() {
        let a = CompositeKey::new(&[Value::from("1"), Value::Int(2)]);
        let b = CompositeKey::new(&[Value::Int(1), Value::Int(2)]);
        assert_ne!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_integral_float_matches_int() {
        assert_eq!(
            CompositeKey::new(&[Value::Float(3.0)]),
            CompositeKey::new(&[Value::Int(3)])
        );
        assert_ne!(
            CompositeKey::new(&[Value::Float(3.5)]),
            CompositeKey::new(&[Value::Int(3)])
        );
    }

    #[test]
    fn test_missing_cells_match() {
        assert_eq!(
            CompositeKey::new(&[Value::NA, Value::from("x")]),
            CompositeKey::new(&[Value::NA, Value::from("x")])
        );
    }
}
