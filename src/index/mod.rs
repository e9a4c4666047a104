use std::collections::HashMap;

use crate::core::Label;
use crate::error::{Error, Result};

/// Row labels of a frame
///
/// Labels are unique; a label-to-position map is kept alongside the
/// ordered labels for `loc` lookups.
#[derive(Debug, Clone)]
pub struct Index {
    /// Label values in row order
    values: Vec<Label>,

    /// Label to position
    map: HashMap<Label, usize>,
}

impl Index {
    /// Build an index, rejecting duplicate labels
    pub fn new(values: Vec<Label>) -> Result<Self> {
        let mut map = HashMap::with_capacity(values.len());

        for (i, value) in values.iter().enumerate() {
            if map.insert(value.clone(), i).is_some() {
                return Err(Error::DuplicateIndex(value.to_string()));
            }
        }

        Ok(Index { values, map })
    }

    /// Default integer positions `0..len`
    pub fn range(len: usize) -> Self {
        let values: Vec<Label> = (0..len).map(Label::from).collect();
        let map = values
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect();
        Index { values, map }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a label
    pub fn get_loc(&self, key: &Label) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Label at a position
    pub fn get_value(&self, pos: usize) -> Option<&Label> {
        self.values.get(pos)
    }

    pub fn values(&self) -> &[Label] {
        &self.values
    }

    /// Labels at the given positions, as a new index
    pub(crate) fn take(&self, positions: &[usize]) -> Result<Self> {
        let labels = positions
            .iter()
            .map(|&pos| {
                self.values.get(pos).cloned().ok_or(Error::IndexOutOfBounds {
                    index: pos,
                    size: self.values.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Index::new(labels)
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = Index::new(vec![Label::from("a"), Label::from("b"), Label::from("a")]);
        assert!(matches!(result, Err(Error::DuplicateIndex(label)) if label == "a"));
    }

    #[test]
    fn test_mixed_labels_lookup() {
        let index = Index::new(vec![Label::from(10), Label::from("x")]).unwrap();
        assert_eq!(index.get_loc(&Label::from("x")), Some(1));
        assert_eq!(index.get_loc(&Label::from(10)), Some(0));
        assert_eq!(index.get_loc(&Label::from("10")), None);
    }

    #[test]
    fn test_range() {
        let index = Index::range(3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get_value(2), Some(&Label::Int(2)));
    }
}
