use std::collections::{HashMap, HashSet};

/// Hands out unique column names for group-by, merge and concat output
///
/// The first occurrence of a name keeps it bare; each later occurrence
/// gets `_N` where N counts the repeats of that name, skipping any
/// candidate that is already taken.
#[derive(Debug, Default)]
pub(crate) struct ColumnNamer {
    repeats: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl ColumnNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        let count = self.repeats.entry(name.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = format!("{}_{}", name, count);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_are_numbered() {
        let mut namer = ColumnNamer::new();
        assert_eq!(namer.assign("A"), "A");
        assert_eq!(namer.assign("B"), "B");
        assert_eq!(namer.assign("A"), "A_1");
        assert_eq!(namer.assign("A"), "A_2");
    }

    #[test]
    fn test_skips_names_already_taken() {
        let mut namer = ColumnNamer::new();
        assert_eq!(namer.assign("A_1"), "A_1");
        assert_eq!(namer.assign("A"), "A");
        assert_eq!(namer.assign("A"), "A_2");
    }
}
