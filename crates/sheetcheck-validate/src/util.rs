//! Utility types for validation.

use std::collections::HashMap;

/// Resolves rule column names to dataset column positions.
///
/// Matching is exact unless built case-insensitive, in which case names are
/// compared by their ASCII uppercase form. When two headers collide under
/// that form the first one wins.
#[derive(Debug, Clone, Default)]
pub struct ColumnLookup {
    /// Maps lookup key -> column index
    inner: HashMap<String, usize>,
    case_insensitive: bool,
}

impl ColumnLookup {
    pub fn new<I, S>(columns: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = HashMap::new();
        for (index, name) in columns.into_iter().enumerate() {
            inner
                .entry(Self::key(name.as_ref(), case_insensitive))
                .or_insert(index);
        }
        Self {
            inner,
            case_insensitive,
        }
    }

    fn key(name: &str, case_insensitive: bool) -> String {
        if case_insensitive {
            name.to_ascii_uppercase()
        } else {
            name.to_string()
        }
    }

    /// Position of the dataset column matching `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.inner
            .get(&Self::key(name, self.case_insensitive))
            .copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lookup() {
        let lookup = ColumnLookup::new(["Name", "Age"], false);
        assert_eq!(lookup.get("Age"), Some(1));
        assert!(!lookup.contains("age"));
    }

    #[test]
    fn case_insensitive_lookup() {
        let lookup = ColumnLookup::new(["Name", "Age", "AGE"], true);
        assert_eq!(lookup.get("age"), Some(1));
        assert_eq!(lookup.get("NAME"), Some(0));
        assert!(!lookup.contains("Email"));
        assert_eq!(lookup.len(), 2);
    }
}
