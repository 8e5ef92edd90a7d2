//! The externally maintained given-name dictionary.

use crate::person::Gender;
use std::collections::HashMap;

/// Mapping from a normalized given name to its gender code.
///
/// Keys must already be diacritic-folded and lower-cased; the loader is
/// responsible for normalization, this type only stores and answers
/// lookups. The engine never derives entries itself.
#[derive(Debug, Clone, Default)]
pub struct NameDictionary {
    entries: HashMap<String, Gender>,
}

impl NameDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from pre-normalized `(name, gender)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Gender)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, gender)| (name.into(), gender))
                .collect(),
        }
    }

    /// Looks up a normalized given name.
    pub fn lookup(&self, normalized_name: &str) -> Option<Gender> {
        self.entries.get(normalized_name).copied()
    }

    pub fn contains(&self, normalized_name: &str) -> bool {
        self.entries.contains_key(normalized_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Gender)> {
        self.entries
            .iter()
            .map(|(name, gender)| (name.as_str(), *gender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_answers_stored_gender() {
        let dict = NameDictionary::from_entries([("jan", Gender::Male), ("anna", Gender::Female)]);
        assert_eq!(dict.lookup("jan"), Some(Gender::Male));
        assert_eq!(dict.lookup("anna"), Some(Gender::Female));
        assert_eq!(dict.lookup("jadwiga"), None);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn empty_dictionary_matches_nothing() {
        let dict = NameDictionary::new();
        assert!(dict.is_empty());
        assert!(!dict.contains("jan"));
    }
}
