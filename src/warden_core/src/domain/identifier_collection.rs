use serde::{Deserialize, Serialize};

/// Ordered set of `(source realm, identifier)` pairs describing one subject.
///
/// Pairs are unique and keep insertion order; the first pair is the primary
/// identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierCollection {
    entries: Vec<(String, String)>,
}

impl IdentifierCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_source(source_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        let mut collection = Self::new();
        collection.add(source_name, identifier);
        collection
    }

    /// Returns `false` when the pair was already present.
    pub fn add(&mut self, source_name: impl Into<String>, identifier: impl Into<String>) -> bool {
        let pair = (source_name.into(), identifier.into());
        if self.entries.contains(&pair) {
            return false;
        }
        self.entries.push(pair);
        true
    }

    pub fn add_collection(&mut self, other: &IdentifierCollection) {
        for (source, identifier) in other.iter() {
            self.add(source, identifier);
        }
    }

    pub fn primary_identifier(&self) -> Option<&str> {
        self.entries.first().map(|(_, identifier)| identifier.as_str())
    }

    pub fn primary_source(&self) -> Option<&str> {
        self.entries.first().map(|(source, _)| source.as_str())
    }

    pub fn from_realm<'a>(&'a self, source_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(source, _)| source == source_name)
            .map(|(_, identifier)| identifier.as_str())
    }

    /// Distinct source names in first-seen order.
    pub fn source_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (source, _) in &self.entries {
            if !names.contains(&source.as_str()) {
                names.push(source);
            }
        }
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, identifier)| (source.as_str(), identifier.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
