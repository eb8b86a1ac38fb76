// WHY: a line is reported once per category no matter how many times a
// pattern matches it, so the store deduplicates on insert

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A single reported anomaly anchored to one source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub category: String,
    /// 0-based index into the source lines
    pub line_index: usize,
    pub line_text: String,
    /// Byte column of the first match on the line; not part of the dedup key
    #[serde(skip)]
    pub column: usize,
}

impl Finding {
    pub fn new(category: impl Into<String>, line_index: usize, line_text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            line_index,
            line_text: line_text.into(),
            column: 0,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    fn key(&self) -> (String, usize, String) {
        (self.category.clone(), self.line_index, self.line_text.clone())
    }
}

/// Category → findings, in insertion order within a category.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FindingStore {
    by_category: BTreeMap<String, Vec<Finding>>,
    #[serde(skip)]
    seen: HashSet<(String, usize, String)>,
}

impl FindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding. Returns false if the same key was already present.
    pub fn insert(&mut self, finding: Finding) -> bool {
        if !self.seen.insert(finding.key()) {
            return false;
        }
        self.by_category
            .entry(finding.category.clone())
            .or_default()
            .push(finding);
        true
    }

    pub fn record(&mut self, category: &str, line_index: usize, line_text: &str) -> bool {
        self.insert(Finding::new(category, line_index, line_text))
    }

    pub fn extend<I: IntoIterator<Item = Finding>>(&mut self, findings: I) {
        for finding in findings {
            self.insert(finding);
        }
    }

    /// Categories in sorted order with their findings.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.by_category.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, category: &str) -> &[Finding] {
        self.by_category.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.by_category.contains_key(category)
    }

    /// Total findings across all categories.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_on_full_key() {
        let mut store = FindingStore::new();
        assert!(store.record("spaced dash", 3, "a - b"));
        assert!(!store.record("spaced dash", 3, "a - b"));
        assert!(store.record("spaced dash", 4, "c - d"));
        assert!(store.record("mixed hyphen-dash", 3, "a - b"));
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("spaced dash").len(), 2);
    }

    #[test]
    fn test_column_not_part_of_key() {
        let mut store = FindingStore::new();
        assert!(store.insert(Finding::new("x", 1, "line").with_column(0)));
        assert!(!store.insert(Finding::new("x", 1, "line").with_column(3)));
        assert_eq!(store.get("x")[0].column, 0);
    }

    #[test]
    fn test_categories_sorted() {
        let mut store = FindingStore::new();
        store.record("zeta", 0, "z");
        store.record("alpha", 0, "a");
        let names: Vec<&str> = store.categories().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(store.get("missing").is_empty());
    }

    #[test]
    fn test_serializes_as_map() {
        let mut store = FindingStore::new();
        store.record("spaced dash", 2, "a - b");
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["spaced dash"][0]["line_index"], 2);
        assert_eq!(json["spaced dash"][0]["line_text"], "a - b");
    }
}
