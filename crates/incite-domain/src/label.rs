//! Locator label vocabulary
//!
//! A locator label names the kind of pinpoint reference a locator value
//! carries ("page", "chapter", "line", ...). The table resolves the word a
//! user typed to a canonical label, matching the long form exactly or a
//! short form with its punctuation stripped, case-insensitively.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A canonical locator label and its recognized short forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct LocatorLabel {
    /// Canonical long form (e.g. "page")
    pub canonical: String,

    /// Abbreviations as conventionally written (e.g. "p.", "pp.")
    pub short_forms: Vec<String>,
}

impl LocatorLabel {
    pub fn new(canonical: impl Into<String>, short_forms: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            short_forms: short_forms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Lookup table from typed label words to canonical labels
#[derive(Debug, Clone)]
pub struct LocatorLabelTable {
    labels: Vec<LocatorLabel>,
    index: HashMap<String, String>,
}

impl LocatorLabelTable {
    /// Build a table from a caller-supplied vocabulary.
    pub fn new(labels: Vec<LocatorLabel>) -> Self {
        let mut index = HashMap::new();
        for label in &labels {
            index.insert(normalize(&label.canonical), label.canonical.clone());
            for short in &label.short_forms {
                index.insert(normalize(short), label.canonical.clone());
            }
        }
        Self { labels, index }
    }

    /// Resolve a typed word to its canonical label, or `None` if the word
    /// is not in the vocabulary.
    pub fn resolve(&self, word: &str) -> Option<&str> {
        self.index.get(&normalize(word)).map(|s| s.as_str())
    }

    /// All labels in the vocabulary
    pub fn labels(&self) -> &[LocatorLabel] {
        &self.labels
    }
}

impl Default for LocatorLabelTable {
    /// The conventional locator vocabulary.
    fn default() -> Self {
        Self::new(vec![
            LocatorLabel::new("page", &["p.", "pp."]),
            LocatorLabel::new("chapter", &["ch.", "chap."]),
            LocatorLabel::new("line", &["l.", "ll."]),
            LocatorLabel::new("verse", &["v.", "vv."]),
            LocatorLabel::new("section", &["sec.", "§"]),
            LocatorLabel::new("figure", &["fig."]),
            LocatorLabel::new("note", &["n."]),
            LocatorLabel::new("paragraph", &["para.", "par."]),
            LocatorLabel::new("part", &["pt."]),
            LocatorLabel::new("volume", &["vol."]),
            LocatorLabel::new("book", &["bk."]),
            LocatorLabel::new("column", &["col."]),
        ])
    }
}

/// Lowercase and strip the punctuation short forms are written with.
fn normalize(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != ':')
        .collect()
}
