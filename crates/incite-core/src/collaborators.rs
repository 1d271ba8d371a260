//! Host collaborator interfaces
//!
//! The editor core is an in-process library consumed by a UI shell. The
//! shell's item store, bibliographic sort, library search, and bubble text
//! formatting are consumed through these traits; the core never talks to a
//! network, a citation style engine, or a rendering toolkit itself.
//!
//! `InMemorySearcher` and `DefaultFormatter` are reference implementations
//! a host can use directly or replace.

use incite_domain::{CitationEntry, ReferenceInput};
use serde::{Deserialize, Serialize};

/// Display-facing view of the bibliographic item behind an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct BibliographicItem {
    pub title: Option<String>,
    pub primary_author: Option<String>,
    pub year: Option<i32>,
}

/// Filters applied to a library search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct SearchFilters {
    /// Cap on the number of results returned
    pub limit: Option<u32>,

    /// Reference ids to omit from results (e.g. items already cited)
    pub exclude_reference_ids: Vec<String>,
}

/// Maps a citation entry to its underlying item for display-string
/// construction.
pub trait ReferenceResolver {
    fn resolve(&self, entry: &CitationEntry) -> Option<BibliographicItem>;
}

/// External bibliographic sort (citation style rules live host-side).
///
/// Returns the dialog ids of `entries` in the desired order. Ids the sorter
/// omits keep their relative order after the sorted ones; ids it invents
/// are ignored.
pub trait EntrySorter {
    fn sort_order(&self, entries: &[CitationEntry]) -> Vec<String>;
}

/// Free-text search against the host's library or document.
pub trait ReferenceSearcher {
    fn search(&self, query: &str, filters: &SearchFilters) -> Vec<ReferenceInput>;
}

/// Formats a bubble's visible text from an entry and its resolved item.
pub trait DisplayFormatter {
    fn display_string(&self, entry: &CitationEntry, item: &BibliographicItem) -> String;
}

/// Display caps for bubble text
const TITLE_DISPLAY_CAP: usize = 32;
const AFFIX_DISPLAY_CAP: usize = 10;

/// Default bubble text composition: "prefix author (year), label value
/// suffix", with the title standing in for a missing author and long parts
/// truncated for display.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl DisplayFormatter for DefaultFormatter {
    fn display_string(&self, entry: &CitationEntry, item: &BibliographicItem) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(ref prefix) = entry.prefix {
            parts.push(truncate_chars(prefix, AFFIX_DISPLAY_CAP));
        }

        let name = if entry.suppress_author {
            item.title.as_deref().map(|t| truncate_chars(t, TITLE_DISPLAY_CAP))
        } else {
            item.primary_author
                .clone()
                .or_else(|| item.title.as_deref().map(|t| truncate_chars(t, TITLE_DISPLAY_CAP)))
        };
        let name = name.unwrap_or_default();

        let head = match item.year {
            Some(year) if !name.is_empty() => format!("{} ({})", name, year),
            Some(year) => format!("({})", year),
            None => name,
        };
        if !head.is_empty() {
            parts.push(head);
        }

        if let (Some(label), Some(locator)) = (&entry.label, &entry.locator) {
            let last = parts.len().saturating_sub(1);
            if let Some(part) = parts.get_mut(last) {
                part.push(',');
            }
            parts.push(format!("{} {}", short_label(label), locator));
        }

        if let Some(ref suffix) = entry.suffix {
            parts.push(truncate_chars(suffix, AFFIX_DISPLAY_CAP));
        }

        parts.join(" ")
    }
}

/// Conventional abbreviation used in bubble text
fn short_label(label: &str) -> &str {
    match label {
        "page" => "p.",
        "chapter" => "ch.",
        "line" => "l.",
        "verse" => "v.",
        "section" => "sec.",
        "figure" => "fig.",
        "paragraph" => "para.",
        "volume" => "vol.",
        other => other,
    }
}

fn truncate_chars(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }
    let cut: String = text.chars().take(cap).collect();
    format!("{}…", cut.trim_end())
}

/// Searcher over an in-memory list of candidate references
///
/// Matches the query case-insensitively against author and title, honoring
/// the filter's exclusion list and limit. An empty query matches everything
/// not excluded.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearcher {
    candidates: Vec<ReferenceInput>,
}

impl InMemorySearcher {
    pub fn new(candidates: Vec<ReferenceInput>) -> Self {
        Self { candidates }
    }

    pub fn add_candidate(&mut self, candidate: ReferenceInput) {
        self.candidates.push(candidate);
    }
}

impl ReferenceSearcher for InMemorySearcher {
    fn search(&self, query: &str, filters: &SearchFilters) -> Vec<ReferenceInput> {
        let query_lower = query.to_lowercase();
        let mut results: Vec<ReferenceInput> = self
            .candidates
            .iter()
            .filter(|c| {
                if let Some(ref id) = c.reference_id {
                    if filters.exclude_reference_ids.contains(id) {
                        return false;
                    }
                }
                query_lower.is_empty()
                    || c.primary_author
                        .as_ref()
                        .map(|a| a.to_lowercase().contains(&query_lower))
                        .unwrap_or(false)
                    || c.title
                        .as_ref()
                        .map(|t| t.to_lowercase().contains(&query_lower))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();

        if let Some(limit) = filters.limit {
            results.truncate(limit as usize);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_locator() -> CitationEntry {
        let mut entry = CitationEntry::from_input(&ReferenceInput::from_reference_id("a"));
        entry.set_locator("10", None);
        entry
    }

    #[test]
    fn test_display_author_year_locator() {
        let entry = entry_with_locator();
        let item = BibliographicItem {
            title: Some("Machine Learning for Science".to_string()),
            primary_author: Some("Smith".to_string()),
            year: Some(2024),
        };
        let text = DefaultFormatter.display_string(&entry, &item);
        assert_eq!(text, "Smith (2024), p. 10");
    }

    #[test]
    fn test_display_suppress_author_falls_back_to_title() {
        let mut entry = entry_with_locator();
        entry.suppress_author = true;
        let item = BibliographicItem {
            title: Some("A Rather Long Title That Overruns The Display Cap".to_string()),
            primary_author: Some("Smith".to_string()),
            year: None,
        };
        let text = DefaultFormatter.display_string(&entry, &item);
        assert!(text.starts_with("A Rather Long Title"));
        assert!(text.contains('…'));
        assert!(!text.contains("Smith"));
    }

    #[test]
    fn test_display_prefix_suffix_truncation() {
        let entry = CitationEntry::from_input(&ReferenceInput::from_reference_id("a"))
            .with_prefix("see in particular")
            .with_suffix("and passim");
        let item = BibliographicItem {
            title: None,
            primary_author: Some("Jones".to_string()),
            year: Some(1999),
        };
        let text = DefaultFormatter.display_string(&entry, &item);
        assert!(text.starts_with("see in par…"));
        assert!(text.ends_with("and passim"));
    }

    #[test]
    fn test_in_memory_search() {
        let searcher = InMemorySearcher::new(vec![
            ReferenceInput::from_reference_id("a")
                .with_author("Smith")
                .with_title("Machine Learning"),
            ReferenceInput::from_reference_id("b")
                .with_author("Jones")
                .with_title("Deep Learning"),
        ]);

        let hits = searcher.search("smith", &SearchFilters::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reference_id.as_deref(), Some("a"));

        let hits = searcher.search("learning", &SearchFilters::default());
        assert_eq!(hits.len(), 2);

        let filters = SearchFilters {
            exclude_reference_ids: vec!["a".to_string()],
            ..Default::default()
        };
        let hits = searcher.search("learning", &filters);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].reference_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_search_limit() {
        let searcher = InMemorySearcher::new(vec![
            ReferenceInput::untracked("Smith", "One"),
            ReferenceInput::untracked("Smith", "Two"),
            ReferenceInput::untracked("Smith", "Three"),
        ]);
        let filters = SearchFilters {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(searcher.search("smith", &filters).len(), 2);
    }
}
