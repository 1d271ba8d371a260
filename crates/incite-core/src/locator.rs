//! Locator extraction from typed text
//!
//! When the user types free text in a gap between citation bubbles, the
//! trailing part of it may encode a locator ("p. 10", "ch. 3", 'sec
//! "analysis"'). `parse_locator` detects that and extracts the canonical
//! label, the value, and the exact substring consumed, so the caller can
//! strip the locator and use the rest as a search query.

use incite_domain::{LocatorLabelTable, DEFAULT_LOCATOR_LABEL};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // A string that is nothing but digits and dashes is a page locator.
    // 4-digit years fall under this rule on purpose: pinned after a bubble,
    // a bare number is far more likely a page than a year.
    static ref NUMERIC_REGEX: Regex = Regex::new(r"^[0-9–-]+$").unwrap();

    // Trailing page pattern: "p."/"pp." after start-of-text, a comma, or
    // whitespace, or a bare colon, then a numeric value.
    static ref PAGE_REGEX: Regex = Regex::new(
        r"(?i)(?:(?:^|,\s*|\s+)pp?\.?\s*|:\s*)(?P<value>[0-9–-]+)\s*$"
    ).unwrap();

    // Generalized label pattern: a leading word, an optional ":" or "."
    // separator, then a quoted phrase or a bare trailing word. The word is
    // resolved against the label table.
    static ref LABEL_REGEX: Regex = Regex::new(
        r#"^\s*(?P<word>[^\s:."]+)\s*[:.]?\s*(?:"(?P<quoted>[^"]+)"|(?P<bare>[^\s"]+))\s*$"#
    ).unwrap();
}

/// A locator detected in typed text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct LocatorMatch {
    /// Canonical locator label (e.g. "page")
    pub label: String,

    /// Locator value (e.g. "10", "10-15")
    pub value: String,

    /// True when the match consumed the entire input
    pub matches_whole_string: bool,

    /// The exact substring consumed by the match
    pub consumed_span: String,

    /// Byte offset where the consumed substring starts in the input
    pub start_index: u32,

    /// Byte offset one past the end of the consumed substring
    pub end_index: u32,
}

/// Extract a locator from free-form trailing text.
///
/// Pure function, total over all inputs; unrecognized or empty text yields
/// `None`. Rules are tried in order: whole-string numeric, trailing page
/// pattern, generalized label against `labels`.
pub fn parse_locator(text: &str, labels: &LocatorLabelTable) -> Option<LocatorMatch> {
    if text.is_empty() {
        return None;
    }

    if NUMERIC_REGEX.is_match(text) {
        return Some(LocatorMatch {
            label: DEFAULT_LOCATOR_LABEL.to_string(),
            value: text.to_string(),
            matches_whole_string: true,
            consumed_span: text.to_string(),
            start_index: 0,
            end_index: text.len() as u32,
        });
    }

    if let Some(caps) = PAGE_REGEX.captures(text) {
        let whole = caps.get(0)?;
        return Some(LocatorMatch {
            label: DEFAULT_LOCATOR_LABEL.to_string(),
            value: caps["value"].to_string(),
            matches_whole_string: whole.start() == 0 && whole.end() == text.len(),
            consumed_span: whole.as_str().to_string(),
            start_index: whole.start() as u32,
            end_index: whole.end() as u32,
        });
    }

    if let Some(caps) = LABEL_REGEX.captures(text) {
        if let Some(canonical) = labels.resolve(&caps["word"]) {
            let value = caps
                .name("quoted")
                .or_else(|| caps.name("bare"))
                .map(|m| m.as_str().to_string())?;
            let whole = caps.get(0)?;
            return Some(LocatorMatch {
                label: canonical.to_string(),
                value,
                matches_whole_string: whole.start() == 0 && whole.end() == text.len(),
                consumed_span: whole.as_str().to_string(),
                start_index: whole.start() as u32,
                end_index: whole.end() as u32,
            });
        }
    }

    None
}
