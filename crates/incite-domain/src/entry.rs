//! Citation entry and insertion payload types
//!
//! A `CitationEntry` is one element of the ordered citation list: a pointer
//! to a bibliographic item plus the citation-specific metadata (locator,
//! prefix/suffix, suppress-author) that a citation processor consumes.
//! Entries are created from a `ReferenceInput`, the payload a host hands to
//! the list model when the user picks a search result or drops an item.

use serde::{Deserialize, Serialize};

/// Default locator label applied when a bare locator value is set without
/// an explicit label.
pub const DEFAULT_LOCATOR_LABEL: &str = "page";

/// One citation in the ordered bubble list
///
/// List order is significant: it is the order in which entries render as
/// citation bubbles. `dialog_reference_id` correlates the entry with its
/// visual representation and is unique for the lifetime of a session; it is
/// never reused after the entry is removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct CitationEntry {
    /// Identity of the underlying bibliographic item, assigned externally.
    /// Absent for items the host cannot (yet) resolve to its store.
    pub reference_id: Option<String>,

    /// Session-local correlation token between this entry and its bubble.
    pub dialog_reference_id: String,

    /// Locator type tag (e.g. "page", "chapter")
    pub label: Option<String>,

    /// Locator value (e.g. "10", "10-15")
    pub locator: Option<String>,

    /// Free text rendered before the citation
    pub prefix: Option<String>,

    /// Free text rendered after the citation
    pub suffix: Option<String>,

    /// Omit the author from the rendered citation
    pub suppress_author: bool,

    /// Primary author string, carried for fallback identity comparison
    /// and display-string construction
    pub primary_author: Option<String>,

    /// Display title, carried for the same reasons
    pub title: Option<String>,

    /// Transient UI-highlight flag; not part of persisted identity
    #[serde(skip)]
    pub selected: bool,
}

impl CitationEntry {
    /// Create an entry from a host-supplied insertion payload, assigning a
    /// fresh `dialog_reference_id`.
    pub fn from_input(input: &ReferenceInput) -> Self {
        let mut entry = Self {
            reference_id: input.reference_id.clone(),
            dialog_reference_id: uuid::Uuid::new_v4().to_string(),
            label: None,
            locator: None,
            prefix: input.prefix.clone(),
            suffix: input.suffix.clone(),
            suppress_author: input.suppress_author,
            primary_author: input.primary_author.clone(),
            title: input.title.clone(),
            selected: false,
        };
        if let Some(ref value) = input.locator {
            entry.set_locator(value.clone(), input.label.clone());
        }
        entry
    }

    /// Set the locator value and label.
    ///
    /// A bare value without an explicit label defaults to "page".
    pub fn set_locator(&mut self, value: impl Into<String>, label: Option<String>) {
        self.locator = Some(value.into());
        self.label = Some(label.unwrap_or_else(|| DEFAULT_LOCATOR_LABEL.to_string()));
    }

    /// Clear the locator value and its label.
    pub fn clear_locator(&mut self) {
        self.locator = None;
        self.label = None;
    }

    /// Builder method to set the prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builder method to set the suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Builder method to set suppress-author
    pub fn with_suppress_author(mut self, suppress: bool) -> Self {
        self.suppress_author = suppress;
        self
    }

    /// The identity used by the duplicate-rejection invariant.
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity::of(
            self.reference_id.as_deref(),
            self.primary_author.as_deref(),
            self.title.as_deref(),
        )
    }

    /// True when this entry and `other` share both primary-author and
    /// display-title strings (case-insensitive). Used for the potential-
    /// duplicate check, which is looser than identity.
    pub fn shares_display_identity(&self, other: &CitationEntry) -> bool {
        match (
            &self.primary_author,
            &self.title,
            &other.primary_author,
            &other.title,
        ) {
            (Some(a1), Some(t1), Some(a2), Some(t2)) => {
                a1.eq_ignore_ascii_case(a2) && t1.eq_ignore_ascii_case(t2)
            }
            _ => false,
        }
    }

    /// Serialize to JSON for cross-boundary transfer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Identity of a citation entry for duplicate rejection
///
/// Two entries collide when they carry the same external `reference_id`,
/// or, when neither has one, when both author and title match
/// case-insensitively. Entries with neither an id nor both content fields
/// never collide with anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum EntryIdentity {
    /// Identified by the external reference id
    ById(String),

    /// Identified by primary author + title
    ByContent { author: String, title: String },

    /// Not identifiable; matches nothing
    Unidentified,
}

impl EntryIdentity {
    /// Derive the identity from an entry's or input's fields.
    pub fn of(reference_id: Option<&str>, author: Option<&str>, title: Option<&str>) -> Self {
        if let Some(id) = reference_id {
            return Self::ById(id.to_string());
        }
        match (author, title) {
            (Some(a), Some(t)) => Self::ByContent {
                author: a.to_lowercase(),
                title: t.to_lowercase(),
            },
            _ => Self::Unidentified,
        }
    }

    /// Invariant comparison: same id, or same normalized author+title.
    pub fn matches(&self, other: &EntryIdentity) -> bool {
        match (self, other) {
            (Self::ById(a), Self::ById(b)) => a == b,
            (
                Self::ByContent { author, title },
                Self::ByContent {
                    author: a2,
                    title: t2,
                },
            ) => author == a2 && title == t2,
            _ => false,
        }
    }
}

/// Host-supplied payload for inserting one entry into the list
///
/// Produced from a search-result selection, a drag-dropped item, or typed
/// text that resolved to an item. The optional locator fields let an edit
/// session stage a parsed locator to be attached on insertion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ReferenceInput {
    pub reference_id: Option<String>,
    pub primary_author: Option<String>,
    pub title: Option<String>,
    pub locator: Option<String>,
    pub label: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub suppress_author: bool,
}

impl ReferenceInput {
    /// Input for an item known to the host's store
    pub fn from_reference_id(reference_id: impl Into<String>) -> Self {
        Self {
            reference_id: Some(reference_id.into()),
            ..Default::default()
        }
    }

    /// Input for an item the host cannot resolve to its store; identity
    /// falls back to author + title.
    pub fn untracked(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            primary_author: Some(author.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Builder method to set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.primary_author = Some(author.into());
        self
    }

    /// Builder method to set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to stage a locator to attach on insertion
    pub fn with_locator(mut self, value: impl Into<String>, label: Option<String>) -> Self {
        self.locator = Some(value.into());
        self.label = label;
        self
    }

    /// The identity this input would take as an entry.
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity::of(
            self.reference_id.as_deref(),
            self.primary_author.as_deref(),
            self.title.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_assigns_fresh_dialog_id() {
        let input = ReferenceInput::from_reference_id("item-1");
        let a = CitationEntry::from_input(&input);
        let b = CitationEntry::from_input(&input);
        assert_ne!(a.dialog_reference_id, b.dialog_reference_id);
        assert_eq!(a.reference_id.as_deref(), Some("item-1"));
    }

    #[test]
    fn test_bare_locator_defaults_to_page() {
        let input = ReferenceInput::from_reference_id("item-1").with_locator("10", None);
        let entry = CitationEntry::from_input(&input);
        assert_eq!(entry.locator.as_deref(), Some("10"));
        assert_eq!(entry.label.as_deref(), Some("page"));
    }

    #[test]
    fn test_explicit_label_is_kept() {
        let mut entry = CitationEntry::from_input(&ReferenceInput::from_reference_id("item-1"));
        entry.set_locator("4", Some("chapter".to_string()));
        assert_eq!(entry.label.as_deref(), Some("chapter"));
    }

    #[test]
    fn test_identity_by_reference_id() {
        let a = CitationEntry::from_input(&ReferenceInput::from_reference_id("item-1"));
        let b = CitationEntry::from_input(&ReferenceInput::from_reference_id("item-1"));
        let c = CitationEntry::from_input(&ReferenceInput::from_reference_id("item-2"));
        assert!(a.identity().matches(&b.identity()));
        assert!(!a.identity().matches(&c.identity()));
    }

    #[test]
    fn test_identity_fallback_is_case_insensitive() {
        let a = ReferenceInput::untracked("Smith", "Machine Learning");
        let b = ReferenceInput::untracked("smith", "machine learning");
        assert!(a.identity().matches(&b.identity()));
    }

    #[test]
    fn test_unidentified_never_matches() {
        let a = ReferenceInput::default();
        let b = ReferenceInput::default();
        assert!(!a.identity().matches(&b.identity()));
    }

    #[test]
    fn test_json_round_trip_skips_selected() {
        let mut entry = CitationEntry::from_input(
            &ReferenceInput::from_reference_id("item-1").with_locator("10-15", None),
        );
        entry.selected = true;
        let json = entry.to_json().unwrap();
        let back = CitationEntry::from_json(&json).unwrap();
        assert!(!back.selected);
        assert_eq!(back.locator, entry.locator);
        assert_eq!(back.dialog_reference_id, entry.dialog_reference_id);
    }
}
