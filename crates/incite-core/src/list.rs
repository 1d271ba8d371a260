//! Ordered citation entry list
//!
//! `CitationList` owns the ordered collection of citation entries behind a
//! citation dialog. Order is the order bubbles render in. All mutations are
//! synchronous and atomic: an operation either fully applies or, for a
//! duplicate add, fully skips that item.

use incite_domain::{CitationEntry, ReferenceInput};
use serde::{Deserialize, Serialize};

use crate::collaborators::EntrySorter;
use crate::error::{EditorError, EditorResult};

/// Lookup key for an entry: the session-local dialog id or the external
/// reference id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef<'a> {
    Dialog(&'a str),
    Reference(&'a str),
}

impl EntryRef<'_> {
    fn matches(&self, entry: &CitationEntry) -> bool {
        match self {
            EntryRef::Dialog(id) => entry.dialog_reference_id == *id,
            EntryRef::Reference(id) => entry.reference_id.as_deref() == Some(*id),
        }
    }

    fn describe(&self) -> String {
        match self {
            EntryRef::Dialog(id) => format!("dialog:{}", id),
            EntryRef::Reference(id) => format!("reference:{}", id),
        }
    }
}

/// Per-item outcome of an add operation
///
/// A skipped duplicate is a normal outcome, not an error: the dialog policy
/// is that the same item cannot be cited twice in one citation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum AddOutcome {
    /// Entry inserted; carries the assigned dialog id
    Added { dialog_reference_id: String },

    /// Input's identity duplicated an existing entry; nothing inserted
    DuplicateSkipped,
}

impl AddOutcome {
    /// The dialog id when the item was inserted
    pub fn dialog_reference_id(&self) -> Option<&str> {
        match self {
            AddOutcome::Added {
                dialog_reference_id,
            } => Some(dialog_reference_id),
            AddOutcome::DuplicateSkipped => None,
        }
    }
}

/// The ordered citation entry list
#[derive(Debug, Default)]
pub struct CitationList {
    entries: Vec<CitationEntry>,
    sort_mode: bool,
}

impl CitationList {
    /// Create an empty list with user-driven ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list in sort-mode: after every add, order is
    /// reconciled against the external bibliographic sort.
    pub fn with_sort_mode() -> Self {
        Self {
            entries: Vec::new(),
            sort_mode: true,
        }
    }

    /// Whether sort-mode is active
    pub fn sort_mode(&self) -> bool {
        self.sort_mode
    }

    /// Switch sort-mode on or off. Takes effect on the next add.
    pub fn set_sort_mode(&mut self, sort_mode: bool) {
        self.sort_mode = sort_mode;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in render order
    pub fn entries(&self) -> &[CitationEntry] {
        &self.entries
    }

    /// Entry at a list position
    pub fn entry_at(&self, index: usize) -> Option<&CitationEntry> {
        self.entries.get(index)
    }

    /// Mutable entry at a list position, for in-place field edits
    pub fn entry_at_mut(&mut self, index: usize) -> Option<&mut CitationEntry> {
        self.entries.get_mut(index)
    }

    /// Insert entries for `inputs`, contiguously starting at `at`
    /// (end-of-list when `None`).
    ///
    /// Each input whose identity duplicates a live entry is skipped unless
    /// `bypass_duplicate_check` is set; the per-item outcomes are returned
    /// in input order. When sort-mode is active and a sorter is supplied,
    /// list order is reconciled to the sorter's order after insertion,
    /// moving entries in place without recreating them.
    pub fn add_entries(
        &mut self,
        inputs: &[ReferenceInput],
        at: Option<usize>,
        bypass_duplicate_check: bool,
        sorter: Option<&dyn EntrySorter>,
    ) -> Vec<AddOutcome> {
        let mut insert_at = at.unwrap_or(self.entries.len());
        let mut outcomes = Vec::with_capacity(inputs.len());

        for input in inputs {
            if !bypass_duplicate_check && self.contains_identity(input) {
                outcomes.push(AddOutcome::DuplicateSkipped);
                continue;
            }
            let entry = CitationEntry::from_input(input);
            outcomes.push(AddOutcome::Added {
                dialog_reference_id: entry.dialog_reference_id.clone(),
            });
            self.entries.insert(insert_at, entry);
            insert_at += 1;
        }

        if self.sort_mode {
            if let Some(sorter) = sorter {
                self.reconcile_sorted(sorter);
            }
        }

        outcomes
    }

    /// Reorder the list to the sorter's returned order, preserving entry
    /// identity: entries are moved, never destroyed and recreated. Entries
    /// the sorter does not mention keep their relative order at the end.
    /// Idempotent for an unchanged upstream order.
    pub fn reconcile_sorted(&mut self, sorter: &dyn EntrySorter) {
        let order = sorter.sort_order(&self.entries);
        let mut reordered = Vec::with_capacity(self.entries.len());
        for dialog_id in &order {
            if let Some(pos) = self
                .entries
                .iter()
                .position(|e| e.dialog_reference_id == *dialog_id)
            {
                reordered.push(self.entries.remove(pos));
            }
        }
        reordered.append(&mut self.entries);
        self.entries = reordered;
    }

    /// Remove the entry matching `entry_ref`.
    ///
    /// A miss is a caller bug and returns [`EditorError::NotFound`].
    pub fn remove_entry(&mut self, entry_ref: EntryRef<'_>) -> EditorResult<CitationEntry> {
        match self.entries.iter().position(|e| entry_ref.matches(e)) {
            Some(pos) => Ok(self.entries.remove(pos)),
            None => Err(EditorError::NotFound(entry_ref.describe())),
        }
    }

    /// Splice the entry with `dialog_reference_id` to `new_index`.
    ///
    /// Returns `false` without touching the list when the id is unknown or
    /// the entry is already at `new_index`; UI events may race with list
    /// mutation, so an unknown id is not an error here. `new_index` must be
    /// in range for the list after removal of the source entry; passing an
    /// out-of-range index is a caller bug, not clamped here.
    pub fn move_entry(&mut self, dialog_reference_id: &str, new_index: usize) -> bool {
        let src = match self
            .entries
            .iter()
            .position(|e| e.dialog_reference_id == dialog_reference_id)
        {
            Some(src) => src,
            None => return false,
        };
        if src == new_index {
            return false;
        }
        let entry = self.entries.remove(src);
        self.entries.insert(new_index, entry);
        true
    }

    /// Look up an entry by either identifier
    pub fn get_entry(&self, entry_ref: EntryRef<'_>) -> Option<&CitationEntry> {
        self.entries.iter().find(|e| entry_ref.matches(e))
    }

    /// Mutable lookup by either identifier
    pub fn get_entry_mut(&mut self, entry_ref: EntryRef<'_>) -> Option<&mut CitationEntry> {
        self.entries.iter_mut().find(|e| entry_ref.matches(e))
    }

    /// Position of an entry by either identifier
    pub fn index_of(&self, entry_ref: EntryRef<'_>) -> Option<usize> {
        self.entries.iter().position(|e| entry_ref.matches(e))
    }

    /// True when an entry other than one identity-equal to `candidate`
    /// shares the candidate's primary-author and title strings. Used by
    /// dialogs to warn before a bypassed add.
    pub fn potential_duplicate_exists(&self, candidate: &ReferenceInput) -> bool {
        let identity = candidate.identity();
        self.entries.iter().any(|e| {
            if e.identity().matches(&identity) {
                return false;
            }
            match (
                &e.primary_author,
                &e.title,
                &candidate.primary_author,
                &candidate.title,
            ) {
                (Some(a1), Some(t1), Some(a2), Some(t2)) => {
                    a1.eq_ignore_ascii_case(a2) && t1.eq_ignore_ascii_case(t2)
                }
                _ => false,
            }
        })
    }

    /// Set or clear the transient highlight flag on an entry. Lenient like
    /// `move_entry`: an unknown id returns `false`.
    pub fn set_selected(&mut self, entry_ref: EntryRef<'_>, selected: bool) -> bool {
        match self.get_entry_mut(entry_ref) {
            Some(entry) => {
                entry.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Clear the highlight flag on every entry.
    pub fn clear_selection(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
    }

    fn contains_identity(&self, input: &ReferenceInput) -> bool {
        let identity = input.identity();
        self.entries.iter().any(|e| e.identity().matches(&identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str) -> ReferenceInput {
        ReferenceInput::from_reference_id(id)
    }

    fn list_of(ids: &[&str]) -> CitationList {
        let mut list = CitationList::new();
        let inputs: Vec<ReferenceInput> = ids.iter().map(|id| input(id)).collect();
        list.add_entries(&inputs, None, false, None);
        list
    }

    fn reference_ids(list: &CitationList) -> Vec<String> {
        list.entries()
            .iter()
            .map(|e| e.reference_id.clone().unwrap())
            .collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let list = list_of(&["a", "b", "c"]);
        assert_eq!(reference_ids(&list), ["a", "b", "c"]);
    }

    #[test]
    fn test_add_at_index_is_contiguous() {
        let mut list = list_of(&["a", "d"]);
        list.add_entries(&[input("b"), input("c")], Some(1), false, None);
        assert_eq!(reference_ids(&list), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_duplicate_add_is_skipped() {
        let mut list = list_of(&["a", "b"]);
        let outcomes = list.add_entries(&[input("a")], None, false, None);
        assert_eq!(outcomes, [AddOutcome::DuplicateSkipped]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_duplicate_add_with_bypass() {
        let mut list = list_of(&["a"]);
        let outcomes = list.add_entries(&[input("a")], None, true, None);
        assert!(matches!(outcomes[0], AddOutcome::Added { .. }));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_duplicate_by_content_identity() {
        let mut list = CitationList::new();
        list.add_entries(
            &[ReferenceInput::untracked("Smith", "Machine Learning")],
            None,
            false,
            None,
        );
        let outcomes = list.add_entries(
            &[ReferenceInput::untracked("smith", "machine learning")],
            None,
            false,
            None,
        );
        assert_eq!(outcomes, [AddOutcome::DuplicateSkipped]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut list = list_of(&["a", "b"]);
        let before = reference_ids(&list);
        let outcomes = list.add_entries(&[input("c")], None, false, None);
        let id = outcomes[0].dialog_reference_id().unwrap().to_string();
        list.remove_entry(EntryRef::Dialog(&id)).unwrap();
        assert_eq!(reference_ids(&list), before);
    }

    #[test]
    fn test_remove_unknown_is_an_error() {
        let mut list = list_of(&["a"]);
        let err = list.remove_entry(EntryRef::Dialog("nope")).unwrap_err();
        assert!(matches!(err, EditorError::NotFound(_)));
    }

    #[test]
    fn test_remove_by_reference_id() {
        let mut list = list_of(&["a", "b"]);
        let removed = list.remove_entry(EntryRef::Reference("a")).unwrap();
        assert_eq!(removed.reference_id.as_deref(), Some("a"));
        assert_eq!(reference_ids(&list), ["b"]);
    }

    #[test]
    fn test_move_to_same_index_is_a_noop() {
        let mut list = list_of(&["a", "b", "c"]);
        let id = list.entries()[1].dialog_reference_id.clone();
        assert!(!list.move_entry(&id, 1));
        assert_eq!(reference_ids(&list), ["a", "b", "c"]);
    }

    #[test]
    fn test_move_first_to_last() {
        let mut list = list_of(&["a", "b", "c"]);
        let id = list.entries()[0].dialog_reference_id.clone();
        assert!(list.move_entry(&id, 2));
        assert_eq!(reference_ids(&list), ["b", "c", "a"]);
    }

    #[test]
    fn test_move_unknown_id_is_a_noop() {
        let mut list = list_of(&["a", "b"]);
        assert!(!list.move_entry("nope", 0));
        assert_eq!(reference_ids(&list), ["a", "b"]);
    }

    #[test]
    fn test_lookup_by_either_id() {
        let list = list_of(&["a", "b"]);
        let dialog_id = list.entries()[1].dialog_reference_id.clone();
        assert_eq!(list.index_of(EntryRef::Reference("b")), Some(1));
        assert_eq!(list.index_of(EntryRef::Dialog(&dialog_id)), Some(1));
        assert!(list.get_entry(EntryRef::Reference("z")).is_none());
    }

    #[test]
    fn test_potential_duplicate_excludes_identity_equal() {
        let mut list = CitationList::new();
        list.add_entries(
            &[ReferenceInput::from_reference_id("a")
                .with_author("Smith")
                .with_title("Machine Learning")],
            None,
            false,
            None,
        );

        // Same underlying item: not a "potential" duplicate, it is the item.
        let same = ReferenceInput::from_reference_id("a")
            .with_author("Smith")
            .with_title("Machine Learning");
        assert!(!list.potential_duplicate_exists(&same));

        // Different identity, same author+title: flagged.
        let lookalike = ReferenceInput::from_reference_id("b")
            .with_author("Smith")
            .with_title("Machine Learning");
        assert!(list.potential_duplicate_exists(&lookalike));
    }

    #[test]
    fn test_selection_flags() {
        let mut list = list_of(&["a", "b"]);
        let id = list.entries()[0].dialog_reference_id.clone();
        assert!(list.set_selected(EntryRef::Dialog(&id), true));
        assert!(list.entries()[0].selected);
        list.clear_selection();
        assert!(!list.entries()[0].selected);
        assert!(!list.set_selected(EntryRef::Dialog("nope"), true));
    }
}
