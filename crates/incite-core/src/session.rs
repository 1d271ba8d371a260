//! Edit session control
//!
//! An `EditSession` mediates between "the user is typing free text in a gap
//! between bubbles" and "the list model is being mutated". It tracks one
//! conceptual edit position at a time (an index into the bubble+gap
//! sequence), stages a locator parsed out of typed text, and applies the
//! resulting mutation: merge into the preceding entry, or insert the entry
//! a search eventually produces.
//!
//! State machine: Idle → Typing → (Resolved | Merged). A terminal state is
//! equivalent to Idle for starting the next edit; both terminal transitions
//! clear staged-locator state.

use incite_domain::{LocatorLabelTable, ReferenceInput};
use serde::{Deserialize, Serialize};

use crate::collaborators::EntrySorter;
use crate::list::{AddOutcome, CitationList};
use crate::locator::{parse_locator, LocatorMatch};

/// Where the session is in one edit cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum SessionState {
    /// No edit in progress
    Idle,

    /// The user is typing in a gap; a commit or selection is expected
    Typing,

    /// Last commit created a new entry
    Resolved,

    /// Last commit amended the preceding entry's locator in place
    Merged,
}

/// Result of committing typed text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum CommitOutcome {
    /// The text was entirely a locator and was merged into the entry
    /// preceding the gap; no new entry was created.
    Merged { dialog_reference_id: String },

    /// The text is (or contains) a search query; run it and feed a
    /// selection back through [`EditSession::select_reference`]. Any
    /// locator parsed out of the text is staged for that selection.
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StagedLocator {
    label: String,
    value: String,
}

/// One citation-editing session: the list plus the in-flight edit state
///
/// Each dialog owns its own session; sessions share nothing.
#[derive(Debug)]
pub struct EditSession {
    list: CitationList,
    state: SessionState,
    gap_index: Option<usize>,
    staged_locator: Option<StagedLocator>,
}

impl EditSession {
    /// Start a session over an existing list (possibly pre-populated from
    /// a citation being re-edited).
    pub fn new(list: CitationList) -> Self {
        Self {
            list,
            state: SessionState::Idle,
            gap_index: None,
            staged_locator: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The list under edit
    pub fn list(&self) -> &CitationList {
        &self.list
    }

    /// Mutable access for direct reorder/delete/field edits
    pub fn list_mut(&mut self) -> &mut CitationList {
        &mut self.list
    }

    /// Consume the session, yielding the final list
    pub fn into_list(self) -> CitationList {
        self.list
    }

    /// The user put the caret into the gap at `gap_index` (0 = before the
    /// first bubble, `list.len()` = after the last) and started typing.
    pub fn begin_typing(&mut self, gap_index: usize) {
        self.state = SessionState::Typing;
        self.gap_index = Some(gap_index);
    }

    /// Commit the text typed in the current gap.
    ///
    /// A locator match consuming the entire text, with a bubble directly
    /// before the gap, amends that entry in place and creates nothing. Any
    /// other locator match is stripped from the text and staged; the
    /// residual text is the search query. No match: the whole text is the
    /// query.
    pub fn commit_text(&mut self, text: &str, labels: &LocatorLabelTable) -> CommitOutcome {
        let gap_index = self.gap_index.unwrap_or(self.list.len());
        let parsed = parse_locator(text, labels);

        if let Some(ref m) = parsed {
            if m.matches_whole_string && gap_index > 0 && !self.list.is_empty() {
                // A gap index past the end still merges into the last entry.
                let target = (gap_index - 1).min(self.list.len() - 1);
                if let Some(entry) = self.list.entry_at_mut(target) {
                    entry.set_locator(m.value.clone(), Some(m.label.clone()));
                    let dialog_reference_id = entry.dialog_reference_id.clone();
                    self.staged_locator = None;
                    self.state = SessionState::Merged;
                    return CommitOutcome::Merged {
                        dialog_reference_id,
                    };
                }
            }
        }

        self.stage_and_search(text, parsed)
    }

    /// The user picked a search result for the current gap. Inserts it at
    /// the gap index, attaching any staged locator, and completes the edit
    /// cycle.
    pub fn select_reference(
        &mut self,
        mut input: ReferenceInput,
        sorter: Option<&dyn EntrySorter>,
    ) -> AddOutcome {
        if let Some(staged) = self.staged_locator.take() {
            input.locator = Some(staged.value);
            input.label = Some(staged.label);
        }
        let at = self.gap_index.map(|g| g.min(self.list.len()));
        let mut outcomes = self.list.add_entries(&[input], at, false, sorter);
        if let Some(g) = self.gap_index.as_mut() {
            if matches!(outcomes[0], AddOutcome::Added { .. }) {
                *g += 1;
            }
        }
        self.state = SessionState::Resolved;
        outcomes.remove(0)
    }

    /// Abandon the in-flight edit, dropping any staged locator.
    pub fn cancel(&mut self) {
        self.staged_locator = None;
        self.gap_index = None;
        self.state = SessionState::Idle;
    }

    fn stage_and_search(&mut self, text: &str, parsed: Option<LocatorMatch>) -> CommitOutcome {
        // Splice the consumed span out by its offsets; the same substring
        // may also occur earlier in the text.
        let query = match &parsed {
            Some(m) => {
                let mut residual = String::with_capacity(text.len());
                residual.push_str(&text[..m.start_index as usize]);
                residual.push_str(&text[m.end_index as usize..]);
                residual.trim().to_string()
            }
            None => text.trim().to_string(),
        };
        self.staged_locator = parsed.map(|m| StagedLocator {
            label: m.label,
            value: m.value,
        });
        self.state = SessionState::Typing;
        CommitOutcome::Search { query }
    }
}
