//! Headless citation-list editing for reference managers
//!
//! This crate implements the citation-insertion editor's logic with no
//! rendering attached: an ordered list of citation entries, a locator
//! parser for free-form trailing text, and an edit-session controller that
//! turns typed text into entry mutations. A UI shell projects the list into
//! bubbles and feeds events back in; the collaborator traits in
//! [`collaborators`] are the seam to the host's item store, search, sort,
//! and display formatting.
//!
//! # Example
//!
//! ```ignore
//! use incite_core::{CitationList, EditSession};
//! use incite_domain::{LocatorLabelTable, ReferenceInput};
//!
//! let mut session = EditSession::new(CitationList::new());
//! session.begin_typing(0);
//! let outcome = session.commit_text("smith p. 12", &LocatorLabelTable::default());
//! // outcome is a search for "smith" with a staged page locator;
//! // feed a search selection back with select_reference().
//! ```

pub mod collaborators;
pub mod error;
pub mod list;
pub mod locator;
pub mod search;
pub mod session;

pub use collaborators::{
    BibliographicItem, DefaultFormatter, DisplayFormatter, EntrySorter, InMemorySearcher,
    ReferenceResolver, ReferenceSearcher, SearchFilters,
};
pub use error::{EditorError, EditorResult};
pub use list::{AddOutcome, CitationList, EntryRef};
pub use locator::{parse_locator, LocatorMatch};
pub use search::{RequestId, SearchSequencer};
pub use session::{CommitOutcome, EditSession, SessionState};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
