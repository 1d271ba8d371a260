//! Error types for citation-list editing

use thiserror::Error;

/// Errors surfaced by the list model and edit sessions
///
/// Duplicate insertion attempts are not errors; they are reported as
/// [`crate::list::AddOutcome::DuplicateSkipped`]. A failed remove is an
/// error because it indicates a caller bug (the id was never handed out or
/// the entry was already removed).
#[derive(Debug, Error)]
pub enum EditorError {
    /// Entry lookup by id found nothing
    #[error("Entry not found: {0}")]
    NotFound(String),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
