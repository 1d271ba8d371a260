//! Domain types for the incite citation editor
//!
//! This crate provides the data model shared by any consumer of the
//! citation-list editing engine:
//! - CitationEntry: one citation in the ordered bubble list
//! - ReferenceInput: host-supplied payload for inserting an entry
//! - EntryIdentity: duplicate-rejection identity (external id or author+title)
//! - LocatorLabel, LocatorLabelTable: locator vocabulary ("page", "chapter", ...)

pub mod entry;
pub mod label;

pub use entry::*;
pub use label::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
