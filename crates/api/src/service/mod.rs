//! Orchestration layer between the HTTP handlers and the persistence layer.

pub mod documents;

pub use documents::{DeleteOutcome, DocumentService};
