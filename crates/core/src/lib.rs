//! Shared domain types for the coauthor document service.
//!
//! This crate has no internal dependencies so the persistence and API layers
//! can both reference the same id/timestamp aliases, error taxonomy, and
//! identity-provider seam.

pub mod error;
pub mod identity;
pub mod types;
