//! Request handlers for the document service.
//!
//! Handlers validate request shape, delegate to [`DocumentService`]
//! (`state.documents`), and map errors via
//! [`AppError`](crate::error::AppError).
//!
//! [`DocumentService`]: crate::service::DocumentService

pub mod collaborators;
pub mod documents;
