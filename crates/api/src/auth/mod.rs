//! Client for the external identity provider.
//!
//! Token issuance and verification internals belong to the provider; this
//! module only wraps its REST interface behind the
//! [`IdentityProvider`](coauthor_core::identity::IdentityProvider) trait.

pub mod provider;

pub use provider::HttpIdentityProvider;
