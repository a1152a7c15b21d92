//! The seam to the external identity provider.
//!
//! The service never issues or inspects credentials itself: callers present a
//! bearer token, the provider verifies it, and documents store only the raw
//! `uid` of their owner. Everything identity-shaped goes through the
//! [`IdentityProvider`] trait so the HTTP client, tests, and local
//! development can swap implementations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An opaque user record as managed by the external identity provider.
///
/// The service resolves and embeds identities but never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned unique identifier.
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl Identity {
    /// A record carrying only a `uid`. Useful in tests and for callers that
    /// build identities incrementally.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
        }
    }
}

/// Failures surfaced by an [`IdentityProvider`].
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The provider has no identity with the given id.
    #[error("No identity with id {0}")]
    NotFound(String),

    /// The presented credential is missing, malformed, or expired.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// The provider could not be reached or answered unexpectedly.
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Mediates all lookups and verifications against the identity provider.
///
/// Batch lookups drop identifiers the provider cannot resolve rather than
/// failing the whole call; only transport/provider failures are errors.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validate a caller-presented bearer credential and return the caller's
    /// identity.
    async fn verify_token(&self, token: &str) -> Result<Identity, IdentityError>;

    /// Resolve a single identifier to an identity record.
    async fn get_identity(&self, uid: &str) -> Result<Identity, IdentityError>;

    /// Resolve a batch of identifiers. Unresolvable ids are omitted from the
    /// result; the remaining records keep the input order.
    async fn get_identities(&self, uids: &[String]) -> Result<Vec<Identity>, IdentityError>;
}

/// In-memory provider backed by fixed uid and token tables.
///
/// Used by the test suites and handy for local development when no real
/// provider is reachable.
#[derive(Debug, Default, Clone)]
pub struct FixedIdentityProvider {
    users: HashMap<String, Identity>,
    tokens: HashMap<String, String>,
}

impl FixedIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity, keyed by its uid.
    pub fn with_user(mut self, identity: Identity) -> Self {
        self.users.insert(identity.uid.clone(), identity);
        self
    }

    /// Register a token that verifies to the identity with the given uid.
    pub fn with_token(mut self, token: impl Into<String>, uid: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), uid.into());
        self
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn verify_token(&self, token: &str) -> Result<Identity, IdentityError> {
        let uid = self
            .tokens
            .get(token)
            .ok_or_else(|| IdentityError::InvalidCredential("unknown token".into()))?;
        self.users
            .get(uid)
            .cloned()
            .ok_or_else(|| IdentityError::InvalidCredential("token subject no longer exists".into()))
    }

    async fn get_identity(&self, uid: &str) -> Result<Identity, IdentityError> {
        self.users
            .get(uid)
            .cloned()
            .ok_or_else(|| IdentityError::NotFound(uid.to_string()))
    }

    async fn get_identities(&self, uids: &[String]) -> Result<Vec<Identity>, IdentityError> {
        Ok(uids
            .iter()
            .filter_map(|uid| self.users.get(uid).cloned())
            .collect())
    }
}
