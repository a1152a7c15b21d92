use std::sync::Arc;

use coauthor_core::identity::IdentityProvider;
use coauthor_db::DbPool;

use crate::config::ServerConfig;
use crate::service::DocumentService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity provider client, used by the auth gate.
    pub identity: Arc<dyn IdentityProvider>,
    /// Document/collaborator operations.
    pub documents: DocumentService,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        config: Arc<ServerConfig>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let documents = DocumentService::new(pool.clone(), Arc::clone(&identity));
        Self {
            pool,
            config,
            identity,
            documents,
        }
    }
}
