use std::sync::Arc;

use cardb_db::store::Store;

use crate::config::ServerConfig;
use crate::services::credentials::CredentialService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence: Postgres in production, in-memory in tests.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
    /// Registration, login and token validation.
    pub credentials: Arc<CredentialService>,
}

impl AppState {
    /// Wire the credential service to `store` using the JWT settings in `config`.
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let credentials = Arc::new(CredentialService::new(
            Arc::clone(&store),
            config.jwt.clone(),
            config.password_min_length,
        ));
        Self {
            store,
            config: Arc::new(config),
            credentials,
        }
    }
}
