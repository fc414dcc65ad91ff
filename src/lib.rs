pub mod api;
pub mod cli;
pub mod config;
pub mod session;
pub mod store;

pub use session::{Role, Session, SessionManager, SessionStatus, User};

use anyhow::{Context, Result};
use config::Config;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::store::{FileStore, TokenStore};

/// Process-wide client state: one API client and one session bound to it
pub struct AppState {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionManager>,
}

impl AppState {
    /// Build state persisting the session under the configured data directory
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.storage.session_path()));
        Self::with_store(config, store)
    }

    /// Build state on a caller-provided token store
    pub fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config.api).context("Failed to create HTTP client")?);
        let session = Arc::new(SessionManager::new(
            api.clone(),
            store,
            config.storage.token_key.clone(),
        ));
        Ok(Self {
            config,
            api,
            session,
        })
    }
}
