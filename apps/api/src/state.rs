use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ReflectionModel;
use crate::store::JournalStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `PgStore` or `MemoryStore`, chosen at startup from `DATABASE_URL`.
    pub store: Arc<dyn JournalStore>,
    /// Remote or local backend, chosen at startup from `USE_LOCAL_MODEL`.
    pub model: Arc<dyn ReflectionModel>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Every request acts as the single configured user.
    pub fn user_id(&self) -> &str {
        &self.config.default_user_id
    }
}
