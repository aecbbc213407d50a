use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production; in-memory when no DATABASE_URL is configured.
    pub store: Arc<dyn ResumeStore>,
    /// Pluggable so generation can run against a mock.
    pub completion: Arc<dyn CompletionService>,
    pub config: Config,
}
