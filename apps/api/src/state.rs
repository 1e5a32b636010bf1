use std::sync::Arc;

use crate::config::Config;
use crate::db::inspect::DatabaseInspector;
use crate::llm_service::LlmService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmService,
    /// Catalog probe behind `/debug/config`. Production: `PgInspector`.
    pub inspector: Arc<dyn DatabaseInspector>,
}
