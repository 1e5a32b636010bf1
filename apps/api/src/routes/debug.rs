//! Diagnostics endpoints.
//!
//! `/debug/config` is always mounted and deliberately exposes the shape of the
//! configuration (lengths, truncated previews, catalog contents) for
//! production troubleshooting. `/debug/cors` is only mounted in debug mode.

use std::ffi::OsString;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::Config;
use crate::db::inspect::DatabaseProbe;
use crate::db::schema::{tables_exist, EXPECTED_TABLES};
use crate::db::url_preview;
use crate::llm_service::{key_preview, LlmService};
use crate::state::AppState;

const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
const OPENAI_KEY_VAR_LOWER: &str = "openai_api_key";

#[derive(Debug, Serialize)]
pub struct DebugConfigResponse {
    pub openai_api_key_set: bool,
    pub openai_api_key_length: usize,
    pub openai_api_key_preview: String,
    pub llm_model: String,
    pub llm_service_configured: bool,
    pub debug: bool,
    #[serde(rename = "env_OPENAI_API_KEY_exists")]
    pub env_openai_api_key_upper_exists: bool,
    pub env_openai_api_key_exists: bool,
    #[serde(rename = "env_OPENAI_API_KEY_length")]
    pub env_openai_api_key_upper_length: usize,
    pub database_url_set: bool,
    pub database_url_preview: String,
    pub database_status: String,
    pub database_name: Option<String>,
    pub database_current_schema: Option<String>,
    pub database_schemas: Vec<String>,
    pub database_tables: Vec<String>,
    pub public_schema_tables: Vec<String>,
    pub expected_tables: Vec<&'static str>,
    pub tables_exist: bool,
}

/// Process environment facts reported alongside the parsed config.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    pub upper_key: Option<OsString>,
    pub lower_key_exists: bool,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        Self {
            upper_key: std::env::var_os(OPENAI_KEY_VAR),
            lower_key_exists: std::env::var_os(OPENAI_KEY_VAR_LOWER).is_some(),
        }
    }
}

impl DebugConfigResponse {
    pub fn build(
        config: &Config,
        llm: &LlmService,
        env: EnvSnapshot,
        probe: DatabaseProbe,
    ) -> Self {
        let key = config.openai_api_key.as_str();
        let tables_exist = tables_exist(&probe.tables);

        Self {
            openai_api_key_set: !key.trim().is_empty(),
            openai_api_key_length: key.chars().count(),
            openai_api_key_preview: key_preview(key),
            llm_model: config.llm_model.clone(),
            llm_service_configured: llm.is_configured(),
            debug: config.debug,
            env_openai_api_key_upper_exists: env.upper_key.is_some(),
            env_openai_api_key_exists: env.lower_key_exists,
            env_openai_api_key_upper_length: env
                .upper_key
                .as_ref()
                .map(|k| k.to_string_lossy().chars().count())
                .unwrap_or(0),
            database_url_set: config.database_url_set(),
            database_url_preview: url_preview(&config.database_url),
            database_status: probe.status,
            database_name: probe.name,
            database_current_schema: probe.current_schema,
            database_schemas: probe.schemas,
            database_tables: probe.tables,
            public_schema_tables: probe.public_tables,
            expected_tables: EXPECTED_TABLES.to_vec(),
            tables_exist,
        }
    }
}

/// GET /debug/config
pub async fn debug_config_handler(State(state): State<AppState>) -> Json<DebugConfigResponse> {
    let probe = state.inspector.probe().await;
    Json(DebugConfigResponse::build(
        &state.config,
        &state.llm,
        EnvSnapshot::capture(),
        probe,
    ))
}

#[derive(Debug, Serialize)]
pub struct DebugCorsResponse {
    pub cors_origins: String,
    pub cors_origins_list: Vec<String>,
    pub debug: bool,
}

/// GET /debug/cors (debug mode only)
pub async fn debug_cors_handler(State(state): State<AppState>) -> Json<DebugCorsResponse> {
    Json(DebugCorsResponse {
        cors_origins: state.config.cors_origins.clone(),
        cors_origins_list: state.config.cors_origins_list(),
        debug: state.config.debug,
    })
}
