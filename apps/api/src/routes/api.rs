//! Routes mounted under `/api`.

use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::errors::AppError;
use crate::llm_service::prompts::CONNECTIVITY_SYSTEM;
use crate::state::AppState;
use crate::validation::ValidatedJson;

const DEFAULT_TEST_MAX_TOKENS: u32 = 16;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/llm/status", get(handle_llm_status))
        .route("/llm/test", post(handle_llm_test))
}

#[derive(Debug, Serialize)]
pub struct LlmStatusResponse {
    pub configured: bool,
    pub model: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LlmTestRequest {
    #[validate(length(min = 1, max = 2000, message = "prompt must be 1-2000 characters"))]
    pub prompt: String,
    #[validate(range(min = 1, max = 512, message = "max_tokens must be between 1 and 512"))]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LlmTestResponse {
    pub model: String,
    pub reply: String,
    pub latency_ms: u64,
    pub checked_at: DateTime<Utc>,
}

/// GET /api/llm/status
pub async fn handle_llm_status(State(state): State<AppState>) -> Json<LlmStatusResponse> {
    Json(LlmStatusResponse {
        configured: state.llm.is_configured(),
        model: state.llm.model().to_string(),
    })
}

/// POST /api/llm/test
///
/// Sends one short prompt to the provider to prove the key and model work.
pub async fn handle_llm_test(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LlmTestRequest>,
) -> Result<Json<LlmTestResponse>, AppError> {
    let started = Instant::now();
    let reply = state
        .llm
        .complete(
            &request.prompt,
            CONNECTIVITY_SYSTEM,
            request.max_tokens.unwrap_or(DEFAULT_TEST_MAX_TOKENS),
        )
        .await?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    info!("LLM connectivity test succeeded ({} in {latency_ms}ms)", reply.model);

    Ok(Json(LlmTestResponse {
        model: reply.model,
        reply: reply.text,
        latency_ms,
        checked_at: Utc::now(),
    }))
}
