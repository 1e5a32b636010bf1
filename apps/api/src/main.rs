use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use skillsync_api::config::Config;
use skillsync_api::db::create_pool;
use skillsync_api::db::inspect::PgInspector;
use skillsync_api::lifecycle::{shutdown_cleanup, shutdown_signal, startup_initialization};
use skillsync_api::llm_service::LlmService;
use skillsync_api::routes::build_router;
use skillsync_api::state::AppState;
use skillsync_api::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    telemetry::init(&config.rust_log, env!("CARGO_CRATE_NAME"));

    info!("Starting {} v{}", config.app_name, config.app_version);

    let db = create_pool(
        &config.database_url,
        Duration::from_secs(config.db_acquire_timeout_secs),
    )
    .await?;

    let llm = LlmService::new(config.openai_api_key.clone(), config.llm_model.clone())?;
    info!(
        "LLM service initialized (model: {}, configured: {})",
        llm.model(),
        llm.is_configured()
    );

    startup_initialization(&db).await;

    let state = AppState {
        config: config.clone(),
        llm,
        inspector: Arc::new(PgInspector::new(db.clone())),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_cleanup(&db).await;

    Ok(())
}
