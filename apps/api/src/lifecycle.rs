use sqlx::PgPool;
use tracing::{info, warn};

use crate::db::schema::init_db;

/// Startup hook. Schema creation failures are logged and swallowed so the
/// service keeps serving in a degraded state.
pub async fn startup_initialization(pool: &PgPool) {
    info!("Initializing database tables...");

    match init_db(pool).await {
        Ok(()) => info!("Database tables initialized successfully"),
        Err(e) => {
            warn!("Database initialization failed: {e}");
            warn!("Tables may already exist or the database is unreachable; continuing startup");
        }
    }
}

/// Shutdown hook, run after the server has stopped accepting connections.
pub async fn shutdown_cleanup(pool: &PgPool) {
    info!("Application shutting down...");
    pool.close().await;
    info!("Shutdown cleanup complete");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
