pub mod init;
pub mod inspect;
pub mod schema;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool that connects on first use.
///
/// Building the pool never touches the network, so a database outage surfaces
/// per operation instead of preventing startup.
pub async fn create_pool(database_url: &str, acquire_timeout: Duration) -> Result<PgPool> {
    info!("Configuring PostgreSQL pool (lazy connect)...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
        .context("DATABASE_URL is not a valid PostgreSQL connection string")?;

    info!("PostgreSQL connection pool configured");
    Ok(pool)
}

/// First 50 characters of the connection string, for logs and diagnostics.
pub fn url_preview(database_url: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    if database_url.chars().count() > PREVIEW_CHARS {
        let head: String = database_url.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        database_url.to_string()
    }
}
