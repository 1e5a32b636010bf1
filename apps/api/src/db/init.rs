//! The `init-db` procedure: list, create, re-list, diff.
//!
//! Any failure from table creation onwards is fatal; a failed listing before
//! creation is only a warning.

use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db::schema::{init_db, list_tables, missing_tables, SchemaError, EXPECTED_TABLES};
use crate::db::{create_pool, url_preview};

#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not configure the database pool: {0:#}")]
    Pool(anyhow::Error),

    #[error("table creation failed: {0}")]
    Create(#[from] SchemaError),

    #[error("listing tables after creation failed: {0}")]
    Verify(sqlx::Error),
}

/// Table sets observed around a successful initialization.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub tables_before: Option<Vec<String>>,
    pub tables_after: Vec<String>,
    pub missing: Vec<&'static str>,
}

/// Runs the whole procedure against `config.database_url`. The pool is closed
/// on every path.
pub async fn run(config: &Config) -> Result<InitReport, InitError> {
    info!("Database initialization");
    info!("Database URL: {}", url_preview(&config.database_url));

    let pool = create_pool(
        &config.database_url,
        Duration::from_secs(config.db_acquire_timeout_secs),
    )
    .await
    .map_err(InitError::Pool)
    .inspect_err(|e| error!("Error initializing database: {e}"))?;

    let outcome = initialize(&pool).await;
    pool.close().await;

    match &outcome {
        Ok(_) => info!("Database initialization complete"),
        Err(e) => error!("Error initializing database: {e}"),
    }
    outcome
}

async fn initialize(pool: &PgPool) -> Result<InitReport, InitError> {
    let tables_before = match list_tables(pool).await {
        Ok(tables) => {
            info!("Existing tables: {tables:?}");
            Some(tables)
        }
        Err(e) => {
            warn!("Error checking existing tables: {e}");
            None
        }
    };

    info!("Initializing database tables...");
    init_db(pool).await?;
    info!("Database tables initialized successfully");

    let (tables_after, missing) = verify(list_tables(pool).await)?;

    Ok(InitReport {
        tables_before,
        tables_after,
        missing,
    })
}

/// Checks the post-creation listing. A listing error fails the run; missing
/// tables are reported but do not.
fn verify(
    listing: Result<Vec<String>, sqlx::Error>,
) -> Result<(Vec<String>, Vec<&'static str>), InitError> {
    let tables = listing.map_err(InitError::Verify)?;
    info!("Tables after initialization: {tables:?}");

    let missing = missing_tables(&tables);
    if missing.is_empty() {
        info!("All expected tables exist: {}", EXPECTED_TABLES.join(", "));
    } else {
        warn!("Some expected tables are missing: {missing:?}");
    }
    Ok((tables, missing))
}
