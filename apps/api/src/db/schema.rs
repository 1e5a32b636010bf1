//! Table creation for the SkillSync store.
//!
//! Every statement is `IF NOT EXISTS`, so `init_db` can run at every startup
//! and from the `init-db` binary without duplicating or failing on existing
//! tables.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

/// Tables the service expects after initialization, in creation order.
pub const EXPECTED_TABLES: [&str; 3] = ["users", "user_profiles", "user_cvs"];

/// DDL applied by `init_db`, in dependency order.
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id              UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email           TEXT NOT NULL UNIQUE,
        full_name       TEXT,
        hashed_password TEXT NOT NULL,
        is_active       BOOLEAN NOT NULL DEFAULT TRUE,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_profiles (
        id               UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id          UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        headline         TEXT,
        job_title        TEXT,
        years_experience INTEGER,
        target_roles     TEXT[] NOT NULL DEFAULT '{}',
        skills           JSONB NOT NULL DEFAULT '[]'::jsonb,
        education        JSONB NOT NULL DEFAULT '[]'::jsonb,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at       TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_cvs (
        id           UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id      UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        filename     TEXT NOT NULL,
        content_type TEXT,
        raw_text     TEXT,
        parsed_data  JSONB,
        is_primary   BOOLEAN NOT NULL DEFAULT FALSE,
        uploaded_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_user_cvs_user_id ON user_cvs (user_id)",
];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema statement {index} failed: {source}")]
    Statement {
        index: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Creates all declared tables that do not exist yet, in one transaction.
pub async fn init_db(pool: &PgPool) -> Result<(), SchemaError> {
    let mut tx = pool.begin().await?;

    for (index, statement) in SCHEMA_STATEMENTS.iter().enumerate() {
        debug!("Applying schema statement {index}");
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|source| SchemaError::Statement { index, source })?;
    }

    tx.commit().await?;
    info!(
        "Schema initialized ({} statements applied)",
        SCHEMA_STATEMENTS.len()
    );
    Ok(())
}

/// Lists base tables in the connection's current schema, sorted by name.
pub async fn list_tables(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = current_schema()
          AND table_type = 'BASE TABLE'
        ORDER BY table_name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Expected tables absent from `present`, in declaration order.
pub fn missing_tables<S: AsRef<str>>(present: &[S]) -> Vec<&'static str> {
    EXPECTED_TABLES
        .iter()
        .copied()
        .filter(|expected| !present.iter().any(|t| t.as_ref() == *expected))
        .collect()
}

/// True iff every expected table is in `present`.
pub fn tables_exist<S: AsRef<str>>(present: &[S]) -> bool {
    missing_tables(present).is_empty()
}
