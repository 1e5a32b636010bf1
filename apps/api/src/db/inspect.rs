//! Best-effort catalog introspection for the diagnostics endpoint.
//!
//! `AppState` holds an `Arc<dyn DatabaseInspector>`; `PgInspector` is the
//! production backend.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use tracing::warn;

/// Outcome of one probe. `status` is `"connected"` or `"error: <message>"`;
/// anything gathered before a failure is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseProbe {
    pub status: String,
    pub name: Option<String>,
    pub current_schema: Option<String>,
    pub schemas: Vec<String>,
    pub tables: Vec<String>,
    pub public_tables: Vec<String>,
}

impl DatabaseProbe {
    pub fn is_connected(&self) -> bool {
        self.status == "connected"
    }
}

#[async_trait]
pub trait DatabaseInspector: Send + Sync {
    /// Never fails: errors are folded into `DatabaseProbe::status`.
    async fn probe(&self) -> DatabaseProbe;
}

pub struct PgInspector {
    pool: PgPool,
}

impl PgInspector {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseInspector for PgInspector {
    async fn probe(&self) -> DatabaseProbe {
        let mut probe = DatabaseProbe {
            status: "unknown".to_string(),
            ..Default::default()
        };

        // The connection goes back to the pool when `conn` drops, on every path.
        let outcome = match self.pool.acquire().await {
            Ok(mut conn) => collect(&mut conn, &mut probe).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => probe.status = "connected".to_string(),
            Err(e) => {
                warn!("Database probe failed: {e}");
                probe.status = format!("error: {e}");
                probe.public_tables.clear();
            }
        }
        probe
    }
}

async fn collect(conn: &mut PgConnection, probe: &mut DatabaseProbe) -> Result<(), sqlx::Error> {
    probe.tables = sqlx::query_scalar(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = current_schema()
          AND table_type = 'BASE TABLE'
        ORDER BY table_name
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    probe.name = sqlx::query_scalar("SELECT current_database()::text")
        .fetch_one(&mut *conn)
        .await?;

    probe.current_schema = sqlx::query_scalar("SELECT current_schema()::text")
        .fetch_one(&mut *conn)
        .await?;

    probe.schemas = sqlx::query_scalar(
        r#"
        SELECT schema_name::text
        FROM information_schema.schemata
        WHERE schema_name NOT IN ('pg_catalog', 'information_schema', 'pg_toast')
        ORDER BY schema_name
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    probe.public_tables = sqlx::query_scalar(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = 'public'
        ORDER BY table_name
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(())
}
