use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::collection::Collection;

/// Errors from the reference store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<serde_json::Error> for DatabaseError {
    fn from(err: serde_json::Error) -> Self {
        DatabaseError::Decode(err.to_string())
    }
}

/// Owns the connection pool for the document tables.
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect using the configured URL. Fails fast when it is missing or
    /// malformed, before any pool is created.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }
        let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Connected to document store at {}{}",
            parsed.host_str().unwrap_or("localhost"),
            parsed.path()
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Create one table per collection if missing.
    pub async fn ensure_collections(&self) -> Result<(), DatabaseError> {
        for collection in Collection::ALL {
            sqlx::query(&Self::collection_ddl(collection))
                .execute(&self.pool)
                .await?;
        }
        info!("Document collections ready ({} tables)", Collection::ALL.len());
        Ok(())
    }

    fn collection_ddl(collection: Collection) -> String {
        format!(
            r#"CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                body JSONB NOT NULL DEFAULT '{{}}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )"#,
            table = quote_identifier(collection.table_name())
        )
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed document store pool");
    }
}

/// Quote SQL identifier to prevent injection
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
