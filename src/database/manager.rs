use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::database::memory::MemoryTodoStore;
use crate::database::postgres::PgTodoStore;
use crate::database::schema;
use crate::database::store::TodoStore;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the database could not be reached at all, as opposed to a
    /// query failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
                | DatabaseError::Sqlx(sqlx::Error::PoolClosed)
                | DatabaseError::Sqlx(sqlx::Error::Io(_))
        )
    }
}

/// Builds pools and stores from configuration
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the store selected by `config.backend`, running the schema
    /// bootstrap first when `auto_migrate` is set.
    pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn TodoStore>, DatabaseError> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory todo store");
                Ok(Arc::new(MemoryTodoStore::new()))
            }
            DatabaseBackend::Postgres => {
                let pool = Self::connect(config).await?;
                if config.auto_migrate {
                    schema::ensure_schema(&pool).await?;
                }
                Ok(Arc::new(PgTodoStore::new(pool)))
            }
        }
    }

    /// Create a connection pool for `config.url`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let redacted = Self::redacted_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool for: {}", redacted);
        Ok(pool)
    }

    /// Connection string with the password masked, safe to log
    pub fn redacted_url(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("****"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
