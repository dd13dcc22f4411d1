//! Store access layer for IntelliSQL.
//!
//! Opens and owns the single file-backed SQLite database the pipeline
//! queries. All access goes through one pooled connection; the workload is
//! one human-paced question at a time, so serializing through it is safe.

mod bootstrap;
mod executor;
mod schema;
mod types;

pub use bootstrap::{ensure_schema, seed_if_empty, SeedOutcome, SEED_ROWS};
pub use executor::{AccessPolicy, QueryExecutor};
pub use schema::{SchemaColumn, SchemaDescriptor};
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::{IntelliError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Handle to the SQLite store backing the pipeline.
pub struct Store {
    pool: SqlitePool,
    path: PathBuf,
}

impl Store {
    /// Opens or creates the store at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Self::ensure_parent_dirs(&path)?;

        let conn_str = format!("sqlite:{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&conn_str)
            .map_err(|e| IntelliError::execution(format!("Invalid database path: {e}")))?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                IntelliError::execution(format!("Failed to open database: {e}"))
            })?;

        info!("Store opened at {}", path.display());
        Ok(Self { pool, path })
    }

    /// Opens an in-memory store.
    ///
    /// The single pooled connection keeps the database alive for the
    /// lifetime of the handle.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| IntelliError::execution(format!("Invalid connection string: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                IntelliError::execution(format!("Failed to open in-memory database: {e}"))
            })?;

        Ok(Self {
            pool,
            path: PathBuf::from(":memory:"),
        })
    }

    /// Ensures parent directories exist for the database path.
    fn ensure_parent_dirs(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    IntelliError::execution(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
