//! # SQLite Storage
//!
//! Storage slots kept in a `local_storage` table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore (sync)                                                       │
//! │       │  get / set / remove                                             │
//! │       ▼                                                                 │
//! │  SqliteStorage                                                          │
//! │  ┌───────────────────────────┐    ┌──────────────────────────────────┐  │
//! │  │ tokio current-thread      │    │ SqlitePool (WAL)                 │  │
//! │  │ runtime: block_on(query)  │───►│ local_storage(key, value,        │  │
//! │  └───────────────────────────┘    │               updated_at)        │  │
//! │                                   └──────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The runtime is private to the storage handle. Do not call into a
//! `SqliteStorage` from inside another tokio runtime; `block_on` panics there.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use super::{check_key, Storage};
use crate::error::{StoreError, StoreResult};
use crate::migrations;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// SQLite storage configuration.
///
/// ```rust,ignore
/// let config = StorageConfig::new("/path/to/tienda.db").max_connections(2);
/// let storage = SqliteStorage::open(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the database file, created if missing.
    pub database_path: PathBuf,

    /// Default: 4
    pub max_connections: u32,

    /// Default: 1
    pub min_connections: u32,

    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Default: true
    pub run_migrations: bool,
}

impl StorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StorageConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Private in-memory database, for tests.
    pub fn in_memory() -> Self {
        StorageConfig {
            database_path: PathBuf::from(IN_MEMORY),
            // Every connection to :memory: is its own database
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    fn connect_options(&self) -> StoreResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .journal_mode(SqliteJournalMode::Wal)
        };

        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// SqliteStorage
// =============================================================================

/// Storage backed by a SQLite database.
#[derive(Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
    runtime: Runtime,
}

impl SqliteStorage {
    /// Opens the database, creating the file and running migrations as
    /// configured.
    pub fn open(config: StorageConfig) -> StoreResult<Self> {
        info!(path = %config.database_path.display(), "Opening SQLite storage");

        if !config.is_in_memory() {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Runtime(e.to_string()))?;

        let options = config.connect_options()?;
        let pool = runtime
            .block_on(
                SqlitePoolOptions::new()
                    .max_connections(config.max_connections)
                    .min_connections(config.min_connections)
                    .acquire_timeout(config.connect_timeout)
                    .idle_timeout(Some(config.idle_timeout))
                    .connect_with(options),
            )
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool created");

        let storage = SqliteStorage { pool, runtime };
        if config.run_migrations {
            storage.run_migrations()?;
        }
        Ok(storage)
    }

    /// Applies pending migrations.
    pub fn run_migrations(&self) -> StoreResult<()> {
        self.runtime.block_on(migrations::run_migrations(&self.pool))
    }

    /// Returns `(embedded, applied)` migration counts.
    pub fn migration_status(&self) -> StoreResult<(usize, usize)> {
        self.runtime
            .block_on(migrations::migration_status(&self.pool))
    }

    /// Checks the database answers a trivial query.
    pub fn health_check(&self) -> bool {
        self.runtime
            .block_on(sqlx::query("SELECT 1").execute(&self.pool))
            .is_ok()
    }

    /// When `key` was last written (RFC 3339), if it is set.
    pub fn updated_at(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        let stamp = self.runtime.block_on(
            sqlx::query_scalar::<_, String>("SELECT updated_at FROM local_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool),
        )?;
        Ok(stamp)
    }

    /// Closes the pool. Later calls fail with `ConnectionFailed`.
    pub fn close(&self) {
        info!("Closing SQLite storage");
        self.runtime.block_on(self.pool.close());
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        let value = self.runtime.block_on(
            sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool),
        )?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        let now = chrono::Utc::now().to_rfc3339();
        self.runtime.block_on(
            sqlx::query(
                r#"
                INSERT INTO local_storage (key, value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(&self.pool),
        )?;
        debug!(key, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        check_key(key)?;
        self.runtime.block_on(
            sqlx::query("DELETE FROM local_storage WHERE key = ?")
                .bind(key)
                .execute(&self.pool),
        )?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
