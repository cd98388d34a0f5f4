//! # Store Error Types
//!
//! Error types for storage and CartStore operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (rejected input)   io / sqlx / serde_json errors             │
//! │       │                              │                                  │
//! │       └──────────────┬───────────────┘                                  │
//! │                      ▼                                                  │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  CLI: anyhow → "error: ..." on stderr                                  │
//! │                                                                         │
//! │  NOTE: read failures during `CartStore::load` never reach this type;   │
//! │        they are reported as a `LoadOutcome` and logged.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tienda_core::CoreError;

/// Storage and CartStore errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart rejected the command (bad input, position out of range).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage key that a backend cannot address.
    ///
    /// ## When This Occurs
    /// - Empty key
    /// - `FileStorage` key with characters outside `[A-Za-z0-9_-]`
    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLite database could not be opened.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The backend's runtime could not be started.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Internal storage error (e.g. poisoned lock).
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates an InvalidKey error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::ConnectionFailed
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("Timed out acquiring a connection".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
