//! # Storage Backends
//!
//! A small key-value interface modelled on browser local storage, plus the
//! backends that implement it.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage trait                                   │
//! │          get(key) / set(key, value) / remove(key)                       │
//! │                              │                                          │
//! │        ┌─────────────────────┼─────────────────────┐                    │
//! │        ▼                     ▼                     ▼                    │
//! │  MemoryStorage         FileStorage           SqliteStorage              │
//! │  Arc<Mutex<HashMap>>   <dir>/<key>.json      local_storage table        │
//! │  clones share slots    temp file + rename    sqlx + embedded migration  │
//! │  (tests, two tabs)     (CLI default)         (WAL, survives crashes)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every method takes `&self`. Reads and writes are not coordinated across
//! handles: two handles writing the same key means the last writer wins.

mod file;
mod memory;
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::{SqliteStorage, StorageConfig};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};

/// String key-value storage.
pub trait Storage {
    /// Reads the value under `key`, `None` if the key was never set.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrites the value under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Rejects keys no backend can address.
pub(crate) fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::invalid_key(key, "key must not be empty"));
    }
    Ok(())
}

// =============================================================================
// Backend Selection
// =============================================================================

/// Which backend to open, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; nothing survives exit.
    Memory,

    /// One JSON file per key in a data directory.
    #[default]
    File,

    /// SQLite database file.
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "fs" => Ok(StorageBackend::File),
            "sqlite" | "db" => Ok(StorageBackend::Sqlite),
            _ => Err(format!("Unknown storage backend: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse_roundtrip() {
        for backend in [
            StorageBackend::Memory,
            StorageBackend::File,
            StorageBackend::Sqlite,
        ] {
            assert_eq!(backend.to_string().parse::<StorageBackend>(), Ok(backend));
        }
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_reference_forwards() {
        let storage = MemoryStorage::new();
        let by_ref: &MemoryStorage = &storage;
        by_ref.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
    }
}
