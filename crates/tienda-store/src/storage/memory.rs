//! In-memory storage.
//!
//! Clones share the same slots, the way two tabs of one origin share local
//! storage. Nothing survives the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{check_key, Storage};
use crate::error::{StoreError, StoreResult};

/// Process-local key-value storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.lock().map(|slots| slots.len()).unwrap_or(0)
    }

    /// Checks if no key is set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| StoreError::Internal("memory storage lock poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        check_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));

        storage.set("cart", "[1]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[1]"));

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_slots() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.clone();

        tab_a.set("cart", "a").unwrap();
        tab_b.set("cart", "b").unwrap();
        assert_eq!(tab_a.get("cart").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.set("", "x"),
            Err(StoreError::InvalidKey { .. })
        ));
    }
}
