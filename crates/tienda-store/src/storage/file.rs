//! File-backed storage.
//!
//! Each key is one file, `<dir>/<key>.json`. Every write goes to its own
//! sibling temp file (`.<key>.<pid>.<seq>.tmp`) that is renamed over the
//! target, so a crash or a concurrent writer leaves either an old value or a
//! new one, never a truncated payload. A failed write removes its temp file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::{check_key, Storage};
use crate::error::{StoreError, StoreResult};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory of one-file-per-key slots.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(?dir, "File storage opened");
        Ok(FileStorage { dir })
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> StoreResult<PathBuf> {
        check_key(key)?;
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::invalid_key(
                key,
                "only letters, digits, '-' and '_' are allowed",
            ));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), seq))
    }

    fn write_then_rename(tmp: &Path, path: &Path, value: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(tmp, path)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        let tmp = self.temp_path(key);

        if let Err(e) = Self::write_then_rename(&tmp, &path, value) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(?path, bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("data")).unwrap();

        assert_eq!(storage.get("cart").unwrap(), None);
        storage.set("cart", r#"[{"name":"A","price":10,"quantity":1}]"#).unwrap();

        let reopened = FileStorage::open(dir.path().join("data")).unwrap();
        assert_eq!(
            reopened.get("cart").unwrap().as_deref(),
            Some(r#"[{"name":"A","price":10,"quantity":1}]"#)
        );
        assert!(dir.path().join("data").join("cart.json").exists());
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        storage.set("cart", "[]").unwrap();
        storage.set("cart", "[ ]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cart.json".to_string()]);
    }

    fn temp_files(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        // A non-empty directory where the slot file belongs makes the rename fail
        fs::create_dir_all(dir.path().join("cart.json").join("blocker")).unwrap();

        assert!(matches!(storage.set("cart", "[]"), Err(StoreError::Io(_))));
        assert!(temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_concurrent_writers_never_truncate() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        let payloads: Vec<String> = (0..4)
            .map(|n| format!("[{}]", n.to_string().repeat(4096)))
            .collect();

        let handles: Vec<_> = payloads
            .iter()
            .cloned()
            .map(|payload| {
                let storage = storage.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        storage.set("cart", &payload).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = storage.get("cart").unwrap().unwrap();
        assert!(payloads.contains(&stored));
        assert!(temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.remove("cart").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.set("../cart", "[]"),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(storage.get("").is_err());
    }
}
