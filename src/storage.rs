//! Local key-value storage for persisted records.
//!
//! A [`KeyValueStore`] maps string keys to string records. [`FileStore`]
//! keeps one JSON file per key inside a data directory; [`MemoryStore`] keeps
//! records in memory and can be given a byte quota to model a full store.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;

/// Key holding the serialised task collection.
pub const STORAGE_KEY: &str = "todo-tasks";

/// Key a malformed task record is preserved under before it is replaced.
pub const BACKUP_KEY: &str = "todo-tasks.bak";

/// A string-keyed record store. Last write wins.
pub trait KeyValueStore {
    /// Read the record under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record under `key` with raw bytes.
    fn set_bytes(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Replace the record under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_bytes(key, value.as_bytes())
    }
}

/// Decode a stored record. Invalid UTF-8 keeps its bytes inside the error.
fn decode(key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
    String::from_utf8(bytes).map_err(|source| StorageError::Encoding { key: key.to_string(), source })
}

/// Directory-backed store: the record for `key` lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(FileStore { dir: dir.to_path_buf() })
    }

    /// Directory the records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path used for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(buf) => {
                debug!(path = %path.display(), bytes = buf.len(), "read record");
                decode(key, buf).map(Some)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { key: key.to_string(), source }),
        }
    }

    fn set_bytes(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            let mut f = File::create(&tmp)?;
            f.write_all(value)?;
            f.flush()?;
            fs::rename(&tmp, &path)
        };
        write().map_err(|source| StorageError::Write { key: key.to_string(), source })?;
        debug!(path = %path.display(), bytes = value.len(), "wrote record");
        Ok(())
    }
}

/// In-memory store, optionally limited to `quota` bytes across all records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once the total record size would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStore { records: HashMap::new(), quota: Some(quota) }
    }

    /// A store pre-populated with one record.
    pub fn with_record(key: &str, value: &str) -> Self {
        Self::with_raw_record(key, value.as_bytes())
    }

    /// A store pre-populated with one record that need not be text.
    pub fn with_raw_record(key: &str, value: &[u8]) -> Self {
        let mut store = Self::new();
        store.records.insert(key.to_string(), value.to_vec());
        store
    }

    /// Raw bytes under `key`.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }

    /// Total bytes held, excluding the record under `except`.
    fn used_except(&self, except: &str) -> usize {
        self.records
            .iter()
            .filter(|(k, _)| k.as_str() != except)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.records.get(key).cloned().map(|v| decode(key, v)).transpose()
    }

    fn set_bytes(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_except(key));
            if value.len() > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: value.len(),
                    available,
                });
            }
        }
        self.records.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.get(STORAGE_KEY).unwrap().is_none());

        store.set(STORAGE_KEY, "[]").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.path_for(STORAGE_KEY).exists());
        assert!(!store.path_for(STORAGE_KEY).with_extension("json.tmp").exists());

        store.set(STORAGE_KEY, "[1]").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_file_store_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        // A directory where the temp file should go makes File::create fail.
        fs::create_dir_all(store.path_for(STORAGE_KEY).with_extension("json.tmp")).unwrap();
        let err = store.set(STORAGE_KEY, "[]").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[test]
    fn test_invalid_utf8_keeps_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let raw = b"[\"caf\xe9\"]";
        store.set_bytes(STORAGE_KEY, raw).unwrap();
        match store.get(STORAGE_KEY).unwrap_err() {
            StorageError::Encoding { source, .. } => assert_eq!(source.as_bytes(), raw),
            other => panic!("unexpected error: {other:?}"),
        }

        let memory = MemoryStore::with_raw_record(STORAGE_KEY, raw);
        assert!(matches!(memory.get(STORAGE_KEY), Err(StorageError::Encoding { .. })));
    }

    #[test]
    fn test_memory_store_quota() {
        let mut store = MemoryStore::with_quota(8);
        store.set("a", "1234").unwrap();
        // Replacing a record only counts its new size.
        store.set("a", "12345678").unwrap();
        let err = store.set("b", "x").unwrap_err();
        match err {
            StorageError::QuotaExceeded { needed, available, .. } => {
                assert_eq!(needed, 1);
                assert_eq!(available, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.get("a").unwrap().as_deref(), Some("12345678"));
        assert!(store.get("b").unwrap().is_none());
    }
}
