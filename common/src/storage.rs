//! Key-value persistence for widget state.
//!
//! The widget keeps its cache entries and conversion history in a flat
//! string key-value store, the local-storage analog of the browser
//! original. `MemoryStore` backs tests and ephemeral runs;
//! `JsonFileStore` persists one file per key under a data directory.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur in the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be serialized or deserialized.
    #[error("malformed value under key {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A flat string key-value store.
pub trait Storage: Send + Sync {
    /// Read the raw value under a key, if present.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write the raw value under a key, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// JSON convenience layer over any [`Storage`].
///
/// Kept as an extension trait so `Storage` itself stays object-safe.
pub trait StorageExt: Storage {
    /// Read and deserialize the value under a key.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.read(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Malformed {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize and write a value under a key.
    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })?;
        self.write(key, &raw)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store with one JSON file per key.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys like `exchangeRates_USD` are already filesystem-safe;
        // anything else is mapped onto a conservative charset.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for JsonFileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::write(self.path_for(key), value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();

        store.write_json("nums", &vec![1, 2, 3]).unwrap();
        let nums: Vec<i32> = store.read_json("nums").unwrap().unwrap();
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let store = MemoryStore::new();
        store.write("bad", "{not json").unwrap();

        let result: StorageResult<Option<Vec<i32>>> = store.read_json("bad");
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        store.write("exchangeRates_USD", r#"{"a":1}"#).unwrap();
        assert_eq!(
            store.read("exchangeRates_USD").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );

        store.remove("exchangeRates_USD").unwrap();
        assert_eq!(store.read("exchangeRates_USD").unwrap(), None);
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        store.write("../escape", "v").unwrap();
        assert_eq!(store.read("../escape").unwrap().as_deref(), Some("v"));
        // Everything stays inside the store directory.
        assert!(store.dir().join("___escape.json").exists());
    }
}
