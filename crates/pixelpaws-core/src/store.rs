//! Key-value persistence port.
//!
//! The pet stores every blob as a JSON string under a fixed key, the same
//! shape the browser build kept in localStorage. [`MemoryStore`] backs
//! tests (with failure injection); [`FileStore`] keeps all keys in one
//! JSON document on disk.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            }),
    }
}

/// Encode and write a JSON value.
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Malformed {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

// ── In-memory ───────────────────────────────────────────────────────────

/// In-memory store with optional failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    /// Maximum total bytes of keys + values.
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where every read and write fails, like disabled storage.
    pub fn unavailable() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw access that bypasses failure injection, for test setup.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("storage is disabled".into()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("storage is disabled".into()));
        }
        if let Some(quota) = self.quota {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("storage is disabled".into()));
        }
        self.entries.remove(key);
        Ok(())
    }
}

// ── File-backed ─────────────────────────────────────────────────────────

/// All keys in a single JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or create on first write) the store at `path`.
    ///
    /// A file that isn't a JSON object of strings is moved aside to
    /// `<path>.corrupt` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    let aside = corrupt_path(&path);
                    log::warn!(
                        "Store file {:?} is malformed ({}); moving it to {:?}",
                        path,
                        e,
                        aside
                    );
                    if let Err(e) = fs::rename(&path, &aside) {
                        log::warn!("Could not move malformed store aside: {}", e);
                    }
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };
        log::debug!("Opened store {:?} with {} keys", path, entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StoreError::Malformed {
                key: self.path.display().to_string(),
                source,
            }
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory consistent with disk
            match previous {
                Some(v) => self.entries.insert(key.to_string(), v),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basics() {
        let mut s = MemoryStore::new();
        assert_eq!(s.get("a").unwrap(), None);
        s.set("a", "1").unwrap();
        assert_eq!(s.get("a").unwrap().as_deref(), Some("1"));
        s.remove("a").unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_unavailable_store_fails_everything() {
        let mut s = MemoryStore::unavailable();
        assert!(matches!(s.get("a"), Err(StoreError::Unavailable(_))));
        assert!(matches!(s.set("a", "1"), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_quota() {
        let mut s = MemoryStore::with_quota(10);
        s.set("k", "12345").unwrap();
        // Overwriting the same key only counts the new value
        s.set("k", "123456789").unwrap();
        let err = s.set("other", "x").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { key } if key == "other"));
    }

    #[test]
    fn test_json_helpers() {
        let mut s = MemoryStore::new();
        write_json(&mut s, "list", &vec!["a", "b"]).unwrap();
        let back: Option<Vec<String>> = read_json(&s, "list").unwrap();
        assert_eq!(back, Some(vec!["a".to_string(), "b".to_string()]));

        s.insert_raw("bad", "{not json");
        let err = read_json::<Vec<String>>(&s, "bad").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { key, .. } if key == "bad"));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pet.json");

        let mut s = FileStore::open(&path).unwrap();
        s.set("petOwnedItems", "[\"crown\"]").unwrap();
        s.set("gone", "x").unwrap();
        s.remove("gone").unwrap();
        drop(s);

        let s = FileStore::open(&path).unwrap();
        assert_eq!(s.get("petOwnedItems").unwrap().as_deref(), Some("[\"crown\"]"));
        assert_eq!(s.get("gone").unwrap(), None);
    }

    #[test]
    fn test_file_store_moves_corrupt_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pet.json");
        fs::write(&path, "this is not json").unwrap();

        let s = FileStore::open(&path).unwrap();
        assert_eq!(s.get("anything").unwrap(), None);
        assert!(dir.path().join("pet.json.corrupt").exists());
        assert!(!path.exists());
    }
}
