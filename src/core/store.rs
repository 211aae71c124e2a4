//! # Page Persistence
//!
//! The pager remembers the current page in an external key/value store.
//! Two stores ship with the crate:
//!
//! - [`MemoryQueryStore`]: process-local, cheap to clone (clones share data)
//! - [`FileQueryStore`]: a flat TOML table at `~/.flipbook/state.toml`
//!
//! Writes are fire-and-forget from the pager's point of view. A store that
//! fails to persist logs the failure and carries on.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, warn};

/// Addressable external store the pager writes its page number into.
pub trait QueryStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: BTreeMap<String, String>,
    writes: usize,
}

/// In-memory store. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls seen so far.
    pub fn writes(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).writes
    }
}

impl QueryStore for MemoryQueryStore {
    fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
    }
}

/// Returns `~/.flipbook/state.toml`.
pub fn state_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".flipbook").join("state.toml"))
}

/// Store backed by a flat TOML string table on disk.
pub struct FileQueryStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileQueryStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring malformed state file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        debug!("Opened state store {} ({} keys)", path.display(), values.len());
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&self.values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        // Atomic replace: write `.tmp`, then rename over the real file
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl QueryStore for FileQueryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            warn!("Failed to write state file {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_state_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flipbook-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("state.toml")
    }

    #[test]
    fn test_memory_store_clones_share_values() {
        let store = MemoryQueryStore::new();
        let mut writer = store.clone();
        writer.set("page", "4");
        assert_eq!(store.get("page").as_deref(), Some("4"));
        assert_eq!(store.writes(), 1);
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_file_store_round_trips_through_disk() {
        let path = temp_state_path("roundtrip");
        let mut store = FileQueryStore::open(&path);
        assert_eq!(store.get("page"), None);

        store.set("page", "7");
        store.set("other", "x");
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let reopened = FileQueryStore::open(&path);
        assert_eq!(reopened.get("page").as_deref(), Some("7"));
        assert_eq!(reopened.get("other").as_deref(), Some("x"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_ignores_malformed_file() {
        let path = temp_state_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FileQueryStore::open(&path);
        assert_eq!(store.get("page"), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
