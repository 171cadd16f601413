use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

use super::keyvalue::KeyValueStore;

/// File-backed key-value store (native only): the whole key map lives in
/// one JSON document on disk, rewritten on every write.
///
/// Writes are fire-and-forget at the trait level; flush failures are
/// logged and the in-memory map stays authoritative for the session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open (or create) a store at `path`. A missing file starts empty;
    /// an unreadable or malformed file is an error, never silently
    /// discarded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)
                .map_err(|e| CoreError::Storage(format!("Corrupt store file {}: {e}", path.display())))?
        } else {
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), CoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "store flush failed");
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            if let Err(e) = self.flush() {
                tracing::warn!(path = %self.path.display(), error = %e, "store flush failed");
            }
        }
    }
}
