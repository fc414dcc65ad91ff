//! File-backed token store.
//!
//! Entries live in a single JSON document alongside the time of the last write:
//!
//! ```json
//! { "entries": { "token": "eyJ..." }, "updated_at": "2026-01-01T00:00:00Z" }
//! ```
//!
//! Writes go to a sibling temp file which is then renamed over the original, so a
//! crash mid-write leaves either the old or the new document.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{StoreError, StoreResult, TokenStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// JSON file store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_document(&self) -> StoreResult<StoreDocument> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(StoreDocument::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Document to modify; an unparseable one is replaced rather than kept forever
    fn read_for_write(&self) -> StoreResult<(StoreDocument, bool)> {
        match self.read_document() {
            Ok(doc) => Ok((doc, false)),
            Err(StoreError::Corrupt(e)) => {
                warn!(path = %self.path.display(), error = %e, "Replacing unreadable session store");
                Ok((StoreDocument::default(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_document(&self, mut doc: StoreDocument) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        doc.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(&doc)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content).map_err(|e| self.io_error(e))?;
        restrict_permissions(&tmp_path);
        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), "Session store written");
        Ok(())
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_document()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.lock();
        let (mut doc, _) = self.read_for_write()?;
        doc.entries.insert(key.to_string(), value.to_string());
        self.write_document(doc)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let _guard = self.lock.lock();
        let (mut doc, corrupt) = self.read_for_write()?;
        if doc.entries.remove(key).is_none() && !corrupt {
            return Ok(());
        }
        self.write_document(doc)
    }
}

/// The file holds a bearer credential; keep it private to the owner.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        warn!(path = %path.display(), error = %e, "Failed to restrict session file permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
