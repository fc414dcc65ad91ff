//! Persistent key/value storage for session credentials.
//!
//! The session manager keeps exactly one entry here: the bearer token. Two
//! implementations are provided:
//! - [`FileStore`] - a JSON object on disk, surviving restarts
//! - [`MemoryStore`] - an in-process map for ephemeral sessions

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a token store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable string key/value store.
///
/// Removing a key that is not present is not an error.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}
