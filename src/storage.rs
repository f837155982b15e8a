//! Local key-value persistence for client state
//!
//! The session record and the daily-summary gate survive process
//! restarts through a [`StateStore`]: a minimal synchronous get/set/
//! remove contract with best-effort durability and no transactions.
//!
//! Two implementations ship with the crate: [`SledStore`] over an
//! embedded `sled` database in the user's data directory, and
//! [`MemoryStore`] for tests and intentionally ephemeral sessions.

use crate::error::{ClientError, Result};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Environment variable that overrides the on-disk state directory.
///
/// This makes it easy to point the client at a temporary directory in
/// tests without changing the user's application data dir.
pub const STATE_DIR_ENV: &str = "COMMUNITY_STATE_DIR";

/// Synchronous string key-value store for client state
///
/// Implementations are best-effort: a write that returns `Ok` is
/// expected, not guaranteed, to survive a crash. Callers that can
/// proceed without persistence treat failures as warnings.
pub trait StateStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. No-op if absent.
    fn remove(&self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory [`StateStore`] with no durability
///
/// Used by tests and by callers that explicitly want a session scoped
/// to the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("state store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("state store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("state store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SledStore
// ---------------------------------------------------------------------------

/// Durable [`StateStore`] backed by an embedded `sled` database
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open the store in the user's application data directory.
    ///
    /// The directory can be overridden with the `COMMUNITY_STATE_DIR`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the data directory cannot be
    /// determined or the database cannot be opened.
    pub fn open_default() -> Result<Self> {
        if let Ok(override_dir) = std::env::var(STATE_DIR_ENV) {
            return Self::open_at(PathBuf::from(override_dir).join("state"));
        }

        let proj_dirs = ProjectDirs::from("com", "campus-community", "community-client")
            .ok_or_else(|| ClientError::Storage("could not determine data directory".into()))?;
        Self::open_at(proj_dirs.data_dir().join("state"))
    }

    /// Open the store at the given database path.
    ///
    /// Primarily useful for tests that point the store at a temporary
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the parent directory cannot
    /// be created or the database cannot be opened.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("failed to create state dir: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| ClientError::Storage(format!("failed to open state db: {}", e)))?;
        tracing::debug!(path = %path.display(), "opened state store");
        Ok(Self { db })
    }
}

impl StateStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        match value {
            None => Ok(None),
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| ClientError::Storage(format!("corrupt value for {}: {}", key, e)))?;
                Ok(Some(text))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key, value.as_bytes())
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(())
    }
}
