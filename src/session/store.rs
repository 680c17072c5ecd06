//! Persisted session mirror
//!
//! A copy of the current account kept under a fixed key so a session
//! survives restarts. Read once at startup, written on login, register and
//! balance updates, deleted on logout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::account::Account;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Storage for the session mirror
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the mirrored account, `None` if no session is stored
    async fn load(&self) -> Result<Option<Account>, SessionStoreError>;

    /// Overwrite the mirror with this account
    async fn save(&self, account: &Account) -> Result<(), SessionStoreError>;

    /// Delete the mirror. Deleting a missing mirror is not an error.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

// ============================================================================
// File-backed mirror
// ============================================================================

/// Mirror stored as `<dir>/<key>.json`
pub struct FileSessionStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>, key: &str) -> Self {
        let dir = dir.into();
        let path = dir.join(format!("{}.json", key));
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Account>, SessionStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, account: &Account) -> Result<(), SessionStoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write-then-rename so a crash never leaves a half-written mirror
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(account)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), account_id = %account.id, "Session mirror written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// In-memory mirror
// ============================================================================

/// Mirror kept in memory as serialized JSON
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored record, if any
    pub async fn raw(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Account>, SessionStoreError> {
        match self.slot.lock().await.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, account: &Account) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_string(account)?;
        *self.slot.lock().await = Some(raw);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
