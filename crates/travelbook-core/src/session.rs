//! Session context: which username this session works under.
//!
//! The username is a free-text partition key, not an authenticated identity.
//! It is cached on disk so the app can resume the last session on start, and
//! cleared on explicit logout. The session is an explicit object handed to
//! whoever needs it; there is no ambient singleton.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Active session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// On-disk cache for the session, stored under the app data directory.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.json"),
        }
    }

    /// Read the cached session, if any. A missing or unreadable cache is
    /// treated as "no session".
    pub fn load(&self) -> Option<Session> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Discarding unreadable session cache: {}", e);
                None
            }
        }
    }

    /// Persist the session so the next start resumes it.
    pub fn store(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        fs::write(&self.path, json).context("Failed to write session cache")?;

        tracing::info!("Cached session for user: {}", session.username);
        Ok(())
    }

    /// Forget the cached session (logout).
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).context("Failed to delete session cache")?;
            tracing::info!("Cleared cached session");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_store_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(store.load().is_none());

        let session = Session::new("alice");
        store.store(&session).unwrap();
        assert_eq!(store.load(), Some(session));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        fs::write(dir.path().join("session.json"), "not json").unwrap();
        assert!(store.load().is_none());
    }
}
