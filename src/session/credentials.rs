//! Durable client-side state
//!
//! Exactly two things survive between runs: the bearer token and the
//! one-time "tour seen" marker, stored under fixed file names inside the
//! client data directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// File holding the persisted bearer token
const TOKEN_FILE: &str = "session_token.json";

/// Marker file recording that the first-run tour was shown
const TOUR_FILE: &str = "tour_seen";

// ─────────────────────────────────────────────────────────────────
// Port
// ─────────────────────────────────────────────────────────────────

/// Persistence port for durable client-side state
pub trait CredentialStore: Send + Sync {
    /// Load the persisted token, if any. Unreadable or corrupt state
    /// reads as absent.
    fn load_token(&self) -> Option<String>;

    /// Persist the token
    fn save_token(&self, token: &str) -> Result<()>;

    /// Remove the persisted token. Removing an absent token is not an
    /// error.
    fn clear_token(&self) -> Result<()>;

    /// Whether the first-run tour was already shown
    fn tour_seen(&self) -> bool;

    /// Record that the first-run tour was shown
    fn mark_tour_seen(&self) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────
// Filesystem Store
// ─────────────────────────────────────────────────────────────────

/// Persisted token file contents
#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    access_token: String,
    saved_at: String,
}

/// Stores credentials as files under the client data directory
pub struct FsCredentialStore {
    dir: PathBuf,
}

impl FsCredentialStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { dir: data_dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn tour_path(&self) -> PathBuf {
        self.dir.join(TOUR_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::IoWrite {
            path: self.dir.clone(),
            source: e,
        })
    }
}

impl CredentialStore for FsCredentialStore {
    fn load_token(&self) -> Option<String> {
        let path = self.token_path();
        if !path.exists() {
            return None;
        }
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read token file");
                return None;
            }
        };
        match serde_json::from_str::<PersistedToken>(&data) {
            Ok(persisted) => Some(persisted.access_token),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Corrupt token file ignored");
                None
            }
        }
    }

    fn save_token(&self, token: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.token_path();
        let persisted = PersistedToken {
            access_token: token.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };
        let data = serde_json::to_string_pretty(&persisted)
            .map_err(|e| Error::Internal(format!("Failed to encode token: {}", e)))?;
        std::fs::write(&path, data).map_err(|e| Error::IoWrite {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), "Token saved");
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let path = self.token_path();
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::IoWrite { path, source: e }),
        }
    }

    fn tour_seen(&self) -> bool {
        self.tour_path().exists()
    }

    fn mark_tour_seen(&self) -> Result<()> {
        self.ensure_dir()?;
        let path = self.tour_path();
        std::fs::write(&path, b"true").map_err(|e| Error::IoWrite { path, source: e })
    }
}

// ─────────────────────────────────────────────────────────────────
// In-Memory Store
// ─────────────────────────────────────────────────────────────────

/// In-memory credential store for tests
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
    tour: AtomicBool,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a token, as if a previous run had saved one
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.lock() = Some(token.to_string());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save_token(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        *self.token.lock() = None;
        Ok(())
    }

    fn tour_seen(&self) -> bool {
        self.tour.load(Ordering::SeqCst)
    }

    fn mark_tour_seen(&self) -> Result<()> {
        self.tour.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FsCredentialStore::new(dir.path());

        assert!(store.load_token().is_none());

        store.save_token("tok-abc").unwrap();
        assert_eq!(store.load_token().as_deref(), Some("tok-abc"));

        store.clear_token().unwrap();
        assert!(store.load_token().is_none());
    }

    #[test]
    fn test_fs_store_clear_absent_token_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = FsCredentialStore::new(dir.path());
        assert!(store.clear_token().is_ok());
    }

    #[test]
    fn test_fs_store_corrupt_token_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = FsCredentialStore::new(dir.path());

        std::fs::write(dir.path().join(TOKEN_FILE), b"not json").unwrap();
        assert!(store.load_token().is_none());
    }

    #[test]
    fn test_fs_store_tour_flag() {
        let dir = TempDir::new().unwrap();
        let store = FsCredentialStore::new(dir.path());

        assert!(!store.tour_seen());
        store.mark_tour_seen().unwrap();
        assert!(store.tour_seen());

        // Clearing the token does not touch the tour marker
        store.clear_token().unwrap();
        assert!(store.tour_seen());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::with_token("tok-1");
        assert_eq!(store.load_token().as_deref(), Some("tok-1"));

        store.clear_token().unwrap();
        assert!(store.load_token().is_none());

        assert!(!store.tour_seen());
        store.mark_tour_seen().unwrap();
        assert!(store.tour_seen());
    }
}
