//! Durable holder of the bearer credential.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;

/// Process-wide holder of the current bearer token.
///
/// At most one credential is active at a time; absence means
/// unauthenticated. The token is mirrored to a file so a restart does not
/// force a re-login. Mutation happens only from user-triggered handlers
/// (login success, logout), never from fetch completions, which is what
/// keeps the lock-free read path safe.
pub struct CredentialStore {
    /// File the token survives in between runs; `None` for an in-memory
    /// store (tests, ephemeral sessions).
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Open the store backed by `path`, loading any previously saved token.
    pub fn open(path: PathBuf) -> Result<Self> {
        let token = match fs::read_to_string(&path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    debug!(path = %path.display(), "Loaded stored credential");
                    Some(trimmed.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            token: RwLock::new(token),
        })
    }

    /// An in-memory store with no backing file.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            token: RwLock::new(None),
        }
    }

    /// The current token, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replace the stored token. Takes effect before any request constructed
    /// afterwards.
    pub fn set(&self, token: &str) -> Result<()> {
        if let Some(ref path) = self.path {
            persist(path, token)?;
        }
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    /// Drop the stored token and its file.
    pub fn clear(&self) -> Result<()> {
        if let Some(ref path) = self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        *self.token.write() = None;
        Ok(())
    }
}

/// Write the token with the write-to-temp-then-rename pattern so a crash
/// never leaves a half-written credential behind.
fn persist(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;

    let cleanup_and_err = |e: std::io::Error| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    file.write_all(token.as_bytes()).map_err(cleanup_and_err)?;
    file.sync_all().map_err(cleanup_and_err)?;

    fs::rename(&temp_path, path).map_err(cleanup_and_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_lifecycle() {
        let store = CredentialStore::ephemeral();
        assert!(store.get().is_none());

        store.set("tok-1").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok-1"));
        assert!(store.has_credential());

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-token");

        let store = CredentialStore::open(path.clone()).unwrap();
        assert!(store.get().is_none());
        store.set("9c53a367").unwrap();

        let reopened = CredentialStore::open(path).unwrap();
        assert_eq!(reopened.get().as_deref(), Some("9c53a367"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-token");

        let store = CredentialStore::open(path.clone()).unwrap();
        store.set("tok").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());

        let reopened = CredentialStore::open(path).unwrap();
        assert!(reopened.get().is_none());
    }

    #[test]
    fn test_set_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/finboard/auth-token");

        let store = CredentialStore::open(path.clone()).unwrap();
        store.set("tok").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_set_replaces_previous_token() {
        let store = CredentialStore::ephemeral();
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().as_deref(), Some("second"));
    }
}
