//! Persisted session marker.
//!
//! The client-held record of the last authenticated user: one JSON file at
//! a well-known path. Presence of the file - not its content - is the login
//! truth value. There is no expiry, refresh, or signature check; the marker
//! is a deliberate simplification carried over from the product design.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

/// Errors raised by the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the marker file failed.
    #[error("session file I/O: {0}")]
    Io(#[from] io::Error),

    /// The persisted marker exists but is not valid JSON.
    #[error("malformed session marker: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Store for the persisted session marker.
///
/// The [`BookingClient`](crate::BookingClient) is the single owner. Views
/// read login state through the client and may [`subscribe`](Self::subscribe)
/// to transitions instead of polling.
pub struct SessionStore {
    path: PathBuf,
    login_state: watch::Sender<bool>,
}

impl SessionStore {
    /// Open a store over the marker file at `path`.
    ///
    /// The file is not created; a missing file simply means "logged out".
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (login_state, _) = watch::channel(path.exists());
        Self { path, login_state }
    }

    /// Whether a session marker currently exists.
    ///
    /// Synchronous presence check only; the content is never inspected and
    /// no network call is made.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the persisted marker.
    ///
    /// Returns `Ok(None)` when no marker exists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] if the file exists but does not
    /// parse as JSON, [`SessionError::Io`] on read failure.
    pub fn get(&self) -> Result<Option<Value>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Persist `user` as the session marker, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the marker file cannot be written.
    pub fn set(&self, user: &Value) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(user)?)?;
        self.login_state.send_replace(true);
        Ok(())
    }

    /// Delete the session marker.
    ///
    /// Removing an already-absent marker is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the marker file cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.login_state.send_replace(false);
        Ok(())
    }

    /// Subscribe to login-state transitions.
    ///
    /// The receiver holds the current state and observes a new value on
    /// every [`set`](Self::set) / [`clear`](Self::clear).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.login_state.subscribe()
    }

    /// Path of the marker file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn test_absent_marker_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_logged_in());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_returns_exact_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let user = json!({"id": 1, "name": "A"});
        store.set(&user).unwrap();

        assert!(store.is_logged_in());
        assert_eq!(store.get().unwrap(), Some(user));
    }

    #[test]
    fn test_set_overwrites_previous_marker() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set(&json!({"id": 1})).unwrap();
        store.set(&json!({"id": 2})).unwrap();

        assert_eq!(store.get().unwrap(), Some(json!({"id": 2})));
    }

    #[test]
    fn test_clear_removes_marker_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set(&json!({"id": 1})).unwrap();
        store.clear().unwrap();

        assert!(!store.is_logged_in());
        assert!(store.get().unwrap().is_none());

        // Clearing again is not an error.
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_marker_is_an_error_but_still_logged_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(&path);

        // Presence, not content, drives the login check.
        assert!(store.is_logged_in());
        assert!(matches!(store.get(), Err(SessionError::Malformed(_))));
    }

    #[test]
    fn test_subscribe_observes_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut login_state = store.subscribe();

        assert!(!*login_state.borrow_and_update());

        store.set(&json!({"id": 1})).unwrap();
        assert!(login_state.has_changed().unwrap());
        assert!(*login_state.borrow_and_update());

        store.clear().unwrap();
        assert!(login_state.has_changed().unwrap());
        assert!(!*login_state.borrow_and_update());
    }

    #[test]
    fn test_parent_directory_created_on_first_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        store.set(&json!({"id": 1})).unwrap();
        assert!(store.is_logged_in());
    }
}
