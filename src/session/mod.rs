//! Session state: the single source of truth for authentication.
//!
//! Holds the current access token and user in memory and mirrors every
//! mutation synchronously to a JSON file, so a new process starts out
//! authenticated after a successful login. The refresh cookie itself is
//! never stored here; it lives in the HTTP client's cookie store.

pub mod guard;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The authenticated user as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    access_token: Option<String>,
    user: Option<User>,
    is_authenticated: bool,
}

/// Mutable session store backed by a JSON file on disk.
pub struct SessionStore {
    state: RwLock<SessionState>,
    path: PathBuf,
}

impl SessionStore {
    /// Open the store, rehydrating state from `path` when a previous session
    /// was persisted there. A missing or corrupt file yields an empty,
    /// unauthenticated session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<SessionState>(&raw) {
                Ok(state) => {
                    debug!(path = %path.display(), "Rehydrated session");
                    state
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                    SessionState::default()
                }
            },
            Err(_) => SessionState::default(),
        };
        Self {
            state: RwLock::new(state),
            path,
        }
    }

    /// Record a fresh login: token plus user, marked authenticated.
    pub fn login(&self, token: &str, user: User) -> Result<()> {
        {
            let mut state = self.state.write();
            state.access_token = Some(token.to_string());
            state.user = Some(user);
            state.is_authenticated = true;
        }
        self.persist()
    }

    /// Replace the access token, keeping the current user.
    pub fn set_access_token(&self, token: &str) -> Result<()> {
        {
            let mut state = self.state.write();
            state.access_token = Some(token.to_string());
            state.is_authenticated = true;
        }
        self.persist()
    }

    /// Replace the stored user, keeping the current token.
    pub fn set_user(&self, user: User) -> Result<()> {
        self.state.write().user = Some(user);
        self.persist()
    }

    /// End the session and remove the persisted file.
    pub fn logout(&self) -> Result<()> {
        self.clear_auth()
    }

    /// Tear down all auth state. Called on logout and on refresh failure.
    pub fn clear_auth(&self) -> Result<()> {
        *self.state.write() = SessionState::default();
        if self.path.exists() {
            std::fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file: {}", self.path.display())
            })?;
        }
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            crate::utils::ensure_dir(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let snapshot = self.state.read().clone();
        let raw = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u-1".into(),
            name: "Admin".into(),
            email: "admin@example.com".into(),
            role: "admin".into(),
        }
    }

    #[test]
    fn test_fresh_store_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        assert!(!store.is_authenticated());
        assert!(store.access_token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_login_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path);
        store.login("tok-123", test_user()).unwrap();

        // Simulated process restart: a new store rehydrates from disk.
        let reloaded = SessionStore::open(&path);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.access_token().as_deref(), Some("tok-123"));
        assert_eq!(reloaded.user().unwrap().email, "admin@example.com");
    }

    #[test]
    fn test_logout_removes_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path);
        store.login("tok-123", test_user()).unwrap();
        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(!path.exists());
        let reloaded = SessionStore::open(&path);
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_set_access_token_keeps_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store.login("old", test_user()).unwrap();
        store.set_access_token("new").unwrap();

        assert_eq!(store.access_token().as_deref(), Some("new"));
        assert_eq!(store.user().unwrap().id, "u-1");
    }

    #[test]
    fn test_corrupt_session_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = SessionStore::open(&path);
        assert!(!store.is_authenticated());
    }
}
