//! Session context: tokens, user, and the current working project.
//!
//! The session is an explicit value with a load/save/clear lifecycle,
//! mirrored to a JSON file on disk. API-calling code receives it (or its
//! store) as an argument; there is no ambient global.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::types::User;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token attached to authenticated requests
    pub access_token: String,

    /// Token used by the one-shot refresh, when the server issued one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// The logged-in user
    pub user: User,

    /// The current working project, applied implicitly to task operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_project_id: Option<i64>,
}

impl Session {
    /// Create a session for a freshly authenticated user.
    pub fn new(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            user,
            current_project_id: None,
        }
    }
}

/// File-backed session persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store over the given session file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if there is a usable one.
    ///
    /// A corrupt session file is cleared and treated as absent.
    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("clearing corrupt session file: {}", err);
                let _ = self.clear();
                None
            }
        }
    }

    /// Persist a session.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Remove the persisted session.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Mutate the persisted session in place.
    ///
    /// Fails with [`Error::Unauthorized`] when no session exists.
    pub fn update(&self, mutate: impl FnOnce(&mut Session)) -> Result<Session> {
        let mut session = self.load().ok_or(Error::Unauthorized)?;
        mutate(&mut session);
        self.save(&session)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: 1,
            username: "devmode".to_string(),
            email: "dev@example.com".to_string(),
        }
    }

    #[test]
    fn test_save_load_clear_lifecycle() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        assert!(store.load().is_none());

        let session = Session::new("tok", user());
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_cleared_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(&path);
        assert!(store.load().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_update_sets_current_project() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store.save(&Session::new("tok", user())).unwrap();

        let updated = store
            .update(|s| s.current_project_id = Some(42))
            .unwrap();
        assert_eq!(updated.current_project_id, Some(42));
        assert_eq!(store.load().unwrap().current_project_id, Some(42));
    }

    #[test]
    fn test_update_without_session_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(matches!(
            store.update(|_| {}),
            Err(Error::Unauthorized)
        ));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested/dir/session.json"));
        store.save(&Session::new("tok", user())).unwrap();
        assert!(store.load().is_some());
    }
}
