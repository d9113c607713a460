use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{HealthError, Result};
use crate::state::{load_json, remove_if_exists, save_json};

/// Proof of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: Uuid,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(username: &str) -> Self {
        Self {
            username: username.to_string(),
            token: Uuid::new_v4(),
            issued_at: Utc::now(),
        }
    }
}

/// Keeps the current session between invocations.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn current(&self) -> Result<Option<Session>> {
        load_json(&self.path)
    }

    /// The current session, or `NotLoggedIn`.
    pub fn require(&self) -> Result<Session> {
        self.current()?.ok_or(HealthError::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        save_json(&self.path, session)?;
        debug!(username = %session.username, token = %session.token, "session saved");
        Ok(())
    }

    /// Forget the session. Returns the user that was logged in, if any.
    pub fn clear(&self) -> Result<Option<String>> {
        let previous = self.current()?.map(|s| s.username);
        remove_if_exists(&self.path)?;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_require_without_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(matches!(store.require(), Err(HealthError::NotLoggedIn)));
    }

    #[test]
    fn test_save_require_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = Session::issue("alice");

        store.save(&session).unwrap();
        assert_eq!(store.require().unwrap(), session);

        assert_eq!(store.clear().unwrap(), Some("alice".to_string()));
        assert!(store.current().unwrap().is_none());
        assert_eq!(store.clear().unwrap(), None);
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(Session::issue("a").token, Session::issue("a").token);
    }
}
