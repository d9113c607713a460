use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::session::Session;
use crate::error::{HealthError, Result};
use crate::state::{load_json, save_json};

/// Registration and login capability.
pub trait CredentialStore {
    /// Create an account. Fails with `UsernameTaken` for an existing name.
    fn register(&mut self, username: &str, password: &str) -> Result<()>;

    /// Check a password and open a session. Unknown users and wrong
    /// passwords both fail with `InvalidCredential`.
    fn authenticate(&self, username: &str, password: &str) -> Result<Session>;
}

/// A stored account. Only the bcrypt hash of the password is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credential store backed by a JSON file of `UserRecord`s.
pub struct JsonCredentialStore {
    path: PathBuf,
    users: Vec<UserRecord>,
    cost: u32,
}

impl JsonCredentialStore {
    /// Open the store at `path`, starting empty if the file is missing.
    ///
    /// `cost` is the bcrypt work factor used for new hashes.
    pub fn open<P: AsRef<Path>>(path: P, cost: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let users: Vec<UserRecord> = load_json(&path)?.unwrap_or_default();
        debug!(users = users.len(), path = %path.display(), "loaded credential store");
        Ok(Self { path, users, cost })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find(&self, username: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.username == username)
    }
}

impl CredentialStore for JsonCredentialStore {
    fn register(&mut self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(HealthError::InvalidInput("Username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(HealthError::InvalidInput("Password must not be empty".to_string()));
        }
        if self.find(username).is_some() {
            return Err(HealthError::UsernameTaken(username.to_string()));
        }

        let password_hash = bcrypt::hash(password, self.cost)?;
        self.users.push(UserRecord {
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        });
        save_json(&self.path, &self.users)?;

        info!(username, "registered user");
        Ok(())
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        let Some(user) = self.find(username) else {
            warn!(username, "login attempt for unknown user");
            return Err(HealthError::InvalidCredential);
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            warn!(username, "login attempt with wrong password");
            return Err(HealthError::InvalidCredential);
        }

        info!(username, "user logged in");
        Ok(Session::issue(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_register_and_authenticate() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonCredentialStore::open(dir.path().join("users.json"), TEST_COST).unwrap();

        store.register("alice", "s3cret").unwrap();
        let session = store.authenticate("alice", "s3cret").unwrap();
        assert_eq!(session.username, "alice");
    }

    #[test]
    fn test_password_is_not_stored_in_plaintext() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut store = JsonCredentialStore::open(&path, TEST_COST).unwrap();
        store.register("bob", "hunter22").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("hunter22"));
        assert!(raw.contains("bob"));
    }

    #[test]
    fn test_duplicate_username() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonCredentialStore::open(dir.path().join("users.json"), TEST_COST).unwrap();
        store.register("carol", "pw").unwrap();

        let err = store.register("carol", "other").unwrap_err();
        assert!(matches!(err, HealthError::UsernameTaken(name) if name == "carol"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_wrong_password_and_unknown_user() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonCredentialStore::open(dir.path().join("users.json"), TEST_COST).unwrap();
        store.register("dave", "right").unwrap();

        assert!(matches!(
            store.authenticate("dave", "wrong"),
            Err(HealthError::InvalidCredential)
        ));
        assert!(matches!(
            store.authenticate("erin", "right"),
            Err(HealthError::InvalidCredential)
        ));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonCredentialStore::open(dir.path().join("users.json"), TEST_COST).unwrap();
        assert!(matches!(store.register("  ", "pw"), Err(HealthError::InvalidInput(_))));
        assert!(matches!(store.register("frank", ""), Err(HealthError::InvalidInput(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_reloads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        {
            let mut store = JsonCredentialStore::open(&path, TEST_COST).unwrap();
            store.register("gina", "pw").unwrap();
        }

        let reopened = JsonCredentialStore::open(&path, TEST_COST).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.authenticate("gina", "pw").is_ok());
    }
}
