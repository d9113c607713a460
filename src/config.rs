use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";
const PREDICTIONS_FILE: &str = "predictions.csv";

/// Resolved runtime settings. All persistent files live under `data_dir`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub model_path: PathBuf,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            model_path: model_path.into(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    pub fn predictions_path(&self) -> PathBuf {
        self.data_dir.join(PREDICTIONS_FILE)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_in_data_dir() {
        let config = AppConfig::new("/var/lib/health", "model.json");
        assert_eq!(config.users_path(), Path::new("/var/lib/health/users.json"));
        assert_eq!(config.session_path(), Path::new("/var/lib/health/session.json"));
        assert_eq!(
            config.predictions_path(),
            Path::new("/var/lib/health/predictions.csv")
        );
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.with_bcrypt_cost(4).bcrypt_cost, 4);
    }
}
