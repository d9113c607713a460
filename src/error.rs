use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed diet plan: {0}")]
    MalformedPlan(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredential,

    #[error("Please log in first")]
    NotLoggedIn,

    #[error("Invalid risk model: {0}")]
    InvalidModel(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl HealthError {
    /// True for mistakes the caller can fix (bad form data, bad credentials).
    /// Everything else is reported as a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HealthError::InvalidInput(_)
                | HealthError::MalformedPlan(_)
                | HealthError::UsernameTaken(_)
                | HealthError::InvalidCredential
                | HealthError::NotLoggedIn
        )
    }
}

pub type Result<T> = std::result::Result<T, HealthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(HealthError::InvalidInput("age".into()).is_client_error());
        assert!(HealthError::MalformedPlan("missing".into()).is_client_error());
        assert!(HealthError::NotLoggedIn.is_client_error());
        assert!(HealthError::InvalidCredential.is_client_error());
    }

    #[test]
    fn test_server_errors() {
        assert!(!HealthError::Render("stream".into()).is_client_error());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!HealthError::from(io).is_client_error());
    }
}
