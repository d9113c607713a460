mod credentials;
mod session;

pub use credentials::{CredentialStore, JsonCredentialStore, UserRecord};
pub use session::{Session, SessionStore};
