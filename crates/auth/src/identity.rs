//! Identity records and the directory port.
//!
//! Identities are owned and mutated by an external directory; this core only
//! reads them (lookup-by-email, password verification, confirmation check).

use async_trait::async_trait;
use thiserror::Error;

use leaguehub_core::UserId;

/// An external user record, as read from the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    /// Argon2 PHC-format hash, verified via [`crate::password::verify_password`].
    pub password_hash: String,
    /// Unconfirmed identities can exist in the directory but cannot log in.
    pub confirmed: bool,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("identity directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-side port onto the external identity directory.
///
/// The core never creates or destroys identities; administrative tooling owns
/// the write side entirely.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up an identity by email.
    ///
    /// Email comparison is the directory's concern; implementations are
    /// expected to match case-insensitively (emails are stored lowercased).
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError>;
}
