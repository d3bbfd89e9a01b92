//! Password hashing and verification (Argon2, PHC string format).

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hash a password into a PHC-format Argon2 string.
///
/// The core itself never stores hashes; this exists for the administrative
/// tooling that provisions identities, and for tests.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordHashError::Hash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
///
/// A hash that does not parse counts as a failed verification rather than an
/// error: a corrupt directory row must deny login, not crash it.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("unparseable password hash in directory: {e}");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_hash_denies_instead_of_panicking() {
        assert!(!verify_password("pw1", "not-a-phc-string"));
        assert!(!verify_password("pw1", ""));
    }
}
