//! Password hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant with a per-password random salt.
//! Only the PHC-format hash string is ever stored.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing or verification failed unexpectedly.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed")]
    Malformed,
}

/// Hashes a pigeon's password for storage.
///
/// Each call uses a fresh random salt, so equal passwords produce distinct
/// hashes.
///
/// # Errors
///
/// Returns `PasswordError::Hashing` if the hasher fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verifies a login attempt against a stored hash.
///
/// A wrong password is `Ok(false)`, not an error; errors are reserved for
/// malformed hashes and hasher failures.
///
/// # Errors
///
/// Returns `PasswordError::Malformed` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::Malformed)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_format() {
        let hash = hash_password("seeds-and-crumbs").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "seeds-and-crumbs");
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_password("coo-coo").unwrap();
        assert!(verify_password("coo-coo", &hash).unwrap());
        assert!(!verify_password("caw-caw", &hash).unwrap());
    }

    #[test]
    fn test_salting_makes_hashes_unique() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::Malformed)));
    }
}
