//! User credential storage.
//!
//! Stores only the Argon2id hash produced by `granary_core::auth`; the plain
//! password never reaches this module.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::UserError;

/// A registered user.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique username; doubles as the account owner key.
    pub username: String,
    /// Argon2id password hash in PHC format.
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// In-memory user store keyed by username.
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, UserRecord>,
}

impl UserStore {
    /// Creates an empty user store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UsernameTaken` if the username is registered;
    /// the check and insert are one atomic step.
    pub fn register(&self, username: &str, password_hash: String) -> Result<UserRecord, UserError> {
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(UserError::UsernameTaken(username.to_string())),
            Entry::Vacant(vacant) => {
                let record = UserRecord {
                    username: username.to_string(),
                    password_hash,
                    created_at: Utc::now(),
                };
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    /// Looks up a user by username.
    #[must_use]
    pub fn find(&self, username: &str) -> Option<UserRecord> {
        self.users.get(username).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_find() {
        let store = UserStore::new();
        store.register("Ana", "$argon2id$fake".to_string()).unwrap();

        let record = store.find("Ana").unwrap();
        assert_eq!(record.username, "Ana");
        assert_eq!(record.password_hash, "$argon2id$fake");
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = UserStore::new();
        store.register("Ana", "hash1".to_string()).unwrap();

        let err = store.register("Ana", "hash2".to_string()).unwrap_err();
        assert_eq!(err, UserError::UsernameTaken("Ana".to_string()));

        // The original credentials are untouched.
        assert_eq!(store.find("Ana").unwrap().password_hash, "hash1");
    }

    #[test]
    fn test_unknown_user_absent() {
        let store = UserStore::new();
        assert!(store.find("Nobody").is_none());
    }
}
