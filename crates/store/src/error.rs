//! Store error types.

use thiserror::Error;

use granary_core::ledger::LedgerError;
use granary_shared::types::AccountRef;

/// Errors from the account directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The reference does not resolve to any account.
    #[error("No account found for {0}")]
    NotFound(AccountRef),

    /// The owner already has an account (one-account-per-owner policy).
    #[error("Owner '{0}' already has an account")]
    DuplicateOwner(String),
}

impl DirectoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateOwner(_) => "DUPLICATE_OWNER",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::DuplicateOwner(_) => 409,
        }
    }
}

/// Errors from user credential storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// The username is already registered.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
}

impl UserError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::UsernameTaken(_) => 409,
        }
    }
}

/// Combined error for ledger operations routed through the store.
///
/// An operation can fail while resolving its accounts (directory) or while
/// applying the balance change (ledger); either way no state was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Account resolution failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The ledger operation itself was rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl OperationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Directory(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Directory(e) => e.http_status_code(),
            Self::Ledger(e) => e.http_status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use granary_shared::types::CardNumber;

    #[test]
    fn test_status_codes() {
        let not_found = DirectoryError::NotFound(AccountRef::parse("Ana"));
        assert_eq!(not_found.http_status_code(), 404);
        assert_eq!(not_found.error_code(), "NOT_FOUND");

        let duplicate = DirectoryError::DuplicateOwner("Ana".to_string());
        assert_eq!(duplicate.http_status_code(), 409);

        let taken = UserError::UsernameTaken("Ana".to_string());
        assert_eq!(taken.http_status_code(), 409);
    }

    #[test]
    fn test_operation_error_delegates() {
        let err: OperationError =
            LedgerError::RecipientNotFound(CardNumber::from_sequence(7)).into();
        assert_eq!(err.error_code(), "RECIPIENT_NOT_FOUND");
        assert_eq!(err.http_status_code(), 404);

        let err: OperationError = DirectoryError::NotFound(AccountRef::parse("ghost")).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
