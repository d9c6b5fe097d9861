//! Ledger error types.
//!
//! Every operation returns a result that is either success or one named
//! failure kind; no state is mutated on failure. Internal consistency
//! violations are enforced with debug assertions in the account aggregate
//! rather than surfaced here, since no caller input can produce them when
//! preconditions are checked.

use rust_decimal::Decimal;
use thiserror::Error;

use granary_shared::types::{AmountError, CardNumber};

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The amount is non-positive, non-numeric, or too precise.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// The operation would drive the balance negative.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: Decimal,
        /// Amount that was requested.
        requested: Decimal,
    },

    /// The transfer target card number does not resolve to an account.
    #[error("No account found for card number {0}")]
    RecipientNotFound(CardNumber),

    /// Sender and receiver are the same account.
    #[error("Cannot transfer to your own card; use a deposit instead")]
    SelfTransferRejected,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::RecipientNotFound(_) => "RECIPIENT_NOT_FOUND",
            Self::SelfTransferRejected => "SELF_TRANSFER_REJECTED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount(_)
            | Self::InsufficientFunds { .. }
            | Self::SelfTransferRejected => 400,
            Self::RecipientNotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidAmount(AmountError::NotPositive).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::InsufficientFunds {
                balance: dec!(50),
                requested: dec!(70),
            }
            .error_code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(LedgerError::SelfTransferRejected.error_code(), "SELF_TRANSFER_REJECTED");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            LedgerError::InvalidAmount(AmountError::NotANumber).http_status_code(),
            400
        );
        assert_eq!(
            LedgerError::RecipientNotFound(CardNumber::from_sequence(9)).http_status_code(),
            404
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientFunds {
            balance: dec!(50.00),
            requested: dec!(70.00),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: balance 50.00, requested 70.00"
        );
    }
}
