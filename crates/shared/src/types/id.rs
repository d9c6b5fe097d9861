//! Typed identifiers for accounts.
//!
//! Both identifiers are derived from the directory's sequence counter: the
//! account id is the human-facing form, the card number is the 16-digit
//! routing key used for transfers. Using distinct types prevents accidentally
//! passing one where the other is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix for account identifiers.
const ID_PREFIX: &str = "PIGEON-";

/// Length of a card number in decimal digits.
const CARD_NUMBER_LEN: usize = 16;

/// Error returned when parsing a typed identifier fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// The string does not match the `PIGEON-NNNN` pattern.
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    /// The string is not a 16-digit decimal card number.
    #[error("invalid card number: {0}")]
    InvalidCardNumber(String),
}

/// Unique account identifier in the form `PIGEON-NNNN`.
///
/// The 4-digit sequence number is zero-padded and widens past four digits
/// once the counter exceeds 9999. Identifiers are assigned once at creation
/// and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Derives the account id for a sequence number.
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{ID_PREFIX}{sequence:04}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the string matches the account id pattern.
    #[must_use]
    pub fn matches(raw: &str) -> bool {
        raw.strip_prefix(ID_PREFIX)
            .is_some_and(|digits| digits.len() >= 4 && digits.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::matches(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(IdParseError::InvalidAccountId(s.to_string()))
        }
    }
}

impl TryFrom<String> for AccountId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// 16-digit zero-padded card number, the routing key for transfers.
///
/// Derived from the same sequence counter as [`AccountId`]; globally unique
/// and immutable for the lifetime of the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardNumber(String);

impl CardNumber {
    /// Derives the card number for a sequence number.
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{sequence:016}"))
    }

    /// Returns the card number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the string is exactly 16 decimal digits.
    #[must_use]
    pub fn matches(raw: &str) -> bool {
        raw.len() == CARD_NUMBER_LEN && raw.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CardNumber {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::matches(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(IdParseError::InvalidCardNumber(s.to_string()))
        }
    }
}

impl TryFrom<String> for CardNumber {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardNumber> for String {
    fn from(card: CardNumber) -> Self {
        card.0
    }
}
