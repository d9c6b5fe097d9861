//! Tagged account references.
//!
//! External callers may refer to an account by owner name, by account id, or
//! by card number. Instead of sniffing string shapes at every call site, the
//! reference is classified exactly once at the boundary and carried as an
//! explicit variant from then on.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::{AccountId, CardNumber};

/// A reference to an account, disambiguated by shape.
///
/// Precedence: the `PIGEON-NNNN` id pattern wins, then a 16-digit numeric
/// string is treated as a card number, and anything else is an owner key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRef {
    /// Reference by owner key (display name / username).
    ByOwner(String),
    /// Reference by account id.
    ById(AccountId),
    /// Reference by 16-digit card number.
    ByCardNumber(CardNumber),
}

impl AccountRef {
    /// Classifies a raw reference string.
    ///
    /// Never fails: strings that match neither the id pattern nor the card
    /// number shape are owner keys.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if let Ok(id) = raw.parse::<AccountId>() {
            return Self::ById(id);
        }
        if let Ok(card) = raw.parse::<CardNumber>() {
            return Self::ByCardNumber(card);
        }
        Self::ByOwner(raw.to_string())
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByOwner(owner) => write!(f, "owner:{owner}"),
            Self::ById(id) => write!(f, "id:{id}"),
            Self::ByCardNumber(card) => write!(f, "card:{card}"),
        }
    }
}

impl From<AccountId> for AccountRef {
    fn from(id: AccountId) -> Self {
        Self::ById(id)
    }
}

impl From<CardNumber> for AccountRef {
    fn from(card: CardNumber) -> Self {
        Self::ByCardNumber(card)
    }
}
