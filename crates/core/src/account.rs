//! The account aggregate.
//!
//! An account ("pigeon") is created once with a zero balance and an empty
//! history, and is only ever mutated through ledger operations. Accounts are
//! never deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use granary_shared::types::{AccountId, CardNumber};

use crate::ledger::LedgerEntry;

/// Maximum number of history entries retained per account.
pub const HISTORY_LIMIT: usize = 10;

/// A balance-holding account identified by a unique id and card number.
///
/// The balance is always non-negative and always equals the `balance_after`
/// of the most recent history entry (or zero when the history is empty).
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique identifier, assigned sequentially at creation.
    pub id: AccountId,
    /// Owner display label.
    pub owner: String,
    /// 16-digit routing key for transfers.
    pub card_number: CardNumber,
    /// Current grain balance.
    pub balance: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// The most recent ledger entries, oldest first, capped at [`HISTORY_LIMIT`].
    history: Vec<LedgerEntry>,
}

impl Account {
    /// Creates a new account with zero balance and empty history.
    #[must_use]
    pub fn new(
        id: AccountId,
        owner: impl Into<String>,
        card_number: CardNumber,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner: owner.into(),
            card_number,
            balance: Decimal::ZERO,
            created_at,
            history: Vec::new(),
        }
    }

    /// Returns the retained history, oldest entry first.
    #[must_use]
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }

    /// Returns the timestamp of the most recent entry, if any.
    #[must_use]
    pub fn last_entry_at(&self) -> Option<DateTime<Utc>> {
        self.history.last().map(|entry| entry.timestamp)
    }

    /// Applies a prepared ledger entry: updates the balance, appends the
    /// entry, and evicts the oldest entry once the history exceeds
    /// [`HISTORY_LIMIT`].
    ///
    /// Callers (the ledger service) are responsible for having validated the
    /// operation; an entry that would break an account invariant is a bug,
    /// not a recoverable error.
    pub(crate) fn apply(&mut self, entry: LedgerEntry) {
        debug_assert!(entry.amount > Decimal::ZERO);
        debug_assert!(entry.balance_after >= Decimal::ZERO);
        debug_assert!(
            self.last_entry_at().is_none_or(|t| entry.timestamp >= t),
            "history timestamps must be non-decreasing"
        );

        self.balance = entry.balance_after;
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }

        debug_assert!(self.history.len() <= HISTORY_LIMIT);
        debug_assert_eq!(
            self.balance,
            self.history.last().map(|e| e.balance_after).unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{EntryKind, LedgerEntry};
    use rust_decimal_macros::dec;

    fn entry(amount: Decimal, balance_after: Decimal) -> LedgerEntry {
        LedgerEntry {
            timestamp: Utc::now(),
            kind: EntryKind::Deposit,
            amount,
            counterparty: None,
            balance_after,
        }
    }

    fn test_account() -> Account {
        Account::new(
            AccountId::from_sequence(1),
            "Ana",
            CardNumber::from_sequence(1),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = test_account();
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.history().is_empty());
        assert!(account.last_entry_at().is_none());
    }

    #[test]
    fn test_apply_updates_balance_and_history() {
        let mut account = test_account();
        account.apply(entry(dec!(50), dec!(50)));

        assert_eq!(account.balance, dec!(50));
        assert_eq!(account.history().len(), 1);
    }

    #[test]
    fn test_history_evicts_oldest_beyond_limit() {
        let mut account = test_account();
        for i in 1..=12u32 {
            let running = Decimal::from(i);
            account.apply(entry(dec!(1), running));
        }

        assert_eq!(account.history().len(), HISTORY_LIMIT);
        // The first two entries were evicted; the oldest retained is the 3rd.
        assert_eq!(account.history()[0].balance_after, dec!(3));
        assert_eq!(account.balance, dec!(12));
    }

    #[test]
    fn test_history_is_chronological() {
        let mut account = test_account();
        account.apply(entry(dec!(2), dec!(2)));
        account.apply(entry(dec!(3), dec!(5)));

        let entries = account.history();
        assert!(entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
