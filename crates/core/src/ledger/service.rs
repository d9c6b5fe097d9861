//! Pure ledger operations.
//!
//! Each operation is a single atomic transition on the account values it is
//! given: all preconditions are checked before the first mutation, so a
//! failed operation leaves every account untouched. The caller owns locking;
//! these functions only do in-memory arithmetic, keeping critical sections
//! short.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use granary_shared::types::validate_amount;

use super::entry::{EntryKind, LedgerEntry};
use super::error::LedgerError;
use crate::account::Account;

/// Ledger operations on account values.
pub struct LedgerService;

impl LedgerService {
    /// Deposits grain into an account.
    ///
    /// Deposits cannot be rejected for balance reasons; the only failure is
    /// an invalid amount.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for non-positive or too-precise
    /// amounts.
    pub fn deposit(
        account: &mut Account,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        let balance_after = account.balance + amount;

        account.apply(LedgerEntry {
            timestamp: Self::entry_timestamp(account, now),
            kind: EntryKind::Deposit,
            amount,
            counterparty: None,
            balance_after,
        });
        Ok(())
    }

    /// Withdraws grain from an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for non-positive or too-precise
    /// amounts, and `LedgerError::InsufficientFunds` if the withdrawal would
    /// drive the balance negative (the balance is never clamped).
    pub fn withdraw(
        account: &mut Account,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            });
        }
        let balance_after = account.balance - amount;

        account.apply(LedgerEntry {
            timestamp: Self::entry_timestamp(account, now),
            kind: EntryKind::Withdrawal,
            amount,
            counterparty: None,
            balance_after,
        });
        Ok(())
    }

    /// Moves grain from `sender` to `receiver` as one atomic unit.
    ///
    /// Both accounts are mutated or neither is: every precondition is checked
    /// before the first entry is applied. The two balance deltas cancel
    /// exactly; `Decimal` arithmetic has no rounding drift at two decimal
    /// places.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount`, `LedgerError::SelfTransferRejected`
    /// if both sides are the same account, or `LedgerError::InsufficientFunds`
    /// if the sender cannot cover the amount.
    pub fn transfer(
        sender: &mut Account,
        receiver: &mut Account,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let amount = validate_amount(amount)?;
        if sender.id == receiver.id {
            return Err(LedgerError::SelfTransferRejected);
        }
        if sender.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: sender.balance,
                requested: amount,
            });
        }

        let sender_after = sender.balance - amount;
        let receiver_after = receiver.balance + amount;

        sender.apply(LedgerEntry {
            timestamp: Self::entry_timestamp(sender, now),
            kind: EntryKind::TransferSent,
            amount,
            counterparty: Some(receiver.owner.clone()),
            balance_after: sender_after,
        });
        receiver.apply(LedgerEntry {
            timestamp: Self::entry_timestamp(receiver, now),
            kind: EntryKind::TransferReceived,
            amount,
            counterparty: Some(sender.owner.clone()),
            balance_after: receiver_after,
        });
        Ok(())
    }

    /// Timestamp for a new entry, clamped so one account's history never goes
    /// backwards even if the wall clock does.
    fn entry_timestamp(account: &Account, now: DateTime<Utc>) -> DateTime<Utc> {
        account.last_entry_at().map_or(now, |last| last.max(now))
    }
}
