//! Ledger entry domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Grain paid into the account.
    Deposit,
    /// Grain taken out of the account.
    Withdrawal,
    /// Grain sent to another account by card number.
    TransferSent,
    /// Grain received from another account.
    TransferReceived,
}

/// A single entry in an account's history.
///
/// `balance_after` is a denormalized snapshot of the account balance
/// immediately after the entry was applied; it always equals the running
/// balance at that point.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    /// When the operation was applied. Non-decreasing within one account's
    /// history.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: EntryKind,
    /// Amount moved by this entry, always strictly positive.
    pub amount: Decimal,
    /// The other party's owner name for transfers, absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Account balance immediately after this entry.
    pub balance_after: Decimal,
}
