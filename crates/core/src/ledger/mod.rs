//! Ledger operations.
//!
//! This module implements the balance-affecting operations:
//! - Ledger entries (the per-account history records)
//! - Deposit, withdrawal, and transfer arithmetic
//! - Error types for ledger operations
//!
//! The functions here are pure: they operate on [`crate::account::Account`]
//! values handed to them by the caller, which owns locking and atomicity.

pub mod entry;
pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use entry::{EntryKind, LedgerEntry};
pub use error::LedgerError;
pub use service::LedgerService;
