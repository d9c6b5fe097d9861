//! The ledger application layer.
//!
//! Resolves accounts through the directory, serializes per-account mutation
//! behind each account's mutex, and applies the pure operations from
//! `granary_core`. Critical sections contain only in-memory arithmetic, never
//! I/O, so lock hold time is bounded and short.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use granary_core::account::Account;
use granary_core::ledger::{LedgerError, LedgerService};
use granary_shared::types::{AccountRef, CardNumber};

use crate::directory::Directory;
use crate::error::{DirectoryError, OperationError};

/// Applies balance-affecting operations against the directory's accounts.
#[derive(Debug, Clone)]
pub struct Ledger {
    directory: Arc<Directory>,
}

impl Ledger {
    /// Creates a ledger over the given directory.
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }

    /// Deposits grain into the referenced account and returns its updated
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reference does not resolve, or
    /// `InvalidAmount` for a bad amount.
    pub fn deposit(
        &self,
        reference: &AccountRef,
        amount: Decimal,
    ) -> Result<Account, OperationError> {
        let id = self.directory.resolve_id(reference)?;
        let handle = self
            .directory
            .handle(&id)
            .ok_or_else(|| DirectoryError::NotFound(reference.clone()))?;

        let snapshot = {
            let mut account = handle.lock().expect("account lock poisoned");
            LedgerService::deposit(&mut account, amount, Utc::now())?;
            account.clone()
        };
        info!(account_id = %snapshot.id, %amount, balance = %snapshot.balance, "deposit applied");
        Ok(snapshot)
    }

    /// Withdraws grain from the referenced account and returns its updated
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidAmount`, or `InsufficientFunds`; on any
    /// failure the account is untouched.
    pub fn withdraw(
        &self,
        reference: &AccountRef,
        amount: Decimal,
    ) -> Result<Account, OperationError> {
        let id = self.directory.resolve_id(reference)?;
        let handle = self
            .directory
            .handle(&id)
            .ok_or_else(|| DirectoryError::NotFound(reference.clone()))?;

        let snapshot = {
            let mut account = handle.lock().expect("account lock poisoned");
            LedgerService::withdraw(&mut account, amount, Utc::now())?;
            account.clone()
        };
        info!(account_id = %snapshot.id, %amount, balance = %snapshot.balance, "withdrawal applied");
        Ok(snapshot)
    }

    /// Transfers grain from the sender to the account behind
    /// `receiver_card`, atomically, and returns the updated sender snapshot.
    ///
    /// Both account locks are taken in global id order, never
    /// sender-then-receiver, so two opposite-direction transfers cannot
    /// deadlock. All preconditions are checked before the first mutation; no
    /// partial transfer is ever visible.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for the sender reference, `RecipientNotFound` for
    /// the card number, `SelfTransferRejected`, `InvalidAmount`, or
    /// `InsufficientFunds`.
    pub fn transfer(
        &self,
        sender: &AccountRef,
        receiver_card: &CardNumber,
        amount: Decimal,
    ) -> Result<Account, OperationError> {
        let sender_id = self.directory.resolve_id(sender)?;
        let receiver_id = self
            .directory
            .resolve_id(&AccountRef::ByCardNumber(receiver_card.clone()))
            .map_err(|_| LedgerError::RecipientNotFound(receiver_card.clone()))?;

        if sender_id == receiver_id {
            return Err(LedgerError::SelfTransferRejected.into());
        }

        let sender_handle = self
            .directory
            .handle(&sender_id)
            .ok_or_else(|| DirectoryError::NotFound(sender.clone()))?;
        let receiver_handle = self
            .directory
            .handle(&receiver_id)
            .ok_or_else(|| LedgerError::RecipientNotFound(receiver_card.clone()))?;

        // Fixed global lock order by account id, regardless of direction.
        let snapshot = {
            let (mut sender_guard, mut receiver_guard) = if sender_id < receiver_id {
                let sender_guard = sender_handle.lock().expect("account lock poisoned");
                let receiver_guard = receiver_handle.lock().expect("account lock poisoned");
                (sender_guard, receiver_guard)
            } else {
                let receiver_guard = receiver_handle.lock().expect("account lock poisoned");
                let sender_guard = sender_handle.lock().expect("account lock poisoned");
                (sender_guard, receiver_guard)
            };

            LedgerService::transfer(&mut sender_guard, &mut receiver_guard, amount, Utc::now())?;
            sender_guard.clone()
        };
        info!(
            sender_id = %snapshot.id,
            receiver_card = %receiver_card,
            %amount,
            sender_balance = %snapshot.balance,
            "transfer applied"
        );
        Ok(snapshot)
    }
}
