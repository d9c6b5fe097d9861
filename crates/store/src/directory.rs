//! The account directory.
//!
//! Owns identifier/card-number allocation and the lookup indices. Account
//! mutation belongs to the ledger; the directory only hands out handles and
//! snapshots.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;
use tracing::{info, warn};

use granary_core::account::Account;
use granary_shared::OwnerPolicy;
use granary_shared::types::{AccountId, AccountRef, CardNumber};

use crate::error::DirectoryError;

/// Shared handle to one account's serialized state.
///
/// All mutation of the account behind the mutex goes through the ledger.
pub(crate) type AccountHandle = Arc<Mutex<Account>>;

/// Account directory: allocation and lookup.
#[derive(Debug)]
pub struct Directory {
    policy: OwnerPolicy,
    /// Next sequence number. Incremented exactly once per created account,
    /// never decremented or reused.
    next_sequence: AtomicU64,
    accounts: DashMap<AccountId, AccountHandle>,
    by_card: DashMap<CardNumber, AccountId>,
    /// Account ids per owner, in creation order.
    by_owner: DashMap<String, Vec<AccountId>>,
}

impl Directory {
    /// Creates an empty directory with the given owner policy.
    #[must_use]
    pub fn new(policy: OwnerPolicy) -> Self {
        Self {
            policy,
            next_sequence: AtomicU64::new(1),
            accounts: DashMap::new(),
            by_card: DashMap::new(),
            by_owner: DashMap::new(),
        }
    }

    /// Allocates the next id/card pair and registers a fresh account for
    /// `owner`.
    ///
    /// The sequence is only consumed on success, so created accounts have
    /// gapless, strictly increasing sequence numbers.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DuplicateOwner` under the
    /// one-account-per-owner policy if the owner already has an account.
    pub fn create_account(&self, owner: &str) -> Result<Account, DirectoryError> {
        // The owner entry guard serializes creation per owner key, making the
        // duplicate check and the index insert one atomic step.
        let mut owned = self.by_owner.entry(owner.to_string()).or_default();
        if self.policy == OwnerPolicy::OneAccountPerOwner && !owned.is_empty() {
            return Err(DirectoryError::DuplicateOwner(owner.to_string()));
        }

        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let id = AccountId::from_sequence(sequence);
        let card_number = CardNumber::from_sequence(sequence);
        let account = Account::new(id.clone(), owner, card_number.clone(), Utc::now());

        self.accounts
            .insert(id.clone(), Arc::new(Mutex::new(account.clone())));
        self.by_card.insert(card_number, id.clone());
        owned.push(id.clone());

        info!(account_id = %id, owner, "account created");
        Ok(account)
    }

    /// Resolves a reference to an account snapshot.
    ///
    /// Under the multi-account-per-owner policy an owner reference may match
    /// several accounts; resolution deterministically picks the first-created
    /// one and logs a warning, since this is informational for the caller
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` if no account matches.
    pub fn resolve(&self, reference: &AccountRef) -> Result<Account, DirectoryError> {
        let id = self.resolve_id(reference)?;
        self.snapshot(&id)
            .ok_or_else(|| DirectoryError::NotFound(reference.clone()))
    }

    /// Looks up an account snapshot by card number.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` if the card number is unknown.
    pub fn find_by_card_number(&self, card_number: &CardNumber) -> Result<Account, DirectoryError> {
        self.resolve(&AccountRef::ByCardNumber(card_number.clone()))
    }

    /// Returns snapshots of all accounts held by `owner`, in creation order.
    #[must_use]
    pub fn list_accounts(&self, owner: &str) -> Vec<Account> {
        self.by_owner
            .get(owner)
            .map(|ids| ids.iter().filter_map(|id| self.snapshot(id)).collect())
            .unwrap_or_default()
    }

    /// Resolves a reference to an account id.
    pub(crate) fn resolve_id(&self, reference: &AccountRef) -> Result<AccountId, DirectoryError> {
        let id = match reference {
            AccountRef::ById(id) => self.accounts.contains_key(id).then(|| id.clone()),
            AccountRef::ByCardNumber(card) => self.by_card.get(card).map(|entry| entry.value().clone()),
            AccountRef::ByOwner(owner) => self.by_owner.get(owner).and_then(|ids| {
                if ids.len() > 1 {
                    warn!(
                        owner,
                        matches = ids.len(),
                        "owner resolves to multiple accounts; using the first-created"
                    );
                }
                ids.first().cloned()
            }),
        };
        id.ok_or_else(|| DirectoryError::NotFound(reference.clone()))
    }

    /// Returns the shared handle for an account id.
    pub(crate) fn handle(&self, id: &AccountId) -> Option<AccountHandle> {
        self.accounts.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Clones the current state of an account.
    fn snapshot(&self, id: &AccountId) -> Option<Account> {
        self.handle(id)
            .map(|handle| handle.lock().expect("account lock poisoned").clone())
    }
}
