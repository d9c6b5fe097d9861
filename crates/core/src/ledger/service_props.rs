//! Property-based tests for ledger operations.
//!
//! - Conservation of value under transfer
//! - Balance non-negativity under arbitrary operation sequences
//! - History bound and `balance_after` correctness

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use granary_shared::types::{AccountId, CardNumber};

use super::error::LedgerError;
use super::service::LedgerService;
use crate::account::{Account, HISTORY_LIMIT};

/// Strategy for positive two-decimal amounts (0.01 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A random single-account or two-account operation.
#[derive(Debug, Clone)]
enum Op {
    Deposit(Decimal),
    Withdraw(Decimal),
    /// Transfer from account 0 to account 1 (or the reverse).
    Transfer { amount: Decimal, reverse: bool },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        amount().prop_map(Op::Deposit),
        amount().prop_map(Op::Withdraw),
        (amount(), any::<bool>()).prop_map(|(amount, reverse)| Op::Transfer { amount, reverse }),
    ]
}

fn fresh_account(sequence: u64, owner: &str) -> Account {
    Account::new(
        AccountId::from_sequence(sequence),
        owner,
        CardNumber::from_sequence(sequence),
        Utc::now(),
    )
}

/// Checks the per-account invariants that must hold after every operation.
fn assert_account_invariants(account: &Account) {
    assert!(account.balance >= Decimal::ZERO, "balance went negative");
    assert!(account.history().len() <= HISTORY_LIMIT, "history over limit");
    let expected = account
        .history()
        .last()
        .map(|e| e.balance_after)
        .unwrap_or_default();
    assert_eq!(account.balance, expected, "balance != last balance_after");
    assert!(
        account
            .history()
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp),
        "history out of order"
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any sequence of valid transfers, the sum of the two balance
    /// deltas is exactly zero: total value is conserved with no rounding
    /// drift at two decimal places.
    #[test]
    fn prop_transfer_conserves_value(
        funding in amount(),
        transfers in prop::collection::vec((amount(), any::<bool>()), 1..50),
    ) {
        let mut ana = fresh_account(1, "Ana");
        let mut bane = fresh_account(2, "Bane");
        LedgerService::deposit(&mut ana, funding, Utc::now()).unwrap();
        LedgerService::deposit(&mut bane, funding, Utc::now()).unwrap();
        let total = ana.balance + bane.balance;

        for (amount, reverse) in transfers {
            let (sender, receiver) = if reverse {
                (&mut bane, &mut ana)
            } else {
                (&mut ana, &mut bane)
            };
            match LedgerService::transfer(sender, receiver, amount, Utc::now()) {
                Ok(()) | Err(LedgerError::InsufficientFunds { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            prop_assert_eq!(ana.balance + bane.balance, total);
        }
    }

    /// For any operation sequence, balances stay non-negative and the
    /// denormalized `balance_after` snapshots stay consistent. Attempted
    /// violations are rejected, never clamped.
    #[test]
    fn prop_invariants_hold_under_any_sequence(ops in prop::collection::vec(op(), 1..100)) {
        let mut ana = fresh_account(1, "Ana");
        let mut bane = fresh_account(2, "Bane");

        for operation in ops {
            let result = match operation {
                Op::Deposit(amount) => LedgerService::deposit(&mut ana, amount, Utc::now()),
                Op::Withdraw(amount) => LedgerService::withdraw(&mut ana, amount, Utc::now()),
                Op::Transfer { amount, reverse } => {
                    let (sender, receiver) = if reverse {
                        (&mut bane, &mut ana)
                    } else {
                        (&mut ana, &mut bane)
                    };
                    LedgerService::transfer(sender, receiver, amount, Utc::now())
                }
            };
            match result {
                Ok(()) | Err(LedgerError::InsufficientFunds { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            assert_account_invariants(&ana);
            assert_account_invariants(&bane);
        }
    }

    /// After any number of deposits, the history retains the most recent
    /// entries only, in chronological order.
    #[test]
    fn prop_history_keeps_most_recent_entries(amounts in prop::collection::vec(amount(), 1..40)) {
        let mut account = fresh_account(1, "Ana");
        let mut running = Decimal::ZERO;
        let mut expected_tail = Vec::new();

        for amount in amounts {
            LedgerService::deposit(&mut account, amount, Utc::now()).unwrap();
            running += amount;
            expected_tail.push(running);
        }

        let retained: Vec<Decimal> = account
            .history()
            .iter()
            .map(|e| e.balance_after)
            .collect();
        let start = expected_tail.len().saturating_sub(HISTORY_LIMIT);
        prop_assert_eq!(retained, &expected_tail[start..]);
    }
}

proptest! {
    // Heavier cases: fewer iterations, each running 1,000 transfers.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_thousand_transfers_no_drift(
        transfers in prop::collection::vec((amount(), any::<bool>()), 1000),
    ) {
        let mut ana = fresh_account(1, "Ana");
        let mut bane = fresh_account(2, "Bane");
        LedgerService::deposit(&mut ana, Decimal::new(50_000_00, 2), Utc::now()).unwrap();
        LedgerService::deposit(&mut bane, Decimal::new(50_000_00, 2), Utc::now()).unwrap();
        let total = ana.balance + bane.balance;

        for (amount, reverse) in transfers {
            let (sender, receiver) = if reverse {
                (&mut bane, &mut ana)
            } else {
                (&mut ana, &mut bane)
            };
            let before = (sender.balance, receiver.balance);
            match LedgerService::transfer(sender, receiver, amount, Utc::now()) {
                Ok(()) => {
                    prop_assert_eq!(sender.balance, before.0 - amount);
                    prop_assert_eq!(receiver.balance, before.1 + amount);
                }
                Err(LedgerError::InsufficientFunds { .. }) => {
                    prop_assert_eq!((sender.balance, receiver.balance), before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
        prop_assert_eq!(ana.balance + bane.balance, total);
    }
}
