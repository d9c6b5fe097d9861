//! Shared domain types.

pub mod amount;
pub mod id;
pub mod reference;

pub use amount::{AmountError, parse_amount, validate_amount};
pub use id::{AccountId, CardNumber};
pub use reference::AccountRef;
