//! Amount parsing and validation.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Grain amounts are `rust_decimal::Decimal` values with two-decimal-place
//! semantics. Wire input arrives as decimal strings and is parsed exactly;
//! anything that is not a strictly positive number with at most two decimal
//! places is rejected before it reaches the ledger.

use rust_decimal::Decimal;
use thiserror::Error;

/// Maximum number of decimal places an amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Errors produced by amount parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input is not a decimal number.
    #[error("amount is not a valid decimal number")]
    NotANumber,

    /// The amount is zero or negative.
    #[error("amount must be positive")]
    NotPositive,

    /// The amount has more than two decimal places.
    #[error("amount cannot have more than {AMOUNT_SCALE} decimal places")]
    TooPrecise,
}

/// Parses a wire amount string into a validated `Decimal`.
///
/// Exact parsing: `"10.50"` is accepted, `"10.505"`, `"abc"`, `"NaN"`,
/// `"-3"` and `"0"` are not.
///
/// # Errors
///
/// Returns `AmountError` if the string is not a strictly positive decimal
/// with at most two decimal places.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let amount = Decimal::from_str_exact(raw.trim()).map_err(|_| AmountError::NotANumber)?;
    validate_amount(amount)
}

/// Validates an already-parsed amount.
///
/// The returned value is normalized so that `1.50` and `1.5` compare and
/// format identically.
///
/// # Errors
///
/// Returns `AmountError::NotPositive` for zero or negative amounts and
/// `AmountError::TooPrecise` for more than two decimal places.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, AmountError> {
    if amount <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }
    let normalized = amount.normalize();
    if normalized.scale() > AMOUNT_SCALE {
        return Err(AmountError::TooPrecise);
    }
    Ok(normalized)
}
