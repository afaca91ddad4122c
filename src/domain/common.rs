use std::str::FromStr;

use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::errors::{LuminaError, Result};

/// Rejects negative amounts. `Decimal` cannot hold NaN or infinity, so this is
/// the only range check left once a value has been converted.
pub fn ensure_non_negative(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LuminaError::InvalidAmount(format!(
            "{amount} must be zero or positive"
        )));
    }
    Ok(amount)
}

/// Rejects amounts that would not read back unchanged. Expense amounts are
/// persisted as JSON numbers, which carry about 15 significant digits.
pub fn ensure_storable(amount: Decimal) -> Result<Decimal> {
    let reread = amount
        .to_f64()
        .and_then(|float| Decimal::from_str(&float.to_string()).ok());
    match reread {
        Some(value) if value == amount => Ok(amount),
        _ => Err(LuminaError::InvalidAmount(format!(
            "{amount} has more precision than can be stored"
        ))),
    }
}

/// Parses a user-typed amount such as `"12.50"` into a non-negative decimal.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LuminaError::InvalidAmount("amount is required".into()));
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LuminaError::InvalidAmount(format!("`{trimmed}` is not a number")))?;
    ensure_non_negative(value).and_then(ensure_storable)
}

/// Converts a float coming from an external boundary, rejecting NaN and infinities.
pub fn amount_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(LuminaError::InvalidAmount(format!("{value} is not finite")));
    }
    // Display gives the shortest round-tripping form, so 19.99 stays 19.99.
    let amount = Decimal::from_str(&value.to_string())
        .map_err(|_| LuminaError::InvalidAmount(format!("{value} is out of range")))?;
    ensure_non_negative(amount)
}
