use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::{Result, TierError};

/// Reject negative amounts.
///
/// # Errors
///
/// Returns `TierError::InvalidAmount` if `amount` is below zero.
pub fn check_amount(amount: Decimal) -> Result<Decimal> {
    if amount < Decimal::ZERO {
        return Err(TierError::InvalidAmount(format!("{amount} is negative")));
    }
    Ok(amount)
}

/// Parse a user-supplied amount such as `"1000.01"` or `"2e6"`.
///
/// # Errors
///
/// Returns `TierError::InvalidAmount` for empty, malformed, non-finite
/// (`NaN`, `inf`) or negative input.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TierError::InvalidAmount("empty amount".to_string()));
    }

    let amount = if trimmed.contains(is_exponent) {
        parse_scientific(trimmed)?
    } else {
        Decimal::from_str(trimmed).map_err(|e| not_an_amount(trimmed, e))?
    };
    check_amount(amount)
}

fn is_exponent(c: char) -> bool {
    c == 'e' || c == 'E'
}

fn not_an_amount(text: &str, err: rust_decimal::Error) -> TierError {
    TierError::InvalidAmount(format!("{text:?} is not a valid amount: {err}"))
}

/// Scientific notation, rounding to the 28 places `Decimal` can hold when the
/// exponent asks for more (`1e-30` becomes `0`).
fn parse_scientific(text: &str) -> Result<Decimal> {
    let err = match Decimal::from_scientific(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let Some((mantissa, exponent)) = text.split_once(is_exponent) else {
        return Err(not_an_amount(text, err));
    };
    let (Ok(mantissa), Ok(exponent)) = (Decimal::from_str(mantissa), exponent.parse::<i64>())
    else {
        return Err(not_an_amount(text, err));
    };
    if exponent >= 0 {
        return Err(not_an_amount(text, err));
    }
    // Rounding must not turn a negative amount into zero.
    let mantissa = check_amount(mantissa)?;

    // Past 57 digits of shift every mantissa has rounded to zero.
    let mut value = mantissa;
    for _ in 0..exponent.unsigned_abs().min(64) {
        value /= Decimal::TEN;
    }
    Ok(value)
}
