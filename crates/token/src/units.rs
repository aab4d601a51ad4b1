//! Conversion between user-facing decimal amounts and base units.

use alloy_primitives::{
    utils::{format_units, parse_units, ParseUnits},
    Address, U256,
};
use config::TOKEN_DECIMALS;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative")]
    Negative,

    #[error("amount has more than {} decimal places", TOKEN_DECIMALS)]
    TooManyDecimals,

    #[error("{0}")]
    Malformed(String),
}

/// Convert a decimal string such as `"1.5"` into base units.
///
/// The conversion is exact: `"1.5"` becomes `1500000000000000000`. Digits
/// beyond the token's decimals are an error rather than being dropped.
pub fn parse_amount(amount: &str) -> Result<U256, AmountError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }
    if amount.starts_with('-') {
        return Err(AmountError::Negative);
    }
    if amount
        .split_once('.')
        .is_some_and(|(_, fraction)| fraction.len() > TOKEN_DECIMALS as usize)
    {
        return Err(AmountError::TooManyDecimals);
    }

    match parse_units(amount, TOKEN_DECIMALS).map_err(|e| AmountError::Malformed(e.to_string()))? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(AmountError::Negative),
    }
}

/// Render base units as a decimal string, trimming trailing zeros but keeping
/// at least one fractional digit (`1.5`, `100.0`, `0.0`).
pub fn format_amount(amount: U256) -> String {
    // Formatting an unsigned value with a valid decimal count cannot fail.
    let formatted =
        format_units(amount, TOKEN_DECIMALS).unwrap_or_else(|_| amount.to_string());

    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}

/// Parse a hex address as typed by the user. Letter casing is not significant.
pub fn parse_address(input: &str) -> Result<Address, String> {
    let input = input.trim();
    Address::from_str(input).map_err(|e| format!("{input:?}: {e}"))
}
