//! Money Conversion Module
//!
//! Conversion between user-entered amount text and the `Decimal` balances
//! held by accounts, plus display formatting. Every amount typed into the
//! transfer form goes through [`parse_amount`].
//!
//! ## Representation
//! - Balances and amounts are `rust_decimal::Decimal`
//! - The currency is KES with 2 minor-unit digits
//! - Display uses thousands separators and drops trailing zeros
//!
//! ## Usage
//! ```rust
//! use bankdash::money::{format_kes, parse_amount};
//!
//! let amount = parse_amount("2000").unwrap();
//! assert_eq!(format_kes(amount), "KES 2,000");
//! ```

use std::str::FromStr;

use rust_decimal::prelude::*;
use thiserror::Error;

/// Currency code shown next to every amount.
pub const CURRENCY: &str = "KES";

/// Minor-unit digits accepted for amounts.
pub const MINOR_UNITS: u32 = 2;

// ============================================================================
// Error Types
// ============================================================================

/// Money conversion errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

// ============================================================================
// Parse: Client → Internal (String → Decimal)
// ============================================================================

/// Convert amount text typed by the user into a positive `Decimal`.
///
/// # Errors
/// * `InvalidFormat` - empty or non-numeric text
/// * `InvalidAmount` - zero or negative amounts
/// * `PrecisionOverflow` - more than [`MINOR_UNITS`] significant decimals
pub fn parse_amount(amount_str: &str) -> Result<Decimal, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    let value = Decimal::from_str(amount_str)
        .map_err(|_| MoneyError::InvalidFormat(format!("not a number: {}", amount_str)))?;

    parse_decimal(value)
}

/// Validate an already-parsed `Decimal` as a transfer amount.
pub fn parse_decimal(value: Decimal) -> Result<Decimal, MoneyError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(MoneyError::InvalidAmount);
    }

    // "100.50" and "100.5" are the same amount; only real extra digits are rejected
    let value = value.normalize();
    if value.scale() > MINOR_UNITS {
        return Err(MoneyError::PrecisionOverflow {
            provided: value.scale(),
            max: MINOR_UNITS,
        });
    }

    Ok(value)
}

// ============================================================================
// Format: Internal → Client (Decimal → String)
// ============================================================================

/// Format an amount with thousands separators, e.g. `48000` → `"48,000"`.
pub fn format_amount(value: Decimal) -> String {
    let value = value.round_dp(MINOR_UNITS).normalize();
    let digits = value.abs().to_string();
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an amount with the currency prefix, e.g. `"KES 48,000"`.
pub fn format_kes(value: Decimal) -> String {
    format!("{} {}", CURRENCY, format_amount(value))
}
