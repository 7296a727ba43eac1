//! Numeric coercion of user-entered text
//!
//! Form inputs arrive as free text. Blank or malformed values become zero
//! instead of failing, so the settlement chain is always defined.

use std::str::FromStr;

use rust_decimal::prelude::*;

/// Parse a money/weight/rate input, degrading to zero
pub fn coerce_amount(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    if let Ok(value) = Decimal::from_str(trimmed) {
        return value;
    }
    if let Ok(value) = Decimal::from_scientific(trimmed) {
        return value;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO)
}

/// Parse a package count; negatives and garbage become zero, fractions truncate
pub fn coerce_count(text: &str) -> u64 {
    let value = coerce_amount(text).trunc();
    if value.is_sign_negative() {
        return 0;
    }
    value.to_u64().unwrap_or(0)
}
