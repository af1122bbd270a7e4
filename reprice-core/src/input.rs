//! Raw text → numeric inputs.
//!
//! Form fields arrive as free text. `parse_amount` turns each one into a
//! number the same forgiving way a browser's `parseFloat(..) || 0` does: the
//! longest leading decimal number is taken and anything else becomes zero.
//! This is the only place coercion happens, so the arithmetic in
//! [`crate::reprice`] can assume well-formed numbers.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::domain::{CalculatorInputs, MarketQuote, Position};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("unknown calculation mode '{0}' (expected 'shares' or 'price')")]
    UnknownMode(String),
}

/// How negative numbers are treated once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Negatives flow through the arithmetic untouched.
    #[default]
    Permissive,
    /// Any negative field is rejected before evaluation.
    Strict,
}

/// Parse a numeric field, yielding `0.0` for anything unusable.
///
/// Empty, non-numeric, NaN and infinite inputs all come back as zero, and
/// `-0` is folded into `0`. Trailing garbage after a valid number is ignored (`"12.5abc"` → `12.5`).
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim();
    let prefix = numeric_prefix(text);
    let value = prefix.parse::<f64>().unwrap_or(0.0);
    let value = if value.is_finite() && value != 0.0 { value } else { 0.0 };

    if prefix.len() != text.len() {
        trace!(raw, value, "coerced non-numeric input");
    }
    value
}

/// Longest leading `[sign] digits [. digits] [e [sign] digits]` slice.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Unparsed field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    #[serde(default)]
    pub stock: Option<String>,
    #[serde(default)]
    pub shares: String,
    #[serde(default)]
    pub avg_buy_price: String,
    #[serde(default)]
    pub current_price: String,
    #[serde(default)]
    pub new_shares: String,
    #[serde(default)]
    pub target_average: String,
}

impl RawInputs {
    /// Coerce every field and apply the negative-number policy.
    pub fn parse(&self, policy: InputPolicy) -> Result<CalculatorInputs, InputError> {
        let shares = parse_amount(&self.shares);
        let avg_buy_price = parse_amount(&self.avg_buy_price);
        let current_price = parse_amount(&self.current_price);
        let new_shares = parse_amount(&self.new_shares);
        let target_average = parse_amount(&self.target_average);

        if policy == InputPolicy::Strict {
            for (field, value) in [
                ("shares", shares),
                ("average buy price", avg_buy_price),
                ("current price", current_price),
                ("new shares", new_shares),
                ("target average", target_average),
            ] {
                if value < 0.0 {
                    return Err(InputError::Negative { field, value });
                }
            }
        }

        Ok(CalculatorInputs {
            stock: self.stock.clone(),
            position: Position::new(shares, avg_buy_price),
            quote: MarketQuote::new(current_price),
            new_shares,
            target_average,
        })
    }
}
