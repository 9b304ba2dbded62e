//! Monetary types for profit and quota amounts.

use rust_decimal::Decimal;
use thiserror::Error;

/// Amount of money represented as a Decimal for precision.
pub type Amount = Decimal;

/// A sum left the range `Decimal` can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount out of range")]
pub struct AmountOverflow;

/// `a + b`, or [`AmountOverflow`] instead of panicking.
pub fn checked_sum(a: Amount, b: Amount) -> Result<Amount, AmountOverflow> {
    a.checked_add(b).ok_or(AmountOverflow)
}

/// Format an amount with thousands separators, prefixed by `symbol`.
///
/// Uses western three-digit grouping. Fractional digits are kept only when
/// the amount has them, so `150000` prints as `₹150,000`.
#[must_use]
pub fn format_amount(symbol: &str, amount: Amount) -> String {
    let normalized = amount.normalize();
    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    let text = normalized.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{symbol}{grouped}.{fraction}"),
        None => format!("{sign}{symbol}{grouped}"),
    }
}
