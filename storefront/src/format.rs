//! Display helpers shared across the storefront.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::{AMOUNT_DECIMAL_PLACES, ESCROW_FEE_RATE};
use crate::traits::RandomSource;

pub use crate::catalog::average_rating;

/// Shorten an account address to `0x1234...abcd`.
///
/// Always takes the first six and last four characters, so inputs shorter
/// than ten characters overlap. Only an empty address stays empty.
pub fn truncate_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars[..chars.len().min(6)].iter().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

/// `Aug 15, 2023`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Coarse relative time such as `3 days ago`.
pub fn time_ago(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    const UNITS: [(i64, &str); 5] = [
        (31_536_000, "years"),
        (2_592_000, "months"),
        (86_400, "days"),
        (3_600, "hours"),
        (60, "minutes"),
    ];

    let seconds = (*now - *then).num_seconds();
    for (unit, label) in UNITS {
        // A unit is used only once more than one whole unit has passed.
        if seconds > unit {
            return format!("{} {label} ago", seconds / unit);
        }
    }
    format!("{seconds} seconds ago")
}

/// Escrow fee owed on `amount`, or `None` if it cannot be represented.
pub fn escrow_fee(amount: Decimal) -> Option<Decimal> {
    amount.checked_mul(ESCROW_FEE_RATE)
}

/// Fixed six-digit rendering used for prices and totals, e.g. `0.102500`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.6}", amount.round_dp(AMOUNT_DECIMAL_PLACES))
}

/// Compact crypto amount: at most six decimals, trailing zeros dropped,
/// scientific notation for dust below one millionth.
pub fn format_crypto(value: Decimal) -> String {
    let dust = Decimal::new(1, AMOUNT_DECIMAL_PLACES);
    if !value.is_zero() && value.abs() < dust {
        return value
            .to_f64()
            .map_or_else(|| "0".to_string(), |v| format!("{v:.4e}"));
    }
    value.round_dp(AMOUNT_DECIMAL_PLACES).normalize().to_string()
}

/// Thousands-separated points balance, e.g. `2,500`.
pub fn format_points(points: u64) -> String {
    let digits = points.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Random `0x`-prefixed 32-byte hash for mock transactions.
pub fn generate_tx_hash(random: &dyn RandomSource) -> String {
    format!("0x{}", hex::encode(random.random_bytes_32()))
}
