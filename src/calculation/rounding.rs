//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every reported amount carries.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds `amount` half-up (away from zero) to 2 decimal places.
///
/// The result always carries a scale of 2, so `600` renders as `600.00`.
/// Applied exactly once per leg, on the final product; intermediate products
/// are never rounded.
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.35").unwrap());
/// assert_eq!(round_money(Decimal::from_str("6.204243705").unwrap()), Decimal::from_str("6.20").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
