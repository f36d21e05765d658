//! Trip total aggregation.

use rust_decimal::Decimal;

use crate::models::DayAllowance;

use super::rounding::round_money;

/// Sums the converted amounts of a trip's days, rounded to 2 decimal places.
///
/// The per-day amounts are already rounded; the final rounding only fixes the
/// scale of the result.
pub fn sum_trip(day_results: &[DayAllowance]) -> Decimal {
    let total: Decimal = day_results
        .iter()
        .map(|d| d.amounts.converted.amount)
        .sum();
    round_money(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MoneyPair};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(converted: &str) -> DayAllowance {
        DayAllowance {
            country_code: "CZ".to_string(),
            day: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            hours: dec("8"),
            band: Some("6_to_12".to_string()),
            amounts: MoneyPair {
                original: Money::new(dec("300.00"), "CZK"),
                converted: Money::new(dec(converted), "EUR"),
            },
        }
    }

    #[test]
    fn test_empty_trip_totals_zero() {
        assert_eq!(sum_trip(&[]).to_string(), "0.00");
    }

    #[test]
    fn test_sums_converted_amounts() {
        let total = sum_trip(&[day("6.20"), day("24.82"), day("12.41")]);
        assert_eq!(total, dec("43.43"));
    }
}
