//! Home-jurisdiction per-diem calculation.
//!
//! Days spent in the home jurisdiction pay a flat amount from the band set
//! effective on that day. Nothing is paid below [`HOME_MINIMUM_HOURS`].

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::RatesConfig;
use crate::error::EngineResult;

use super::rounding::round_money;

/// Hours present below which a home-jurisdiction day pays nothing.
pub const HOME_MINIMUM_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// The outcome of a home-jurisdiction day calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDayResult {
    /// The allowance in the home currency, rounded to 2 decimal places.
    pub amount: Decimal,
    /// Name of the band that applied; `None` below the 5-hour floor.
    pub band: Option<String>,
}

/// Calculates the home-jurisdiction allowance for one day, including the band
/// that applied.
///
/// # Errors
///
/// - `UnknownCountry` / `NoEffectiveSchedule` if no home band set is
///   effective on `day`
/// - `NoMatchingBand` if the effective bands do not cover `hours`
pub fn calculate_home_day(
    rates: &RatesConfig,
    day: NaiveDate,
    hours: Decimal,
) -> EngineResult<HomeDayResult> {
    if hours < HOME_MINIMUM_HOURS {
        return Ok(HomeDayResult {
            amount: round_money(Decimal::ZERO),
            band: None,
        });
    }

    let band = rates.resolve_home_band(day, hours)?;

    Ok(HomeDayResult {
        amount: round_money(band.amount),
        band: Some(band.name.clone()),
    })
}

/// Computes the home-jurisdiction allowance for `hours` present on `day`.
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::compute_home_day;
/// use per_diem_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = ConfigLoader::load("./config/rates.yaml")?;
/// let day = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
///
/// assert_eq!(compute_home_day(&rates, day, Decimal::from_str("4.9").unwrap())?, Decimal::ZERO);
/// assert_eq!(compute_home_day(&rates, day, Decimal::from(5))?, Decimal::from_str("9.30").unwrap());
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn compute_home_day(rates: &RatesConfig, day: NaiveDate, hours: Decimal) -> EngineResult<Decimal> {
    calculate_home_day(rates, day, hours).map(|result| result.amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rates() -> RatesConfig {
        ConfigLoader::load("./config/rates.yaml").unwrap()
    }

    #[test]
    fn test_below_five_hours_pays_nothing() {
        let result = calculate_home_day(&rates(), make_date("2025-09-10"), dec("4.9")).unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.band, None);
    }

    #[test]
    fn test_below_floor_does_not_need_a_schedule() {
        // No home band set is effective in 2020, but nothing is owed anyway.
        let amount = compute_home_day(&rates(), make_date("2020-01-01"), dec("3")).unwrap();
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_five_hours_pays_lowest_band() {
        let result = calculate_home_day(&rates(), make_date("2025-09-10"), dec("5.0")).unwrap();
        assert_eq!(result.amount, dec("9.30"));
        assert_eq!(result.band.as_deref(), Some("5_to_12"));
    }

    #[test]
    fn test_band_boundaries() {
        let rates = rates();
        let day = make_date("2025-09-10");
        assert_eq!(compute_home_day(&rates, day, dec("11.99")).unwrap(), dec("9.30"));
        assert_eq!(compute_home_day(&rates, day, dec("12")).unwrap(), dec("13.80"));
        assert_eq!(compute_home_day(&rates, day, dec("18")).unwrap(), dec("20.60"));
        assert_eq!(compute_home_day(&rates, day, dec("24")).unwrap(), dec("20.60"));
    }

    #[test]
    fn test_uses_band_set_effective_on_day() {
        let rates = rates();
        assert_eq!(
            compute_home_day(&rates, make_date("2025-05-31"), dec("8")).unwrap(),
            dec("7.80")
        );
        assert_eq!(
            compute_home_day(&rates, make_date("2025-06-01"), dec("8")).unwrap(),
            dec("9.30")
        );
    }

    #[test]
    fn test_amount_has_two_decimal_places() {
        let amount = compute_home_day(&rates(), make_date("2025-05-31"), dec("8")).unwrap();
        assert_eq!(amount.to_string(), "7.80");
    }

    #[test]
    fn test_no_effective_home_schedule_returns_error() {
        match compute_home_day(&rates(), make_date("2024-04-30"), dec("8")) {
            Err(EngineError::NoEffectiveSchedule { code, earliest, .. }) => {
                assert_eq!(code, "SK");
                assert_eq!(earliest, make_date("2024-05-01"));
            }
            other => panic!("Expected NoEffectiveSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_hours_beyond_last_band_return_no_matching_band() {
        assert!(matches!(
            compute_home_day(&rates(), make_date("2025-09-10"), dec("1000")),
            Err(EngineError::NoMatchingBand { .. })
        ));
    }
}
