//! Foreign per-diem calculation.
//!
//! A foreign day pays a percentage of the country's daily base, chosen by the
//! time band the hours present fall into, and is converted to the reporting
//! currency at the FX rate effective on that day.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{RatesConfig, REPORTING_CURRENCY};
use crate::error::EngineResult;
use crate::models::{Money, MoneyPair};

use super::rounding::round_money;

/// The outcome of a foreign day calculation, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignDayResult {
    /// Original and converted amounts.
    pub amounts: MoneyPair,
    /// Name of the time band that applied.
    pub band: String,
    /// The daily base effective on the day.
    pub daily_base: Decimal,
    /// The percentage of the daily base paid.
    pub percent_of_daily: Decimal,
    /// The FX rate used for conversion.
    pub fx_rate: Decimal,
}

/// Calculates the foreign allowance for one day, including the band, base
/// and FX rate that produced it.
///
/// Every lookup (schedule, band, FX rate) happens before any amount is
/// computed, so a missing FX schedule fails the day even when the country and
/// band resolve.
///
/// # Errors
///
/// - `UnknownCountry` / `NoEffectiveSchedule` from schedule resolution
/// - `NoMatchingBand` if no foreign band covers `hours`
/// - `MissingFxSchedule` / `NoEffectiveFxRate` from FX resolution
pub fn calculate_foreign_day(
    rates: &RatesConfig,
    country_code: &str,
    day: NaiveDate,
    hours: Decimal,
) -> EngineResult<ForeignDayResult> {
    let (schedule, currency) = rates.resolve_country_schedule(country_code, day)?;
    let band = rates.resolve_time_band(hours)?;
    let fx_rate = rates.resolve_fx_rate(currency, day)?;

    let original_amount =
        round_money(schedule.daily_base * band.percent_of_daily / Decimal::ONE_HUNDRED);
    let converted_amount = round_money(original_amount * fx_rate);

    Ok(ForeignDayResult {
        amounts: MoneyPair {
            original: Money::new(original_amount, currency),
            converted: Money::new(converted_amount, REPORTING_CURRENCY),
        },
        band: band.name.clone(),
        daily_base: schedule.daily_base,
        percent_of_daily: band.percent_of_daily,
        fx_rate,
    })
}

/// Computes the foreign allowance for `hours` present in `country_code` on
/// `day`, in the country's currency and in the reporting currency.
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::compute_foreign_day;
/// use per_diem_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = ConfigLoader::load("./config/rates.yaml")?;
/// let day = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
///
/// let pair = compute_foreign_day(&rates, "CZ", day, Decimal::from(4))?;
/// assert_eq!(pair.original.amount, Decimal::from_str("150.00").unwrap());
/// assert_eq!(pair.original.currency, "CZK");
/// assert_eq!(pair.converted.amount, Decimal::from_str("6.20").unwrap());
/// assert_eq!(pair.converted.currency, "EUR");
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn compute_foreign_day(
    rates: &RatesConfig,
    country_code: &str,
    day: NaiveDate,
    hours: Decimal,
) -> EngineResult<MoneyPair> {
    calculate_foreign_day(rates, country_code, day, hours).map(|result| result.amounts)
}
