//! Per-day allowance dispatch.
//!
//! Routes each [`DayFact`] to the home or foreign calculation and wraps the
//! outcome in a [`DayAllowance`] with both currency legs.

use crate::config::{RatesConfig, REPORTING_CURRENCY};
use crate::error::EngineResult;
use crate::models::{DayAllowance, DayFact, Money, MoneyPair};

use super::foreign_per_diem::calculate_foreign_day;
use super::home_per_diem::calculate_home_day;
use super::rounding::round_money;

/// Calculates the allowance for one day fact.
///
/// Home-jurisdiction days are reported in the home currency and converted at
/// the FX rate effective on the day (1 for the reporting currency); every
/// other country goes through [`compute_foreign_day`].
///
/// [`compute_foreign_day`]: super::compute_foreign_day
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::compute_day;
/// use per_diem_engine::config::ConfigLoader;
/// use per_diem_engine::models::DayFact;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rates = ConfigLoader::load("./config/rates.yaml")?;
/// let fact = DayFact {
///     country_code: "SK".to_string(),
///     calendar_day: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
///     hours_present: Decimal::from(13),
/// };
///
/// let allowance = compute_day(&rates, &fact)?;
/// assert_eq!(allowance.band.as_deref(), Some("12_to_18"));
/// assert_eq!(allowance.amounts.converted.to_string(), "13.80 EUR");
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn compute_day(rates: &RatesConfig, fact: &DayFact) -> EngineResult<DayAllowance> {
    let (amounts, band) = if rates.is_home(&fact.country_code) {
        let result = calculate_home_day(rates, fact.calendar_day, fact.hours_present)?;
        let currency = rates.home_currency();
        let fx_rate = rates.resolve_fx_rate(currency, fact.calendar_day)?;
        let amounts = MoneyPair {
            original: Money::new(result.amount, currency),
            converted: Money::new(round_money(result.amount * fx_rate), REPORTING_CURRENCY),
        };
        (amounts, result.band)
    } else {
        let result = calculate_foreign_day(
            rates,
            &fact.country_code,
            fact.calendar_day,
            fact.hours_present,
        )?;
        (result.amounts, Some(result.band))
    };

    Ok(DayAllowance {
        country_code: fact.country_code.clone(),
        day: fact.calendar_day,
        hours: fact.hours_present,
        band,
        amounts,
    })
}
