//! Rate table types for per-diem interpretation.
//!
//! This module contains the strongly-typed structures that make up a rate
//! table, plus the raw document shapes deserialized from YAML.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::timeline::{EffectiveFrom, Timeline};

/// The currency every converted amount is reported in.
pub const REPORTING_CURRENCY: &str = "EUR";

/// The home jurisdiction used when a rate table does not name one.
pub const DEFAULT_HOME_COUNTRY: &str = "SK";

/// A half-open `[min, max)` interval of hours present.
pub trait HourRange {
    /// Band identifier used in diagnostics.
    fn band_name(&self) -> &str;
    /// Inclusive lower bound.
    fn min_hours(&self) -> Decimal;
    /// Exclusive upper bound.
    fn max_hours(&self) -> Decimal;

    /// Whether `hours` falls inside this band.
    fn contains(&self, hours: Decimal) -> bool {
        self.min_hours() <= hours && hours < self.max_hours()
    }
}

/// Returns the first band in `bands` whose interval contains `hours`.
pub fn find_band<B: HourRange>(bands: &[B], hours: Decimal) -> Option<&B> {
    bands.iter().find(|b| b.contains(hours))
}

/// A foreign time band mapping hours present to a share of the daily base.
///
/// # Example
///
/// ```
/// use per_diem_engine::config::{HourRange, TimeBand};
/// use rust_decimal::Decimal;
///
/// let band = TimeBand {
///     name: "6_to_12".to_string(),
///     min_hours_inclusive: Decimal::from(6),
///     max_hours_exclusive: Decimal::from(12),
///     percent_of_daily: Decimal::from(50),
/// };
/// assert!(band.contains(Decimal::from(6)));
/// assert!(!band.contains(Decimal::from(12)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBand {
    /// Band identifier, e.g. "to_6".
    pub name: String,
    /// Inclusive lower bound in hours.
    pub min_hours_inclusive: Decimal,
    /// Exclusive upper bound in hours.
    pub max_hours_exclusive: Decimal,
    /// Percentage of the daily base paid for this band (25, 50, 100).
    pub percent_of_daily: Decimal,
}

impl HourRange for TimeBand {
    fn band_name(&self) -> &str {
        &self.name
    }

    fn min_hours(&self) -> Decimal {
        self.min_hours_inclusive
    }

    fn max_hours(&self) -> Decimal {
        self.max_hours_exclusive
    }
}

/// A home-jurisdiction band paying a flat amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticBand {
    /// Band identifier, e.g. "5_to_12".
    pub name: String,
    /// Inclusive lower bound in hours.
    pub min_hours_inclusive: Decimal,
    /// Exclusive upper bound in hours.
    pub max_hours_exclusive: Decimal,
    /// Flat allowance for the day in the home currency.
    pub amount: Decimal,
}

impl HourRange for DomesticBand {
    fn band_name(&self) -> &str {
        &self.name
    }

    fn min_hours(&self) -> Decimal {
        self.min_hours_inclusive
    }

    fn max_hours(&self) -> Decimal {
        self.max_hours_exclusive
    }
}

/// A version of a foreign country's daily base allowance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySchedule {
    /// First date on which this daily base applies.
    pub effective_from: NaiveDate,
    /// Full daily allowance in the country's currency.
    pub daily_base: Decimal,
}

impl EffectiveFrom for CountrySchedule {
    fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }
}

/// A version of the home jurisdiction's band set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSchedule {
    /// First date on which these bands apply.
    pub effective_from: NaiveDate,
    /// Bands sorted ascending by lower bound.
    pub bands: Vec<DomesticBand>,
}

impl EffectiveFrom for HomeSchedule {
    fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }
}

/// Per-diem rates for one foreign country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRates {
    /// ISO currency the daily base is expressed in.
    pub currency_code: String,
    /// Daily base versions.
    pub schedules: Timeline<CountrySchedule>,
}

/// Per-diem rates for the home jurisdiction.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeRates {
    /// ISO currency the flat amounts are expressed in.
    pub currency_code: String,
    /// Band set versions.
    pub schedules: Timeline<HomeSchedule>,
}

/// A version of a currency's rate to the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxSchedule {
    /// First date on which this rate applies.
    pub effective_from: NaiveDate,
    /// Value of one unit of the currency in the reporting currency.
    pub rate_to_reporting_currency: Decimal,
}

impl EffectiveFrom for FxSchedule {
    fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }
}

/// Top-level shape of a rates YAML document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RatesDocument {
    /// Informational document version.
    #[serde(default)]
    pub version: Option<u32>,
    /// Home jurisdiction code; defaults to [`DEFAULT_HOME_COUNTRY`].
    #[serde(default)]
    pub home_country: Option<String>,
    pub foreign_time_bands: Vec<TimeBand>,
    pub countries: BTreeMap<String, CountryDocument>,
    #[serde(default)]
    pub fx_rates_to_eur: Option<BTreeMap<String, FxDocument>>,
}

/// A `countries` entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CountryDocument {
    pub currency: String,
    pub schedules: Vec<ScheduleDocument>,
}

/// A schedule entry; foreign countries carry `daily_base`, the home
/// jurisdiction carries `bands`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScheduleDocument {
    pub effective_from: NaiveDate,
    #[serde(default)]
    pub daily_base: Option<Decimal>,
    #[serde(default)]
    pub bands: Option<Vec<DomesticBand>>,
}

/// An `fx_rates_to_eur` entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FxDocument {
    pub schedules: Vec<FxRateDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FxRateDocument {
    pub effective_from: NaiveDate,
    pub rate: Decimal,
}
