//! The loaded, immutable rate repository.
//!
//! A [`RatesConfig`] is built once by the loader and then only read. Every
//! query is a pure function of the table and its arguments, so one instance
//! can be shared by reference across any number of trips or threads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

use super::timeline::Timeline;
use super::types::{
    CountryRates, CountrySchedule, DomesticBand, FxSchedule, HomeRates, HomeSchedule,
    REPORTING_CURRENCY, TimeBand, find_band,
};

/// The complete rate table: foreign bands, per-country schedules, the home
/// jurisdiction's band sets and FX schedules.
#[derive(Debug, Clone)]
pub struct RatesConfig {
    version: Option<u32>,
    home_country: String,
    foreign_time_bands: Vec<TimeBand>,
    countries: HashMap<String, CountryRates>,
    home: Option<HomeRates>,
    fx_rates: HashMap<String, Timeline<FxSchedule>>,
}

impl RatesConfig {
    /// Assembles a repository from validated parts.
    ///
    /// Codes are expected upper-cased and bands sorted; [`ConfigLoader`]
    /// guarantees both.
    ///
    /// [`ConfigLoader`]: super::ConfigLoader
    pub(crate) fn new(
        version: Option<u32>,
        home_country: String,
        foreign_time_bands: Vec<TimeBand>,
        countries: HashMap<String, CountryRates>,
        home: Option<HomeRates>,
        fx_rates: HashMap<String, Timeline<FxSchedule>>,
    ) -> Self {
        Self {
            version,
            home_country,
            foreign_time_bands,
            countries,
            home,
            fx_rates,
        }
    }

    /// The informational document version, if the source declared one.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// The home jurisdiction code (upper-case).
    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    /// Whether `code` names the home jurisdiction.
    pub fn is_home(&self, code: &str) -> bool {
        code.eq_ignore_ascii_case(&self.home_country)
    }

    /// Foreign time bands, ascending by lower bound.
    pub fn foreign_time_bands(&self) -> &[TimeBand] {
        &self.foreign_time_bands
    }

    /// Registered foreign country codes.
    pub fn country_codes(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// Currency of the home jurisdiction's flat amounts.
    ///
    /// Falls back to the reporting currency when the table carries no home
    /// entry.
    pub fn home_currency(&self) -> &str {
        self.home
            .as_ref()
            .map_or(REPORTING_CURRENCY, |h| h.currency_code.as_str())
    }

    /// Selects the foreign schedule effective on `on_date` and its currency.
    ///
    /// # Errors
    ///
    /// - `UnknownCountry` if `country_code` has no foreign entry
    /// - `NoEffectiveSchedule` if every schedule starts after `on_date`
    ///
    /// # Example
    ///
    /// ```
    /// use per_diem_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let rates = ConfigLoader::from_yaml_str("inline", r#"
    /// foreign_time_bands:
    ///   - { name: "all_day", min_hours_inclusive: 0, max_hours_exclusive: 1000, percent_of_daily: 100 }
    /// countries:
    ///   CZ:
    ///     currency: CZK
    ///     schedules:
    ///       - { effective_from: "2026-01-30", daily_base: 600 }
    /// "#)?;
    ///
    /// let (schedule, currency) =
    ///     rates.resolve_country_schedule("cz", NaiveDate::from_ymd_opt(2026, 2, 2).unwrap())?;
    /// assert_eq!(currency, "CZK");
    /// assert_eq!(schedule.daily_base.to_string(), "600");
    /// # Ok::<(), per_diem_engine::error::EngineError>(())
    /// ```
    pub fn resolve_country_schedule(
        &self,
        country_code: &str,
        on_date: NaiveDate,
    ) -> EngineResult<(&CountrySchedule, &str)> {
        let code = country_code.to_uppercase();
        let rates = self
            .countries
            .get(&code)
            .ok_or_else(|| EngineError::UnknownCountry { code: code.clone() })?;

        let schedule = rates
            .schedules
            .as_of(on_date)
            .map_err(|earliest| EngineError::NoEffectiveSchedule {
                code,
                date: on_date,
                earliest,
            })?;

        Ok((schedule, rates.currency_code.as_str()))
    }

    /// Selects the home jurisdiction's band set effective on `on_date`.
    ///
    /// # Errors
    ///
    /// - `UnknownCountry` if the table has no home entry
    /// - `NoEffectiveSchedule` if every band set starts after `on_date`
    pub fn resolve_home_schedule(&self, on_date: NaiveDate) -> EngineResult<&HomeSchedule> {
        let home = self.home.as_ref().ok_or_else(|| EngineError::UnknownCountry {
            code: self.home_country.clone(),
        })?;

        home.schedules
            .as_of(on_date)
            .map_err(|earliest| EngineError::NoEffectiveSchedule {
                code: self.home_country.clone(),
                date: on_date,
                earliest,
            })
    }

    /// Finds the home band for `hours` within the band set effective on `on_date`.
    pub fn resolve_home_band(&self, on_date: NaiveDate, hours: Decimal) -> EngineResult<&DomesticBand> {
        let schedule = self.resolve_home_schedule(on_date)?;
        find_band(&schedule.bands, hours).ok_or(EngineError::NoMatchingBand { hours })
    }

    /// Returns the foreign band whose `[min, max)` interval contains `hours`.
    ///
    /// Hours exactly on a boundary belong to the upper band.
    pub fn resolve_time_band(&self, hours: Decimal) -> EngineResult<&TimeBand> {
        find_band(&self.foreign_time_bands, hours).ok_or(EngineError::NoMatchingBand { hours })
    }

    /// Resolves the rate converting one unit of `currency_code` to the
    /// reporting currency on `on_date`.
    ///
    /// The reporting currency always resolves to `1` whether or not the table
    /// lists it.
    ///
    /// # Errors
    ///
    /// - `MissingFxSchedule` if the currency has no FX entry
    /// - `NoEffectiveFxRate` if every FX version starts after `on_date`
    pub fn resolve_fx_rate(&self, currency_code: &str, on_date: NaiveDate) -> EngineResult<Decimal> {
        let currency = currency_code.to_uppercase();
        if currency == REPORTING_CURRENCY {
            return Ok(Decimal::ONE);
        }

        let timeline = self
            .fx_rates
            .get(&currency)
            .ok_or_else(|| EngineError::MissingFxSchedule {
                currency: currency.clone(),
            })?;

        timeline
            .as_of(on_date)
            .map(|s| s.rate_to_reporting_currency)
            .map_err(|earliest| EngineError::NoEffectiveFxRate {
                currency,
                date: on_date,
                earliest,
            })
    }
}
