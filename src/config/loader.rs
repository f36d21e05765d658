//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate tables
//! from YAML files and validating them into a [`RatesConfig`].

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::repository::RatesConfig;
use super::timeline::{EffectiveFrom, Timeline};
use super::types::{
    CountryDocument, CountryRates, CountrySchedule, DEFAULT_HOME_COUNTRY, FxDocument, FxSchedule,
    HomeRates, HomeSchedule, HourRange, REPORTING_CURRENCY, RatesDocument, TimeBand,
};

/// Loads rate tables.
///
/// # Document Structure
///
/// ```text
/// version: 1
/// home_country: SK            # optional, defaults to SK
/// foreign_time_bands:         # required
///   - { name, min_hours_inclusive, max_hours_exclusive, percent_of_daily }
/// countries:                  # required
///   CZ:
///     currency: CZK
///     schedules:
///       - { effective_from: "2026-01-30", daily_base: 600 }
///   SK:                       # the home jurisdiction carries bands instead
///     currency: EUR
///     schedules:
///       - effective_from: "2024-05-01"
///         bands:
///           - { name, min_hours_inclusive, max_hours_exclusive, amount }
/// fx_rates_to_eur:            # optional, EUR-only when absent
///   CZK:
///     schedules:
///       - { effective_from: "2026-01-01", rate: 0.0413616247 }
/// ```
///
/// # Example
///
/// ```no_run
/// use per_diem_engine::config::ConfigLoader;
///
/// let rates = ConfigLoader::load("./config/rates.yaml")?;
/// println!("Home jurisdiction: {}", rates.home_country());
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the rate table at `path`.
    ///
    /// # Returns
    ///
    /// Returns a [`RatesConfig`] on success, or an error if:
    /// - The file does not exist (`ConfigNotFound`)
    /// - The file is not valid YAML, lacks a required section or field, or
    ///   fails validation (`ConfigError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<RatesConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&path_str, &content)
    }

    /// Parses and validates an in-memory YAML document.
    ///
    /// `source_name` labels the document in error messages.
    pub fn from_yaml_str(source_name: &str, content: &str) -> EngineResult<RatesConfig> {
        let document: RatesDocument =
            serde_yaml::from_str(content).map_err(|e| config_error(source_name, e.to_string()))?;

        Self::build(source_name, document)
    }

    fn build(source_name: &str, document: RatesDocument) -> EngineResult<RatesConfig> {
        let home_country = document
            .home_country
            .as_deref()
            .unwrap_or(DEFAULT_HOME_COUNTRY)
            .trim()
            .to_uppercase();

        let mut foreign_time_bands = document.foreign_time_bands;
        foreign_time_bands.sort_by(|a, b| a.min_hours_inclusive.cmp(&b.min_hours_inclusive));
        validate_foreign_bands(source_name, &foreign_time_bands)?;

        let mut countries: HashMap<String, CountryRates> = HashMap::new();
        let mut home = None;
        for (raw_code, country) in document.countries {
            let code = raw_code.trim().to_uppercase();
            if code == home_country {
                if home.is_some() {
                    return Err(duplicate_code(source_name, "countries", &code));
                }
                home = Some(build_home(source_name, &code, country)?);
            } else {
                if countries.contains_key(&code) {
                    return Err(duplicate_code(source_name, "countries", &code));
                }
                let rates = build_country(source_name, &code, country)?;
                countries.insert(code, rates);
            }
        }

        let fx_rates = match document.fx_rates_to_eur {
            Some(fx) if !fx.is_empty() => build_fx(source_name, fx)?,
            _ => default_fx(),
        };

        Ok(RatesConfig::new(
            document.version,
            home_country,
            foreign_time_bands,
            countries,
            home,
            fx_rates,
        ))
    }
}

fn config_error(source_name: &str, message: impl Into<String>) -> EngineError {
    EngineError::ConfigError {
        source_name: source_name.to_string(),
        message: message.into(),
    }
}

/// Keys are matched after trimming and upper-casing, so `CZ` and `cz` collide.
fn duplicate_code(source_name: &str, section: &str, code: &str) -> EngineError {
    config_error(
        source_name,
        format!("{section}: duplicate code '{code}' (keys differ only by case or whitespace)"),
    )
}

/// Foreign bands must partition `[0, last max)`: start at zero, no gaps, no
/// overlaps. `bands` must already be sorted.
fn validate_foreign_bands(source_name: &str, bands: &[TimeBand]) -> EngineResult<()> {
    let first = bands
        .first()
        .ok_or_else(|| config_error(source_name, "foreign_time_bands must not be empty"))?;

    if !first.min_hours_inclusive.is_zero() {
        return Err(config_error(
            source_name,
            format!(
                "foreign_time_bands must start at 0 hours, first band '{}' starts at {}",
                first.name, first.min_hours_inclusive
            ),
        ));
    }

    validate_contiguous(source_name, "foreign_time_bands", bands)
}

/// Each band must be non-empty and end exactly where the next one starts.
fn validate_contiguous<B: HourRange>(
    source_name: &str,
    label: &str,
    bands: &[B],
) -> EngineResult<()> {
    for band in bands {
        if band.max_hours() <= band.min_hours() {
            return Err(config_error(
                source_name,
                format!(
                    "{label}: band '{}' has max_hours_exclusive {} not above min_hours_inclusive {}",
                    band.band_name(),
                    band.max_hours(),
                    band.min_hours()
                ),
            ));
        }
    }

    for pair in bands.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if current.max_hours() != next.min_hours() {
            let problem = if current.max_hours() < next.min_hours() {
                "gap"
            } else {
                "overlap"
            };
            return Err(config_error(
                source_name,
                format!(
                    "{label}: {problem} between band '{}' (ends {}) and band '{}' (starts {})",
                    current.band_name(),
                    current.max_hours(),
                    next.band_name(),
                    next.min_hours()
                ),
            ));
        }
    }

    Ok(())
}

/// Rejects two versions sharing an effective date; `versions` must be sorted.
fn validate_distinct_dates<T: EffectiveFrom>(
    source_name: &str,
    label: &str,
    versions: &[T],
) -> EngineResult<()> {
    for pair in versions.windows(2) {
        if pair[0].effective_from() == pair[1].effective_from() {
            return Err(config_error(
                source_name,
                format!(
                    "{label}: duplicate schedule effective_from {}",
                    pair[0].effective_from()
                ),
            ));
        }
    }
    Ok(())
}

fn build_timeline<T: EffectiveFrom>(
    source_name: &str,
    label: &str,
    versions: Vec<T>,
) -> EngineResult<Timeline<T>> {
    let timeline = Timeline::new(versions)
        .ok_or_else(|| config_error(source_name, format!("{label}: no schedules defined")))?;
    validate_distinct_dates(source_name, label, timeline.versions())?;
    Ok(timeline)
}

fn build_country(
    source_name: &str,
    code: &str,
    country: CountryDocument,
) -> EngineResult<CountryRates> {
    let label = format!("countries.{code}");
    let schedules = country
        .schedules
        .into_iter()
        .map(|s| -> EngineResult<CountrySchedule> {
            let daily_base = s.daily_base.ok_or_else(|| {
                config_error(
                    source_name,
                    format!(
                        "{label}: schedule effective {} is missing daily_base",
                        s.effective_from
                    ),
                )
            })?;
            Ok(CountrySchedule {
                effective_from: s.effective_from,
                daily_base,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(CountryRates {
        currency_code: country.currency.trim().to_uppercase(),
        schedules: build_timeline(source_name, &label, schedules)?,
    })
}

fn build_home(source_name: &str, code: &str, country: CountryDocument) -> EngineResult<HomeRates> {
    let label = format!("countries.{code}");
    let schedules = country
        .schedules
        .into_iter()
        .map(|s| -> EngineResult<HomeSchedule> {
            let mut bands = s.bands.ok_or_else(|| {
                config_error(
                    source_name,
                    format!(
                        "{label}: schedule effective {} is missing bands",
                        s.effective_from
                    ),
                )
            })?;
            bands.sort_by(|a, b| a.min_hours_inclusive.cmp(&b.min_hours_inclusive));
            let band_label = format!("{label} ({})", s.effective_from);
            if bands.is_empty() {
                return Err(config_error(source_name, format!("{band_label}: no bands")));
            }
            validate_contiguous(source_name, &band_label, &bands)?;
            Ok(HomeSchedule {
                effective_from: s.effective_from,
                bands,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(HomeRates {
        currency_code: country.currency.trim().to_uppercase(),
        schedules: build_timeline(source_name, &label, schedules)?,
    })
}

fn build_fx(
    source_name: &str,
    fx: BTreeMap<String, FxDocument>,
) -> EngineResult<HashMap<String, Timeline<FxSchedule>>> {
    let mut rates: HashMap<String, Timeline<FxSchedule>> = HashMap::new();
    for (raw_code, block) in fx {
        let code = raw_code.trim().to_uppercase();
        if rates.contains_key(&code) {
            return Err(duplicate_code(source_name, "fx_rates_to_eur", &code));
        }
        let schedules = block
            .schedules
            .into_iter()
            .map(|s| FxSchedule {
                effective_from: s.effective_from,
                rate_to_reporting_currency: s.rate,
            })
            .collect();
        let timeline = build_timeline(source_name, &format!("fx_rates_to_eur.{code}"), schedules)?;
        rates.insert(code, timeline);
    }
    Ok(rates)
}

/// The table used when a document has no FX section: the reporting currency
/// at rate 1 from the earliest representable date.
fn default_fx() -> HashMap<String, Timeline<FxSchedule>> {
    let identity = FxSchedule {
        effective_from: NaiveDate::MIN,
        rate_to_reporting_currency: rust_decimal::Decimal::ONE,
    };
    Timeline::new(vec![identity])
        .map(|t| (REPORTING_CURRENCY.to_string(), t))
        .into_iter()
        .collect()
}
