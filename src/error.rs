//! Error types for the Per-Diem Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving rates, segmenting
//! trips and computing allowances.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Per-Diem Engine.
///
/// Configuration errors are fatal for a whole run since every trip depends
/// on one shared rate table. Resolution errors are tied to a single trip or
/// day and are surfaced to the caller unchanged; none of them is transient,
/// so nothing is retried.
///
/// # Example
///
/// ```
/// use per_diem_engine::error::EngineError;
///
/// let error = EngineError::UnknownCountry {
///     code: "XX".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown country code: XX");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rate configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rate configuration is malformed, incomplete or inconsistent.
    #[error("Invalid rate configuration '{source_name}': {message}")]
    ConfigError {
        /// The file path or label of the document being loaded.
        source_name: String,
        /// A description of the problem.
        message: String,
    },

    /// The country code is not registered in the rate configuration.
    #[error("Unknown country code: {code}")]
    UnknownCountry {
        /// The country code that was requested.
        code: String,
    },

    /// Every schedule of the country becomes effective after the requested date.
    #[error("No valid per diem for {code} on {date} (earliest effective_from is {earliest})")]
    NoEffectiveSchedule {
        /// The country code.
        code: String,
        /// The date for which a schedule was requested.
        date: NaiveDate,
        /// The earliest effective date known for the country.
        earliest: NaiveDate,
    },

    /// No configured time band contains the given number of hours.
    #[error("No time band matches hours={hours}")]
    NoMatchingBand {
        /// The hours value that was looked up.
        hours: Decimal,
    },

    /// The currency has no FX schedule in the rate configuration.
    #[error("Missing FX schedule for currency: {currency}")]
    MissingFxSchedule {
        /// The currency code.
        currency: String,
    },

    /// Every FX schedule of the currency becomes effective after the requested date.
    #[error("No valid FX rate for {currency} on {date} (earliest effective_from is {earliest})")]
    NoEffectiveFxRate {
        /// The currency code.
        currency: String,
        /// The date for which a rate was requested.
        date: NaiveDate,
        /// The earliest effective date known for the currency.
        earliest: NaiveDate,
    },

    /// Inferred border crossings fall outside the trip window.
    #[error(
        "Border crossing {border_out} -> {border_in} is outside trip window {trip_start} -> {trip_end}"
    )]
    InvalidBorderWindow {
        /// The trip start timestamp.
        trip_start: NaiveDateTime,
        /// The trip end timestamp.
        trip_end: NaiveDateTime,
        /// The inferred outbound crossing.
        border_out: NaiveDateTime,
        /// The inferred inbound crossing.
        border_in: NaiveDateTime,
    },

    /// Trip source file was not found at the specified path.
    #[error("Trip source not found: {path}")]
    TripSourceNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Trip source could not be parsed.
    #[error("Failed to parse trip source '{path}': {message}")]
    TripSourceError {
        /// The path to the trip source.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Result records could not be written.
    #[error("Failed to write results: {message}")]
    ResultSinkError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
    }

    #[test]
    fn test_config_error_displays_source_and_message() {
        let error = EngineError::ConfigError {
            source_name: "rates.yaml".to_string(),
            message: "missing field `countries`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate configuration 'rates.yaml': missing field `countries`"
        );
    }

    #[test]
    fn test_no_effective_schedule_includes_earliest_date() {
        let error = EngineError::NoEffectiveSchedule {
            code: "CZ".to_string(),
            date: date("2026-01-01"),
            earliest: date("2026-01-30"),
        };
        assert_eq!(
            error.to_string(),
            "No valid per diem for CZ on 2026-01-01 (earliest effective_from is 2026-01-30)"
        );
    }

    #[test]
    fn test_no_effective_fx_rate_includes_earliest_date() {
        let error = EngineError::NoEffectiveFxRate {
            currency: "CZK".to_string(),
            date: date("2025-12-31"),
            earliest: date("2026-01-01"),
        };
        assert_eq!(
            error.to_string(),
            "No valid FX rate for CZK on 2025-12-31 (earliest effective_from is 2026-01-01)"
        );
    }

    #[test]
    fn test_no_matching_band_displays_hours() {
        let error = EngineError::NoMatchingBand {
            hours: Decimal::from_str("-1.5").unwrap(),
        };
        assert_eq!(error.to_string(), "No time band matches hours=-1.5");
    }

    #[test]
    fn test_missing_fx_schedule_displays_currency() {
        let error = EngineError::MissingFxSchedule {
            currency: "GBP".to_string(),
        };
        assert_eq!(error.to_string(), "Missing FX schedule for currency: GBP");
    }

    #[test]
    fn test_invalid_border_window_displays_all_timestamps() {
        let error = EngineError::InvalidBorderWindow {
            trip_start: datetime("2025-09-10 08:00:00"),
            trip_end: datetime("2025-09-10 12:00:00"),
            border_out: datetime("2025-09-10 09:30:00"),
            border_in: datetime("2025-09-11 07:00:00"),
        };
        assert_eq!(
            error.to_string(),
            "Border crossing 2025-09-10 09:30:00 -> 2025-09-11 07:00:00 is outside trip window \
             2025-09-10 08:00:00 -> 2025-09-10 12:00:00"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unknown_country() -> EngineResult<()> {
            Err(EngineError::UnknownCountry {
                code: "ZZ".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unknown_country()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
