//! Rate repository for the Per-Diem Engine.
//!
//! This module loads versioned rate tables from YAML (foreign time bands,
//! per-country daily bases, home-jurisdiction band sets and FX schedules) and
//! answers "which rule applies on date D" queries.
//!
//! # Example
//!
//! ```no_run
//! use per_diem_engine::config::ConfigLoader;
//! use chrono::NaiveDate;
//!
//! let rates = ConfigLoader::load("./config/rates.yaml").unwrap();
//! let day = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
//! let (schedule, currency) = rates.resolve_country_schedule("CZ", day).unwrap();
//! println!("CZ daily base: {} {}", schedule.daily_base, currency);
//! ```

mod loader;
mod repository;
mod timeline;
mod types;

pub use loader::ConfigLoader;
pub use repository::RatesConfig;
pub use timeline::{EffectiveFrom, Timeline};
pub use types::{
    CountryRates, CountrySchedule, DEFAULT_HOME_COUNTRY, DomesticBand, FxSchedule, HomeRates,
    HomeSchedule, HourRange, REPORTING_CURRENCY, TimeBand, find_band,
};
