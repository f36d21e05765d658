//! Per-Diem Engine for cross-border business travel
//!
//! This crate computes per-diem travel allowances for business trips. It
//! resolves time-versioned rate tables and exchange rates, splits trips into
//! per-country, per-calendar-day intervals and computes each day's allowance
//! in the local currency and in the reporting currency.
//!
//! ```
//! use per_diem_engine::config::ConfigLoader;
//! use per_diem_engine::report::{compute_batch, load_trips};
//!
//! let rates = ConfigLoader::load("./config/rates.yaml")?;
//! let trips = load_trips("./tests/fixtures/trips.json")?;
//!
//! let batch = compute_batch(&rates, &trips);
//! assert!(batch.is_complete());
//! # Ok::<(), per_diem_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
