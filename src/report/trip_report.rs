//! Trip and batch reporting.
//!
//! Composes the segmenter, the per-day calculator and the aggregator over an
//! explicit rate repository and list of trips. Nothing here touches files;
//! see the sibling adapters for reading trips and writing records.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{compute_day, day_facts, segment_trip, sum_trip};
use crate::config::{RatesConfig, REPORTING_CURRENCY};
use crate::error::EngineResult;
use crate::models::{BatchReport, Money, Trip, TripFailure, TripReport};

/// Calculates every day of one trip and its total.
///
/// Days on which the traveler spent no time in a segment's country (a
/// segment ending exactly at midnight) are skipped.
///
/// # Example
///
/// ```
/// use per_diem_engine::config::ConfigLoader;
/// use per_diem_engine::models::Trip;
/// use per_diem_engine::report::compute_trip_report;
/// use chrono::NaiveDateTime;
///
/// let rates = ConfigLoader::load("./config/rates.yaml")?;
/// let trip = Trip::new(
///     "CZ",
///     NaiveDateTime::parse_from_str("2026-02-02 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2026-02-02 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     "Supplier audit",
/// );
///
/// let report = compute_trip_report(&rates, 1, &trip)?;
/// assert_eq!(report.days.len(), 1);
/// assert_eq!(report.total.to_string(), "24.82 EUR");
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn compute_trip_report(
    rates: &RatesConfig,
    trip_id: usize,
    trip: &Trip,
) -> EngineResult<TripReport> {
    let segments = segment_trip(trip, rates.home_country())?;

    let mut days = Vec::new();
    for segment in &segments {
        for fact in day_facts(segment) {
            if fact.hours_present <= Decimal::ZERO {
                continue;
            }
            days.push(compute_day(rates, &fact)?);
        }
    }

    let total = Money::new(sum_trip(&days), REPORTING_CURRENCY);

    Ok(TripReport {
        trip_id,
        purpose: trip.purpose.clone(),
        country_code: trip.country_code.clone(),
        days,
        total,
    })
}

/// Calculates a batch of trips, recording failed trips instead of aborting.
///
/// Trip ids are 1-based positions in `trips`. Each run is tagged with a fresh
/// run id that also appears on every log event of the run.
pub fn compute_batch(rates: &RatesConfig, trips: &[Trip]) -> BatchReport {
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, trips = trips.len(), "Calculating per-diem batch");

    let mut reports = Vec::with_capacity(trips.len());
    let mut failures = Vec::new();

    for (index, trip) in trips.iter().enumerate() {
        let trip_id = index + 1;
        match compute_trip_report(rates, trip_id, trip) {
            Ok(report) => {
                for day in &report.days {
                    debug!(
                        run_id = %run_id,
                        trip_id,
                        country = %day.country_code,
                        day = %day.day,
                        hours = %day.hours,
                        original = %day.amounts.original,
                        converted = %day.amounts.converted,
                        "Day allowance"
                    );
                }
                info!(
                    run_id = %run_id,
                    trip_id,
                    country = %report.country_code,
                    days = report.days.len(),
                    total = %report.total,
                    "Trip calculated"
                );
                reports.push(report);
            }
            Err(err) => {
                warn!(
                    run_id = %run_id,
                    trip_id,
                    country = %trip.country_code,
                    error = %err,
                    "Trip calculation failed"
                );
                failures.push(TripFailure {
                    trip_id,
                    country_code: trip.country_code.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        run_id = %run_id,
        calculated = reports.len(),
        failed = failures.len(),
        "Per-diem batch complete"
    );

    BatchReport {
        run_id,
        trips: reports,
        failures,
    }
}

/// Calculates a batch of trips, stopping at the first failing trip.
pub fn compute_all(rates: &RatesConfig, trips: &[Trip]) -> EngineResult<Vec<TripReport>> {
    trips
        .iter()
        .enumerate()
        .map(|(index, trip)| compute_trip_report(rates, index + 1, trip))
        .collect()
}
