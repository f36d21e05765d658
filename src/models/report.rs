//! Calculation result models for the Per-Diem Engine.
//!
//! This module contains the per-day [`DayAllowance`], the per-trip
//! [`TripReport`] and the flat [`ResultRecord`]s handed to result sinks.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::{Money, MoneyPair};

/// Label carried by the total record of each trip in place of a country.
pub const TOTAL_LABEL: &str = "TOTAL";

/// The allowance computed for one country on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAllowance {
    /// Jurisdiction the allowance was computed for.
    pub country_code: String,
    /// The calendar day.
    pub day: NaiveDate,
    /// Hours present on that day.
    pub hours: Decimal,
    /// The band that applied; `None` when the home-jurisdiction floor applied.
    pub band: Option<String>,
    /// Original and converted amounts.
    pub amounts: MoneyPair,
}

/// All per-day allowances of one trip and their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripReport {
    /// 1-based position of the trip in its batch.
    pub trip_id: usize,
    /// Free-text purpose of the trip.
    pub purpose: String,
    /// Declared destination country.
    pub country_code: String,
    /// Per-day allowances in chronological order.
    pub days: Vec<DayAllowance>,
    /// Sum of converted amounts, in the reporting currency.
    pub total: Money,
}

impl TripReport {
    /// Flattens the report into one record per day followed by a total record.
    ///
    /// # Example
    ///
    /// ```
    /// use per_diem_engine::models::{Money, ResultRecord, TripReport};
    /// use rust_decimal::Decimal;
    ///
    /// let report = TripReport {
    ///     trip_id: 1,
    ///     purpose: "Training".to_string(),
    ///     country_code: "SK".to_string(),
    ///     days: vec![],
    ///     total: Money::new(Decimal::ZERO, "EUR"),
    /// };
    ///
    /// let records = report.records();
    /// assert_eq!(records.len(), 1);
    /// assert!(matches!(records[0], ResultRecord::Total(_)));
    /// ```
    pub fn records(&self) -> Vec<ResultRecord> {
        self.days
            .iter()
            .map(|day| {
                ResultRecord::Day(DayRecord {
                    trip_id: self.trip_id,
                    purpose: self.purpose.clone(),
                    country: day.country_code.clone(),
                    day: day.day,
                    hours: day
                        .hours
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                    original_amount: day.amounts.original.amount,
                    original_currency: day.amounts.original.currency.clone(),
                    converted_amount: day.amounts.converted.amount,
                })
            })
            .chain(std::iter::once(ResultRecord::Total(TotalRecord {
                trip_id: self.trip_id,
                purpose: self.purpose.clone(),
                country: TOTAL_LABEL.to_string(),
                converted_amount: self.total.amount,
                converted_currency: self.total.currency.clone(),
            })))
            .collect()
    }
}

/// One day of one trip, as written to a result sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// 1-based trip position.
    pub trip_id: usize,
    /// Trip purpose.
    pub purpose: String,
    /// Jurisdiction of the day's hours.
    pub country: String,
    /// The calendar day.
    pub day: NaiveDate,
    /// Hours present, rounded to 2 decimal places for display.
    pub hours: Decimal,
    /// Amount in the original currency.
    pub original_amount: Decimal,
    /// The original currency.
    pub original_currency: String,
    /// Amount in the reporting currency.
    pub converted_amount: Decimal,
}

/// The total of one trip, as written to a result sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalRecord {
    /// 1-based trip position.
    pub trip_id: usize,
    /// Trip purpose.
    pub purpose: String,
    /// Always [`TOTAL_LABEL`].
    pub country: String,
    /// Trip total in the reporting currency.
    pub converted_amount: Decimal,
    /// The reporting currency.
    pub converted_currency: String,
}

/// A flat record consumed by result sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum ResultRecord {
    /// A per-day record.
    Day(DayRecord),
    /// A per-trip total record.
    Total(TotalRecord),
}

/// A trip whose calculation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFailure {
    /// 1-based trip position.
    pub trip_id: usize,
    /// Declared destination country.
    pub country_code: String,
    /// The rendered error.
    pub message: String,
}

/// The outcome of calculating a batch of trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Identifier of this run, also recorded in log events.
    pub run_id: Uuid,
    /// Reports of the trips that calculated successfully.
    pub trips: Vec<TripReport>,
    /// Trips that failed, in input order.
    pub failures: Vec<TripFailure>,
}

impl BatchReport {
    /// Flattens every successful trip into result records.
    pub fn records(&self) -> Vec<ResultRecord> {
        self.trips.iter().flat_map(TripReport::records).collect()
    }

    /// Whether every trip of the batch calculated successfully.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_report() -> TripReport {
        TripReport {
            trip_id: 3,
            purpose: "Supplier audit".to_string(),
            country_code: "CZ".to_string(),
            days: vec![DayAllowance {
                country_code: "CZ".to_string(),
                day: make_date("2026-02-02"),
                hours: dec("13.3333333333"),
                band: Some("over_12".to_string()),
                amounts: MoneyPair {
                    original: Money::new(dec("600.00"), "CZK"),
                    converted: Money::new(dec("24.82"), "EUR"),
                },
            }],
            total: Money::new(dec("24.82"), "EUR"),
        }
    }

    #[test]
    fn test_records_end_with_total() {
        let records = sample_report().records();
        assert_eq!(records.len(), 2);

        match &records[0] {
            ResultRecord::Day(day) => {
                assert_eq!(day.trip_id, 3);
                assert_eq!(day.country, "CZ");
                assert_eq!(day.hours, dec("13.33"));
                assert_eq!(day.original_amount, dec("600.00"));
                assert_eq!(day.original_currency, "CZK");
                assert_eq!(day.converted_amount, dec("24.82"));
            }
            other => panic!("Expected day record, got {:?}", other),
        }

        match &records[1] {
            ResultRecord::Total(total) => {
                assert_eq!(total.country, TOTAL_LABEL);
                assert_eq!(total.converted_amount, dec("24.82"));
                assert_eq!(total.converted_currency, "EUR");
            }
            other => panic!("Expected total record, got {:?}", other),
        }
    }

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let records = sample_report().records();
        let json = serde_json::to_value(&records).unwrap();

        assert_eq!(json[0]["record"], "day");
        assert_eq!(json[0]["day"], "2026-02-02");
        assert_eq!(json[1]["record"], "total");
        assert_eq!(json[1]["country"], "TOTAL");
    }

    #[test]
    fn test_batch_records_flatten_all_trips() {
        let batch = BatchReport {
            run_id: Uuid::new_v4(),
            trips: vec![sample_report(), sample_report()],
            failures: vec![],
        };
        assert_eq!(batch.records().len(), 4);
        assert!(batch.is_complete());
    }
}
