//! Trip model.
//!
//! This module defines the [`Trip`] struct, the strongly-typed business trip
//! record every calculation starts from.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::segment::hours_between;

/// A business trip.
///
/// Border crossing times carry no date; the segmenter anchors them to the
/// trip's start date. They are only used when the declared country differs
/// from the home jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Declared destination country code (upper-case).
    pub country_code: String,
    /// Departure timestamp.
    pub start: NaiveDateTime,
    /// Return timestamp.
    pub end: NaiveDateTime,
    /// Free-text purpose of the trip.
    #[serde(default)]
    pub purpose: String,
    /// Time of day the traveler left the home jurisdiction.
    #[serde(default)]
    pub border_out_time: Option<NaiveTime>,
    /// Time of day the traveler re-entered the home jurisdiction.
    #[serde(default)]
    pub border_in_time: Option<NaiveTime>,
}

impl Trip {
    /// Creates a trip without border crossing times.
    pub fn new(
        country_code: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into().trim().to_uppercase(),
            start,
            end,
            purpose: purpose.into(),
            border_out_time: None,
            border_in_time: None,
        }
    }

    /// Sets the border crossing times of the trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use per_diem_engine::models::Trip;
    /// use chrono::{NaiveDateTime, NaiveTime};
    ///
    /// let trip = Trip::new(
    ///     "pl",
    ///     NaiveDateTime::parse_from_str("2025-09-10 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     NaiveDateTime::parse_from_str("2025-09-12 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     "Customer visit",
    /// )
    /// .with_border_times(
    ///     NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    /// );
    ///
    /// assert_eq!(trip.country_code, "PL");
    /// assert!(trip.border_out_time.is_some());
    /// ```
    pub fn with_border_times(mut self, border_out: NaiveTime, border_in: NaiveTime) -> Self {
        self.border_out_time = Some(border_out);
        self.border_in_time = Some(border_in);
        self
    }

    /// Total trip duration in hours.
    pub fn duration_hours(&self) -> Decimal {
        hours_between(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_new_normalizes_country_code() {
        let trip = Trip::new(
            " cz ",
            make_datetime("2026-02-02 06:00:00"),
            make_datetime("2026-02-02 18:00:00"),
            "Audit",
        );
        assert_eq!(trip.country_code, "CZ");
        assert!(trip.border_out_time.is_none());
        assert!(trip.border_in_time.is_none());
    }

    #[test]
    fn test_duration_hours_across_days() {
        let trip = Trip::new(
            "PL",
            make_datetime("2025-09-10 08:00:00"),
            make_datetime("2025-09-12 20:00:00"),
            "",
        );
        assert_eq!(trip.duration_hours(), Decimal::from(60));
    }

    #[test]
    fn test_trip_deserializes_without_optional_fields() {
        let trip: Trip = serde_json::from_value(serde_json::json!({
            "country_code": "AT",
            "start": "2026-03-01T07:00:00",
            "end": "2026-03-01T19:30:00"
        }))
        .unwrap();

        assert_eq!(trip.purpose, "");
        assert!(trip.border_out_time.is_none());
        assert_eq!(trip.duration_hours(), Decimal::new(125, 1));
    }
}
