//! Segment and day-fact models.
//!
//! A trip decomposes into [`Segment`]s, each spent in one jurisdiction, and
//! every segment decomposes into one [`DayFact`] per calendar day it touches.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;

/// Returns the number of hours between two timestamps.
///
/// Measured in whole seconds, so the hours of adjacent intervals always add
/// up to the hours of their union. Negative when `end` precedes `start`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let seconds = (end - start).num_seconds();
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// A contiguous span of a trip spent in one jurisdiction.
///
/// # Example
///
/// ```
/// use per_diem_engine::models::Segment;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let segment = Segment {
///     country_code: "PL".to_string(),
///     start: NaiveDateTime::parse_from_str("2025-09-10 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2025-09-10 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(segment.duration_hours(), Decimal::new(25, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Jurisdiction of this span.
    pub country_code: String,
    /// Segment start timestamp.
    pub start: NaiveDateTime,
    /// Segment end timestamp.
    pub end: NaiveDateTime,
}

impl Segment {
    /// Creates a segment.
    pub fn new(country_code: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            country_code: country_code.into(),
            start,
            end,
        }
    }

    /// Segment duration in hours.
    pub fn duration_hours(&self) -> Decimal {
        hours_between(self.start, self.end)
    }

    /// Whether the segment spans no time at all.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Hours a traveler spent in one country on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFact {
    /// Jurisdiction the hours were spent in.
    pub country_code: String,
    /// The calendar day.
    pub calendar_day: NaiveDate,
    /// Hours present on that day, including fractional hours.
    pub hours_present: Decimal,
}
