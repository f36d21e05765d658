//! Per-calendar-day decomposition of segments.
//!
//! Splits a segment at midnight boundaries so each calendar day can be
//! assessed against the hour bands on its own.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{DayFact, Segment, hours_between};

/// Lazy iterator over the [`DayFact`]s of one segment.
///
/// Finite and cheap to clone: clone it before consuming, or call
/// [`day_facts`] again, to walk the days a second time.
#[derive(Debug, Clone)]
pub struct DayFacts<'a> {
    segment: &'a Segment,
    next_day: Option<NaiveDate>,
    last_day: NaiveDate,
}

/// Produces one [`DayFact`] per calendar day the segment touches.
///
/// Both endpoint dates are included, so a segment ending exactly at midnight
/// yields a final fact with zero hours. Each fact carries the overlap between
/// the segment and the day window `[day 00:00, day+1 00:00)`; the facts of a
/// segment always sum to the segment's duration.
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::day_facts;
/// use per_diem_engine::models::Segment;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let segment = Segment::new(
///     "PL",
///     NaiveDateTime::parse_from_str("2025-09-10 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2025-09-11 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// );
///
/// let hours: Vec<Decimal> = day_facts(&segment).map(|f| f.hours_present).collect();
/// assert_eq!(hours, vec![Decimal::from(2), Decimal::from(6)]);
/// ```
pub fn day_facts(segment: &Segment) -> DayFacts<'_> {
    let first_day = segment.start.date();
    let last_day = segment.end.date();
    DayFacts {
        segment,
        next_day: (first_day <= last_day).then_some(first_day),
        last_day,
    }
}

impl Iterator for DayFacts<'_> {
    type Item = DayFact;

    fn next(&mut self) -> Option<DayFact> {
        let day = self.next_day?;
        self.next_day = day.succ_opt().filter(|next| *next <= self.last_day);

        Some(DayFact {
            country_code: self.segment.country_code.clone(),
            calendar_day: day,
            hours_present: hours_on_day(self.segment, day),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next_day
            .map_or(0, |day| (self.last_day - day).num_days() as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayFacts<'_> {}

/// Hours of `segment` that fall within `day`.
fn hours_on_day(segment: &Segment, day: NaiveDate) -> Decimal {
    let day_start = day.and_time(NaiveTime::MIN);
    let day_end = day
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));

    let start = segment.start.max(day_start);
    let end = segment.end.min(day_end);
    if end <= start {
        return Decimal::ZERO;
    }
    hours_between(start, end)
}
