//! Trip segmentation by jurisdiction.
//!
//! A trip abroad with known border crossings is split into the home leg out,
//! the foreign stay and the home leg back. Every other trip is one segment.

use crate::error::EngineResult;
use crate::models::{Segment, Trip};

use super::border_crossing::resolve_border_crossings;

/// Splits a trip into chronologically ordered per-jurisdiction segments.
///
/// # Behavior
///
/// - A trip to `home_country` is one segment; its border times are ignored
/// - A foreign trip without both border times is one foreign segment
/// - A foreign trip with border times yields home → foreign → home
/// - Segments whose end does not strictly exceed their start are dropped
///
/// # Errors
///
/// Propagates `InvalidBorderWindow` from [`resolve_border_crossings`].
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::segment_trip;
/// use per_diem_engine::models::Trip;
/// use chrono::{NaiveDateTime, NaiveTime};
///
/// let trip = Trip::new(
///     "AT",
///     NaiveDateTime::parse_from_str("2025-09-10 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2025-09-10 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     "Trade fair",
/// )
/// .with_border_times(
///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
/// );
///
/// let segments = segment_trip(&trip, "SK")?;
/// let countries: Vec<_> = segments.iter().map(|s| s.country_code.as_str()).collect();
/// assert_eq!(countries, vec!["SK", "AT", "SK"]);
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn segment_trip(trip: &Trip, home_country: &str) -> EngineResult<Vec<Segment>> {
    if trip.country_code.eq_ignore_ascii_case(home_country) {
        return Ok(non_empty(vec![Segment::new(
            trip.country_code.clone(),
            trip.start,
            trip.end,
        )]));
    }

    let crossing = resolve_border_crossings(
        trip.start,
        trip.end,
        trip.border_out_time,
        trip.border_in_time,
    )?;

    let segments = match crossing {
        Some(crossing) => vec![
            Segment::new(home_country, trip.start, crossing.border_out),
            Segment::new(
                trip.country_code.clone(),
                crossing.border_out,
                crossing.border_in,
            ),
            Segment::new(home_country, crossing.border_in, trip.end),
        ],
        None => vec![Segment::new(trip.country_code.clone(), trip.start, trip.end)],
    };

    Ok(non_empty(segments))
}

fn non_empty(segments: Vec<Segment>) -> Vec<Segment> {
    segments.into_iter().filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::{NaiveDateTime, NaiveTime};

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_domestic_trip_is_single_segment() {
        let trip = Trip::new(
            "SK",
            make_datetime("2025-09-10 06:00:00"),
            make_datetime("2025-09-10 15:00:00"),
            "Branch visit",
        );

        let segments = segment_trip(&trip, "SK").unwrap();
        assert_eq!(
            segments,
            vec![Segment::new(
                "SK",
                make_datetime("2025-09-10 06:00:00"),
                make_datetime("2025-09-10 15:00:00")
            )]
        );
    }

    #[test]
    fn test_domestic_trip_ignores_border_times() {
        let trip = Trip::new(
            "SK",
            make_datetime("2025-09-10 06:00:00"),
            make_datetime("2025-09-10 15:00:00"),
            "",
        )
        .with_border_times(make_time("16:00"), make_time("17:00"));

        let segments = segment_trip(&trip, "SK").unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_foreign_trip_without_border_times_is_single_foreign_segment() {
        let trip = Trip::new(
            "CZ",
            make_datetime("2026-02-02 06:00:00"),
            make_datetime("2026-02-02 19:00:00"),
            "",
        );

        let segments = segment_trip(&trip, "SK").unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].country_code, "CZ");
    }

    #[test]
    fn test_cross_border_trip_splits_into_three_segments() {
        let trip = Trip::new(
            "PL",
            make_datetime("2025-09-10 08:00:00"),
            make_datetime("2025-09-12 20:00:00"),
            "Customer visit",
        )
        .with_border_times(make_time("09:30"), make_time("07:00"));

        let segments = segment_trip(&trip, "SK").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(
                    "SK",
                    make_datetime("2025-09-10 08:00:00"),
                    make_datetime("2025-09-10 09:30:00")
                ),
                Segment::new(
                    "PL",
                    make_datetime("2025-09-10 09:30:00"),
                    make_datetime("2025-09-11 07:00:00")
                ),
                Segment::new(
                    "SK",
                    make_datetime("2025-09-11 07:00:00"),
                    make_datetime("2025-09-12 20:00:00")
                ),
            ]
        );
    }

    #[test]
    fn test_zero_length_home_legs_are_dropped() {
        let trip = Trip::new(
            "AT",
            make_datetime("2025-09-10 08:00:00"),
            make_datetime("2025-09-10 20:00:00"),
            "",
        )
        .with_border_times(make_time("08:00"), make_time("20:00"));

        let segments = segment_trip(&trip, "SK").unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].country_code, "AT");
    }

    #[test]
    fn test_trip_ending_before_start_yields_no_segments() {
        let trip = Trip::new(
            "SK",
            make_datetime("2025-09-10 20:00:00"),
            make_datetime("2025-09-10 08:00:00"),
            "",
        );
        assert!(segment_trip(&trip, "SK").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_border_window_is_surfaced() {
        let trip = Trip::new(
            "PL",
            make_datetime("2025-09-10 08:00:00"),
            make_datetime("2025-09-10 18:00:00"),
            "",
        )
        .with_border_times(make_time("09:30"), make_time("07:00"));

        assert!(matches!(
            segment_trip(&trip, "SK"),
            Err(EngineError::InvalidBorderWindow { .. })
        ));
    }

    #[test]
    fn test_segment_hours_add_up_to_trip_duration() {
        let trip = Trip::new(
            "PL",
            make_datetime("2025-09-10 08:00:00"),
            make_datetime("2025-09-12 20:00:00"),
            "",
        )
        .with_border_times(make_time("09:30"), make_time("07:00"));

        let total: rust_decimal::Decimal = segment_trip(&trip, "SK")
            .unwrap()
            .iter()
            .map(Segment::duration_hours)
            .sum();
        assert_eq!(total, trip.duration_hours());
    }
}
