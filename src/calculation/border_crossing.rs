//! Border crossing inference.
//!
//! Trip sources record border crossings as bare times of day. This module
//! anchors them to concrete timestamps inside the trip window.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The resolved pair of timestamps at which a traveler left and re-entered
/// the home jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderCrossing {
    /// When the traveler left the home jurisdiction.
    pub border_out: NaiveDateTime,
    /// When the traveler re-entered the home jurisdiction.
    pub border_in: NaiveDateTime,
}

/// Anchors border crossing times of day to timestamps within a trip.
///
/// - `border_out_time` is placed on the trip's start date, or on the next day
///   when that would fall before `trip_start`.
/// - `border_in_time` is placed on the trip's start date and moved forward one
///   day at a time until it is strictly after the outbound crossing.
///
/// Returns `Ok(None)` when either time is missing.
///
/// # Errors
///
/// Returns `InvalidBorderWindow` unless
/// `trip_start <= border_out < border_in <= trip_end`.
///
/// # Example
///
/// ```
/// use per_diem_engine::calculation::resolve_border_crossings;
/// use chrono::{NaiveDateTime, NaiveTime};
///
/// let start = NaiveDateTime::parse_from_str("2025-09-10 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2025-09-12 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let crossing = resolve_border_crossings(
///     start,
///     end,
///     Some(NaiveTime::from_hms_opt(1, 15, 0).unwrap()),
///     Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
/// )?
/// .unwrap();
///
/// // 01:15 is before the 22:00 departure, so the crossing happened the next day.
/// assert_eq!(crossing.border_out.to_string(), "2025-09-11 01:15:00");
/// assert_eq!(crossing.border_in.to_string(), "2025-09-11 18:00:00");
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn resolve_border_crossings(
    trip_start: NaiveDateTime,
    trip_end: NaiveDateTime,
    border_out_time: Option<NaiveTime>,
    border_in_time: Option<NaiveTime>,
) -> EngineResult<Option<BorderCrossing>> {
    let (Some(out_time), Some(in_time)) = (border_out_time, border_in_time) else {
        return Ok(None);
    };

    let anchor = trip_start.date();

    let mut border_out = anchor.and_time(out_time);
    if border_out < trip_start {
        border_out += Duration::days(1);
    }

    let mut border_in = anchor.and_time(in_time);
    while border_in <= border_out {
        border_in += Duration::days(1);
    }

    let within_window = trip_start <= border_out && border_out < border_in && border_in <= trip_end;
    if !within_window {
        return Err(EngineError::InvalidBorderWindow {
            trip_start,
            trip_end,
            border_out,
            border_in,
        });
    }

    Ok(Some(BorderCrossing {
        border_out,
        border_in,
    }))
}
