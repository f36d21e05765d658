//! Calculation logic for the Per-Diem Engine.
//!
//! This module contains the trip segmenter (border crossing inference,
//! per-jurisdiction segments, per-calendar-day hours), the per-diem
//! calculators for home and foreign days, and the trip aggregator.

mod border_crossing;
mod day_allowance;
mod day_facts;
mod foreign_per_diem;
mod home_per_diem;
mod rounding;
mod trip_segments;
mod trip_total;

pub use border_crossing::{BorderCrossing, resolve_border_crossings};
pub use day_allowance::compute_day;
pub use day_facts::{DayFacts, day_facts};
pub use foreign_per_diem::{ForeignDayResult, calculate_foreign_day, compute_foreign_day};
pub use home_per_diem::{HOME_MINIMUM_HOURS, HomeDayResult, calculate_home_day, compute_home_day};
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use trip_segments::segment_trip;
pub use trip_total::sum_trip;
