//! Core data models for the Per-Diem Engine.
//!
//! This module contains all the value records used throughout the engine.
//! Every record is built once and never mutated afterwards.

mod money;
mod report;
mod segment;
mod trip;

pub use money::{Money, MoneyPair};
pub use report::{
    BatchReport, DayAllowance, DayRecord, ResultRecord, TOTAL_LABEL, TotalRecord, TripFailure,
    TripReport,
};
pub use segment::{DayFact, Segment, hours_between};
pub use trip::Trip;
