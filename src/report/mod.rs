//! Reporting layer for the Per-Diem Engine.
//!
//! Runs trips through the calculation pipeline and adapts its inputs and
//! outputs: trip rows in, flat result records out. This is the only layer
//! that logs.

mod result_sink;
mod trip_report;
mod trip_source;

pub use result_sink::write_records_json;
pub use trip_report::{compute_all, compute_batch, compute_trip_report};
pub use trip_source::{TripRow, load_trip_rows, load_trips, trips_from_rows};
