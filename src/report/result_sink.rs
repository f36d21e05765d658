//! Result sink adapter.

use std::io::Write;

use crate::error::{EngineError, EngineResult};
use crate::models::ResultRecord;

/// Writes result records to `writer` as a pretty-printed JSON array.
///
/// # Example
///
/// ```
/// use per_diem_engine::models::{ResultRecord, TotalRecord};
/// use per_diem_engine::report::write_records_json;
/// use rust_decimal::Decimal;
///
/// let records = vec![ResultRecord::Total(TotalRecord {
///     trip_id: 1,
///     purpose: "Training".to_string(),
///     country: "TOTAL".to_string(),
///     converted_amount: Decimal::new(930, 2),
///     converted_currency: "EUR".to_string(),
/// })];
///
/// let mut out = Vec::new();
/// write_records_json(&mut out, &records)?;
/// assert!(String::from_utf8(out).unwrap().contains("\"record\": \"total\""));
/// # Ok::<(), per_diem_engine::error::EngineError>(())
/// ```
pub fn write_records_json<W: Write>(mut writer: W, records: &[ResultRecord]) -> EngineResult<()> {
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| {
        EngineError::ResultSinkError {
            message: e.to_string(),
        }
    })?;
    writer.flush().map_err(|e| EngineError::ResultSinkError {
        message: e.to_string(),
    })
}
