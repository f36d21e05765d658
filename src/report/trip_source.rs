//! Trip source adapter.
//!
//! Reads the rows of a trip register exported as JSON or YAML and turns the
//! complete ones into [`Trip`]s. Cells left blank in the register may arrive
//! as missing keys, `null` or empty strings; all three mean "absent".

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::Trip;

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLOCK_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// One row of a trip register.
///
/// Every field is optional so that partially filled rows still load; see
/// [`TripRow::into_trip`] for which ones a trip needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRow {
    /// Destination country code.
    #[serde(default, deserialize_with = "optional_text")]
    pub country: Option<String>,
    /// Departure date.
    #[serde(default, deserialize_with = "optional_date")]
    pub travel_date: Option<NaiveDate>,
    /// Departure time of day.
    #[serde(default, deserialize_with = "optional_clock_time")]
    pub departure_time: Option<NaiveTime>,
    /// Return date.
    #[serde(default, deserialize_with = "optional_date")]
    pub return_date: Option<NaiveDate>,
    /// Return time of day.
    #[serde(default, deserialize_with = "optional_clock_time")]
    pub arrival_time: Option<NaiveTime>,
    /// Free-text purpose.
    #[serde(default, deserialize_with = "optional_text")]
    pub purpose: Option<String>,
    /// Time of day the home border was crossed outbound.
    #[serde(default, deserialize_with = "optional_clock_time")]
    pub border_out: Option<NaiveTime>,
    /// Time of day the home border was crossed inbound.
    #[serde(default, deserialize_with = "optional_clock_time")]
    pub border_in: Option<NaiveTime>,
}

impl TripRow {
    /// Converts the row into a trip.
    ///
    /// Returns `None` when the country or any part of the departure or return
    /// timestamp is missing. Border times are carried only as a pair.
    ///
    /// # Example
    ///
    /// ```
    /// use per_diem_engine::report::TripRow;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let row = TripRow {
    ///     country: Some(" cz ".to_string()),
    ///     travel_date: NaiveDate::from_ymd_opt(2026, 2, 2),
    ///     departure_time: NaiveTime::from_hms_opt(6, 0, 0),
    ///     return_date: NaiveDate::from_ymd_opt(2026, 2, 2),
    ///     arrival_time: NaiveTime::from_hms_opt(19, 0, 0),
    ///     ..TripRow::default()
    /// };
    ///
    /// let trip = row.into_trip().unwrap();
    /// assert_eq!(trip.country_code, "CZ");
    /// assert_eq!(trip.purpose, "");
    /// ```
    pub fn into_trip(self) -> Option<Trip> {
        let country = self.country.filter(|c| !c.trim().is_empty())?;
        let start = NaiveDateTime::new(self.travel_date?, self.departure_time?);
        let end = NaiveDateTime::new(self.return_date?, self.arrival_time?);

        let trip = Trip::new(country, start, end, self.purpose.unwrap_or_default());
        Some(match (self.border_out, self.border_in) {
            (Some(border_out), Some(border_in)) => trip.with_border_times(border_out, border_in),
            _ => trip,
        })
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.country.as_deref().is_none_or(|c| c.trim().is_empty()) {
            missing.push("country");
        }
        if self.travel_date.is_none() {
            missing.push("travel_date");
        }
        if self.departure_time.is_none() {
            missing.push("departure_time");
        }
        if self.return_date.is_none() {
            missing.push("return_date");
        }
        if self.arrival_time.is_none() {
            missing.push("arrival_time");
        }
        missing
    }
}

/// Loads trip rows from a JSON (`.json`) or YAML (any other extension) file.
///
/// # Errors
///
/// - `TripSourceNotFound` if the file does not exist
/// - `TripSourceError` if it cannot be read or parsed
pub fn load_trip_rows<P: AsRef<Path>>(path: P) -> EngineResult<Vec<TripRow>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(EngineError::TripSourceNotFound { path: path_str });
    }

    let content = fs::read_to_string(path).map_err(|e| EngineError::TripSourceError {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let rows: Vec<TripRow> = if is_json {
        serde_json::from_str(&content).map_err(|e| EngineError::TripSourceError {
            path: path_str.clone(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| EngineError::TripSourceError {
            path: path_str.clone(),
            message: e.to_string(),
        })?
    };

    info!(path = %path_str, rows = rows.len(), "Loaded trip rows");
    Ok(rows)
}

/// Converts rows into trips, skipping incomplete rows.
///
/// Skipped rows are logged with their 1-based row number and the missing
/// fields.
pub fn trips_from_rows(rows: Vec<TripRow>) -> Vec<Trip> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let missing = row.missing_fields();
            if !missing.is_empty() {
                warn!(row = index + 1, missing = ?missing, "Skipping incomplete trip row");
                return None;
            }
            row.into_trip()
        })
        .collect()
}

/// Loads the complete trips of a trip register file.
pub fn load_trips<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Trip>> {
    load_trip_rows(path).map(trips_from_rows)
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_text(deserializer)? {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", text, e))),
    }
}

fn optional_clock_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = optional_text(deserializer)? else {
        return Ok(None);
    };
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text.trim(), format).ok())
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS_JSON: &str = r#"[
        {
            "country": "pl",
            "travel_date": "2025-09-10",
            "departure_time": "08:00",
            "return_date": "2025-09-12",
            "arrival_time": "20:00",
            "purpose": "Customer visit",
            "border_out": "09:30",
            "border_in": "07:00"
        },
        {
            "country": "",
            "travel_date": "2025-09-15",
            "departure_time": "08:00",
            "return_date": "2025-09-15",
            "arrival_time": "18:00"
        },
        {
            "country": "SK",
            "travel_date": "2025-09-16",
            "departure_time": "06:15:30",
            "return_date": "2025-09-16",
            "arrival_time": null
        }
    ]"#;

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_rows_deserialize_blank_cells_as_absent() {
        let rows: Vec<TripRow> = serde_json::from_str(ROWS_JSON).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].border_in, Some(make_time("07:00")));
        assert_eq!(rows[1].country, None);
        assert_eq!(rows[1].purpose, None);
        assert_eq!(
            rows[2].departure_time,
            NaiveTime::from_hms_opt(6, 15, 30)
        );
        assert_eq!(rows[2].arrival_time, None);
    }

    #[test]
    fn test_trips_from_rows_skips_incomplete_rows() {
        let rows: Vec<TripRow> = serde_json::from_str(ROWS_JSON).unwrap();
        let trips = trips_from_rows(rows);

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].country_code, "PL");
        assert_eq!(trips[0].purpose, "Customer visit");
        assert_eq!(trips[0].border_out_time, Some(make_time("09:30")));
        assert_eq!(trips[0].border_in_time, Some(make_time("07:00")));
    }

    #[test]
    fn test_single_border_time_is_dropped() {
        let row = TripRow {
            country: Some("AT".to_string()),
            travel_date: NaiveDate::from_ymd_opt(2025, 9, 10),
            departure_time: Some(make_time("08:00")),
            return_date: NaiveDate::from_ymd_opt(2025, 9, 10),
            arrival_time: Some(make_time("20:00")),
            border_out: Some(make_time("09:00")),
            ..TripRow::default()
        };

        let trip = row.into_trip().unwrap();
        assert_eq!(trip.border_out_time, None);
        assert_eq!(trip.border_in_time, None);
    }

    #[test]
    fn test_yaml_rows() {
        let yaml = r#"
- country: CZ
  travel_date: "2026-02-02"
  departure_time: "06:00"
  return_date: "2026-02-02"
  arrival_time: "19:00"
  purpose: Supplier audit
"#;
        let rows: Vec<TripRow> = serde_yaml::from_str(yaml).unwrap();
        let trips = trips_from_rows(rows);

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].duration_hours().to_string(), "13");
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let result: Result<Vec<TripRow>, _> =
            serde_json::from_str(r#"[{"country": "AT", "departure_time": "25:99"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        match load_trip_rows("./tests/fixtures/does_not_exist.json") {
            Err(EngineError::TripSourceNotFound { path }) => {
                assert!(path.contains("does_not_exist.json"))
            }
            other => panic!("Expected TripSourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json_fixture() {
        let trips = load_trips("./tests/fixtures/trips.json").unwrap();
        assert_eq!(trips.len(), 3);
        assert_eq!(trips[0].country_code, "PL");
    }

    #[test]
    fn test_load_yaml_fixture() {
        let rows = load_trip_rows("./tests/fixtures/trips.yaml").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(trips_from_rows(rows).len(), 2);
    }
}
