//! Normalization of bulk-data responses into timestamp-keyed series.
//!
//! Responses arrive as a CSV table prefixed by a variable number of
//! disclaimer and metadata lines, and the column set differs per granularity:
//! hourly and daily expose an instantaneous `Temp (°C)` column while monthly
//! only has `Mean Temp (°C)`. That schema difference is absorbed here, once,
//! so consumers see a single uniform shape.

use crate::records::error::RecordError;
use csv::StringRecord;
use std::collections::HashMap;

/// Timestamp-keyed temperature and precipitation extracted from one response.
///
/// The two maps are parallel: every `Date/Time` value in the response appears
/// in both, with `None` where the field was empty or the column absent.
/// Duplicate timestamps within one response resolve last-row-wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    /// Timestamp to temperature in °C, or `None` when not reported.
    pub temperature: HashMap<String, Option<f64>>,
    /// Timestamp to total precipitation in mm, or `None` when not reported.
    pub precipitation: HashMap<String, Option<f64>>,
}

/// Where the interesting columns sit in this response's header, resolved once.
/// The temperature precedence (`Temp (°C)` over `Mean Temp (°C)`) is applied
/// here rather than re-derived per row.
struct Columns {
    date_time: usize,
    temperature: Option<(usize, &'static str)>,
    precipitation: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Columns, RecordError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        // Hourly responses label the column "Date/Time (LST)".
        let date_time = headers
            .iter()
            .position(|h| h.starts_with("Date/Time"))
            .ok_or(RecordError::MissingDateTimeHeader)?;
        let temperature = position("Temp (°C)")
            .map(|at| (at, "Temp (°C)"))
            .or_else(|| position("Mean Temp (°C)").map(|at| (at, "Mean Temp (°C)")));
        Ok(Columns {
            date_time,
            temperature,
            precipitation: position("Total Precip (mm)"),
        })
    }
}

/// Parses a bulk-data response body into a [`NormalizedSeries`].
///
/// Leading lines are discarded up to the line containing the `Date/Time`
/// column header; a body without that marker is malformed.
pub fn normalize_response(body: &str) -> Result<NormalizedSeries, RecordError> {
    let lines: Vec<&str> = body.lines().collect();
    let header_at = lines
        .iter()
        .position(|line| line.contains("Date/Time"))
        .ok_or(RecordError::MissingDateTimeHeader)?;
    let table = lines[header_at..].join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(table.as_bytes());
    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut series = NormalizedSeries::default();
    for record in reader.records() {
        let record = record?;
        let timestamp = record.get(columns.date_time).unwrap_or("").to_string();
        let temperature = match columns.temperature {
            Some((at, column)) => number_at(&record, at, column, &timestamp)?,
            None => None,
        };
        let precipitation = match columns.precipitation {
            Some(at) => number_at(&record, at, "Total Precip (mm)", &timestamp)?,
            None => None,
        };
        series.temperature.insert(timestamp.clone(), temperature);
        series.precipitation.insert(timestamp, precipitation);
    }
    Ok(series)
}

/// Reads a numeric field, treating empty text as absent rather than zero.
fn number_at(
    record: &StringRecord,
    at: usize,
    column: &'static str,
    timestamp: &str,
) -> Result<Option<f64>, RecordError> {
    let raw = record.get(at).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| RecordError::MalformedValue {
            column,
            value: raw.to_string(),
            timestamp: timestamp.to_string(),
        })
}
