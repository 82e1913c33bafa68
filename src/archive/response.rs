//! Decoding of Open-Meteo archive response bodies.

use crate::archive::error::ArchiveError;
use crate::types::series::HourlySeries;
use crate::types::time_window::parse_timestamp;
use crate::types::variable::WindVariable;
use serde::Deserialize;
use std::collections::HashMap;

/// Top level of a successful response. Only the hourly block is read.
#[derive(Debug, Deserialize)]
struct ArchiveBody {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Option<Vec<String>>,
    #[serde(flatten)]
    variables: HashMap<String, Vec<Option<f64>>>,
}

/// Body the archive sends alongside a 4xx status.
#[derive(Debug, Deserialize)]
struct ArchiveErrorBody {
    reason: String,
}

/// Extracts the hourly series of `variable` from a raw response body.
pub fn parse_hourly(body: &[u8], variable: &str) -> Result<HourlySeries, ArchiveError> {
    let body: ArchiveBody = serde_json::from_slice(body)?;
    let mut hourly = body
        .hourly
        .ok_or_else(|| ArchiveError::MissingKey(WindVariable::CATEGORY.to_string()))?;

    let raw_times = hourly
        .time
        .ok_or_else(|| ArchiveError::MissingKey(format!("{}.time", WindVariable::CATEGORY)))?;
    let values = hourly.variables.remove(variable).ok_or_else(|| {
        ArchiveError::MissingKey(format!("{}.{}", WindVariable::CATEGORY, variable))
    })?;

    let times = raw_times
        .iter()
        .map(|t| parse_timestamp(t).map_err(|e| ArchiveError::TimestampParse(t.clone(), e)))
        .collect::<Result<Vec<_>, _>>()?;

    HourlySeries::new(variable, times, values)
}

/// Best-effort extraction of the `reason` field of an error body.
pub fn error_reason(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ArchiveErrorBody>(body)
        .ok()
        .map(|b| b.reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "latitude": 58.21,
        "longitude": 25.2,
        "generationtime_ms": 0.5,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "hourly_units": {"time": "iso8601", "wind_speed_100m": "m/s"},
        "hourly": {
            "time": ["2024-11-26T00:00", "2024-11-26T01:00", "2024-11-26T02:00"],
            "wind_speed_100m": [5.2, null, 7.9]
        }
    }"#;

    #[test]
    fn test_parse_hourly() {
        let series = parse_hourly(BODY.as_bytes(), "wind_speed_100m").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.values(), &[Some(5.2), None, Some(7.9)]);
        assert_eq!(
            series.times()[1],
            parse_timestamp("2024-11-26T01:00").unwrap()
        );
    }

    #[test]
    fn test_missing_variable() {
        let err = parse_hourly(BODY.as_bytes(), "wind_direction_100m").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingKey(ref k) if k == "hourly.wind_direction_100m"));
    }

    #[test]
    fn test_missing_hourly_block() {
        let err = parse_hourly(br#"{"latitude": 1.0}"#, "wind_speed_100m").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingKey(ref k) if k == "hourly"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_hourly(b"<html>", "wind_speed_100m").unwrap_err();
        assert!(matches!(err, ArchiveError::JsonParse(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let body = r#"{"hourly": {"time": ["2024-11-26T00:00"], "wind_speed_100m": [1.0, 2.0]}}"#;
        let err = parse_hourly(body.as_bytes(), "wind_speed_100m").unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::LengthMismatch {
                times: 1,
                values: 2
            }
        ));
    }

    #[test]
    fn test_bad_timestamp() {
        let body = r#"{"hourly": {"time": ["yesterday"], "wind_speed_100m": [1.0]}}"#;
        let err = parse_hourly(body.as_bytes(), "wind_speed_100m").unwrap_err();
        assert!(matches!(err, ArchiveError::TimestampParse(ref t, _) if t == "yesterday"));
    }

    #[test]
    fn test_error_reason() {
        let body = br#"{"error": true, "reason": "Cannot initialize WeatherVariable from invalid String value wind_speed_7m"}"#;
        assert_eq!(
            error_reason(body).as_deref(),
            Some("Cannot initialize WeatherVariable from invalid String value wind_speed_7m")
        );
        assert_eq!(error_reason(b"not json"), None);
    }
}
