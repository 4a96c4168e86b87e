/// Core data types for the Colorado rivers display.
///
/// This module defines the shared domain model imported by all other modules:
/// station readings, time series points, water temperature readings, the
/// cache envelope and the fetch error taxonomy. It contains no I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Parameter codes
// ---------------------------------------------------------------------------

/// DWR parameter code for discharge (streamflow), in cubic feet per second.
pub const PARAM_DISCHARGE: &str = "DISCHRG";

/// DWR parameter code for water temperature.
pub const PARAM_WATER_TEMP: &str = "WATTEMP";

/// USGS parameter code for water temperature, in degrees Celsius.
pub const USGS_PARAM_WATER_TEMP: &str = "00010";

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// The current reading for one telemetry station.
///
/// Projected from the first `ResultList` entry of a DWR telemetry station
/// response. `value` is `None` when the station reports no measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub station_id: String,
    pub station_name: String,
    pub water_source: String,
    pub parameter: String,
    pub value: Option<f64>,
    pub unit: String,
    pub stage: Option<f64>,
    pub measured_at: String, // ISO 8601, e.g. "2024-05-01T12:00:00-06:00"
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: String,
}

impl StationReading {
    /// True when this reading measures discharge, the only parameter the
    /// flow bands in the station registry apply to.
    pub fn is_discharge(&self) -> bool {
        self.parameter.eq_ignore_ascii_case(PARAM_DISCHARGE)
    }
}

/// One point of a telemetry time series. Series are ordered newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesPoint {
    pub value: Option<f64>,
    pub timestamp: String,
}

/// Which upstream provider a water temperature came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSource {
    /// Colorado DWR telemetry (`WATTEMP`).
    Primary,
    /// USGS instantaneous values (`00010`), converted from Celsius.
    Fallback,
}

/// A water temperature in degrees Fahrenheit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub value: f64,
    pub unit: String,
    pub timestamp: String,
    pub source: TemperatureSource,
}

/// Cache envelope distinguishing a confirmed "no data" result from a miss.
///
/// A cache miss is the absence of an entry; `NotFound` is an entry that
/// records that the upstream providers had nothing to offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Cached<T> {
    Found(T),
    NotFound,
}

impl<T> Cached<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Cached::Found(value) => Some(value),
            Cached::NotFound => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or decoding upstream telemetry.
///
/// None of these escape a render pass: the fetcher logs them and degrades to
/// `None` or an empty series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Non-200 HTTP response from an upstream API.
    #[error("HTTP error: {0}")]
    Http(u16),
    /// The request could not be sent or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body could not be deserialized.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The response was well formed but held no usable values
    /// (empty result list or sentinel -999999).
    #[error("No data available: {0}")]
    NoData(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_not_found_serializes_as_tagged_variant() {
        let json = serde_json::to_string(&Cached::<TemperatureReading>::NotFound).unwrap();
        assert_eq!(json, r#"{"status":"not_found"}"#);
        let back: Cached<TemperatureReading> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Cached::NotFound);
    }

    #[test]
    fn test_cached_found_keeps_payload() {
        let reading = TemperatureReading {
            value: 52.3,
            unit: "F".to_string(),
            timestamp: "2024-05-01T12:00:00-06:00".to_string(),
            source: TemperatureSource::Fallback,
        };
        let json = serde_json::to_string(&Cached::Found(reading.clone())).unwrap();
        assert!(json.contains(r#""status":"found""#));
        assert!(json.contains(r#""source":"fallback""#));
        let back: Cached<TemperatureReading> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_option(), Some(reading));
    }

    #[test]
    fn test_discharge_detection_ignores_case() {
        let mut reading = StationReading {
            station_id: "PLACHECO".to_string(),
            station_name: "SOUTH PLATTE RIVER BELOW CHEESMAN RESERVOIR".to_string(),
            water_source: "SOUTH PLATTE RIVER".to_string(),
            parameter: "dischrg".to_string(),
            value: Some(150.0),
            unit: "CFS".to_string(),
            stage: None,
            measured_at: "2024-05-01T12:00:00-06:00".to_string(),
            latitude: None,
            longitude: None,
            status: "Active".to_string(),
        };
        assert!(reading.is_discharge());
        reading.parameter = "GAGE_HT".to_string();
        assert!(!reading.is_discharge());
    }

    #[test]
    fn test_fetch_error_display_names_the_failure() {
        assert_eq!(FetchError::Http(503).to_string(), "HTTP error: 503");
        assert!(FetchError::NoData("PLACHECO".into()).to_string().contains("PLACHECO"));
    }
}
