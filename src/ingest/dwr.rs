/// Colorado DWR telemetry API client
///
/// Retrieves current readings and raw time series for telemetry stations
/// from the Colorado Division of Water Resources REST service.
///
/// API Documentation: https://dwr.state.co.us/Rest/GET/Help
/// Current reading:   {base}/telemetrystations/telemetrystation
/// Raw time series:   {base}/telemetrystations/telemetrytimeseriesraw

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;

use crate::model::{FetchError, StationReading, TimeseriesPoint};

pub const DWR_BASE_URL: &str = "https://dwr.state.co.us/Rest/GET/api/v2";

/// DWR reports local time; timestamps without an offset are Mountain Standard.
const MOUNTAIN_STANDARD_OFFSET_SECS: i32 = 7 * 3600;

// ============================================================================
// DWR API Response Structures
// ============================================================================

/// Envelope shared by every DWR list endpoint.
#[derive(Debug, Deserialize)]
pub struct DwrResponse<T> {
    #[serde(rename = "ResultList", default = "Vec::new")]
    pub result_list: Vec<T>,
}

/// One entry of the telemetry station endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DwrStation {
    pub station_name: Option<String>,
    pub water_source: Option<String>,
    pub parameter: Option<String>,
    pub meas_value: Option<f64>,
    pub units: Option<String>,
    pub stage: Option<f64>,
    pub meas_date_time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub station_status: Option<String>,
}

/// One entry of the raw time series endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DwrTimeseriesEntry {
    pub meas_value: Option<f64>,
    pub meas_date_time: Option<String>,
}

// ============================================================================
// URL Construction
// ============================================================================

pub fn build_station_url(base: &str, station_id: &str) -> String {
    format!(
        "{}/telemetrystations/telemetrystation?format=json&abbrev={}",
        base.trim_end_matches('/'),
        station_id
    )
}

pub fn build_timeseries_url(base: &str, station_id: &str, parameter: &str, page_size: usize) -> String {
    format!(
        "{}/telemetrystations/telemetrytimeseriesraw?format=json&abbrev={}&parameter={}&pageSize={}",
        base.trim_end_matches('/'),
        station_id,
        parameter,
        page_size
    )
}

// ============================================================================
// Response Parsing
// ============================================================================

/// Projects the first `ResultList` entry into a `StationReading`.
///
/// An empty list is `NoData`; a body that is not a DWR envelope is `Parse`.
pub fn parse_station_response(station_id: &str, body: &str) -> Result<StationReading, FetchError> {
    let response: DwrResponse<DwrStation> = serde_json::from_str(body)?;
    let station = response
        .result_list
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NoData(format!("empty ResultList for {}", station_id)))?;

    Ok(StationReading {
        station_id: station_id.to_string(),
        station_name: station.station_name.unwrap_or_default(),
        water_source: station.water_source.unwrap_or_default(),
        parameter: station.parameter.unwrap_or_default(),
        value: station.meas_value,
        unit: station.units.unwrap_or_default(),
        stage: station.stage,
        measured_at: station.meas_date_time.unwrap_or_default(),
        latitude: station.latitude,
        longitude: station.longitude,
        status: station.station_status.unwrap_or_default(),
    })
}

/// Parses a raw time series, ordered newest first.
///
/// Entries without a timestamp are dropped. An empty list parses to an empty
/// series; it is up to the caller whether that counts as no data.
pub fn parse_timeseries_response(body: &str) -> Result<Vec<TimeseriesPoint>, FetchError> {
    let response: DwrResponse<DwrTimeseriesEntry> = serde_json::from_str(body)?;
    let mut points: Vec<TimeseriesPoint> = response
        .result_list
        .into_iter()
        .filter_map(|entry| {
            entry.meas_date_time.map(|timestamp| TimeseriesPoint {
                value: entry.meas_value,
                timestamp,
            })
        })
        .collect();
    sort_newest_first(&mut points);
    Ok(points)
}

/// Sorts by measurement time, newest first. Points whose timestamps do not
/// parse sink to the end in their original relative order.
pub fn sort_newest_first(points: &mut [TimeseriesPoint]) {
    points.sort_by_key(|p| {
        std::cmp::Reverse(parse_measurement_time(&p.timestamp).ok().map(|t| t.timestamp()))
    });
}

/// Parses a DWR/USGS measurement time.
///
/// Accepts RFC 3339 with offset (`2024-05-01T12:00:00-06:00`), USGS
/// fractional seconds (`2024-05-01T12:00:00.000-06:00`), and DWR's
/// offset-less local form (`2024-05-01T12:00:00`), which is read as
/// Mountain Standard Time.
pub fn parse_measurement_time(timestamp: &str) -> Result<DateTime<FixedOffset>, String> {
    let trimmed = timestamp.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(t);
    }
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("invalid measurement time '{}': {}", timestamp, e))?;
    let mountain = FixedOffset::west_opt(MOUNTAIN_STANDARD_OFFSET_SECS)
        .ok_or_else(|| "invalid Mountain offset".to_string())?;
    naive
        .and_local_timezone(mountain)
        .single()
        .ok_or_else(|| format!("ambiguous measurement time '{}'", timestamp))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const STATION_BODY: &str = r#"{
        "PageNumber": 1,
        "PageCount": 1,
        "ResultCount": 1,
        "ResultList": [{
            "abbrev": "PLACHECO",
            "stationName": "SOUTH PLATTE RIVER BELOW CHEESMAN RESERVOIR",
            "waterSource": "SOUTH PLATTE RIVER",
            "parameter": "DISCHRG",
            "measValue": 162.0,
            "units": "CFS",
            "stage": 2.41,
            "measDateTime": "2024-05-01T12:00:00-06:00",
            "latitude": 39.2094,
            "longitude": -105.2728,
            "stationStatus": "Active"
        }]
    }"#;

    #[test]
    fn test_station_url_matches_dwr_layout() {
        assert_eq!(
            build_station_url(DWR_BASE_URL, "PLACHECO"),
            "https://dwr.state.co.us/Rest/GET/api/v2/telemetrystations/telemetrystation?format=json&abbrev=PLACHECO"
        );
    }

    #[test]
    fn test_timeseries_url_includes_parameter_and_page_size() {
        let url = build_timeseries_url("http://localhost/api/", "PLACHECO", "DISCHRG", 96);
        assert_eq!(
            url,
            "http://localhost/api/telemetrystations/telemetrytimeseriesraw?format=json&abbrev=PLACHECO&parameter=DISCHRG&pageSize=96"
        );
    }

    #[test]
    fn test_parse_station_response_projects_first_entry() {
        let reading = parse_station_response("PLACHECO", STATION_BODY).expect("fixture should parse");
        assert_eq!(reading.station_id, "PLACHECO");
        assert_eq!(reading.water_source, "SOUTH PLATTE RIVER");
        assert_eq!(reading.parameter, "DISCHRG");
        assert_eq!(reading.value, Some(162.0));
        assert_eq!(reading.unit, "CFS");
        assert_eq!(reading.stage, Some(2.41));
        assert_eq!(reading.status, "Active");
    }

    #[test]
    fn test_parse_station_response_null_value_is_kept_as_none() {
        let body = r#"{"ResultList":[{"stationName":"X","parameter":"DISCHRG","measValue":null}]}"#;
        let reading = parse_station_response("PLACHECO", body).unwrap();
        assert_eq!(reading.value, None);
        assert_eq!(reading.unit, "");
    }

    #[test]
    fn test_parse_station_response_empty_list_is_no_data() {
        let result = parse_station_response("PLACHECO", r#"{"ResultList":[]}"#);
        assert!(matches!(result, Err(FetchError::NoData(_))));
    }

    #[test]
    fn test_parse_station_response_garbage_is_parse_error() {
        let result = parse_station_response("PLACHECO", "<html>maintenance</html>");
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_parse_timeseries_sorts_newest_first() {
        let body = r#"{"ResultList":[
            {"measValue": 100.0, "measDateTime": "2024-05-01T11:30:00-06:00"},
            {"measValue": 120.0, "measDateTime": "2024-05-01T12:00:00-06:00"},
            {"measValue": null,  "measDateTime": "2024-05-01T11:45:00-06:00"},
            {"measValue": 90.0}
        ]}"#;
        let points = parse_timeseries_response(body).unwrap();
        assert_eq!(points.len(), 3, "entry without timestamp should be dropped");
        assert_eq!(points[0].value, Some(120.0));
        assert_eq!(points[1].value, None);
        assert_eq!(points[2].value, Some(100.0));
    }

    #[test]
    fn test_measurement_time_without_offset_is_mountain_standard() {
        let local = parse_measurement_time("2024-05-01T12:00:00").unwrap();
        let explicit = parse_measurement_time("2024-05-01T12:00:00-07:00").unwrap();
        assert_eq!(local, explicit);

        let usgs = parse_measurement_time("2024-05-01T12:00:00.000-06:00").unwrap();
        assert_eq!(usgs.timestamp(), parse_measurement_time("2024-05-01T18:00:00Z").unwrap().timestamp());

        assert!(parse_measurement_time("yesterday").is_err());
    }
}
