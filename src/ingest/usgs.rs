/// USGS NWIS instantaneous-values client (water temperature fallback)
///
/// Only the most recent water temperature (parameter 00010, degrees Celsius)
/// is read, for stations whose DWR telemetry has no WATTEMP sensor.
///
/// API Documentation: https://waterservices.usgs.gov/docs/instantaneous-values/

use serde::Deserialize;

use crate::model::{FetchError, USGS_PARAM_WATER_TEMP};

pub const USGS_IV_BASE_URL: &str = "https://waterservices.usgs.gov/nwis/iv/";

/// USGS reports missing values with this sentinel rather than null.
const USGS_NO_DATA_SENTINEL: f64 = -999999.0;

// ============================================================================
// USGS IV Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct IvResponse {
    pub value: IvValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IvValue {
    #[serde(default)]
    pub time_series: Vec<IvTimeSeries>,
}

#[derive(Debug, Deserialize)]
pub struct IvTimeSeries {
    #[serde(default)]
    pub values: Vec<IvValueSet>,
}

#[derive(Debug, Deserialize)]
pub struct IvValueSet {
    #[serde(default)]
    pub value: Vec<IvPoint>,
}

/// USGS encodes values as strings, e.g. `"11.4"`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IvPoint {
    pub value: String,
    pub date_time: String,
}

/// Latest water temperature reported by a USGS site, still in Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct CelsiusReading {
    pub celsius: f64,
    pub date_time: String,
}

// ============================================================================
// URL Construction & Parsing
// ============================================================================

pub fn build_temperature_url(base: &str, site_code: &str) -> String {
    format!(
        "{}?sites={}&parameterCd={}&format=json",
        base,
        site_code,
        USGS_PARAM_WATER_TEMP
    )
}

/// Reads `value.timeSeries[0].values[0].value[0]`.
pub fn parse_temperature_response(site_code: &str, body: &str) -> Result<CelsiusReading, FetchError> {
    let response: IvResponse = serde_json::from_str(body)?;

    let point = response
        .value
        .time_series
        .into_iter()
        .next()
        .and_then(|ts| ts.values.into_iter().next())
        .and_then(|set| set.value.into_iter().next())
        .ok_or_else(|| FetchError::NoData(format!("no timeSeries entries for site {}", site_code)))?;

    let celsius: f64 = point
        .value
        .trim()
        .parse()
        .map_err(|_| FetchError::Parse(format!("non-numeric value '{}'", point.value)))?;

    if celsius <= USGS_NO_DATA_SENTINEL {
        return Err(FetchError::NoData(format!("sentinel value for site {}", site_code)));
    }

    Ok(CelsiusReading {
        celsius,
        date_time: point.date_time,
    })
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

// ============================================================================
// Tests
// ============================================================================
