/// Read-through cached telemetry fetches.
///
/// Every public operation absorbs upstream failures: current readings come
/// back as `None`, series as an empty `Vec`. Failures are logged with their
/// classification and never reach the render pass as errors.
///
/// Cache policy:
/// - current reading: positive entries only, so a failing station is retried
///   on every render pass;
/// - time series: positive entries only;
/// - water temperature: positive *and* negative (`Cached::NotFound`) entries,
///   bounding the cost of stations with no temperature sensor anywhere.

use crate::cache::{self, CACHE_TTL_SECS, Cache};
use crate::ingest::http::HttpGet;
use crate::ingest::{dwr, usgs};
use crate::logging::{self, DataSource};
use crate::model::{
    Cached, FetchError, PARAM_WATER_TEMP, StationReading, TemperatureReading, TemperatureSource,
    TimeseriesPoint,
};
use crate::stations;

/// Points handed to the short-term trend analyzer.
pub const TREND_POINTS: usize = 10;

/// Points requested upstream: 24 hours at DWR's 15-minute cadence.
pub const HISTORY_POINTS: usize = 96;

/// Base URLs of the two upstream providers.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub dwr_base_url: String,
    pub usgs_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dwr_base_url: dwr::DWR_BASE_URL.to_string(),
            usgs_base_url: usgs::USGS_IV_BASE_URL.to_string(),
        }
    }
}

pub struct Fetcher<'a> {
    http: &'a dyn HttpGet,
    cache: &'a dyn Cache,
    endpoints: Endpoints,
}

impl<'a> Fetcher<'a> {
    pub fn new(http: &'a dyn HttpGet, cache: &'a dyn Cache, endpoints: Endpoints) -> Self {
        Self {
            http,
            cache,
            endpoints,
        }
    }

    // ------------------------------------------------------------------
    // Current reading
    // ------------------------------------------------------------------

    /// Current reading for a station, or `None` if the upstream call fails
    /// or returns no result.
    pub fn fetch_current(&self, station_id: &str) -> Option<StationReading> {
        self.fetch_current_result(station_id).ok()
    }

    /// Like `fetch_current`, but keeps the failure so callers can tell an
    /// unreachable API from a station that has nothing to report.
    pub fn fetch_current_result(&self, station_id: &str) -> Result<StationReading, FetchError> {
        let key = cache::current_key(station_id);
        if let Some(reading) = cache::get_json::<StationReading>(self.cache, &key) {
            logging::debug(DataSource::Cache, Some(station_id), "current reading cache hit");
            return Ok(reading);
        }

        let url = dwr::build_station_url(&self.endpoints.dwr_base_url, station_id);
        let result = self
            .get_body(&url)
            .and_then(|body| dwr::parse_station_response(station_id, &body));

        match result {
            Ok(reading) => {
                cache::set_json(self.cache, &key, &reading, CACHE_TTL_SECS);
                Ok(reading)
            }
            Err(e) => {
                logging::log_fetch_failure(DataSource::Dwr, station_id, "current reading", &e);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Time series
    // ------------------------------------------------------------------

    /// Up to `TREND_POINTS` most recent points, newest first.
    pub fn fetch_timeseries(&self, station_id: &str, parameter: &str) -> Vec<TimeseriesPoint> {
        let mut points = self.fetch_history(station_id, parameter);
        points.truncate(TREND_POINTS);
        points
    }

    /// Up to `HISTORY_POINTS` most recent points, newest first. Shares its
    /// cache entry with `fetch_timeseries`.
    pub fn fetch_history(&self, station_id: &str, parameter: &str) -> Vec<TimeseriesPoint> {
        let key = cache::timeseries_key(station_id, parameter);
        if let Some(points) = cache::get_json::<Vec<TimeseriesPoint>>(self.cache, &key) {
            logging::debug(DataSource::Cache, Some(station_id), "time series cache hit");
            return points;
        }

        match self.request_series(station_id, parameter, HISTORY_POINTS) {
            Ok(mut points) => {
                points.truncate(HISTORY_POINTS);
                cache::set_json(self.cache, &key, &points, CACHE_TTL_SECS);
                points
            }
            Err(e) => {
                let operation = format!("{} time series", parameter);
                logging::log_fetch_failure(DataSource::Dwr, station_id, &operation, &e);
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Water temperature
    // ------------------------------------------------------------------

    /// Most recent water temperature in °F: DWR first, then the station's
    /// USGS fallback site. A miss on both is cached as `NotFound`.
    pub fn fetch_water_temperature(&self, station_id: &str) -> Option<TemperatureReading> {
        let key = cache::temperature_key(station_id);
        if let Some(cached) = cache::get_json::<Cached<TemperatureReading>>(self.cache, &key) {
            logging::debug(DataSource::Cache, Some(station_id), "water temperature cache hit");
            return cached.into_option();
        }

        let found = self
            .primary_temperature(station_id)
            .or_else(|| self.fallback_temperature(station_id));

        match found {
            Some(reading) => {
                cache::set_json(self.cache, &key, &Cached::Found(reading.clone()), CACHE_TTL_SECS);
                Some(reading)
            }
            None => {
                logging::debug(DataSource::System, Some(station_id), "no water temperature from any provider");
                cache::set_json(self.cache, &key, &Cached::<TemperatureReading>::NotFound, CACHE_TTL_SECS);
                None
            }
        }
    }

    fn primary_temperature(&self, station_id: &str) -> Option<TemperatureReading> {
        let result = self
            .request_series(station_id, PARAM_WATER_TEMP, 1)
            .and_then(|points| {
                points
                    .into_iter()
                    .find_map(|p| p.value.map(|v| (v, p.timestamp)))
                    .ok_or_else(|| FetchError::NoData(format!("no {} values", PARAM_WATER_TEMP)))
            });

        match result {
            Ok((value, timestamp)) => Some(TemperatureReading {
                value,
                unit: "F".to_string(),
                timestamp,
                source: TemperatureSource::Primary,
            }),
            Err(e) => {
                logging::log_fetch_failure(DataSource::Dwr, station_id, "water temperature", &e);
                None
            }
        }
    }

    fn fallback_temperature(&self, station_id: &str) -> Option<TemperatureReading> {
        let site = stations::fallback_site(station_id)?;
        let url = usgs::build_temperature_url(&self.endpoints.usgs_base_url, site);
        let result = self
            .get_body(&url)
            .and_then(|body| usgs::parse_temperature_response(site, &body));

        match result {
            Ok(reading) => Some(TemperatureReading {
                value: usgs::celsius_to_fahrenheit(reading.celsius),
                unit: "F".to_string(),
                timestamp: reading.date_time,
                source: TemperatureSource::Fallback,
            }),
            Err(e) => {
                logging::log_fetch_failure(DataSource::Usgs, site, "water temperature", &e);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn request_series(
        &self,
        station_id: &str,
        parameter: &str,
        page_size: usize,
    ) -> Result<Vec<TimeseriesPoint>, FetchError> {
        let url = dwr::build_timeseries_url(&self.endpoints.dwr_base_url, station_id, parameter, page_size);
        let points = dwr::parse_timeseries_response(&self.get_body(&url)?)?;
        if points.is_empty() {
            return Err(FetchError::NoData(format!("empty {} series", parameter)));
        }
        Ok(points)
    }

    /// Body of a 200 response; any other status is `FetchError::Http`.
    fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url)?;
        if !response.is_ok() {
            return Err(FetchError::Http(response.status));
        }
        Ok(response.body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
