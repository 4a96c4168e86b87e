/// Upstream telemetry ingestion.
///
/// Submodules:
/// - `http`: the blocking HTTP seam and its `reqwest` implementation.
/// - `dwr`: Colorado DWR telemetry REST API (primary provider).
/// - `usgs`: USGS NWIS instantaneous values (temperature fallback).
/// - `fetcher`: read-through cached fetches combining the two providers.

pub mod dwr;
pub mod fetcher;
pub mod http;
pub mod usgs;
