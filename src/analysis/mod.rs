/// Time series analysis for the Colorado rivers display.
///
/// Submodules:
/// - `trend`: short-term rising/falling/stable over the last ten points.
/// - `stability`: how long flow has held steady over windows up to 24 hours.
/// - `staleness`: whether a reading is too old to trust.

pub mod stability;
pub mod staleness;
pub mod trend;

use crate::model::TimeseriesPoint;

/// Values of the points that carry one, preserving newest-first order.
pub(crate) fn valued(series: &[TimeseriesPoint]) -> Vec<f64> {
    series.iter().filter_map(|p| p.value).collect()
}

/// Percent change from `reference` to `current`; zero when `reference` is
/// zero.
pub(crate) fn percent_change(current: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (current - reference) / reference * 100.0
    }
}

#[cfg(test)]
pub(crate) fn series(values: &[f64]) -> Vec<TimeseriesPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| TimeseriesPoint {
            value: Some(*v),
            timestamp: format!("point-{}", i),
        })
        .collect()
}
