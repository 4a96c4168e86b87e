/// Short-term flow trend.
///
/// Compares the latest value against the mean of the preceding points in the
/// trend window (up to ten, newest first).

use crate::analysis::{percent_change, valued};
use crate::colors::{self, Color};
use crate::model::TimeseriesPoint;

/// Change beyond which the trend is no longer stable, in percent.
pub const TREND_THRESHOLD_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "↑",
            TrendDirection::Falling => "↓",
            TrendDirection::Stable => "→",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            TrendDirection::Rising => colors::GREEN,
            TrendDirection::Falling => colors::ORANGE,
            TrendDirection::Stable => colors::GRAY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    pub change_percent: f64,
}

impl Trend {
    const FLAT: Trend = Trend {
        direction: TrendDirection::Stable,
        change_percent: 0.0,
    };
}

/// Classifies the trend of a newest-first series. Points without a value are
/// skipped; fewer than two valued points is a flat trend.
pub fn trend(series: &[TimeseriesPoint]) -> Trend {
    let values = valued(series);
    let Some((&current, previous)) = values.split_first() else {
        return Trend::FLAT;
    };
    if previous.is_empty() {
        return Trend::FLAT;
    }

    let previous_avg = previous.iter().sum::<f64>() / previous.len() as f64;
    let change_percent = percent_change(current, previous_avg);

    let direction = if change_percent > TREND_THRESHOLD_PCT {
        TrendDirection::Rising
    } else if change_percent < -TREND_THRESHOLD_PCT {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };

    Trend {
        direction,
        change_percent,
    }
}
