/// Multi-window flow stability.
///
/// Readings arrive on a ~15-minute cadence, so a window of N points spans
/// N × 15 minutes. Each fully covered window compares the current value with
/// the oldest point in the window; a change within ±10 % makes the window
/// stable. Windows are scanned shortest to longest and the last stable one
/// wins, so the reported duration is the longest stable window.
///
/// When no window is stable the label comes from the change against the
/// point ~6 hours back (or the oldest available, if the series is shorter).

use crate::analysis::{percent_change, valued};
use crate::colors::{self, Color};
use crate::model::TimeseriesPoint;

/// (points, duration tag), shortest first.
pub const STABILITY_WINDOWS: [(usize, &str); 5] =
    [(4, "1h"), (12, "3h"), (24, "6h"), (48, "12h"), (96, "24h")];

/// A window is stable when its change stays within this many percent.
pub const STABLE_WINDOW_PCT: f64 = 10.0;

/// Index of the reference point used for labeling (~6 hours back).
const REFERENCE_INDEX: usize = 24;

/// Minimum valued points before a reference change is computed.
const MIN_REFERENCE_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityLevel {
    /// Not enough data to say anything.
    Unknown,
    /// Stable across the full 24 hours.
    Steady,
    /// Stable across 6 or 12 hours.
    Stable,
    /// Stable only across 1 or 3 hours.
    Settling,
    Surge,
    Rising,
    Up,
    Plunge,
    Falling,
    Down,
    /// No stable window, but the reference change is small.
    Flat,
}

impl StabilityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            StabilityLevel::Unknown => "---",
            StabilityLevel::Steady => "STEADY",
            StabilityLevel::Stable | StabilityLevel::Settling | StabilityLevel::Flat => "STABLE",
            StabilityLevel::Surge => "SURGE",
            StabilityLevel::Rising => "RISING",
            StabilityLevel::Up => "UP",
            StabilityLevel::Plunge => "PLUNGE",
            StabilityLevel::Falling => "FALLING",
            StabilityLevel::Down => "DOWN",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            StabilityLevel::Unknown => colors::GRAY,
            StabilityLevel::Steady => colors::GREEN,
            StabilityLevel::Stable => colors::LIGHT_GREEN,
            StabilityLevel::Settling => colors::YELLOW_GREEN,
            StabilityLevel::Surge | StabilityLevel::Plunge => colors::RED,
            StabilityLevel::Rising | StabilityLevel::Falling => colors::ORANGE,
            StabilityLevel::Up | StabilityLevel::Down => colors::YELLOW,
            StabilityLevel::Flat => colors::LIGHT_GRAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stability {
    pub level: StabilityLevel,
    /// Duration tag of the longest stable window, e.g. "6h"; empty when no
    /// window is stable.
    pub duration: &'static str,
    /// Change against the reference point, in percent.
    pub change_percent: f64,
    pub color: Color,
}

impl Stability {
    pub fn label(&self) -> &'static str {
        self.level.label()
    }

    fn new(level: StabilityLevel, duration: &'static str, change_percent: f64) -> Self {
        Self {
            level,
            duration,
            change_percent,
            color: level.color(),
        }
    }
}

/// Classifies the stability of a newest-first series of up to 96 points.
pub fn stability(series: &[TimeseriesPoint]) -> Stability {
    let values = valued(series);
    if values.len() < 2 {
        return Stability::new(StabilityLevel::Unknown, "", 0.0);
    }
    let current = values[0];

    let mut stable_window: Option<&'static str> = None;
    for (count, duration) in STABILITY_WINDOWS {
        if values.len() < count {
            continue;
        }
        let change = percent_change(current, values[count - 1]);
        if change.abs() <= STABLE_WINDOW_PCT {
            stable_window = Some(duration);
        }
    }

    let reference_change = if values.len() >= MIN_REFERENCE_POINTS {
        let index = REFERENCE_INDEX.min(values.len() - 1);
        percent_change(current, values[index])
    } else {
        0.0
    };

    if let Some(duration) = stable_window {
        let level = match duration {
            "24h" => StabilityLevel::Steady,
            "12h" | "6h" => StabilityLevel::Stable,
            _ => StabilityLevel::Settling,
        };
        return Stability::new(level, duration, reference_change);
    }

    let level = if reference_change > 30.0 {
        StabilityLevel::Surge
    } else if reference_change > 15.0 {
        StabilityLevel::Rising
    } else if reference_change > 5.0 {
        StabilityLevel::Up
    } else if reference_change < -30.0 {
        StabilityLevel::Plunge
    } else if reference_change < -15.0 {
        StabilityLevel::Falling
    } else if reference_change < -5.0 {
        StabilityLevel::Down
    } else {
        StabilityLevel::Flat
    };
    Stability::new(level, "", reference_change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::series;

    /// `current` followed by `len - 1` copies of `rest`.
    fn current_then(current: f64, rest: f64, len: usize) -> Vec<f64> {
        let mut values = vec![current];
        values.extend(std::iter::repeat(rest).take(len - 1));
        values
    }

    #[test]
    fn test_fewer_than_two_points_is_unknown() {
        for s in [series(&[]), series(&[120.0])] {
            let result = stability(&s);
            assert_eq!(result.label(), "---");
            assert_eq!(result.duration, "");
            assert_eq!(result.change_percent, 0.0);
            assert_eq!(result.color, colors::GRAY);
        }
    }

    #[test]
    fn test_flat_full_day_is_steady() {
        let result = stability(&series(&[150.0; 96]));
        assert_eq!(result.level, StabilityLevel::Steady);
        assert_eq!(result.label(), "STEADY");
        assert_eq!(result.duration, "24h");
    }

    #[test]
    fn test_stable_for_6h_but_not_12h() {
        // Points 0..24 hold at 100; the 12h boundary (index 47) is 200.
        let mut values = vec![100.0; 24];
        values.extend(vec![200.0; 24]);
        let result = stability(&series(&values));
        assert_eq!(result.label(), "STABLE");
        assert_eq!(result.duration, "6h");
        assert_eq!(result.color, colors::LIGHT_GREEN);
    }

    #[test]
    fn test_short_stable_window_is_yellow_green() {
        // 1h window (index 3) holds, 3h window (index 11) does not.
        let mut values = vec![100.0; 4];
        values.extend(vec![50.0; 8]);
        let result = stability(&series(&values));
        assert_eq!(result.level, StabilityLevel::Settling);
        assert_eq!(result.duration, "1h");
        assert_eq!(result.color, colors::YELLOW_GREEN);
    }

    #[test]
    fn test_longest_stable_window_wins_even_if_middle_window_breaks() {
        // 1h and 24h stable, 3h/6h/12h not: last qualifying window is 24h.
        let mut values = vec![100.0; 4];
        values.extend(vec![150.0; 91]);
        values.push(100.0);
        assert_eq!(values.len(), 96);
        let result = stability(&series(&values));
        assert_eq!(result.duration, "24h");
        assert_eq!(result.level, StabilityLevel::Steady);
    }

    #[test]
    fn test_surge_when_no_window_is_stable() {
        // +50 % against every boundary, reference at index 24.
        let result = stability(&series(&current_then(150.0, 100.0, 30)));
        assert_eq!(result.level, StabilityLevel::Surge);
        assert_eq!(result.color, colors::RED);
        assert_eq!(result.duration, "");
        assert!((result.change_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_magnitude_labels_in_both_directions() {
        let cases = [
            (120.0, StabilityLevel::Rising),
            (111.0, StabilityLevel::Up),
            (60.0, StabilityLevel::Plunge),
            (80.0, StabilityLevel::Falling),
            (89.0, StabilityLevel::Down),
        ];
        for (current, expected) in cases {
            // 5 points: the 1h boundary is unstable for every case, and the
            // reference is the oldest point.
            let result = stability(&series(&current_then(current, 100.0, 5)));
            assert_eq!(result.level, expected, "current {}", current);
            assert_eq!(result.duration, "");
        }
    }

    #[test]
    fn test_ten_percent_window_change_is_still_stable() {
        for current in [110.0, 90.0] {
            let result = stability(&series(&[current, 100.0, 100.0, 100.0]));
            assert_eq!(result.level, StabilityLevel::Settling, "current {}", current);
            assert_eq!(result.duration, "1h");
            assert_eq!(result.change_percent, current - 100.0);
        }
    }

    #[test]
    fn test_exact_tier_boundary_falls_to_lower_tier() {
        let cases = [
            (130.0, StabilityLevel::Rising),
            (115.0, StabilityLevel::Up),
            (70.0, StabilityLevel::Falling),
            (85.0, StabilityLevel::Down),
        ];
        for (current, expected) in cases {
            let result = stability(&series(&current_then(current, 100.0, 5)));
            assert_eq!(result.level, expected, "current {}", current);
            assert_eq!(result.change_percent, current - 100.0);
        }

        // 1h boundary (index 3) broken, reference (index 4) exactly ±5 %.
        for current in [105.0, 95.0] {
            let result = stability(&series(&[current, 100.0, 100.0, 50.0, 100.0]));
            assert_eq!(result.level, StabilityLevel::Flat, "current {}", current);
            assert_eq!(result.duration, "");
        }
    }

    #[test]
    fn test_reference_uses_oldest_point_when_series_is_short() {
        // 6 points, reference index min(24, 5) = 5.
        let values = [130.0, 100.0, 100.0, 100.0, 100.0, 50.0];
        let result = stability(&series(&values));
        assert!((result.change_percent - 160.0).abs() < 1e-9);
        assert_eq!(result.level, StabilityLevel::Surge);
    }

    #[test]
    fn test_under_four_points_reference_change_is_zero() {
        let result = stability(&series(&[200.0, 100.0, 100.0]));
        assert_eq!(result.change_percent, 0.0);
        assert_eq!(result.level, StabilityLevel::Flat);
        assert_eq!(result.label(), "STABLE");
        assert_eq!(result.duration, "");
    }

    #[test]
    fn test_zero_boundary_value_counts_as_no_change() {
        let result = stability(&series(&current_then(30.0, 0.0, 4)));
        assert_eq!(result.duration, "1h");
    }
}
