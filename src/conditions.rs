/// Fishing condition rating.
///
/// Water temperature is checked first: trout stress in warm water and go
/// sluggish in cold water regardless of flow. Otherwise the current flow is
/// placed within the station's flow band. The prime window is asymmetric
/// around the ideal flow (−20 % / +10 %).

use crate::colors::{self, Color};
use crate::stations::{self, FlowBand};

/// At or above this water temperature (°F) fishing is off.
pub const TEMP_TOO_HOT_F: f64 = 68.0;
/// At or above this water temperature (°F) fish are stressed.
pub const TEMP_WARM_F: f64 = 65.0;
/// Below this water temperature (°F) fish are sluggish.
pub const TEMP_COLD_F: f64 = 40.0;

/// Below `min * SKIP_FACTOR` the river is too low to bother with.
const SKIP_FACTOR: f64 = 0.7;
const PRIME_LOW_FACTOR: f64 = 0.8;
const PRIME_HIGH_FACTOR: f64 = 1.1;
/// Up to `max * TOUGH_FACTOR` the river is high but fishable.
const TOUGH_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// No flow band on file for the station.
    NoBand,
    /// No flow value to rate.
    NoFlow,
    Low,
    Fair,
    Prime,
    Good,
    High,
    Blown,
    Hot,
    Warm,
    Cold,
}

impl Rating {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rating::NoBand | Rating::NoFlow => "unknown",
            Rating::Low => "low",
            Rating::Fair => "fair",
            Rating::Prime => "prime",
            Rating::Good => "good",
            Rating::High => "high",
            Rating::Blown => "blown",
            Rating::Hot => "hot",
            Rating::Warm => "warm",
            Rating::Cold => "cold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::NoBand => "",
            Rating::NoFlow => "?",
            Rating::Low => "SKIP",
            Rating::Fair => "FAIR",
            Rating::Prime => "FISH!",
            Rating::Good => "GOOD",
            Rating::High => "TOUGH",
            Rating::Blown => "BLOWN",
            Rating::Hot => "TOO HOT",
            Rating::Warm => "WARM",
            Rating::Cold => "SLOW",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Rating::NoBand | Rating::NoFlow => colors::GRAY,
            Rating::Low => colors::YELLOW,
            Rating::Fair => colors::DARK_YELLOW,
            Rating::Prime => colors::GREEN,
            Rating::Good => colors::LIGHT_GREEN,
            Rating::High => colors::ORANGE,
            Rating::Blown | Rating::Hot => colors::RED,
            Rating::Warm => colors::ORANGE,
            Rating::Cold => colors::BLUE,
        }
    }
}

/// A rating with its display label and color resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub rating: Rating,
    pub code: &'static str,
    pub label: &'static str,
    pub color: Color,
}

impl From<Rating> for Condition {
    fn from(rating: Rating) -> Self {
        Self {
            rating,
            code: rating.code(),
            label: rating.label(),
            color: rating.color(),
        }
    }
}

/// Rates fishing conditions at a station from its current flow (cfs) and
/// water temperature (°F).
pub fn classify(station_id: &str, flow: Option<f64>, temperature_f: Option<f64>) -> Condition {
    if let Some(rating) = temperature_f.and_then(rate_temperature) {
        return rating.into();
    }

    let Some(band) = stations::flow_band(station_id) else {
        return Rating::NoBand.into();
    };
    let Some(flow) = flow else {
        return Rating::NoFlow.into();
    };
    rate_flow(flow, &band).into()
}

/// Temperature ratings that override flow; `None` in the fishable range.
fn rate_temperature(temp_f: f64) -> Option<Rating> {
    if temp_f >= TEMP_TOO_HOT_F {
        Some(Rating::Hot)
    } else if temp_f >= TEMP_WARM_F {
        Some(Rating::Warm)
    } else if temp_f < TEMP_COLD_F {
        Some(Rating::Cold)
    } else {
        None
    }
}

/// Places a flow within a band. Checks run in order; the prime window is
/// tested before the upper limits so it wins wherever it overlaps them.
pub fn rate_flow(flow: f64, band: &FlowBand) -> Rating {
    if flow < band.min * SKIP_FACTOR {
        Rating::Low
    } else if flow < band.min {
        Rating::Fair
    } else if flow >= band.ideal * PRIME_LOW_FACTOR && flow <= band.ideal * PRIME_HIGH_FACTOR {
        Rating::Prime
    } else if flow <= band.max {
        Rating::Good
    } else if flow <= band.max * TOUGH_FACTOR {
        Rating::High
    } else {
        Rating::Blown
    }
}
