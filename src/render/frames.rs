/// Frame composition: one frame per station, plus placeholder frames for
/// stations that could not be read.
///
/// Narrow (64×32) frame, top to bottom:
///   name marquee
///   value + unit ........ trend arrow
///   condition ........... water temperature
///   stability + duration
///
/// Wide frames add the water source and a divider under the name, the
/// reading time on the last line, and the trend change next to the arrow.

use crate::analysis::stability::Stability;
use crate::analysis::trend::Trend;
use crate::colors::{self, Color};
use crate::conditions::Condition;
use crate::format::{self, Unit};
use crate::ingest::dwr::parse_measurement_time;
use crate::model::{StationReading, TemperatureReading};
use crate::render::node::{Align, Canvas, Font, Insets, Layout, Node};
use crate::stations;

/// Which optional lines a station frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    pub show_trend: bool,
    pub show_condition: bool,
    pub check_temp: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            show_trend: true,
            show_condition: true,
            check_temp: true,
        }
    }
}

/// Everything the composer needs for one station, already analyzed.
#[derive(Debug, Clone)]
pub struct StationView<'a> {
    pub reading: &'a StationReading,
    pub trend: Option<Trend>,
    pub stability: Option<Stability>,
    pub condition: Option<Condition>,
    pub temperature: Option<&'a TemperatureReading>,
    /// Older than the display staleness threshold.
    pub stale: bool,
}

/// Why a station has no regular frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoData,
    ApiError,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoData => "No Data",
            Notice::ApiError => "API Error",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Notice::NoData => colors::YELLOW,
            Notice::ApiError => colors::RED,
        }
    }
}

const TIME_UNKNOWN: &str = "--:--";

// ---------------------------------------------------------------------------
// Station frame
// ---------------------------------------------------------------------------

pub fn station_frame(view: &StationView<'_>, options: &FrameOptions, canvas: &Canvas) -> Node {
    let layout = canvas.layout();
    let reading = view.reading;
    let mut lines = Vec::new();

    lines.push(Node::marquee(
        canvas.width,
        Node::text(frame_title(reading, layout), Font::TomThumb, colors::CYAN),
    ));
    if layout == Layout::Wide {
        if !reading.water_source.is_empty() {
            lines.push(Node::text(reading.water_source.clone(), Font::TomThumb, colors::GRAY));
        }
        lines.push(Node::rule(canvas.width, colors::DARK_GRAY));
    }

    lines.push(value_line(view, options, layout));

    if let Some(line) = condition_line(view, options) {
        lines.push(line);
    }

    let stability = view.stability.as_ref().filter(|_| options.show_trend);
    match layout {
        Layout::Narrow => {
            if let Some(stability) = stability {
                lines.push(stability_text(stability));
            }
        }
        Layout::Wide => {
            let time = time_text(reading, view.stale);
            let line = match stability {
                Some(stability) => Node::spread_row(vec![stability_text(stability), time]),
                None => time,
            };
            lines.push(line);
        }
    }

    Node::padded(
        Insets {
            left: 1,
            ..Insets::default()
        },
        Node::column(lines, Align::SpaceEvenly),
    )
}

/// Registry short name on the narrow canvas; the upstream full name, when
/// there is one, on the wide canvas.
fn frame_title(reading: &StationReading, layout: Layout) -> String {
    match layout {
        Layout::Wide if !reading.station_name.is_empty() => reading.station_name.clone(),
        _ => stations::display_name(&reading.station_id).to_string(),
    }
}

fn value_line(view: &StationView<'_>, options: &FrameOptions, layout: Layout) -> Node {
    let reading = view.reading;
    let value_font = match layout {
        Layout::Narrow => Font::Tb8,
        Layout::Wide => Font::Font6x13,
    };
    let value = Node::packed_row(vec![
        Node::text(format::format_value(reading.value, &reading.unit), value_font, colors::WHITE),
        Node::text(unit_label(&reading.unit), Font::TomThumb, colors::GRAY),
    ]);

    let Some(trend) = view.trend.filter(|_| options.show_trend) else {
        return Node::spread_row(vec![value]);
    };
    let direction = trend.direction;
    let arrow = Node::text(direction.arrow(), Font::Tb8, direction.color());
    let marker = match layout {
        Layout::Narrow => arrow,
        Layout::Wide => Node::packed_row(vec![
            arrow,
            Node::text(
                format::format_change_percent(trend.change_percent),
                Font::TomThumb,
                direction.color(),
            ),
        ]),
    };
    Node::spread_row(vec![value, marker])
}

fn condition_line(view: &StationView<'_>, options: &FrameOptions) -> Option<Node> {
    let mut parts = Vec::new();
    if let Some(condition) = view.condition.filter(|c| options.show_condition && !c.label.is_empty()) {
        parts.push(Node::text(condition.label, Font::TomThumb, condition.color));
    }
    if options.check_temp {
        let temperature = view.temperature.map(|t| t.value);
        parts.push(Node::text(
            format::format_temperature(temperature),
            Font::TomThumb,
            colors::LIGHT_GRAY,
        ));
    }
    (!parts.is_empty()).then(|| Node::spread_row(parts))
}

fn stability_text(stability: &Stability) -> Node {
    let content = if stability.duration.is_empty() {
        stability.label().to_string()
    } else {
        format!("{} {}", stability.label(), stability.duration)
    };
    Node::text(content, Font::TomThumb, stability.color)
}

fn time_text(reading: &StationReading, stale: bool) -> Node {
    let content = parse_measurement_time(&reading.measured_at)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| TIME_UNKNOWN.to_string());
    let color = if stale { colors::ORANGE } else { colors::GRAY };
    Node::text(content, Font::TomThumb, color)
}

fn unit_label(unit: &str) -> String {
    match Unit::from_label(unit) {
        Unit::Cfs => "cfs".to_string(),
        Unit::Feet => "ft".to_string(),
        Unit::Fahrenheit => "°F".to_string(),
        Unit::Other => unit.to_ascii_lowercase(),
    }
}

// ---------------------------------------------------------------------------
// Placeholder frame
// ---------------------------------------------------------------------------

pub fn placeholder_frame(title: &str, notice: Notice, canvas: &Canvas) -> Node {
    let message_font = match canvas.layout() {
        Layout::Narrow => Font::Tb8,
        Layout::Wide => Font::Font6x13,
    };
    Node::centered_column(vec![
        Node::marquee(canvas.width, Node::text(title, Font::TomThumb, colors::CYAN)),
        Node::text(notice.message(), message_font, notice.color()),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
