/// Render pass orchestration.
///
/// One pass resolves the configured stations, fetches and analyzes each one
/// in order, and composes a frame per station. The pass never fails: a
/// station whose current reading cannot be fetched gets a placeholder frame,
/// and every other failure simply leaves its line off the frame.

use crate::analysis::staleness::{self, DISPLAY_STALE_AFTER_MINUTES};
use crate::analysis::{stability, trend};
use crate::conditions;
use crate::config::{Config, DisplayMode};
use crate::ingest::fetcher::{Fetcher, TREND_POINTS};
use crate::logging::{self, DataSource};
use crate::model::{FetchError, PARAM_DISCHARGE};
use crate::render::{
    Canvas, FrameOptions, Node, Notice, Root, StationView, placeholder_frame, station_frame,
};
use crate::stations;

/// Root delay for a single static frame; drives the name marquee.
pub const SINGLE_FRAME_DELAY_MS: u32 = 100;

/// One composed station frame and whether it is a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct StationFrame {
    pub station_id: String,
    pub node: Node,
    pub degraded: bool,
}

/// Frame options derived from the display toggles.
pub fn frame_options(config: &Config) -> FrameOptions {
    FrameOptions {
        show_trend: config.show_trend,
        show_condition: config.show_condition,
        check_temp: config.check_temp,
    }
}

/// Runs one render pass and returns the tree for the host.
pub fn render(config: &Config, fetcher: &Fetcher<'_>) -> Root {
    for id in config.unknown_stations() {
        logging::warn(DataSource::System, Some(&id), "station is not in the registry");
    }

    let mut stations = config.selected_stations();
    if config.display_mode == DisplayMode::Single {
        stations.truncate(1);
    }

    let canvas = config.canvas();
    let options = frame_options(config);
    let frames: Vec<StationFrame> = stations
        .iter()
        .map(|id| render_station(id, fetcher, &options, &canvas))
        .collect();

    let degraded = frames.iter().filter(|f| f.degraded).count();
    logging::log_render_summary(frames.len(), frames.len() - degraded, degraded);

    let mut nodes: Vec<Node> = frames.into_iter().map(|f| f.node).collect();
    match config.display_mode {
        DisplayMode::Single => Root {
            delay_ms: SINGLE_FRAME_DELAY_MS,
            child: nodes.pop().unwrap_or_else(|| {
                placeholder_frame(stations::DEFAULT_STATION_ID, Notice::NoData, &canvas)
            }),
        },
        DisplayMode::Multi => Root {
            delay_ms: config.duration_secs() * 1000,
            child: Node::Animation { frames: nodes },
        },
    }
}

/// Fetches, analyzes and composes one station.
pub fn render_station(
    station_id: &str,
    fetcher: &Fetcher<'_>,
    options: &FrameOptions,
    canvas: &Canvas,
) -> StationFrame {
    let reading = match fetcher.fetch_current_result(station_id) {
        Ok(reading) => reading,
        Err(e) => {
            let notice = notice_for(&e);
            logging::warn(
                DataSource::System,
                Some(station_id),
                &format!("rendering placeholder frame: {}", notice.message()),
            );
            return StationFrame {
                station_id: station_id.to_string(),
                node: placeholder_frame(stations::display_name(station_id), notice, canvas),
                degraded: true,
            };
        }
    };

    let (trend, stability) = if options.show_trend {
        let parameter = if reading.parameter.is_empty() {
            PARAM_DISCHARGE
        } else {
            reading.parameter.as_str()
        };
        let history = fetcher.fetch_history(station_id, parameter);
        let recent = &history[..history.len().min(TREND_POINTS)];
        (Some(trend::trend(recent)), Some(stability::stability(&history)))
    } else {
        (None, None)
    };

    let temperature = if options.check_temp {
        fetcher.fetch_water_temperature(station_id)
    } else {
        None
    };

    let condition = options.show_condition.then(|| {
        let flow = if reading.is_discharge() { reading.value } else { None };
        conditions::classify(station_id, flow, temperature.as_ref().map(|t| t.value))
    });

    let stale = staleness::is_stale(&reading, DISPLAY_STALE_AFTER_MINUTES).unwrap_or(true);
    if stale {
        logging::debug(
            DataSource::System,
            Some(station_id),
            &format!("reading is stale (measured {})", reading.measured_at),
        );
    }

    let view = StationView {
        reading: &reading,
        trend,
        stability,
        condition,
        temperature: temperature.as_ref(),
        stale,
    };
    StationFrame {
        station_id: station_id.to_string(),
        node: station_frame(&view, options, canvas),
        degraded: false,
    }
}

/// "No Data" when the station answered with nothing; "API Error" when the
/// upstream could not be reached or understood.
pub fn notice_for(err: &FetchError) -> Notice {
    match err {
        FetchError::NoData(_) => Notice::NoData,
        FetchError::Http(_) | FetchError::Transport(_) | FetchError::Parse(_) => Notice::ApiError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_for_each_failure() {
        assert_eq!(notice_for(&FetchError::NoData("PLACHECO".into())), Notice::NoData);
        assert_eq!(notice_for(&FetchError::Http(502)), Notice::ApiError);
        assert_eq!(notice_for(&FetchError::Transport("timed out".into())), Notice::ApiError);
        assert_eq!(notice_for(&FetchError::Parse("expected value".into())), Notice::ApiError);
    }

    #[test]
    fn test_frame_options_follow_toggles() {
        let config = Config {
            show_trend: false,
            check_temp: false,
            ..Config::default()
        };
        let options = frame_options(&config);
        assert!(!options.show_trend);
        assert!(options.show_condition);
        assert!(!options.check_temp);
    }
}
