/// Display configuration.
///
/// Loaded from a TOML file (`CO_RIVERS_CONFIG`, default `./co_rivers.toml`).
/// A missing file is not an error: every key has a default, so an empty or
/// absent file renders Cheesman Canyon in single mode. A `.env` file, when
/// present, is loaded first so the `CO_RIVERS_*` overrides can live there.
///
/// Example:
/// ```toml
/// display_mode = "multi"
/// display_duration = 5
/// station1 = "PLACHECO"
/// station2 = "BLUGRECO"
///
/// [canvas]
/// width = 128
/// ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ingest::dwr::DWR_BASE_URL;
use crate::ingest::fetcher::Endpoints;
use crate::ingest::usgs::USGS_IV_BASE_URL;
use crate::render::Canvas;
use crate::stations::{self, DEFAULT_STATION_ID};

pub const CONFIG_PATH_ENV: &str = "CO_RIVERS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./co_rivers.toml";

/// Seconds each frame is held in multi mode.
pub const ALLOWED_DURATIONS: [u32; 7] = [2, 3, 4, 5, 6, 8, 10];
pub const DEFAULT_DURATION: u32 = 4;

/// Station selector value meaning "no station in this slot".
const NO_STATION: &str = "none";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Single,
    Multi,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display_mode: DisplayMode,
    pub display_duration: u32,
    pub show_trend: bool,
    pub show_condition: bool,
    pub check_temp: bool,

    pub station1: Option<String>,
    pub station2: Option<String>,
    pub station3: Option<String>,
    pub station4: Option<String>,
    pub station5: Option<String>,
    pub station6: Option<String>,
    pub station7: Option<String>,
    pub station8: Option<String>,
    pub station9: Option<String>,
    pub station10: Option<String>,

    pub api: ApiConfig,
    pub canvas: CanvasConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Single,
            display_duration: DEFAULT_DURATION,
            show_trend: true,
            show_condition: true,
            check_temp: true,
            station1: None,
            station2: None,
            station3: None,
            station4: None,
            station5: None,
            station6: None,
            station7: None,
            station8: None,
            station9: None,
            station10: None,
            api: ApiConfig::default(),
            canvas: CanvasConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub dwr_base_url: String,
    pub usgs_base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            dwr_base_url: DWR_BASE_URL.to_string(),
            usgs_base_url: USGS_IV_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub is_2x: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            is_2x: canvas.is_2x,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console_timestamps: true,
        }
    }
}

impl Config {
    /// Loads `.env`, then the config file named by `CO_RIVERS_CONFIG`, then
    /// applies environment overrides.
    pub fn load() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Config::load_from(Path::new(&path), |key| env::var(key).ok())
    }

    /// Loads from an explicit path with a caller-supplied environment.
    pub fn load_from<F>(path: &Path, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Config::from_toml(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Config::default()
        };
        config.apply_env_overrides(lookup);
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(text)
    }

    /// `CO_RIVERS_DWR_BASE_URL`, `CO_RIVERS_USGS_BASE_URL`,
    /// `CO_RIVERS_LOG_LEVEL` and `CO_RIVERS_LOG_FILE` win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = lookup("CO_RIVERS_DWR_BASE_URL") {
            self.api.dwr_base_url = url;
        }
        if let Some(url) = lookup("CO_RIVERS_USGS_BASE_URL") {
            self.api.usgs_base_url = url;
        }
        if let Some(level) = lookup("CO_RIVERS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(file) = lookup("CO_RIVERS_LOG_FILE") {
            self.logging.file = Some(file);
        }
    }

    /// Configured stations in selector order, without `none`, blanks or
    /// repeats. Falls back to the default station when nothing is selected.
    pub fn selected_stations(&self) -> Vec<String> {
        let selectors = [
            &self.station1,
            &self.station2,
            &self.station3,
            &self.station4,
            &self.station5,
            &self.station6,
            &self.station7,
            &self.station8,
            &self.station9,
            &self.station10,
        ];

        let mut stations: Vec<String> = Vec::new();
        for id in selectors.into_iter().flatten() {
            let id = id.trim();
            if id.is_empty() || id.eq_ignore_ascii_case(NO_STATION) {
                continue;
            }
            if !stations.iter().any(|s| s == id) {
                stations.push(id.to_string());
            }
        }

        if stations.is_empty() {
            stations.push(DEFAULT_STATION_ID.to_string());
        }
        stations
    }

    /// Selected ids that are not in the station registry. They still get a
    /// frame, which will usually be a placeholder.
    pub fn unknown_stations(&self) -> Vec<String> {
        let known = stations::all_station_ids();
        self.selected_stations()
            .into_iter()
            .filter(|id| !known.contains(&id.as_str()))
            .collect()
    }

    /// Frame hold time; values outside the allowed set fall back to 4 s.
    pub fn duration_secs(&self) -> u32 {
        if ALLOWED_DURATIONS.contains(&self.display_duration) {
            self.display_duration
        } else {
            DEFAULT_DURATION
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.canvas.width,
            is_2x: self.canvas.is_2x,
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            dwr_base_url: self.api.dwr_base_url.clone(),
            usgs_base_url: self.api.usgs_base_url.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
