/// Structured logging for the Colorado rivers display
///
/// Provides context-rich logging with data-source and station identifiers,
/// timestamps, and severity levels on top of the `log` facade. Supports both
/// console output and file-based logging. Console output goes to stderr so
/// stdout stays reserved for the rendered layout tree.

use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Dwr,
    Usgs,
    Cache,
    System,
}

impl DataSource {
    /// `log` target used for records from this source.
    pub fn target(&self) -> &'static str {
        match self {
            DataSource::Dwr => "DWR",
            DataSource::Usgs => "USGS",
            DataSource::Cache => "CACHE",
            DataSource::System => "SYS",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target())
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - station offline, seasonal, or not reporting the parameter
    Expected,
    /// Unexpected failure - indicates service degradation or an API change
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a fetch failure from its error variant.
pub fn classify_failure(err: &FetchError) -> FailureType {
    match err {
        // Many DWR stations are seasonal and simply stop reporting
        FetchError::NoData(_) => FailureType::Expected,
        // Parse errors suggest API changes or bugs
        FetchError::Parse(_) => FailureType::Unexpected,
        FetchError::Http(status) if *status >= 500 => FailureType::Unexpected,
        FetchError::Http(_) => FailureType::Unknown,
        // Timeouts and DNS hiccups come and go
        FetchError::Transport(_) => FailureType::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

pub struct Logger {
    /// Minimum log level to display
    min_level: LevelFilter,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    pub fn new(min_level: LevelFilter, log_file: Option<String>, console_timestamps: bool) -> Self {
        Self {
            min_level,
            log_file,
            console_timestamps,
        }
    }

    fn format_entry(record: &Record) -> String {
        format!(
            "{} {} {}: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            record.level(),
            record.target(),
            record.args()
        )
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let log_entry = Self::format_entry(record);

        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match record.level() {
                Level::Error => eprintln!("   ✗ {}: {}", record.target(), record.args()),
                Level::Warn => eprintln!("   ⚠ {}: {}", record.target(), record.args()),
                Level::Info => eprintln!("   {}", record.args()),
                Level::Debug | Level::Trace => {} // Skip debug in non-timestamp mode
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn flush(&self) {}
}

/// Install the global logger. Fails if a logger is already installed.
pub fn init_logger(
    min_level: LevelFilter,
    log_file: Option<&str>,
    console_timestamps: bool,
) -> Result<(), SetLoggerError> {
    let logger = Logger::new(min_level, log_file.map(String::from), console_timestamps);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(min_level);
    Ok(())
}

/// Parse a level name ("debug", "info", ...); unrecognized names mean `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

fn site_part(site_id: Option<&str>) -> String {
    site_id.map(|s| format!("[{}] ", s)).unwrap_or_default()
}

/// Log a general informational message
pub fn info(source: DataSource, site_id: Option<&str>, message: &str) {
    log::info!(target: source.target(), "{}{}", site_part(site_id), message);
}

/// Log a warning message
pub fn warn(source: DataSource, site_id: Option<&str>, message: &str) {
    log::warn!(target: source.target(), "{}{}", site_part(site_id), message);
}

/// Log an error message
pub fn error(source: DataSource, site_id: Option<&str>, message: &str) {
    log::error!(target: source.target(), "{}{}", site_part(site_id), message);
}

/// Log a debug message
pub fn debug(source: DataSource, site_id: Option<&str>, message: &str) {
    log::debug!(target: source.target(), "{}{}", site_part(site_id), message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a fetch failure with automatic classification
pub fn log_fetch_failure(source: DataSource, station_id: &str, operation: &str, err: &FetchError) {
    let failure_type = classify_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(source, Some(station_id), &message),
        FailureType::Unexpected => error(source, Some(station_id), &message),
        FailureType::Unknown => warn(source, Some(station_id), &message),
    }
}

/// Log a summary of one render pass
pub fn log_render_summary(total: usize, rendered: usize, degraded: usize) {
    let message = format!(
        "Render complete: {}/{} stations with data, {} placeholder frames",
        rendered, total, degraded
    );

    if degraded == 0 {
        info(DataSource::System, None, &message);
    } else if rendered == 0 {
        error(DataSource::System, None, &message);
    } else {
        warn(DataSource::System, None, &message);
    }
}
