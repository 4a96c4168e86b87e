/// Data Source Verification Module
///
/// Checks every station in the registry against the live providers to see
/// which ones are reporting: current reading present, how much history comes
/// back, and where (if anywhere) a water temperature can be found.
///
/// Run this after editing the station registry.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analysis::staleness::{self, DISPLAY_STALE_AFTER_MINUTES};
use crate::ingest::fetcher::Fetcher;
use crate::model::{PARAM_DISCHARGE, TemperatureSource};
use crate::stations::{self, Station};

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub results: Vec<StationVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub working: usize,
    pub partial: usize,
    pub failed: usize,
    pub with_temperature: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationVerification {
    pub station_id: String,
    pub name: String,
    pub status: VerificationStatus,
    pub current_available: bool,
    pub parameter: Option<String>,
    pub value: Option<f64>,
    pub measured_at: Option<String>,
    pub stale: bool,
    pub history_points: usize,
    pub temperature_source: Option<TemperatureSource>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    /// Current reading and history both available.
    Success,
    /// Current reading only.
    PartialSuccess,
    Failed,
}

// ============================================================================
// Station Verification
// ============================================================================

pub fn verify_station(fetcher: &Fetcher<'_>, station: &Station) -> StationVerification {
    let mut result = StationVerification {
        station_id: station.id.to_string(),
        name: station.name.to_string(),
        status: VerificationStatus::Failed,
        current_available: false,
        parameter: None,
        value: None,
        measured_at: None,
        stale: false,
        history_points: 0,
        temperature_source: None,
        error_message: None,
    };

    // Test 1: current reading
    let parameter = match fetcher.fetch_current_result(station.id) {
        Ok(reading) => {
            result.current_available = true;
            result.value = reading.value;
            result.stale = staleness::is_stale(&reading, DISPLAY_STALE_AFTER_MINUTES).unwrap_or(true);
            result.measured_at = Some(reading.measured_at);
            let parameter = if reading.parameter.is_empty() {
                PARAM_DISCHARGE.to_string()
            } else {
                reading.parameter
            };
            result.parameter = Some(parameter.clone());
            parameter
        }
        Err(e) => {
            result.error_message = Some(e.to_string());
            return result;
        }
    };

    // Test 2: history for the station's parameter
    result.history_points = fetcher.fetch_history(station.id, &parameter).len();

    // Test 3: water temperature from either provider
    result.temperature_source = fetcher.fetch_water_temperature(station.id).map(|t| t.source);

    result.status = if result.history_points > 0 {
        VerificationStatus::Success
    } else {
        VerificationStatus::PartialSuccess
    };
    result
}

// ============================================================================
// Full Verification Runner
// ============================================================================

pub fn run_full_verification(fetcher: &Fetcher<'_>) -> VerificationReport {
    println!("🔍 Verifying DWR stations...");
    let mut results = Vec::with_capacity(stations::STATION_REGISTRY.len());

    for station in stations::STATION_REGISTRY {
        print!("  {} ... ", station.id);
        let result = verify_station(fetcher, station);

        match result.status {
            VerificationStatus::Success => {
                println!(
                    "✓ OK ({} history points{})",
                    result.history_points,
                    if result.stale { ", stale" } else { "" }
                );
            }
            VerificationStatus::PartialSuccess => {
                println!("⚠ Partial (current reading but no history)");
            }
            VerificationStatus::Failed => {
                println!("✗ FAILED: {}", result.error_message.as_deref().unwrap_or("Unknown"));
            }
        }

        results.push(result);
    }

    VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        summary: summarize(&results),
        results,
    }
}

pub fn summarize(results: &[StationVerification]) -> VerificationSummary {
    let mut summary = VerificationSummary {
        total: results.len(),
        ..VerificationSummary::default()
    };
    for result in results {
        match result.status {
            VerificationStatus::Success => summary.working += 1,
            VerificationStatus::PartialSuccess => summary.partial += 1,
            VerificationStatus::Failed => summary.failed += 1,
        }
        if result.temperature_source.is_some() {
            summary.with_temperature += 1;
        }
    }
    summary
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("📊 VERIFICATION SUMMARY");
    println!("═══════════════════════════════════════════════════════");
    println!();
    println!(
        "DWR Stations:     {}/{} working  ({} partial, {} failed)",
        report.summary.working, report.summary.total, report.summary.partial, report.summary.failed
    );
    println!(
        "Water temperature: {}/{} stations",
        report.summary.with_temperature, report.summary.total
    );
    println!();

    let reporting = report.summary.working + report.summary.partial;
    let success_rate = if report.summary.total > 0 {
        (reporting as f64 / report.summary.total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Overall Success Rate: {:.1}% ({}/{})",
        success_rate, reporting, report.summary.total
    );
    println!("═══════════════════════════════════════════════════════");
}
