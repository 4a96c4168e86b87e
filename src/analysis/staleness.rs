/// Reading staleness detection.
///
/// DWR telemetry updates every 15 minutes under normal conditions, but
/// stations drop off the satellite link for hours at a time. A flow number
/// from this morning looks exactly like one from five minutes ago on a 64×32
/// sign, so the composer uses this check to flag old readings.
///
/// # Clock injection
/// `is_stale_at` accepts `now: DateTime<Utc>` rather than calling
/// `Utc::now()` internally, which keeps the tests deterministic.

use chrono::{DateTime, Utc};

use crate::ingest::dwr::parse_measurement_time;
use crate::model::StationReading;

/// Readings older than this are flagged on the display.
pub const DISPLAY_STALE_AFTER_MINUTES: u64 = 60;

/// Returns `true` if the reading's measurement time is older than
/// `max_age_minutes` relative to `now`.
///
/// Staleness is defined as strictly greater than the threshold:
///   age > max_age_minutes  →  stale
///   age == max_age_minutes →  not stale
///
/// Returns an error if the reading's timestamp cannot be parsed.
/// Callers should treat parse failures as stale.
pub fn is_stale_at(
    reading: &StationReading,
    max_age_minutes: u64,
    now: DateTime<Utc>,
) -> Result<bool, String> {
    let measured = parse_measurement_time(&reading.measured_at)?.with_timezone(&Utc);
    let age_minutes = (now - measured).num_minutes();
    // Readings stamped in the future (clock skew) are fresh.
    Ok(age_minutes > 0 && age_minutes as u64 > max_age_minutes)
}

/// Convenience wrapper that uses the real current time.
/// Use `is_stale_at` in tests to keep them deterministic.
pub fn is_stale(reading: &StationReading, max_age_minutes: u64) -> Result<bool, String> {
    is_stale_at(reading, max_age_minutes, Utc::now())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
