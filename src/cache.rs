/// Key-value cache with TTL semantics.
///
/// The render host owns the real cache; `Cache` is the narrow seam the
/// fetcher talks to and `MemoryCache` is the in-process implementation used
/// by the binary and the tests.
///
/// # Clock injection
/// `MemoryCache` exposes `get_at`/`set_at` taking a `now: DateTime<Utc>` so
/// expiry can be tested deterministically. The `Cache` impl calls them with
/// `Utc::now()`.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::logging::{self, DataSource};

/// Every entry written by this crate lives this long.
pub const CACHE_TTL_SECS: u64 = 900;

const KEY_PREFIX: &str = "co_rivers";

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

pub fn current_key(station_id: &str) -> String {
    format!("{}_{}", KEY_PREFIX, station_id)
}

pub fn timeseries_key(station_id: &str, parameter: &str) -> String {
    format!("{}_ts_{}_{}", KEY_PREFIX, station_id, parameter)
}

pub fn temperature_key(station_id: &str) -> String {
    format!("{}_temp_{}", KEY_PREFIX, station_id)
}

// ---------------------------------------------------------------------------
// Cache seam
// ---------------------------------------------------------------------------

/// Host key-value cache. Entries are replaced whole on every `set`.
pub trait Cache {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&self, key: &str, value: &[u8], ttl_seconds: u64);
}

/// Reads and decodes a JSON entry. An entry that no longer decodes is
/// treated as a miss so the caller re-fetches and overwrites it.
pub fn get_json<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    let bytes = cache.get(key)?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            logging::warn(DataSource::Cache, Some(key), &format!("discarding undecodable entry: {}", e));
            None
        }
    }
}

pub fn set_json<T: Serialize>(cache: &dyn Cache, key: &str, value: &T, ttl_seconds: u64) {
    match serde_json::to_vec(value) {
        Ok(bytes) => cache.set(key, &bytes, ttl_seconds),
        Err(e) => logging::warn(DataSource::Cache, Some(key), &format!("entry not cached: {}", e)),
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

struct Entry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// Process-local TTL cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry under `key` if it has not expired at `now`.
    /// Expiry is strict: an entry is still live at exactly `expires_at - 1s`
    /// and gone at `expires_at`.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set_at(&self, key: &str, value: &[u8], ttl_seconds: u64, now: DateTime<Utc>) {
        let ttl = Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX / 1000));
        let entry = Entry {
            value: value.to_vec(),
            expires_at: now + ttl,
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), entry);
        }
    }

    /// Number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.get_at(key, Utc::now())
    }

    fn set(&self, key: &str, value: &[u8], ttl_seconds: u64) {
        self.set_at(key, value, ttl_seconds, Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
