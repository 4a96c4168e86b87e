/// Station registry for the Colorado rivers display.
///
/// Defines the canonical list of Colorado DWR telemetry stations the display
/// can be configured with, along with their fishing flow bands and, where one
/// exists, the co-located USGS site used as a water temperature fallback.
/// The configuration's `station1`..`station10` selectors take these ids.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Flow bands
// ---------------------------------------------------------------------------

/// How a river's flow is controlled, which shapes how its band reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterType {
    /// Dam-release flows below a reservoir; steady and cold.
    Tailwater,
    /// Runoff-driven flows; swing hard with snowmelt and rain.
    Freestone,
}

/// Fishable flow band for a station, in cubic feet per second.
///
/// Bands in ascending order:
///   min < ideal < max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowBand {
    pub min: f64,
    pub max: f64,
    pub ideal: f64,
    pub water_type: WaterType,
}

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// Metadata for a single DWR telemetry station.
pub struct Station {
    /// DWR station abbreviation, e.g. "PLACHECO".
    pub id: &'static str,
    /// Short display name.
    pub name: &'static str,
    /// River or creek the station sits on.
    pub river: &'static str,
    /// Fishing flow band, if one is on file for this stretch.
    pub flow_band: Option<FlowBand>,
    /// 8-digit USGS site reporting water temperature (00010) at or near the
    /// station. Used when DWR has no WATTEMP reading.
    pub usgs_site: Option<&'static str>,
}

/// South Platte below Cheesman Reservoir (Cheesman Canyon).
pub const DEFAULT_STATION_ID: &str = "PLACHECO";

const fn band(min: f64, ideal: f64, max: f64, water_type: WaterType) -> Option<FlowBand> {
    Some(FlowBand { min, max, ideal, water_type })
}

/// All stations available to the display, grouped by basin.
///
/// Sources:
///   - Station ids: Colorado DWR telemetry (dwr.state.co.us)
///   - USGS sites: USGS NWIS (waterservices.usgs.gov)
pub static STATION_REGISTRY: &[Station] = &[
    // South Platte basin
    Station {
        id: "PLACHECO",
        name: "Cheesman Canyon",
        river: "South Platte River",
        flow_band: band(80.0, 150.0, 350.0, WaterType::Tailwater),
        usgs_site: Some("06701500"),
    },
    Station {
        id: "PLADECCO",
        name: "Deckers",
        river: "South Platte River",
        flow_band: band(100.0, 200.0, 450.0, WaterType::Tailwater),
        usgs_site: Some("06701900"),
    },
    Station {
        id: "PLAELECO",
        name: "Eleven Mile Canyon",
        river: "South Platte River",
        flow_band: band(50.0, 100.0, 250.0, WaterType::Tailwater),
        usgs_site: None,
    },
    Station {
        id: "PLASPICO",
        name: "Dream Stream",
        river: "South Platte River",
        flow_band: band(40.0, 90.0, 200.0, WaterType::Tailwater),
        usgs_site: None,
    },
    Station {
        id: "CLEGOLCO",
        name: "Clear Creek at Golden",
        river: "Clear Creek",
        flow_band: band(40.0, 120.0, 300.0, WaterType::Freestone),
        usgs_site: Some("06719505"),
    },
    Station {
        id: "BTBLESCO",
        name: "Big Thompson Canyon",
        river: "Big Thompson River",
        flow_band: band(40.0, 110.0, 250.0, WaterType::Tailwater),
        usgs_site: None,
    },
    Station {
        id: "CLAFTCCO",
        name: "Poudre Canyon Mouth",
        river: "Cache la Poudre River",
        flow_band: band(80.0, 250.0, 700.0, WaterType::Freestone),
        usgs_site: Some("06752000"),
    },
    // Colorado basin
    Station {
        id: "BLUDILCO",
        name: "Blue below Dillon",
        river: "Blue River",
        flow_band: band(50.0, 100.0, 300.0, WaterType::Tailwater),
        usgs_site: Some("09050700"),
    },
    Station {
        id: "BLUGRECO",
        name: "Blue below Green Mtn",
        river: "Blue River",
        flow_band: band(150.0, 350.0, 1000.0, WaterType::Tailwater),
        usgs_site: Some("09057500"),
    },
    Station {
        id: "COLKRECO",
        name: "Colorado near Kremmling",
        river: "Colorado River",
        flow_band: band(400.0, 900.0, 2500.0, WaterType::Freestone),
        usgs_site: Some("09058000"),
    },
    Station {
        id: "FRYRUECO",
        name: "Fryingpan below Ruedi",
        river: "Fryingpan River",
        flow_band: band(80.0, 150.0, 400.0, WaterType::Tailwater),
        usgs_site: Some("09080400"),
    },
    Station {
        id: "ROAGLECO",
        name: "Roaring Fork at Glenwood",
        river: "Roaring Fork River",
        flow_band: band(400.0, 1000.0, 3000.0, WaterType::Freestone),
        usgs_site: Some("09085000"),
    },
    Station {
        id: "EAGMINCO",
        name: "Eagle at Minturn",
        river: "Eagle River",
        flow_band: None, // no band on file; condition reads unknown
        usgs_site: None,
    },
    // Gunnison basin
    Station {
        id: "TAYBTPCO",
        name: "Taylor below Taylor Park",
        river: "Taylor River",
        flow_band: band(100.0, 250.0, 500.0, WaterType::Tailwater),
        usgs_site: Some("09109000"),
    },
    // Arkansas basin
    Station {
        id: "ARKSALCO",
        name: "Arkansas at Salida",
        river: "Arkansas River",
        flow_band: band(250.0, 500.0, 1500.0, WaterType::Freestone),
        usgs_site: None,
    },
    Station {
        id: "ARKCANCO",
        name: "Arkansas at Canon City",
        river: "Arkansas River",
        flow_band: None,
        usgs_site: None,
    },
];

/// Returns the ids of all registered stations, in registry order.
pub fn all_station_ids() -> Vec<&'static str> {
    STATION_REGISTRY.iter().map(|s| s.id).collect()
}

/// Looks up a station by id. Returns `None` if not found.
pub fn find_station(station_id: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.id == station_id)
}

/// Flow band for a station; `None` for unknown stations or stations
/// without a band on file.
pub fn flow_band(station_id: &str) -> Option<FlowBand> {
    find_station(station_id).and_then(|s| s.flow_band)
}

/// USGS site to query for water temperature when DWR has none.
pub fn fallback_site(station_id: &str) -> Option<&'static str> {
    find_station(station_id).and_then(|s| s.usgs_site)
}

/// Registry display name, falling back to the raw id for unknown stations.
pub fn display_name(station_id: &str) -> &str {
    find_station(station_id).map(|s| s.name).unwrap_or(station_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_station_ids_are_valid_dwr_format() {
        // DWR abbreviations are 8 uppercase characters ending in "CO".
        for station in STATION_REGISTRY {
            assert_eq!(station.id.len(), 8, "station id '{}' should be 8 chars", station.id);
            assert!(
                station.id.chars().all(|c| c.is_ascii_uppercase()),
                "station id '{}' should be uppercase ASCII",
                station.id
            );
            assert!(station.id.ends_with("CO"), "station id '{}' should end in CO", station.id);
        }
    }

    #[test]
    fn test_no_duplicate_station_ids() {
        let mut seen = std::collections::HashSet::new();
        for station in STATION_REGISTRY {
            assert!(
                seen.insert(station.id),
                "duplicate station id '{}' found in STATION_REGISTRY",
                station.id
            );
        }
    }

    #[test]
    fn test_flow_bands_are_ordered_where_defined() {
        // min < ideal < max
        for station in STATION_REGISTRY {
            if let Some(b) = &station.flow_band {
                assert!(b.min < b.ideal, "min must be below ideal for '{}'", station.id);
                assert!(b.ideal < b.max, "ideal must be below max for '{}'", station.id);
            }
        }
    }

    #[test]
    fn test_usgs_sites_are_8_digit_numeric() {
        for station in STATION_REGISTRY {
            if let Some(site) = station.usgs_site {
                assert_eq!(site.len(), 8, "USGS site for '{}' should be 8 digits", station.id);
                assert!(site.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_default_station_is_registered_with_band() {
        let station = find_station(DEFAULT_STATION_ID).expect("default station should be in registry");
        assert_eq!(station.name, "Cheesman Canyon");
        let b = station.flow_band.expect("Cheesman should have a flow band");
        assert_eq!((b.min, b.ideal, b.max), (80.0, 150.0, 350.0));
        assert_eq!(b.water_type, WaterType::Tailwater);
    }

    #[test]
    fn test_lookup_helpers_degrade_for_unknown_station() {
        assert!(find_station("NOPENOCO").is_none());
        assert!(flow_band("NOPENOCO").is_none());
        assert!(fallback_site("NOPENOCO").is_none());
        assert_eq!(display_name("NOPENOCO"), "NOPENOCO");
    }

    #[test]
    fn test_station_without_band_is_still_registered() {
        assert!(find_station("EAGMINCO").is_some());
        assert!(flow_band("EAGMINCO").is_none());
    }

    #[test]
    fn test_all_station_ids_helper_matches_registry_length() {
        assert_eq!(all_station_ids().len(), STATION_REGISTRY.len());
    }
}
