use serde::{Deserialize, Serialize};

use crate::{location::WatchOptions, map::TileLayer, zones::UnsafeZone, zones::ZoneRegistry};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, specta::Type)]
/// How the map is first displayed
pub struct MapSettings {
    /// Zoom level used when the map is created
    pub zoom: u8,
    pub tiles: TileLayer,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: 13,
            tiles: TileLayer::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, specta::Type)]
#[serde(default)]
/// Settings for a tracker, fixed once the tracker is created
pub struct TrackerSettings {
    /// Movement between two consecutive fixes above this many meters is reported as unusual
    pub unusual_distance_meters: f64,
    /// Options for the platform subscription
    pub watch: WatchOptions,
    pub map: MapSettings,
    /// Number the emergency shortcut dials
    pub emergency_number: String,
    /// Unsafe zones, earlier entries win when they overlap
    pub zones: Vec<UnsafeZone>,
}

impl TrackerSettings {
    pub fn zone_registry(&self) -> ZoneRegistry {
        ZoneRegistry::new(self.zones.clone())
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            unusual_distance_meters: 500.0,
            watch: WatchOptions::default(),
            map: MapSettings::default(),
            emergency_number: "911".to_string(),
            zones: ZoneRegistry::default_zones(),
        }
    }
}
