use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, specta::Type)]
/// A named rectangular region that triggers a warning when entered. Bounds are inclusive.
pub struct UnsafeZone {
    pub name: String,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl UnsafeZone {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// Fixed, ordered list of unsafe zones. Built once at startup.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    zones: Vec<UnsafeZone>,
}

impl ZoneRegistry {
    pub fn new(zones: Vec<UnsafeZone>) -> Self {
        Self { zones }
    }

    /// Find the first zone in registration order that contains the point.
    pub fn zone_containing(&self, lat: f64, lon: f64) -> Option<&UnsafeZone> {
        self.zones.iter().find(|zone| zone.contains(lat, lon))
    }

    pub fn default_zones() -> Vec<UnsafeZone> {
        vec![
            UnsafeZone {
                name: "Theft Zone 1".to_string(),
                lat_min: 22.5726,
                lat_max: 22.5735,
                lon_min: 88.3639,
                lon_max: 88.3649,
            },
            UnsafeZone {
                name: "Unsafe Area 2".to_string(),
                lat_min: 22.5710,
                lat_max: 22.5715,
                lon_min: 88.3620,
                lon_max: 88.3625,
            },
        ]
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new(Self::default_zones())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str, lat: (f64, f64), lon: (f64, f64)) -> UnsafeZone {
        UnsafeZone {
            name: name.to_string(),
            lat_min: lat.0,
            lat_max: lat.1,
            lon_min: lon.0,
            lon_max: lon.1,
        }
    }

    #[test]
    fn test_point_inside_zone() {
        let registry = ZoneRegistry::default();
        let found = registry.zone_containing(22.5730, 88.3644);
        assert_eq!(found.map(|z| z.name.as_str()), Some("Theft Zone 1"));

        let found = registry.zone_containing(22.5712, 88.3622);
        assert_eq!(found.map(|z| z.name.as_str()), Some("Unsafe Area 2"));
    }

    #[test]
    fn test_point_outside_all_zones() {
        let registry = ZoneRegistry::default();
        assert!(registry.zone_containing(0.0, 0.0).is_none());
        assert!(registry.zone_containing(22.5730, 88.3600).is_none());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let registry = ZoneRegistry::default();
        for (lat, lon) in [
            (22.5726, 88.3639),
            (22.5735, 88.3649),
            (22.5726, 88.3649),
            (22.5735, 88.3639),
        ] {
            assert!(
                registry.zone_containing(lat, lon).is_some(),
                "Corner ({lat}, {lon}) not inside"
            );
        }
    }

    #[test]
    fn test_first_registered_wins() {
        let registry = ZoneRegistry::new(vec![
            zone("Outer", (0.0, 10.0), (0.0, 10.0)),
            zone("Inner", (4.0, 6.0), (4.0, 6.0)),
        ]);
        let found = registry.zone_containing(5.0, 5.0);
        assert_eq!(found.map(|z| z.name.as_str()), Some("Outer"));

        let registry = ZoneRegistry::new(vec![
            zone("Inner", (4.0, 6.0), (4.0, 6.0)),
            zone("Outer", (0.0, 10.0), (0.0, 10.0)),
        ]);
        let found = registry.zone_containing(5.0, 5.0);
        assert_eq!(found.map(|z| z.name.as_str()), Some("Inner"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ZoneRegistry::new(vec![]);
        assert!(registry.zone_containing(22.5730, 88.3644).is_none());
    }
}
