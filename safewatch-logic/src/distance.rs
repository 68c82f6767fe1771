/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points given in degrees, using the haversine
/// formula.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        for (lat, lon) in [(0.0, 0.0), (22.5730, 88.3644), (-45.1, -170.25), (89.9, 179.9)] {
            assert_eq!(distance(lat, lon, lat, lon), 0.0, "({lat}, {lon}) not zero");
        }
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ((22.57, 88.36), (22.58, 88.37)),
            ((51.5, -0.12), (40.71, -74.0)),
            ((-33.86, 151.2), (35.68, 139.69)),
        ];
        for ((a_lat, a_lon), (b_lat, b_lon)) in pairs {
            let ab = distance(a_lat, a_lon, b_lat, b_lon);
            let ba = distance(b_lat, b_lon, a_lat, a_lon);
            assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
        }
    }

    #[test]
    fn test_one_degree_latitude_at_equator() {
        let d = distance(0.0, 0.0, 1.0, 0.0);
        let expected = 111_195.0;
        assert!(
            (d - expected).abs() / expected < 0.005,
            "1 degree of latitude was {d} meters"
        );
    }

    #[test]
    fn test_sample_jump() {
        let d = distance(22.5700, 88.3600, 22.5800, 88.3700);
        assert!(d > 1000.0 && d < 1600.0, "unexpected distance {d}");
    }
}
