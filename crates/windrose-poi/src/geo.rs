//! Coordinate and great-circle geometry primitives.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A single longitude or latitude value in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate(pub f64);

impl Coordinate {
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0 / 180.0 * std::f64::consts::PI
    }
}

/// A point on the sphere, `(lon, lat)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lon: Coordinate,
    pub lat: Coordinate,
}

impl Location {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: Coordinate(lon),
            lat: Coordinate(lat),
        }
    }

    /// Haversine great-circle distance to `other`, in kilometers.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let lat2 = other.lat.to_radians();
        let lon2 = other.lon.to_radians();

        2.0 * EARTH_RADIUS_KM
            * (((1.0 - (lat2 - lat1).cos()
                + lat1.cos() * lat2.cos() * (1.0 - (lon2 - lon1).cos()))
                / 2.0)
                .sqrt())
            .asin()
    }

    /// Initial bearing from `self` to `other` in degrees, measured clockwise
    /// from north. The raw atan2 result lies in `(-180, 180]`; callers that
    /// need `[0, 360)` add 360 to negative values.
    #[must_use]
    pub fn bearing_deg(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let lat2 = other.lat.to_radians();
        let lon2 = other.lon.to_radians();

        f64::atan2(
            (lon2 - lon1).sin() * lat2.cos(),
            lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos(),
        ) / std::f64::consts::PI
            * 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, rel_tolerance: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= rel_tolerance * scale,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn coordinate_to_radians() {
        assert_close(Coordinate(180.0).to_radians(), std::f64::consts::PI, 1e-12);
        assert_close(Coordinate(-90.0).to_radians(), -std::f64::consts::FRAC_PI_2, 1e-12);
        assert_close(Coordinate(0.0).to_radians(), 0.0, 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (Location::new(10.0, 52.0), Location::new(11.0, 52.0)),
            (Location::new(-97.74, 30.27), Location::new(13.40, 52.52)),
            (Location::new(0.0, 0.0), Location::new(179.9, -45.0)),
            (Location::new(10.0, 52.0), Location::new(10.0, 52.0)),
        ];

        for (a, b) in pairs {
            let forward = a.distance_km(b);
            let backward = b.distance_km(a);
            assert_close(forward, backward, 1e-9);
            assert!(forward >= 0.0, "distance must be non-negative");
        }
    }

    #[test]
    fn distance_of_one_degree_latitude() {
        // One degree of latitude is ~111.2 km on a 6371 km sphere.
        let a = Location::new(10.0, 52.0);
        let b = Location::new(10.0, 53.0);
        let d = a.distance_km(b);
        assert!((d - 111.2).abs() < 0.1, "got {d}");
    }

    #[test]
    fn bearing_due_south() {
        let from = Location::new(10.0, 52.0);
        let to = Location::new(10.0, 0.0);
        let bearing = from.bearing_deg(to);
        assert_close(bearing, 180.0, 1e-9);
    }

    #[test]
    fn bearing_one_degree_east() {
        let from = Location::new(10.0, 52.0);
        let to = Location::new(11.0, 52.0);
        let bearing = from.bearing_deg(to);
        // Rounded to 2 decimal places, the initial bearing is 89.61 degrees.
        assert_close((bearing * 100.0).round() / 100.0, 89.61, 1e-9);
    }

    #[test]
    fn bearing_stays_in_raw_range() {
        let reference = Location::new(10.0, 52.0);
        let targets = [
            Location::new(10.0, 53.0),
            Location::new(11.0, 52.0),
            Location::new(10.0, 51.0),
            Location::new(9.0, 52.0),
            Location::new(9.5, 52.5),
            Location::new(10.5, 51.5),
        ];

        for target in targets {
            let bearing = reference.bearing_deg(target);
            assert!(
                bearing > -180.0 && bearing <= 180.0,
                "bearing {bearing} out of (-180, 180]"
            );
        }
    }

    #[test]
    fn bearing_is_not_reciprocal() {
        // Only range validity holds for the reverse direction, not a
        // plus-180 identity.
        let a = Location::new(10.0, 52.0);
        let b = Location::new(30.0, 10.0);
        let reverse = b.bearing_deg(a);
        assert!(reverse > -180.0 && reverse <= 180.0);
    }
}
