//! Great-circle distance between device fixes and stop coordinates.
use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_M;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance in metres between two coordinates given in degrees.
///
/// Total for finite inputs and symmetric in its arguments; identical points
/// yield zero.
#[must_use]
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance in metres between two [`GeoPoint`]s.
#[must_use]
pub fn distance_between(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_meters(a.lat, a.lng, b.lat, b.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_metres() {
        assert_eq!(distance_meters(51.5072, -0.1276, 51.5072, -0.1276), 0.0);
        let p = GeoPoint::new(-33.8688, 151.2093);
        assert_eq!(distance_between(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = distance_meters(48.8566, 2.3522, 40.7128, -74.0060);
        let backward = distance_meters(40.7128, -74.0060, 48.8566, 2.3522);
        assert!(
            (forward - backward).abs() < 1e-6,
            "expected symmetry, got {forward} vs {backward}"
        );
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = distance_meters(0.0, 0.0, 0.0, 1.0);
        assert!(
            (d - 111_195.0).abs() < 50.0,
            "one degree at the equator should be ~111195 m, got {d}"
        );
    }
}
