//! Geographic primitives and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a coordinate from degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Great-circle surface distance between two coordinates, in meters.
///
/// Haversine on a spherical Earth. Holds up from walking distances to the
/// radius scales the app configures, including near the poles, where
/// degree-space Euclidean distance does not.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    const EPSILON: f64 = 1e-10;

    if (a.latitude - b.latitude).abs() < EPSILON && (a.longitude - b.longitude).abs() < EPSILON {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_M * 2.0 * h.sqrt().asin()
}

/// Whether `candidate` lies within `radius_m` meters of `user`.
///
/// The boundary is inclusive. An unknown user position admits nothing.
pub fn is_within_radius(user: Option<GeoPoint>, candidate: GeoPoint, radius_m: f64) -> bool {
    match user {
        Some(user) => distance_meters(user, candidate) <= radius_m,
        None => {
            log::warn!("no user coordinate; rejecting drop");
            false
        }
    }
}
