//! Geographic coordinate type.

use std::fmt;

/// Mean Earth radius in kilometres, used by all distance computations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in decimal degrees.
///
/// `Point` is a plain value type; it does not guarantee the coordinate is
/// usable. Call [`Point::is_usable`] before trusting a coordinate that came
/// from an external source — the government dataset and Nominatim both use
/// `(0, 0)` as an "unset" sentinel.
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    /// Create a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the coordinate is finite, in range, and not the `(0, 0)`
    /// "unset" sentinel.
    pub fn is_usable(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
            && !(self.lat == 0.0 && self.lng == 0.0)
    }

    /// Great-circle distance to another point in kilometres.
    pub fn haversine_km(&self, other: &Point) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
