//! Route geometry produced by the route provider.

use super::Point;

/// The base route between origin and destination.
///
/// Created once per search and never mutated. `points` may be as coarse as
/// `[origin, destination]` when no detailed geometry is available.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub distance_km: f64,
    pub duration_sec: u32,
    pub points: Vec<Point>,
}

impl RouteGeometry {
    /// Straight-line fallback route: haversine distance, two points.
    pub fn straight_line(origin: Point, destination: Point) -> Self {
        Self {
            distance_km: origin.haversine_km(&destination),
            duration_sec: 0,
            points: vec![origin, destination],
        }
    }
}

/// Leg distances of a route that passes through one intermediate stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetourLegs {
    /// Driving distance origin → stop.
    pub leg1_km: f64,

    /// Total driving distance origin → stop → destination.
    pub total_km: f64,
}

impl DetourLegs {
    /// Straight-line fallback: haversine legs through the stop.
    pub fn straight_line(origin: Point, stop: Point, destination: Point) -> Self {
        let leg1_km = origin.haversine_km(&stop);
        Self {
            leg1_km,
            total_km: leg1_km + stop.haversine_km(&destination),
        }
    }
}
