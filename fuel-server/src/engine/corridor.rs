//! Corridor filtering: restrict stations to a lateral band around the route.

use std::sync::Arc;

use crate::domain::{Point, Station};
use crate::geo::min_distance_to_polyline_km;

use super::candidate::Candidate;

/// Keep stations within `radius_km` of the (already sampled) route.
///
/// The admission boundary is inclusive: a station at exactly the corridor
/// radius is kept. The measured distance is attached to each candidate so
/// later stages never recompute it. With a single-point route (origin ≈
/// destination) this degrades to a plain radius filter around that point.
pub fn corridor_filter(
    stations: &[Arc<Station>],
    sampled_route: &[Point],
    radius_km: f64,
) -> Vec<Candidate> {
    if sampled_route.is_empty() {
        return Vec::new();
    }

    stations
        .iter()
        .filter_map(|station| {
            let d = min_distance_to_polyline_km(station.location, sampled_route);
            (d <= radius_km).then(|| Candidate::new(station.clone(), d))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelPrices, Point};
    use crate::geo::sample_route;

    fn station_at(id: &str, lat: f64, lng: f64) -> Arc<Station> {
        Arc::new(Station {
            id: id.to_string(),
            name: id.to_string(),
            address: String::new(),
            municipality: String::new(),
            province: String::new(),
            postal_code: String::new(),
            location: Point::new(lat, lng),
            schedule: String::new(),
            prices: FuelPrices::default(),
        })
    }

    #[test]
    fn admits_near_and_rejects_far() {
        let route = [Point::new(40.0, -3.0), Point::new(40.0, -2.0)];
        let stations = vec![
            station_at("NEAR", 40.05, -2.5), // ~5.6 km off-route
            station_at("FAR", 40.2, -2.5),   // ~22 km off-route
        ];

        let candidates = corridor_filter(&stations, &route, 7.0);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].station.id, "NEAR");
        assert!(candidates[0].min_distance_to_route_km <= 7.0);
    }

    #[test]
    fn admitted_candidates_carry_their_distance() {
        let route = [Point::new(40.0, -3.0), Point::new(40.0, -2.0)];
        let stations = vec![station_at("S", 40.05, -2.5)];

        let candidates = corridor_filter(&stations, &route, 7.0);

        let d = candidates[0].min_distance_to_route_km;
        assert!((d - 5.56).abs() < 0.1, "got {d}");
    }

    #[test]
    fn zero_radius_admits_only_on_route() {
        let route = [Point::new(40.0, -3.0), Point::new(40.0, -2.0)];
        let stations = vec![
            station_at("ON", 40.0, -2.5),
            station_at("OFF", 40.01, -2.5),
        ];

        let candidates = corridor_filter(&stations, &route, 0.0);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].station.id, "ON");
    }

    #[test]
    fn single_point_route_is_radius_filter() {
        let route = [Point::new(40.0, -3.0)];
        let stations = vec![
            station_at("CLOSE", 40.02, -3.0), // ~2.2 km
            station_at("AWAY", 40.2, -3.0),   // ~22 km
        ];

        let candidates = corridor_filter(&stations, &route, 7.0);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].station.id, "CLOSE");
    }

    #[test]
    fn empty_route_yields_no_candidates() {
        let stations = vec![station_at("S", 40.0, -3.0)];
        assert!(corridor_filter(&stations, &[], 7.0).is_empty());
    }

    #[test]
    fn sampled_route_agrees_with_dense_route() {
        // Dense polyline along a parallel
        let dense: Vec<Point> = (0..=200)
            .map(|i| Point::new(40.0, -3.0 + i as f64 * 0.005))
            .collect();
        let sampled = sample_route(&dense, 1.5);

        let stations = vec![station_at("S", 40.04, -2.4)];

        let from_dense = corridor_filter(&stations, &dense, 7.0);
        let from_sampled = corridor_filter(&stations, &sampled, 7.0);

        assert_eq!(from_dense.len(), from_sampled.len());
    }
}
