//! Planar geometry over short geographic distances.
//!
//! All functions use an equirectangular local projection (valid for the few
//! kilometres that separate a station from a route) and return kilometres.

use crate::domain::{EARTH_RADIUS_KM, Point};

/// Project a point into a local planar frame centred at `ref_lat`.
fn to_local_xy(p: Point, ref_lat: f64) -> (f64, f64) {
    let x = p.lng.to_radians() * ref_lat.to_radians().cos() * EARTH_RADIUS_KM;
    let y = p.lat.to_radians() * EARTH_RADIUS_KM;
    (x, y)
}

/// Distance in km from `p` to the segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so endpoints bound the
/// result. A degenerate segment (`a == b`) degrades to the point distance.
pub fn distance_point_to_segment_km(p: Point, a: Point, b: Point) -> f64 {
    // One frame per query point: the same point then sees consistent
    // distances across every segment of a polyline.
    let ref_lat = p.lat;

    let (px, py) = to_local_xy(p, ref_lat);
    let (ax, ay) = to_local_xy(a, ref_lat);
    let (bx, by) = to_local_xy(b, ref_lat);

    let abx = bx - ax;
    let aby = by - ay;
    let apx = px - ax;
    let apy = py - ay;

    let ab2 = abx * abx + aby * aby;
    if ab2 == 0.0 {
        return (apx * apx + apy * apy).sqrt();
    }

    let t = ((apx * abx + apy * aby) / ab2).clamp(0.0, 1.0);

    let dx = px - (ax + t * abx);
    let dy = py - (ay + t * aby);
    (dx * dx + dy * dy).sqrt()
}

/// Minimum distance in km from `p` to a polyline.
///
/// Returns `+inf` for an empty polyline and the direct haversine distance
/// when the polyline is a single point.
pub fn min_distance_to_polyline_km(p: Point, polyline: &[Point]) -> f64 {
    match polyline {
        [] => f64::INFINITY,
        [only] => p.haversine_km(only),
        _ => polyline
            .windows(2)
            .map(|seg| distance_point_to_segment_km(p, seg[0], seg[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Downsample a polyline to roughly one point every `step_km`.
///
/// The first and last input points are always kept. Arc length between
/// consecutive input points is accumulated with haversine; a point is
/// emitted whenever the accumulator reaches `step_km`, then reset.
pub fn sample_route(polyline: &[Point], step_km: f64) -> Vec<Point> {
    if polyline.len() <= 2 {
        return polyline.to_vec();
    }

    let mut out = vec![polyline[0]];
    let mut acc = 0.0;

    for pair in polyline.windows(2) {
        acc += pair[0].haversine_km(&pair[1]);
        if acc >= step_km {
            out.push(pair[1]);
            acc = 0.0;
        }
    }

    let last = polyline[polyline.len() - 1];
    if *out.last().unwrap() != last {
        out.push(last);
    }

    out
}

/// Estimate how far along the trip a point sits, in km from the origin.
///
/// Projects `p` onto the straight chord origin → destination, clamped to the
/// chord. This approximates "distance travelled to reach abeam of p"; it is
/// a spreading heuristic for bucketing, not a driving distance.
pub fn km_along_chord(origin: Point, destination: Point, p: Point) -> f64 {
    let ref_lat = origin.lat;

    let (ax, ay) = to_local_xy(origin, ref_lat);
    let (bx, by) = to_local_xy(destination, ref_lat);
    let (px, py) = to_local_xy(p, ref_lat);

    let abx = bx - ax;
    let aby = by - ay;
    let apx = px - ax;
    let apy = py - ay;

    let ab2 = abx * abx + aby * aby;
    if ab2 == 0.0 {
        return 0.0;
    }

    let t = ((apx * abx + apy * aby) / ab2).clamp(0.0, 1.0);

    let dx = t * abx;
    let dy = t * aby;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> Point {
        Point::new(lat, lng)
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let a = p(40.0, -3.0);
        let q = p(40.1, -3.05);

        let d = distance_point_to_segment_km(q, a, a);
        // Equirectangular vs haversine agree closely at this scale
        assert!((d - q.haversine_km(&a)).abs() < 0.05, "got {d}");
    }

    #[test]
    fn point_on_segment_has_zero_distance() {
        let a = p(40.0, -3.0);
        let b = p(40.0, -2.0);
        let mid = p(40.0, -2.5);

        assert!(distance_point_to_segment_km(mid, a, b) < 0.01);
    }

    #[test]
    fn point_beyond_endpoint_clamps() {
        let a = p(40.0, -3.0);
        let b = p(40.0, -2.0);
        let beyond = p(40.0, -1.0);

        let d = distance_point_to_segment_km(beyond, a, b);
        assert!((d - beyond.haversine_km(&b)).abs() < 0.5, "got {d}");
    }

    #[test]
    fn oblique_segment_never_beats_its_endpoints() {
        // A slanted segment well south of the query point; with the frame
        // anchored anywhere but the query point, the clamped projection can
        // land the foot outside the endpoint bound.
        let query = p(41.598, -1.0);
        let a = p(39.0, -1.0);
        let b = p(39.465, -1.690);

        let d = distance_point_to_segment_km(query, a, b);
        let da = distance_point_to_segment_km(query, a, a);
        let db = distance_point_to_segment_km(query, b, b);
        assert!(d <= da.min(db) + 1e-9, "d={d} da={da} db={db}");
    }

    #[test]
    fn lateral_offset_distance() {
        let a = p(40.0, -3.0);
        let b = p(40.0, -2.0);
        // 0.05 degrees of latitude is ~5.56 km
        let off = p(40.05, -2.5);

        let d = distance_point_to_segment_km(off, a, b);
        assert!((d - 5.56).abs() < 0.1, "got {d}");
    }

    #[test]
    fn polyline_empty_and_single_point() {
        let q = p(40.0, -3.0);
        assert_eq!(min_distance_to_polyline_km(q, &[]), f64::INFINITY);

        let single = p(40.1, -3.0);
        let d = min_distance_to_polyline_km(q, &[single]);
        assert!((d - q.haversine_km(&single)).abs() < 1e-12);
    }

    #[test]
    fn polyline_takes_minimum_over_segments() {
        let poly = [p(40.0, -3.0), p(40.0, -2.5), p(40.5, -2.0)];
        let q = p(40.01, -2.7);

        let d = min_distance_to_polyline_km(q, &poly);
        let d_first = distance_point_to_segment_km(q, poly[0], poly[1]);
        assert!((d - d_first).abs() < 1e-9);
    }

    #[test]
    fn sample_keeps_endpoints() {
        // ~85 km of route in 0.01-degree steps
        let poly: Vec<Point> = (0..=100).map(|i| p(40.0, -3.0 + i as f64 * 0.01)).collect();

        let sampled = sample_route(&poly, 1.5);

        assert_eq!(sampled[0], poly[0]);
        assert_eq!(*sampled.last().unwrap(), *poly.last().unwrap());
        assert!(sampled.len() <= poly.len());
        assert!(sampled.len() > 2);
    }

    #[test]
    fn sample_short_polyline_is_identity() {
        let poly = [p(40.0, -3.0), p(40.0, -2.0)];
        assert_eq!(sample_route(&poly, 1.5), poly.to_vec());
    }

    #[test]
    fn chord_projection_is_proportional() {
        let origin = p(40.0, -3.0);
        let destination = p(40.0, -2.0);
        let chord = origin.haversine_km(&destination);

        // Halfway along in longitude, slightly off-route
        let station = p(40.05, -2.5);
        let km = km_along_chord(origin, destination, station);

        assert!((km - chord / 2.0).abs() < 1.0, "got {km}, chord {chord}");
    }

    #[test]
    fn chord_projection_clamps_to_ends() {
        let origin = p(40.0, -3.0);
        let destination = p(40.0, -2.0);
        let chord = origin.haversine_km(&destination);

        let before = p(40.0, -3.5);
        assert_eq!(km_along_chord(origin, destination, before), 0.0);

        let after = p(40.0, -1.5);
        let km = km_along_chord(origin, destination, after);
        assert!((km - chord).abs() < 0.5, "got {km}, chord {chord}");
    }

    #[test]
    fn chord_degenerate_origin_destination() {
        let origin = p(40.0, -3.0);
        assert_eq!(km_along_chord(origin, origin, p(41.0, -3.0)), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn near_point() -> impl Strategy<Value = Point> {
        (39.0f64..42.0, -4.0f64..-1.0).prop_map(|(lat, lng)| Point::new(lat, lng))
    }

    proptest! {
        /// Degenerate segments agree with haversine distance.
        #[test]
        fn degenerate_matches_haversine(p in near_point(), a in near_point()) {
            let d = distance_point_to_segment_km(p, a, a);
            let h = p.haversine_km(&a);
            // Equirectangular error grows with distance; stay proportional
            prop_assert!((d - h).abs() < 0.01 * h.max(1.0));
        }

        /// Segment distance is bounded by the distance to either endpoint.
        #[test]
        fn bounded_by_endpoints(p in near_point(), a in near_point(), b in near_point()) {
            let d = distance_point_to_segment_km(p, a, b);
            let da = distance_point_to_segment_km(p, a, a);
            let db = distance_point_to_segment_km(p, b, b);
            prop_assert!(d <= da.min(db) + 1e-9);
        }

        /// Sampling preserves first and last points and never grows.
        #[test]
        fn sampling_invariants(
            step in 0.5f64..10.0,
            lats in proptest::collection::vec(39.0f64..41.0, 3..60),
        ) {
            let poly: Vec<Point> = lats
                .iter()
                .enumerate()
                .map(|(i, lat)| Point::new(*lat, -3.0 + i as f64 * 0.01))
                .collect();

            let sampled = sample_route(&poly, step);

            prop_assert_eq!(sampled[0], poly[0]);
            prop_assert_eq!(*sampled.last().unwrap(), *poly.last().unwrap());
            prop_assert!(sampled.len() <= poly.len());
        }

        /// Chord projection stays within [0, chord length].
        #[test]
        fn chord_within_bounds(o in near_point(), d in near_point(), p in near_point()) {
            let km = km_along_chord(o, d, p);
            prop_assert!(km >= 0.0);
            // Planar chord length in the same projection bounds the result
            let chord = km_along_chord(o, d, d);
            prop_assert!(km <= chord + 1e-9);
        }
    }
}
