//! Along-route bucketing.
//!
//! Partitions the pre-ranked candidates into fixed-width distance intervals
//! along the trip, so confirmed stations spread over the whole route instead
//! of clustering near the origin. Each bucket keeps a bounded, best-first
//! reserve list.

use std::collections::BTreeMap;

use crate::domain::{Filters, Point};
use crate::geo::km_along_chord;

use super::candidate::Candidate;
use super::config::EngineConfig;
use super::rank::compare_candidates;

/// One along-route interval with its reserve candidates, best-first.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub index: usize,
    pub from_km: f64,
    pub to_km: f64,
    pub reserves: Vec<Candidate>,
}

/// Bucket interval width in km.
///
/// `clamp(round(base / 12), 15, 60)`, further capped to `round(usable / 3)`
/// (never below 15) when autonomy is limited: shorter buckets when range is
/// the binding constraint, coarser buckets on long unconstrained routes.
pub fn interval_km(
    config: &EngineConfig,
    base_distance_km: f64,
    usable_range_km: Option<f64>,
) -> f64 {
    let mut interval = (base_distance_km / config.interval_divisor)
        .round()
        .clamp(config.interval_min_km, config.interval_max_km);

    if let Some(usable) = usable_range_km
        && usable.is_finite()
        && usable > 0.0
    {
        let range_cap = (usable / config.range_interval_divisor).round();
        interval = interval.min(range_cap).max(config.interval_min_km);
    }

    interval
}

/// Furthest along-route position still worth considering.
pub fn max_visible_km(base_distance_km: f64, usable_range_km: Option<f64>) -> f64 {
    match usable_range_km {
        Some(usable) => usable.min(base_distance_km),
        None => base_distance_km,
    }
}

/// Assign candidates to buckets and bound each reserve list.
///
/// Candidates projecting beyond `max_km` are discarded. Within a bucket,
/// reserves are re-sorted by the final comparator and truncated to the
/// configured cap. Buckets come back in ascending along-route order.
pub fn bucketize(
    config: &EngineConfig,
    candidates: Vec<Candidate>,
    origin: Point,
    destination: Point,
    interval: f64,
    max_km: f64,
    filters: &Filters,
) -> Vec<Bucket> {
    let mut by_index: BTreeMap<usize, Vec<Candidate>> = BTreeMap::new();

    for mut candidate in candidates {
        let km = km_along_chord(origin, destination, candidate.station.location);
        if km > max_km {
            continue;
        }

        candidate.km_from_origin = km;
        let index = (km / interval).floor() as usize;
        by_index.entry(index).or_default().push(candidate);
    }

    by_index
        .into_iter()
        .map(|(index, mut reserves)| {
            reserves.sort_by(|a, b| compare_candidates(a, b, filters));
            reserves.truncate(config.reserve_cap);

            Bucket {
                index,
                from_km: index as f64 * interval,
                to_km: (index + 1) as f64 * interval,
                reserves,
            }
        })
        .collect()
}
