//! Candidate ordering.
//!
//! One comparator serves pre-ranking, bucket-reserve ordering and the final
//! result ordering: price then proximity when sorting by price, proximity
//! then price otherwise.

use std::cmp::Ordering;

use crate::domain::{Filters, SortBy};

use super::candidate::{Candidate, ConfirmedStation};

/// Compare two (price, route-proximity) pairs under the active sort.
fn compare_metrics(
    filters: &Filters,
    price_a: f64,
    dist_a: f64,
    price_b: f64,
    dist_b: f64,
) -> Ordering {
    match filters.sort_by {
        SortBy::Price => price_a
            .total_cmp(&price_b)
            .then_with(|| dist_a.total_cmp(&dist_b)),
        SortBy::Distance => dist_a
            .total_cmp(&dist_b)
            .then_with(|| price_a.total_cmp(&price_b)),
    }
}

/// Comparator over corridor candidates.
pub fn compare_candidates(a: &Candidate, b: &Candidate, filters: &Filters) -> Ordering {
    compare_metrics(
        filters,
        a.station.prices.for_selection(filters.fuel),
        a.min_distance_to_route_km,
        b.station.prices.for_selection(filters.fuel),
        b.min_distance_to_route_km,
    )
}

/// Sort candidates best-first under the active sort criterion.
pub fn pre_rank(mut candidates: Vec<Candidate>, filters: &Filters) -> Vec<Candidate> {
    candidates.sort_by(|a, b| compare_candidates(a, b, filters));
    candidates
}

/// Final ordering of confirmed stations, same comparator as pre-ranking.
pub fn sort_confirmed(stations: &mut [ConfirmedStation], filters: &Filters) {
    stations.sort_by(|a, b| {
        compare_metrics(
            filters,
            a.station.prices.for_selection(filters.fuel),
            a.min_distance_to_route_km,
            b.station.prices.for_selection(filters.fuel),
            b.min_distance_to_route_km,
        )
    });
}
