//! Per-search derived station wrappers.
//!
//! The underlying [`Station`] dataset is shared and read-only; everything a
//! search derives (route proximity, bucket position, detour results) lives
//! in these wrappers and is discarded when the search ends.

use std::sync::Arc;

use crate::domain::Station;

/// A station admitted to the corridor, with its per-search metrics.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub station: Arc<Station>,

    /// Minimum lateral distance from the station to the sampled route, km.
    /// Always within the corridor radius; the corridor filter enforces this
    /// before a candidate exists.
    pub min_distance_to_route_km: f64,

    /// Estimated along-route position, km from the origin. Chord-projection
    /// estimate, assigned by the bucketizer.
    pub km_from_origin: f64,
}

impl Candidate {
    pub fn new(station: Arc<Station>, min_distance_to_route_km: f64) -> Self {
        Self {
            station,
            min_distance_to_route_km,
            km_from_origin: 0.0,
        }
    }
}

/// Verified detour distances for one candidate stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetourResult {
    /// Driving distance origin → station.
    pub leg1_km: f64,

    /// Total driving distance origin → station → destination.
    pub total_with_stop_km: f64,

    /// Detour over the base route: `max(0, total_with_stop - base)`.
    pub extra_km: f64,
}

/// A station confirmed against real detour geometry and range constraints.
#[derive(Debug, Clone)]
pub struct ConfirmedStation {
    pub station: Arc<Station>,

    pub min_distance_to_route_km: f64,
    pub km_from_origin: f64,

    pub detour: DetourResult,

    /// Fuel burned by the detour at the fixed consumption rate.
    pub extra_liters: f64,

    /// Cost of the detour fuel at this station's selected-fuel price, EUR.
    pub extra_cost: f64,
}
