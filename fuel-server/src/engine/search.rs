//! Corridor search and sequential confirmation.
//!
//! The entry point is [`Engine::search`]. It narrows the shared station
//! dataset down to a corridor around the driving route, ranks the survivors,
//! spreads them into along-route buckets, and then confirms a bounded number
//! per bucket against real detour geometry from the routing provider.
//!
//! Routing calls are the expensive step, so everything before them is pure
//! in-memory filtering, and each bucket keeps a reserve list: when the best
//! candidate's detour cannot be computed or fails a constraint, the next
//! reserve is tried instead of giving up on the bucket.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Autonomy, DetourLegs, Filters, Point, RouteGeometry, Station};
use crate::geo::sample_route;
use crate::routing::RouteError;

use super::bucket::{bucketize, interval_km, max_visible_km};
use super::candidate::{ConfirmedStation, DetourResult};
use super::config::EngineConfig;
use super::corridor::corridor_filter;
use super::dataset::filter_dataset;
use super::events::{NullObserver, RejectReason, SearchEvent, SearchObserver};
use super::rank::{pre_rank, sort_confirmed};

/// Source of driving-route geometry.
pub trait RouteProvider {
    /// Route from origin to destination.
    fn compute_route(
        &self,
        origin: Point,
        destination: Point,
    ) -> impl Future<Output = Result<RouteGeometry, RouteError>> + Send;

    /// Route from origin to destination via one intermediate stop.
    fn compute_route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> impl Future<Output = Result<DetourLegs, RouteError>> + Send;
}

/// Failures that abort a search outright. Per-candidate routing failures are
/// not here; the selection loop recovers from those by substitution.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(
        "usable range is {usable_km:.1} km after the {reserve_km:.1} km reserve; \
         no station is reachable"
    )]
    InsufficientAutonomy { usable_km: f64, reserve_km: f64 },

    #[error("could not compute the base route: {0}")]
    BaseRoute(String),

    #[error("search cancelled")]
    Cancelled,
}

/// Why a completed search confirmed nothing. Not an error: the pipeline ran
/// to the end and the answer is an empty list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoMatch {
    /// No station passed the filters and corridor for this route.
    NoneInCorridor,
    /// Stations existed, but none was reachable within the usable range.
    NoneInRange { usable_km: f64 },
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoMatch::NoneInCorridor => {
                write!(f, "no stations match the filters along this route")
            }
            NoMatch::NoneInRange { usable_km } => write!(
                f,
                "no reachable station within the {usable_km:.0} km of usable range"
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: Point,
    pub destination: Point,
    pub filters: Filters,
    pub autonomy: Autonomy,
}

/// Counters describing how the pipeline narrowed the dataset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub dataset_total: usize,
    pub after_filters: usize,
    pub corridor_candidates: usize,
    pub range_prefiltered: usize,
    pub buckets: usize,

    pub detours_requested: usize,
    pub confirmed: usize,
    pub provider_failures: usize,
    pub rejected_by_autonomy: usize,
    pub rejected_by_integrity: usize,
    pub rejected_by_budget: usize,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub route: RouteGeometry,
    pub stations: Vec<ConfirmedStation>,
    pub no_match: Option<NoMatch>,
    pub stats: SearchStats,
}

/// Cooperative cancellation handle, checked between routing calls.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct Engine<'a, R> {
    routes: &'a R,
    config: EngineConfig,
}

impl<'a, R: RouteProvider> Engine<'a, R> {
    pub fn new(routes: &'a R) -> Self {
        Self {
            routes,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(routes: &'a R, config: EngineConfig) -> Self {
        Self { routes, config }
    }

    /// Run a search with no observer and no cancellation.
    pub async fn search(
        &self,
        stations: &[Arc<Station>],
        request: &SearchRequest,
    ) -> Result<SearchResult, SearchError> {
        self.search_observed(stations, request, &CancelToken::new(), &mut NullObserver)
            .await
    }

    /// Run a search, reporting progress to `observer`.
    pub async fn search_observed(
        &self,
        stations: &[Arc<Station>],
        request: &SearchRequest,
        cancel: &CancelToken,
        observer: &mut impl SearchObserver,
    ) -> Result<SearchResult, SearchError> {
        let autonomy = &request.autonomy;
        let usable = autonomy.usable_range_km();
        if let Some(u) = usable
            && u <= 0.0
        {
            return Err(SearchError::InsufficientAutonomy {
                usable_km: u,
                reserve_km: autonomy.reserve_min_km(),
            });
        }

        let mut route = self
            .routes
            .compute_route(request.origin, request.destination)
            .await
            .map_err(|e| SearchError::BaseRoute(e.to_string()))?;
        if route.points.len() < 2 {
            route.points = vec![request.origin, request.destination];
        }

        let mut stats = SearchStats {
            dataset_total: stations.len(),
            ..SearchStats::default()
        };

        let eligible = filter_dataset(stations, &request.filters);
        stats.after_filters = eligible.len();
        if eligible.is_empty() {
            return Ok(self.empty_result(route, stats, usable));
        }

        let sampled = sample_route(&route.points, self.config.sample_step_km);
        let mut candidates =
            corridor_filter(&eligible, &sampled, self.config.corridor_radius_km);
        stats.corridor_candidates = candidates.len();

        // Straight-line distance never exceeds driving distance, so anything
        // beyond the usable range as the crow flies is unreachable.
        if let Some(u) = usable {
            let before = candidates.len();
            candidates.retain(|c| request.origin.haversine_km(&c.station.location) <= u);
            stats.range_prefiltered = before - candidates.len();
        }

        let candidates = pre_rank(candidates, &request.filters);

        let interval = interval_km(&self.config, route.distance_km, usable);
        let max_km = max_visible_km(route.distance_km, usable);
        let buckets = bucketize(
            &self.config,
            candidates,
            request.origin,
            request.destination,
            interval,
            max_km,
            &request.filters,
        );
        stats.buckets = buckets.len();
        debug!(
            buckets = buckets.len(),
            interval_km = interval,
            max_visible_km = max_km,
            "corridor bucketized"
        );

        let mut confirmed: Vec<ConfirmedStation> = Vec::new();

        for bucket in &buckets {
            let mut in_bucket = 0usize;
            let mut tried = 0usize;

            for candidate in &bucket.reserves {
                if in_bucket >= self.config.confirmations_per_bucket {
                    break;
                }
                if cancel.is_cancelled() {
                    return Err(SearchError::Cancelled);
                }

                tried += 1;
                stats.detours_requested += 1;
                observer.on_event(SearchEvent::DetourRequested {
                    station: candidate.station.clone(),
                    bucket: bucket.index,
                });

                let legs = match self
                    .routes
                    .compute_route_with_stop(
                        request.origin,
                        candidate.station.location,
                        request.destination,
                    )
                    .await
                {
                    Ok(legs) => legs,
                    Err(err) => {
                        stats.provider_failures += 1;
                        warn!(
                            station = %candidate.station.id,
                            error = %err,
                            "detour route failed, trying next reserve"
                        );
                        observer.on_event(SearchEvent::CandidateRejected {
                            station: candidate.station.clone(),
                            bucket: bucket.index,
                            reason: RejectReason::ProviderFailure {
                                message: err.to_string(),
                            },
                        });
                        continue;
                    }
                };

                if !legs.leg1_km.is_finite()
                    || !legs.total_km.is_finite()
                    || legs.leg1_km < 0.0
                    || legs.total_km < legs.leg1_km
                {
                    stats.rejected_by_integrity += 1;
                    warn!(
                        station = %candidate.station.id,
                        leg1_km = legs.leg1_km,
                        total_km = legs.total_km,
                        "discarding detour with inconsistent leg distances"
                    );
                    observer.on_event(SearchEvent::CandidateRejected {
                        station: candidate.station.clone(),
                        bucket: bucket.index,
                        reason: RejectReason::BrokenDetour,
                    });
                    continue;
                }

                if let Some(u) = usable
                    && legs.leg1_km > u
                {
                    stats.rejected_by_autonomy += 1;
                    observer.on_event(SearchEvent::CandidateRejected {
                        station: candidate.station.clone(),
                        bucket: bucket.index,
                        reason: RejectReason::OutOfRange {
                            leg1_km: legs.leg1_km,
                            usable_range_km: u,
                        },
                    });
                    continue;
                }

                let extra_km = (legs.total_km - route.distance_km).max(0.0);
                if let Some(budget) = request.filters.detour_budget()
                    && extra_km > budget
                {
                    stats.rejected_by_budget += 1;
                    observer.on_event(SearchEvent::CandidateRejected {
                        station: candidate.station.clone(),
                        bucket: bucket.index,
                        reason: RejectReason::OverDetourBudget {
                            extra_km,
                            budget_km: budget,
                        },
                    });
                    continue;
                }

                let extra_liters = extra_km * self.config.consumption_l_per_100km / 100.0;
                let price = candidate.station.prices.for_selection(request.filters.fuel);
                let extra_cost = extra_liters * price;

                observer.on_event(SearchEvent::CandidateConfirmed {
                    station: candidate.station.clone(),
                    bucket: bucket.index,
                    extra_km,
                });

                confirmed.push(ConfirmedStation {
                    station: candidate.station.clone(),
                    min_distance_to_route_km: candidate.min_distance_to_route_km,
                    km_from_origin: candidate.km_from_origin,
                    detour: DetourResult {
                        leg1_km: legs.leg1_km,
                        total_with_stop_km: legs.total_km,
                        extra_km,
                    },
                    extra_liters,
                    extra_cost,
                });
                in_bucket += 1;
            }

            observer.on_event(SearchEvent::BucketResolved {
                bucket: bucket.index,
                confirmed: in_bucket,
                tried,
            });
        }

        stats.confirmed = confirmed.len();
        sort_confirmed(&mut confirmed, &request.filters);

        if confirmed.is_empty() {
            return Ok(self.empty_result(route, stats, usable));
        }

        Ok(SearchResult {
            route,
            stations: confirmed,
            no_match: None,
            stats,
        })
    }

    fn empty_result(
        &self,
        route: RouteGeometry,
        stats: SearchStats,
        usable: Option<f64>,
    ) -> SearchResult {
        let no_match = match usable {
            Some(usable_km) => NoMatch::NoneInRange { usable_km },
            None => NoMatch::NoneInCorridor,
        };
        SearchResult {
            route,
            stations: Vec::new(),
            no_match: Some(no_match),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelPrices, FuelSelection, FuelType, SortBy};
    use crate::routing::MockRoutes;

    const ORIGIN: Point = Point { lat: 40.0, lng: -3.0 };
    const DEST: Point = Point { lat: 40.0, lng: -2.0 };

    fn station(id: &str, lat: f64, lng: f64, price95: f64) -> Arc<Station> {
        Arc::new(Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            address: String::new(),
            municipality: String::new(),
            province: String::new(),
            postal_code: String::new(),
            location: Point::new(lat, lng),
            schedule: "L-D: 24H".to_string(),
            prices: FuelPrices {
                gasoline_95: price95,
                ..FuelPrices::default()
            },
        })
    }

    fn request(autonomy: Autonomy) -> SearchRequest {
        SearchRequest {
            origin: ORIGIN,
            destination: DEST,
            filters: Filters {
                fuel: FuelSelection::Only(FuelType::Gasoline95),
                sort_by: SortBy::Distance,
                ..Filters::default()
            },
            autonomy,
        }
    }

    #[tokio::test]
    async fn confirms_stations_spread_along_the_route() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);
        let stations = vec![
            station("A", 40.0, -2.95, 1.50), // bucket 0
            station("B", 40.0, -2.70, 1.50), // bucket 1
            station("C", 40.0, -2.30, 1.50), // bucket 3
        ];

        let result = engine
            .search(&stations, &request(Autonomy::unlimited()))
            .await
            .unwrap();

        assert_eq!(result.stations.len(), 3);
        assert!(result.no_match.is_none());
        assert_eq!(result.stats.confirmed, 3);
        assert_eq!(result.stats.corridor_candidates, 3);
    }

    #[tokio::test]
    async fn provider_failure_substitutes_the_next_reserve() {
        let best = station("BEST", 40.0, -2.95, 1.40);
        let backup = station("BACKUP", 40.01, -2.95, 1.60);

        let routes = MockRoutes::straight(ORIGIN, DEST)
            .stop_fails(best.location, "upstream timeout");
        let engine = Engine::new(&routes);

        let mut req = request(Autonomy::unlimited());
        req.filters.sort_by = SortBy::Price;
        let result = engine
            .search(&[best, backup], &req)
            .await
            .unwrap();

        assert_eq!(result.stations.len(), 1);
        assert_eq!(result.stations[0].station.id, "BACKUP");
        assert_eq!(result.stats.provider_failures, 1);
    }

    #[tokio::test]
    async fn detour_budget_applies_even_with_unlimited_autonomy() {
        let wanderer = station("FAR", 40.0, -2.5, 1.40);
        let routes = MockRoutes::straight(ORIGIN, DEST).stop_ok(
            wanderer.location,
            DetourLegs {
                leg1_km: 60.0,
                total_km: 130.0, // ~45 km over the ~85 km base
            },
        );
        let engine = Engine::new(&routes);

        let mut req = request(Autonomy::unlimited());
        req.filters.detour_budget_km = 10.0;
        let result = engine.search(&[wanderer], &req).await.unwrap();

        assert!(result.stations.is_empty());
        assert_eq!(result.stats.rejected_by_budget, 1);
        assert_eq!(result.no_match, Some(NoMatch::NoneInCorridor));
    }

    #[tokio::test]
    async fn at_most_two_confirmations_per_bucket() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);
        // Three viable stations in the same 15 km bucket
        let stations = vec![
            station("A", 40.0, -2.96, 1.50),
            station("B", 40.0, -2.95, 1.50),
            station("C", 40.0, -2.94, 1.50),
        ];

        let result = engine
            .search(&stations, &request(Autonomy::unlimited()))
            .await
            .unwrap();

        assert_eq!(result.stations.len(), 2);
        assert_eq!(result.stats.detours_requested, 2);
    }

    #[tokio::test]
    async fn usable_range_at_or_below_zero_is_fatal() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);

        let err = engine
            .search(&[], &request(Autonomy::limited(10.0)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SearchError::InsufficientAutonomy { usable_km, .. } if usable_km < 0.0
        ));
    }

    #[tokio::test]
    async fn empty_dataset_is_a_result_not_an_error() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);

        let result = engine
            .search(&[], &request(Autonomy::unlimited()))
            .await
            .unwrap();

        assert!(result.stations.is_empty());
        assert_eq!(result.no_match, Some(NoMatch::NoneInCorridor));
    }

    #[tokio::test]
    async fn limited_autonomy_gets_a_range_specific_message() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);

        let result = engine
            .search(&[], &request(Autonomy::limited(100.0)))
            .await
            .unwrap();

        let no_match = result.no_match.unwrap();
        assert_eq!(no_match, NoMatch::NoneInRange { usable_km: 85.0 });
        assert!(no_match.to_string().contains("85 km"));
    }

    #[tokio::test]
    async fn stations_beyond_usable_range_are_rejected() {
        // Usable range 30 km; station ~60 km along the route
        let near = station("NEAR", 40.0, -2.95, 1.50);
        let far = station("FAR", 40.0, -2.30, 1.50);
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);

        let result = engine
            .search(&[near, far], &request(Autonomy::limited(45.0)))
            .await
            .unwrap();

        let ids: Vec<&str> = result
            .stations
            .iter()
            .map(|s| s.station.id.as_str())
            .collect();
        assert_eq!(ids, vec!["NEAR"]);
        // The far station never reaches the routing provider
        assert_eq!(result.stats.range_prefiltered, 1);
    }

    #[tokio::test]
    async fn broken_leg_distances_are_skipped() {
        let bad = station("BAD", 40.0, -2.95, 1.50);
        let routes = MockRoutes::straight(ORIGIN, DEST).stop_ok(
            bad.location,
            DetourLegs {
                leg1_km: f64::NAN,
                total_km: 85.0,
            },
        );
        let engine = Engine::new(&routes);

        let result = engine
            .search(&[bad], &request(Autonomy::unlimited()))
            .await
            .unwrap();

        assert!(result.stations.is_empty());
        assert_eq!(result.stats.rejected_by_integrity, 1);
    }

    #[tokio::test]
    async fn cancellation_aborts_before_the_next_detour() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = engine
            .search_observed(
                &[station("A", 40.0, -2.95, 1.50)],
                &request(Autonomy::unlimited()),
                &cancel,
                &mut NullObserver,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Cancelled));
    }

    #[tokio::test]
    async fn observer_sees_the_full_decision_trail() {
        let best = station("BEST", 40.0, -2.95, 1.40);
        let backup = station("BACKUP", 40.01, -2.95, 1.60);
        let routes =
            MockRoutes::straight(ORIGIN, DEST).stop_fails(best.location, "boom");
        let engine = Engine::new(&routes);

        let mut events: Vec<SearchEvent> = Vec::new();
        let mut req = request(Autonomy::unlimited());
        req.filters.sort_by = SortBy::Price;
        engine
            .search_observed(&[best, backup], &req, &CancelToken::new(), &mut events)
            .await
            .unwrap();

        let rejected = events
            .iter()
            .any(|e| matches!(e, SearchEvent::CandidateRejected { station, .. } if station.id == "BEST"));
        let confirmed = events
            .iter()
            .any(|e| matches!(e, SearchEvent::CandidateConfirmed { station, .. } if station.id == "BACKUP"));
        assert!(rejected && confirmed);
        assert!(matches!(
            events.last(),
            Some(SearchEvent::BucketResolved { tried: 2, .. })
        ));
    }

    #[tokio::test]
    async fn repeated_searches_return_the_same_order() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);
        let stations = vec![
            station("A", 40.0, -2.95, 1.55),
            station("B", 40.0, -2.70, 1.45),
            station("C", 40.0, -2.30, 1.65),
        ];
        let req = request(Autonomy::unlimited());

        let first = engine.search(&stations, &req).await.unwrap();
        let second = engine.search(&stations, &req).await.unwrap();

        let ids = |r: &SearchResult| -> Vec<String> {
            r.stations.iter().map(|s| s.station.id.clone()).collect()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.stats, second.stats);
    }

    #[tokio::test]
    async fn final_order_follows_the_requested_sort() {
        let routes = MockRoutes::straight(ORIGIN, DEST);
        let engine = Engine::new(&routes);
        let stations = vec![
            station("PRICEY", 40.0, -2.95, 1.80),
            station("CHEAP", 40.0, -2.30, 1.40),
        ];

        let mut req = request(Autonomy::unlimited());
        req.filters.sort_by = SortBy::Price;
        let result = engine.search(&stations, &req).await.unwrap();

        let ids: Vec<&str> = result
            .stations
            .iter()
            .map(|s| s.station.id.as_str())
            .collect();
        assert_eq!(ids, vec!["CHEAP", "PRICEY"]);
    }
}
