//! Caching layer for routing responses.
//!
//! Route geometry is stable over the lifetime of a search session, and the
//! same origin/destination pair is requested once per search plus once per
//! candidate detour, so caching cuts the API bill dramatically. Coordinates
//! are quantized to a ~1 m grid so geocoder jitter does not defeat the cache.
//!
//! Errors are never cached; a transient routing failure should not poison
//! subsequent searches.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{DetourLegs, Point, RouteGeometry};

use super::error::RouteError;
use super::{Routing, grid_key};

type PairKey = ((i64, i64), (i64, i64));
type TripleKey = ((i64, i64), (i64, i64), (i64, i64));

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached base routes.
    pub base_capacity: u64,

    /// Maximum number of cached with-stop legs.
    pub stop_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            base_capacity: 500,
            stop_capacity: 10_000,
        }
    }
}

/// Routing provider with caching.
///
/// Wraps a [`Routing`] backend and caches both base routes and with-stop
/// leg distances.
pub struct CachedRoutes {
    backend: Routing,
    base: MokaCache<PairKey, Arc<RouteGeometry>>,
    stops: MokaCache<TripleKey, DetourLegs>,
}

impl CachedRoutes {
    pub fn new(backend: Routing, config: &RouteCacheConfig) -> Self {
        let base = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.base_capacity)
            .build();
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.stop_capacity)
            .build();

        Self {
            backend,
            base,
            stops,
        }
    }

    pub async fn route(
        &self,
        origin: Point,
        destination: Point,
    ) -> Result<Arc<RouteGeometry>, RouteError> {
        let key = (grid_key(origin), grid_key(destination));
        if let Some(cached) = self.base.get(&key).await {
            return Ok(cached);
        }

        let route = Arc::new(self.backend.route(origin, destination).await?);
        self.base.insert(key, route.clone()).await;
        Ok(route)
    }

    pub async fn route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> Result<DetourLegs, RouteError> {
        let key = (grid_key(origin), grid_key(stop), grid_key(destination));
        if let Some(cached) = self.stops.get(&key).await {
            return Ok(cached);
        }

        let legs = self
            .backend
            .route_with_stop(origin, stop, destination)
            .await?;
        self.stops.insert(key, legs).await;
        Ok(legs)
    }

    /// Cache sizes (for monitoring).
    pub fn entry_counts(&self) -> (u64, u64) {
        (self.base.entry_count(), self.stops.entry_count())
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.base.invalidate_all();
        self.stops.invalidate_all();
    }
}

impl crate::engine::RouteProvider for CachedRoutes {
    fn compute_route(
        &self,
        origin: Point,
        destination: Point,
    ) -> impl Future<Output = Result<RouteGeometry, RouteError>> + Send {
        async move {
            let route = self.route(origin, destination).await?;
            Ok(RouteGeometry::clone(&route))
        }
    }

    fn compute_route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> impl Future<Output = Result<DetourLegs, RouteError>> + Send {
        self.route_with_stop(origin, stop, destination)
    }
}
