//! Driving-route providers.
//!
//! [`Routing`] picks between the Google Routes API and the straight-line
//! fallback at construction time. Base-route failures against the API are
//! degraded to straight-line geometry so a search can still run; with-stop
//! failures propagate, because the engine's reserve substitution is the
//! right recovery for those.

use std::future::Future;

use tracing::warn;

use crate::domain::{DetourLegs, Point, RouteGeometry};
use crate::engine::RouteProvider;

mod cache;
mod client;
mod error;
mod fallback;
mod mock;

pub use cache::{CachedRoutes, RouteCacheConfig};
pub use client::{GoogleRoutesClient, GoogleRoutesConfig};
pub use error::RouteError;
pub use fallback::HaversineRoutes;
pub use mock::MockRoutes;

/// Quantize a point onto a ~1 m grid for use as a cache or lookup key.
pub(crate) fn grid_key(p: Point) -> (i64, i64) {
    ((p.lat * 1e5).round() as i64, (p.lng * 1e5).round() as i64)
}

/// The configured routing backend.
pub enum Routing {
    Google(GoogleRoutesClient),
    Haversine(HaversineRoutes),
}

impl Routing {
    /// Build a Google-backed router.
    pub fn google(config: GoogleRoutesConfig) -> Result<Self, RouteError> {
        Ok(Routing::Google(GoogleRoutesClient::new(config)?))
    }

    /// Build the straight-line router.
    pub fn haversine() -> Self {
        Routing::Haversine(HaversineRoutes)
    }

    pub async fn route(
        &self,
        origin: Point,
        destination: Point,
    ) -> Result<RouteGeometry, RouteError> {
        match self {
            Routing::Google(client) => match client.route(origin, destination).await {
                Ok(route) => Ok(route),
                Err(err) => {
                    warn!(error = %err, "routes API failed, using straight-line base route");
                    Ok(RouteGeometry::straight_line(origin, destination))
                }
            },
            Routing::Haversine(fallback) => fallback.route(origin, destination).await,
        }
    }

    pub async fn route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> Result<DetourLegs, RouteError> {
        match self {
            Routing::Google(client) => client.route_with_stop(origin, stop, destination).await,
            Routing::Haversine(fallback) => {
                fallback.route_with_stop(origin, stop, destination).await
            }
        }
    }
}

impl RouteProvider for Routing {
    fn compute_route(
        &self,
        origin: Point,
        destination: Point,
    ) -> impl Future<Output = Result<RouteGeometry, RouteError>> + Send {
        self.route(origin, destination)
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
