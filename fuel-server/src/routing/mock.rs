//! Scriptable routing provider for tests.
//!
//! Unscripted requests fall back to straight-line geometry, so most tests
//! only script the cases they care about (a failing stop, an inflated
//! detour) and let the rest behave plausibly.

use std::collections::HashMap;
use std::future::Future;

use crate::domain::{DetourLegs, Point, RouteGeometry};
use crate::engine::RouteProvider;

use super::error::RouteError;
use super::grid_key;

/// In-memory routing provider with per-stop overrides.
#[derive(Debug, Clone, Default)]
pub struct MockRoutes {
    base: Option<RouteGeometry>,
    stops: HashMap<(i64, i64), Result<DetourLegs, String>>,
}

impl MockRoutes {
    /// Straight-line base route between the two points; stops default to
    /// straight-line legs unless scripted.
    pub fn straight(origin: Point, destination: Point) -> Self {
        Self {
            base: Some(RouteGeometry::straight_line(origin, destination)),
            stops: HashMap::new(),
        }
    }

    /// Use an explicit base route geometry.
    pub fn with_base(base: RouteGeometry) -> Self {
        Self {
            base: Some(base),
            stops: HashMap::new(),
        }
    }

    /// Script the legs returned for a detour through `stop`.
    pub fn stop_ok(mut self, stop: Point, legs: DetourLegs) -> Self {
        self.stops.insert(grid_key(stop), Ok(legs));
        self
    }

    /// Script a routing failure for a detour through `stop`.
    pub fn stop_fails(mut self, stop: Point, message: impl Into<String>) -> Self {
        self.stops.insert(grid_key(stop), Err(message.into()));
        self
    }
}

impl RouteProvider for MockRoutes {
    fn compute_route(
        &self,
        origin: Point,
        destination: Point,
    ) -> impl Future<Output = Result<RouteGeometry, RouteError>> + Send {
        let result = match &self.base {
            Some(base) => Ok(base.clone()),
            None => Ok(RouteGeometry::straight_line(origin, destination)),
        };
        std::future::ready(result)
    }

    fn compute_route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> impl Future<Output = Result<DetourLegs, RouteError>> + Send {
        let result = match self.stops.get(&grid_key(stop)) {
            Some(Ok(legs)) => Ok(*legs),
            Some(Err(message)) => Err(RouteError::Api {
                status: 0,
                message: message.clone(),
            }),
            None => Ok(DetourLegs::straight_line(origin, stop, destination)),
        };
        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_failure_wins_over_the_default() {
        let origin = Point::new(40.0, -3.0);
        let dest = Point::new(40.0, -2.0);
        let stop = Point::new(40.0, -2.5);

        let routes = MockRoutes::straight(origin, dest).stop_fails(stop, "no road");

        let err = routes
            .compute_route_with_stop(origin, stop, dest)
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::Api { status: 0, .. }));

        // A different stop still gets the straight-line default
        let other = Point::new(40.0, -2.6);
        let legs = routes
            .compute_route_with_stop(origin, other, dest)
            .await
            .unwrap();
        assert!(legs.total_km > 0.0);
    }
}
