//! Straight-line routing fallback.
//!
//! Used when no routing API key is configured, and for base routes when the
//! API is unreachable. Distances are great-circle, so they understate real
//! driving distances; detour checks stay meaningful because both the base
//! route and the with-stop legs use the same geometry.

use crate::domain::{DetourLegs, Point, RouteGeometry};

use super::error::RouteError;

/// Routes every request as a great-circle chord.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineRoutes;

impl HaversineRoutes {
    pub async fn route(
        &self,
        origin: Point,
        destination: Point,
    ) -> Result<RouteGeometry, RouteError> {
        Ok(RouteGeometry::straight_line(origin, destination))
    }

    pub async fn route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> Result<DetourLegs, RouteError> {
        Ok(DetourLegs::straight_line(origin, stop, destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_legs_are_consistent_with_the_base_route() {
        let origin = Point::new(40.0, -3.0);
        let stop = Point::new(40.2, -2.5);
        let dest = Point::new(40.0, -2.0);

        let routes = HaversineRoutes;
        let base = routes.route(origin, dest).await.unwrap();
        let legs = routes.route_with_stop(origin, stop, dest).await.unwrap();

        // Triangle inequality: going via the stop is never shorter
        assert!(legs.total_km >= base.distance_km);
        assert!(legs.leg1_km > 0.0 && legs.leg1_km < legs.total_km);
    }
}
