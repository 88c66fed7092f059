use thiserror::Error;

use crate::geo::PolylineError;

/// Failures while computing driving routes.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no route found between the given points")]
    NoRoute,

    #[error("malformed route polyline: {0}")]
    Polyline(#[from] PolylineError),
}
