//! Address geocoding via Nominatim.
//!
//! Search requests may name their endpoints by free-text address instead of
//! coordinates. This module resolves those through the public Nominatim
//! instance, which requires an identifying User-Agent and returns latitudes
//! and longitudes as JSON strings.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Point;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("fuel-server/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no result for address: {0}")]
    NoResult(String),

    #[error("geocoder returned unusable coordinates for: {0}")]
    InvalidCoordinates(String),

    #[error("address is empty")]
    EmptyAddress,
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Nominatim search client.
#[derive(Debug, Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new() -> Result<Self, GeocodeError> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point at a different Nominatim instance (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Resolve a free-text address to coordinates.
    ///
    /// Takes the first hit. Coordinates that parse but fail the usability
    /// checks (out of range, the null-island sentinel) are rejected rather
    /// than passed downstream.
    pub async fn geocode(&self, address: &str) -> Result<Point, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let hits: Vec<NominatimHit> = self
            .http
            .get(&self.base_url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))?;

        let point = parse_hit(&hit)
            .ok_or_else(|| GeocodeError::InvalidCoordinates(address.to_string()))?;
        Ok(point)
    }
}

fn parse_hit(hit: &NominatimHit) -> Option<Point> {
    let lat = hit.lat.parse::<f64>().ok()?;
    let lng = hit.lon.parse::<f64>().ok()?;
    let point = Point::new(lat, lng);
    point.is_usable().then_some(point)
}
