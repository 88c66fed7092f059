//! Google Routes API client.
//!
//! Async client for the `computeRoutes` endpoint. Handles authentication,
//! field masking, concurrency limiting, and conversion of responses into
//! domain route types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Semaphore;

use crate::domain::{DetourLegs, Point, RouteGeometry};
use crate::geo::decode_polyline;

use super::error::RouteError;

/// Default base URL for the Routes API.
const DEFAULT_BASE_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Only the fields the engine consumes; keeps responses small.
const FIELD_MASK: &str =
    "routes.distanceMeters,routes.duration,routes.polyline.encodedPolyline,routes.legs.distanceMeters";

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct GoogleRoutesConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GoogleRoutesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteDto {
    #[serde(default)]
    distance_meters: f64,
    #[serde(default)]
    duration: String,
    polyline: Option<PolylineDto>,
    #[serde(default)]
    legs: Vec<LegDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolylineDto {
    encoded_polyline: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegDto {
    #[serde(default)]
    distance_meters: f64,
}

/// Google Routes API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct GoogleRoutesClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl GoogleRoutesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GoogleRoutesConfig) -> Result<Self, RouteError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| RouteError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert("X-Goog-Api-Key", api_key);
        headers.insert("X-Goog-FieldMask", HeaderValue::from_static(FIELD_MASK));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Compute the driving route between two points.
    pub async fn route(
        &self,
        origin: Point,
        destination: Point,
    ) -> Result<RouteGeometry, RouteError> {
        let route = self.compute(origin, None, destination).await?;

        let points = match &route.polyline {
            Some(p) => decode_polyline(&p.encoded_polyline)?,
            None => Vec::new(),
        };

        Ok(RouteGeometry {
            distance_km: route.distance_meters / 1000.0,
            duration_sec: parse_duration_secs(&route.duration),
            points,
        })
    }

    /// Compute the driving route with one intermediate stop.
    ///
    /// The first leg distance comes from the response legs. When the API
    /// omits leg breakdowns, the first leg is approximated by scaling the
    /// total with the straight-line ratio of the two legs.
    pub async fn route_with_stop(
        &self,
        origin: Point,
        stop: Point,
        destination: Point,
    ) -> Result<DetourLegs, RouteError> {
        let route = self.compute(origin, Some(stop), destination).await?;
        let total_km = route.distance_meters / 1000.0;

        let leg1_km = match route.legs.first() {
            Some(leg) if leg.distance_meters > 0.0 => leg.distance_meters / 1000.0,
            _ => {
                let d1 = origin.haversine_km(&stop);
                let d2 = stop.haversine_km(&destination);
                let straight = d1 + d2;
                if straight > 0.0 {
                    total_km * d1 / straight
                } else {
                    0.0
                }
            }
        };

        Ok(DetourLegs { leg1_km, total_km })
    }

    async fn compute(
        &self,
        origin: Point,
        stop: Option<Point>,
        destination: Point,
    ) -> Result<RouteDto, RouteError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RouteError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let mut body = json!({
            "origin": waypoint(origin),
            "destination": waypoint(destination),
            "travelMode": "DRIVE",
        });
        if let Some(stop) = stop {
            body["intermediates"] = json!([waypoint(stop)]);
        }

        let response = self.http.post(&self.base_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ComputeRoutesResponse = response.json().await?;
        parsed.routes.into_iter().next().ok_or(RouteError::NoRoute)
    }
}

fn waypoint(p: Point) -> serde_json::Value {
    json!({
        "location": {
            "latLng": { "latitude": p.lat, "longitude": p.lng }
        }
    })
}

/// Parse an API duration like `"1234s"` into whole seconds.
fn parse_duration_secs(raw: &str) -> u32 {
    raw.strip_suffix('s')
        .and_then(|s| s.parse::<f64>().ok())
        .map(|s| s.round() as u32)
        .unwrap_or(0)
}
