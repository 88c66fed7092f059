//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::error;

use crate::domain::Point;
use crate::engine::{Engine, SearchError, SearchRequest};
use crate::geocode::GeocodeError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/companies", get(list_companies))
        .route("/api/route/search", post(search_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the distinct companies in the current catalog.
async fn list_companies(State(state): State<AppState>) -> Json<CompaniesResponse> {
    Json(CompaniesResponse {
        companies: state.catalog.companies().await,
    })
}

/// Search for stations along the route between two locations.
async fn search_route(
    State(state): State<AppState>,
    Json(req): Json<RouteSearchRequest>,
) -> Result<Json<RouteSearchResponse>, AppError> {
    let origin = resolve_location(&state, &req.origin, "origin").await?;
    let destination = resolve_location(&state, &req.destination, "destination").await?;

    let filters = req
        .filters
        .into_filters()
        .map_err(|message| AppError::BadRequest { message })?;

    let autonomy = match req.available_range_km {
        Some(km) if km > 0.0 => crate::domain::Autonomy::limited(km),
        _ => crate::domain::Autonomy::unlimited(),
    };

    let search = SearchRequest {
        origin,
        destination,
        filters,
        autonomy,
    };

    let snapshot = state.catalog.snapshot().await;
    let engine = Engine::with_config(state.routes.as_ref(), (*state.engine_config).clone());
    let result = engine.search(&snapshot, &search).await.map_err(AppError::from)?;

    Ok(Json(RouteSearchResponse {
        route: RouteDto {
            distance_km: result.route.distance_km,
            duration_sec: result.route.duration_sec,
            points: result.route.points.iter().map(|p| [p.lat, p.lng]).collect(),
        },
        stations: result.stations.iter().map(StationResult::from).collect(),
        message: result.no_match.map(|m| m.to_string()),
        stats: StatsDto::from(&result.stats),
    }))
}

/// Coordinates when the request carries usable ones, geocoding otherwise.
async fn resolve_location(
    state: &AppState,
    location: &LocationDto,
    which: &str,
) -> Result<Point, AppError> {
    if let Some(point) = location.inline_point() {
        return Ok(point);
    }

    let address = location
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Missing coordinates or address for {which}"),
        })?;

    state.geocoder.geocode(address).await.map_err(|e| match e {
        GeocodeError::NoResult(addr) => AppError::NotFound {
            message: format!("Could not locate {which}: {addr}"),
        },
        GeocodeError::EmptyAddress | GeocodeError::InvalidCoordinates(_) => {
            AppError::BadRequest {
                message: format!("Unusable {which} location: {e}"),
            }
        }
        GeocodeError::Http(_) => AppError::Internal {
            message: format!("Geocoding failed: {e}"),
        },
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InsufficientAutonomy { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
