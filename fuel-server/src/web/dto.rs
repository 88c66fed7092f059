//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CompanyMode, Filters, FuelSelection, FuelType, Point, SortBy,
};
use crate::engine::{ConfirmedStation, SearchStats};

/// One endpoint of the trip: coordinates, a free-text address, or both.
/// Coordinates win when both are usable.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationDto {
    /// The coordinates carried inline, when they are usable as-is.
    pub fn inline_point(&self) -> Option<Point> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                let p = Point::new(lat, lng);
                p.is_usable().then_some(p)
            }
            _ => None,
        }
    }
}

/// Search filters as sent by clients. String enums are parsed into domain
/// types; unknown values are a 400, not a silent default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FiltersDto {
    /// Fuel key: "gasolina95", "gasolina98", "diesel", "dieselPremium",
    /// "glp", or "any". Defaults to gasolina95.
    pub fuel_type: Option<String>,
    pub max_price: Option<f64>,
    pub companies: Vec<String>,
    /// "include" (default) or "exclude"
    pub company_mode: Option<String>,
    pub only_open: bool,
    /// "distance" (default) or "price"
    pub sort_by: Option<String>,
    pub max_detour_km: Option<f64>,
}

impl FiltersDto {
    pub fn into_filters(self) -> Result<Filters, String> {
        let fuel = match self.fuel_type.as_deref() {
            None => FuelSelection::default(),
            Some("any") => FuelSelection::Any,
            Some(key) => FuelType::parse_key(key)
                .map(FuelSelection::Only)
                .ok_or_else(|| format!("Unknown fuel type: {key}"))?,
        };

        let company_mode = match self.company_mode.as_deref() {
            None | Some("include") => CompanyMode::Include,
            Some("exclude") => CompanyMode::Exclude,
            Some(other) => return Err(format!("Unknown company mode: {other}")),
        };

        let sort_by = match self.sort_by.as_deref() {
            None | Some("distance") => SortBy::Distance,
            Some("price") => SortBy::Price,
            Some(other) => return Err(format!("Unknown sort order: {other}")),
        };

        Ok(Filters {
            fuel,
            max_price: self.max_price.unwrap_or(0.0),
            companies: self.companies,
            company_mode,
            only_open: self.only_open,
            sort_by,
            detour_budget_km: self.max_detour_km.unwrap_or(0.0),
        })
    }
}

/// Request to search for stations along a route.
#[derive(Debug, Deserialize)]
pub struct RouteSearchRequest {
    pub origin: LocationDto,
    pub destination: LocationDto,

    #[serde(default)]
    pub filters: FiltersDto,

    /// Remaining vehicle range in km. Absent, zero, or negative means
    /// unlimited.
    pub available_range_km: Option<f64>,
}

/// Route geometry in the response, as [lat, lng] pairs.
#[derive(Debug, Serialize)]
pub struct RouteDto {
    pub distance_km: f64,
    pub duration_sec: u32,
    pub points: Vec<[f64; 2]>,
}

/// Product prices; products a station does not sell are omitted.
#[derive(Debug, Serialize)]
pub struct PricesDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gasoline_95: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gasoline_98: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diesel_a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diesel_premium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpg: Option<f64>,
}

fn positive(v: f64) -> Option<f64> {
    (v > 0.0).then_some(v)
}

/// A confirmed station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub municipality: String,
    pub province: String,
    pub postal_code: String,
    pub schedule: String,
    pub lat: f64,
    pub lng: f64,
    pub prices: PricesDto,

    /// Lateral distance from the route, km.
    pub distance_to_route_km: f64,
    /// Approximate position along the route, km from the origin.
    pub km_from_origin: f64,

    /// Driving distance origin → station.
    pub detour_leg_km: f64,
    /// Extra driving distance over the direct route.
    pub extra_km: f64,
    /// Fuel burned by the detour.
    pub extra_liters: f64,
    /// Cost of that fuel at the station's own price.
    pub extra_cost: f64,
}

impl From<&ConfirmedStation> for StationResult {
    fn from(c: &ConfirmedStation) -> Self {
        let s = &c.station;
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            address: s.address.clone(),
            municipality: s.municipality.clone(),
            province: s.province.clone(),
            postal_code: s.postal_code.clone(),
            schedule: s.schedule.clone(),
            lat: s.location.lat,
            lng: s.location.lng,
            prices: PricesDto {
                gasoline_95: positive(s.prices.gasoline_95),
                gasoline_98: positive(s.prices.gasoline_98),
                diesel_a: positive(s.prices.diesel_a),
                diesel_premium: positive(s.prices.diesel_premium),
                lpg: positive(s.prices.lpg),
            },
            distance_to_route_km: c.min_distance_to_route_km,
            km_from_origin: c.km_from_origin,
            detour_leg_km: c.detour.leg1_km,
            extra_km: c.detour.extra_km,
            extra_liters: c.extra_liters,
            extra_cost: c.extra_cost,
        }
    }
}

/// How the pipeline narrowed the dataset, for diagnostics.
#[derive(Debug, Serialize)]
pub struct StatsDto {
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

impl From<&SearchStats> for StatsDto {
    fn from(s: &SearchStats) -> Self {
        Self {
            dataset_total: s.dataset_total,
            after_filters: s.after_filters,
            corridor_candidates: s.corridor_candidates,
            range_prefiltered: s.range_prefiltered,
            buckets: s.buckets,
            detours_requested: s.detours_requested,
            confirmed: s.confirmed,
            provider_failures: s.provider_failures,
            rejected_by_autonomy: s.rejected_by_autonomy,
            rejected_by_integrity: s.rejected_by_integrity,
            rejected_by_budget: s.rejected_by_budget,
        }
    }
}

/// Response for a route search.
#[derive(Debug, Serialize)]
pub struct RouteSearchResponse {
    pub route: RouteDto,
    pub stations: Vec<StationResult>,

    /// Present when the search completed but confirmed nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub stats: StatsDto,
}

/// Response for the companies listing.
#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
