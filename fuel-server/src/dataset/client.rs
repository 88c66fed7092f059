//! Client for the Spanish government fuel price dataset.
//!
//! The Ministry publishes every road-side fuel station in the country as one
//! JSON document, refreshed every half hour. The feed has some quirks the
//! DTO layer absorbs: accented Spanish field names, decimal commas in both
//! prices and coordinates, empty strings for products a station does not
//! sell, and an occasional UTF-8 BOM in front of the body.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{FuelPrices, Point, Station};

use super::error::DatasetError;

/// Default base URL for the price dataset.
const DEFAULT_BASE_URL: &str =
    "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes";

/// Wrapper for the price list response.
#[derive(Debug, Deserialize)]
pub struct PriceListResponse {
    #[serde(rename = "ListaEESSPrecio", default)]
    pub stations: Vec<StationDto>,
}

/// One station as published by the feed. All fields arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    #[serde(rename = "IDEESS", default)]
    pub id: String,
    #[serde(rename = "Rótulo", default)]
    pub name: String,
    #[serde(rename = "Dirección", default)]
    pub address: String,
    #[serde(rename = "Municipio", default)]
    pub municipality: String,
    #[serde(rename = "Provincia", default)]
    pub province: String,
    #[serde(rename = "C.P.", default)]
    pub postal_code: String,
    #[serde(rename = "Latitud", default)]
    pub latitude: String,
    #[serde(rename = "Longitud (WGS84)", default)]
    pub longitude: String,
    #[serde(rename = "Horario", default)]
    pub schedule: String,
    #[serde(rename = "Precio Gasolina 95 E5", default)]
    pub price_gasoline_95: String,
    #[serde(rename = "Precio Gasolina 98 E5", default)]
    pub price_gasoline_98: String,
    #[serde(rename = "Precio Gasóleo A", default)]
    pub price_diesel_a: String,
    #[serde(rename = "Precio Gasóleo Premium", default)]
    pub price_diesel_premium: String,
    #[serde(rename = "Precio Gases licuados del petróleo", default)]
    pub price_lpg: String,
}

impl StationDto {
    /// Convert to the domain type.
    ///
    /// Returns `None` when the coordinates are missing or unusable; such
    /// rows cannot take part in any geometric query.
    pub fn into_station(self) -> Option<Station> {
        let lat = parse_decimal(&self.latitude)?;
        let lng = parse_decimal(&self.longitude)?;
        let location = Point::new(lat, lng);
        if !location.is_usable() {
            return None;
        }

        let prices = FuelPrices {
            gasoline_95: parse_decimal(&self.price_gasoline_95).unwrap_or(0.0),
            gasoline_98: parse_decimal(&self.price_gasoline_98).unwrap_or(0.0),
            diesel_a: parse_decimal(&self.price_diesel_a).unwrap_or(0.0),
            diesel_premium: parse_decimal(&self.price_diesel_premium).unwrap_or(0.0),
            lpg: parse_decimal(&self.price_lpg).unwrap_or(0.0),
        };

        Some(Station {
            id: self.id,
            name: self.name.trim().to_string(),
            address: self.address,
            municipality: self.municipality,
            province: self.province,
            postal_code: self.postal_code,
            location,
            schedule: self.schedule,
            prices,
        })
    }
}

/// Parse a feed decimal: comma as decimal separator, surrounding whitespace,
/// and empty or "N/A" meaning absent.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Configuration for the dataset client.
#[derive(Debug, Clone)]
pub struct DatasetClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DatasetClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl DatasetClientConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the government price dataset. No authentication; the feed is
/// public.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    base_url: String,
}

impl DatasetClient {
    pub fn new(config: DatasetClientConfig) -> Result<Self, DatasetError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the full nationwide station list.
    ///
    /// Rows with unusable coordinates are dropped here so the rest of the
    /// system only ever sees mappable stations.
    pub async fn fetch_all(&self) -> Result<Vec<Arc<Station>>, DatasetError> {
        let url = format!("{}/EstacionesTerrestres/", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DatasetError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_price_list(&body)
    }
}

/// Parse the feed body, tolerating a leading BOM.
pub(crate) fn parse_price_list(body: &str) -> Result<Vec<Arc<Station>>, DatasetError> {
    let body = body.trim_start_matches('\u{feff}');

    let response: PriceListResponse =
        serde_json::from_str(body).map_err(|e| DatasetError::Json {
            message: e.to_string(),
        })?;

    Ok(response
        .stations
        .into_iter()
        .filter_map(|dto| dto.into_station().map(Arc::new))
        .collect())
}
