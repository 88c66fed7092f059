//! Offline dataset loading for development and tests.
//!
//! Reads a saved copy of the price feed from disk, in the exact wire format
//! the live endpoint serves, so mock mode exercises the same parsing path.

use std::path::Path;
use std::sync::Arc;

use crate::domain::Station;

use super::client::parse_price_list;
use super::error::DatasetError;

/// Load stations from a JSON file in the feed's wire format.
pub fn load_stations(path: impl AsRef<Path>) -> Result<Vec<Arc<Station>>, DatasetError> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path).map_err(|e| DatasetError::Api {
        status: 0,
        message: format!("Failed to read dataset file {}: {}", path.display(), e),
    })?;

    parse_price_list(&body)
}
