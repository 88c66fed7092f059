//! In-memory station catalog.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Station, normalize_company};

use super::client::DatasetClient;
use super::error::DatasetError;

/// Thread-safe snapshot of the nationwide station list.
///
/// Searches take a cheap `Arc` snapshot so a background refresh never blocks
/// or mutates a search in flight.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<Arc<Vec<Arc<Station>>>>>,
    client: DatasetClient,
}

impl StationCatalog {
    /// Create a catalog by fetching the dataset.
    ///
    /// This will fail if the feed is unreachable.
    pub async fn fetch(client: DatasetClient) -> Result<Self, DatasetError> {
        let stations = client.fetch_all().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(stations))),
            client,
        })
    }

    /// Create an empty catalog (for mock/test mode).
    pub fn empty(client: DatasetClient) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Vec::new()))),
            client,
        }
    }

    /// Create a catalog over a pre-loaded station list (for mock/test mode).
    pub fn with_stations(client: DatasetClient, stations: Vec<Arc<Station>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(stations))),
            client,
        }
    }

    /// The current snapshot. Holds no lock after returning.
    pub async fn snapshot(&self) -> Arc<Vec<Arc<Station>>> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Re-fetch the dataset.
    ///
    /// On success, replaces the snapshot. On failure, the existing snapshot
    /// is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, DatasetError> {
        let stations = self.client.fetch_all().await?;
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(stations);

        Ok(count)
    }

    /// Distinct company names present in the catalog, sorted.
    ///
    /// Station signs are mapped onto known brand names; anything unrecognized
    /// keeps its raw sign so small independents still show up.
    pub async fn companies(&self) -> Vec<String> {
        let snapshot = self.snapshot().await;

        let mut names: Vec<String> = snapshot
            .iter()
            .filter_map(|s| {
                let raw = s.name.trim();
                if raw.is_empty() {
                    return None;
                }
                Some(
                    normalize_company(raw)
                        .map(str::to_string)
                        .unwrap_or_else(|| raw.to_string()),
                )
            })
            .collect();

        names.sort();
        names.dedup();
        names
    }
}
