//! Government fuel price dataset client and station catalog.
//!
//! The full nationwide station list is fetched at startup and refreshed
//! periodically; searches run against an in-memory snapshot.

mod catalog;
mod client;
mod error;
mod mock;

pub use catalog::StationCatalog;
pub use client::{DatasetClient, DatasetClientConfig, StationDto};
pub use error::DatasetError;
pub use mock::load_stations;
