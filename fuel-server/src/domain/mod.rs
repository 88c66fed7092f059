//! Domain types for the fuel-station route search.
//!
//! Core value types shared by the engine and the provider clients. Station
//! records are read-only once loaded; per-search derived data lives in the
//! engine's own wrapper types.

mod autonomy;
pub mod company;
mod filter;
mod point;
mod route;
mod station;

pub use autonomy::{Autonomy, DEFAULT_RESERVE_KM};
pub use company::{belongs_to_company, normalize_company};
pub use filter::{CompanyMode, Filters, SortBy};
pub use point::{EARTH_RADIUS_KM, Point};
pub use route::{DetourLegs, RouteGeometry};
pub use station::{FuelPrices, FuelSelection, FuelType, Station};
