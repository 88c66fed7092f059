//! Static dataset eligibility filtering.
//!
//! First stage of a route search: drop stations that can never match,
//! regardless of geometry — wrong fuel, over the price cap, wrong company,
//! or visibly closed.

use std::sync::Arc;

use crate::domain::{CompanyMode, Filters, FuelSelection, Station, belongs_to_company};

/// Schedule markers that indicate a station is closed or out of service.
const CLOSED_MARKERS: &[&str] = &["cerrad", "clausur", "fuera de servicio"];

/// Keep the stations that pass all static filters.
pub fn filter_dataset(stations: &[Arc<Station>], filters: &Filters) -> Vec<Arc<Station>> {
    stations
        .iter()
        .filter(|s| fuel_and_price_ok(s, filters))
        .filter(|s| company_ok(s, filters))
        .filter(|s| !filters.only_open || is_open_heuristic(&s.schedule))
        .cloned()
        .collect()
}

/// Fuel availability and price-cap check.
///
/// With a specific fuel selected, the station must sell it, under the cap if
/// one is set. With "any", the station must sell something, and the cheapest
/// product must be under the cap.
fn fuel_and_price_ok(station: &Station, filters: &Filters) -> bool {
    match filters.fuel {
        FuelSelection::Any => {
            let Some(min) = station.prices.min_positive() else {
                return false;
            };
            filters.price_cap().is_none_or(|cap| min <= cap)
        }
        FuelSelection::Only(fuel) => {
            let price = station.prices.get(fuel);
            if price <= 0.0 {
                return false;
            }
            filters.price_cap().is_none_or(|cap| price <= cap)
        }
    }
}

/// Company include/exclude check against normalized brands.
///
/// Unbranded independents never normalize, so their raw sign is compared
/// directly; the companies listing advertises those signs verbatim.
fn company_ok(station: &Station, filters: &Filters) -> bool {
    if filters.companies.is_empty() {
        return true;
    }

    let matches_some = filters.companies.iter().any(|selected| {
        belongs_to_company(&station.name, selected)
            || station.name.trim().eq_ignore_ascii_case(selected.trim())
    });

    match filters.company_mode {
        CompanyMode::Include => matches_some,
        CompanyMode::Exclude => !matches_some,
    }
}

/// Best-effort "open now" heuristic over the free-text schedule.
///
/// Deliberately permissive: only an explicit closed marker fails; empty or
/// unparsable schedules pass.
pub(crate) fn is_open_heuristic(schedule: &str) -> bool {
    let lower = schedule.to_lowercase();
    if lower.trim().is_empty() {
        return true;
    }
    !CLOSED_MARKERS.iter().any(|m| lower.contains(m))
}
