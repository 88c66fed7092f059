//! User-selected search filters.

use super::FuelSelection;

/// Primary sort criterion for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Closest to the route first (ties broken by price).
    #[default]
    Distance,
    /// Cheapest first (ties broken by route proximity).
    Price,
}

/// Whether the company list selects or rejects matching stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompanyMode {
    #[default]
    Include,
    Exclude,
}

/// Immutable filter snapshot taken when a search starts.
///
/// A search owns its copy; changing filters mid-search never affects an
/// in-flight search.
#[derive(Debug, Clone)]
pub struct Filters {
    pub fuel: FuelSelection,

    /// Maximum price per litre in EUR. `0.0` means no cap.
    pub max_price: f64,

    /// Normalized company brands to include or exclude. Empty = no company
    /// filtering.
    pub companies: Vec<String>,

    pub company_mode: CompanyMode,

    /// Only keep stations whose schedule does not look closed.
    pub only_open: bool,

    pub sort_by: SortBy,

    /// Maximum real detour in km a stop may add to the trip. `0.0` means no
    /// budget. (In route mode the UI distance slider carries this value, not
    /// a corridor width.)
    pub detour_budget_km: f64,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            fuel: FuelSelection::default(),
            max_price: 0.0,
            companies: Vec::new(),
            company_mode: CompanyMode::Include,
            only_open: false,
            sort_by: SortBy::Distance,
            detour_budget_km: 0.0,
        }
    }
}

impl Filters {
    /// The price cap, if one is configured.
    pub fn price_cap(&self) -> Option<f64> {
        (self.max_price > 0.0).then_some(self.max_price)
    }

    /// The detour budget, if one is configured.
    pub fn detour_budget(&self) -> Option<f64> {
        (self.detour_budget_km.is_finite() && self.detour_budget_km > 0.0)
            .then_some(self.detour_budget_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let f = Filters::default();
        assert_eq!(f.sort_by, SortBy::Distance);
        assert_eq!(f.company_mode, CompanyMode::Include);
        assert!(f.price_cap().is_none());
        assert!(f.detour_budget().is_none());
        assert!(!f.only_open);
    }

    #[test]
    fn zero_means_unbounded() {
        let f = Filters {
            max_price: 0.0,
            detour_budget_km: 0.0,
            ..Filters::default()
        };
        assert!(f.price_cap().is_none());
        assert!(f.detour_budget().is_none());
    }

    #[test]
    fn positive_caps_are_reported() {
        let f = Filters {
            max_price: 1.60,
            detour_budget_km: 12.0,
            ..Filters::default()
        };
        assert_eq!(f.price_cap(), Some(1.60));
        assert_eq!(f.detour_budget(), Some(12.0));
    }

    #[test]
    fn non_finite_detour_budget_is_ignored() {
        let f = Filters {
            detour_budget_km: f64::INFINITY,
            ..Filters::default()
        };
        assert!(f.detour_budget().is_none());
    }
}
