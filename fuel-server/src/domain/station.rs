//! Fuel station records and fuel pricing.

use super::Point;

/// Fuel products tracked by the government price feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Gasoline95,
    Gasoline98,
    DieselA,
    DieselPremium,
    Lpg,
}

impl FuelType {
    /// All tracked fuel products.
    pub const ALL: [FuelType; 5] = [
        FuelType::Gasoline95,
        FuelType::Gasoline98,
        FuelType::DieselA,
        FuelType::DieselPremium,
        FuelType::Lpg,
    ];

    /// The label used by the dataset and the UI ("Gasolina 95 E5", ...).
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline95 => "Gasolina 95 E5",
            FuelType::Gasoline98 => "Gasolina 98 E5",
            FuelType::DieselA => "Gasóleo A",
            FuelType::DieselPremium => "Gasóleo Premium",
            FuelType::Lpg => "GLP",
        }
    }

    /// Parse a short API key ("gasolina95", "diesel", ...) into a fuel type.
    pub fn parse_key(key: &str) -> Option<FuelType> {
        match key {
            "gasolina95" => Some(FuelType::Gasoline95),
            "gasolina98" => Some(FuelType::Gasoline98),
            "diesel" => Some(FuelType::DieselA),
            "dieselPremium" => Some(FuelType::DieselPremium),
            "glp" => Some(FuelType::Lpg),
            _ => None,
        }
    }
}

/// The fuel the user is filtering on: one specific product, or any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelSelection {
    /// Any fuel; price comparisons use the cheapest available product.
    Any,
    /// One specific fuel product.
    Only(FuelType),
}

impl Default for FuelSelection {
    fn default() -> Self {
        FuelSelection::Only(FuelType::Gasoline95)
    }
}

/// Per-fuel prices in EUR per litre. `0.0` means the product is not sold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelPrices {
    pub gasoline_95: f64,
    pub gasoline_98: f64,
    pub diesel_a: f64,
    pub diesel_premium: f64,
    pub lpg: f64,
}

impl FuelPrices {
    /// Price for a specific product (`0.0` when not sold).
    pub fn get(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Gasoline95 => self.gasoline_95,
            FuelType::Gasoline98 => self.gasoline_98,
            FuelType::DieselA => self.diesel_a,
            FuelType::DieselPremium => self.diesel_premium,
            FuelType::Lpg => self.lpg,
        }
    }

    /// The cheapest positive price across all products, if any product is sold.
    pub fn min_positive(&self) -> Option<f64> {
        FuelType::ALL
            .iter()
            .map(|f| self.get(*f))
            .filter(|p| *p > 0.0)
            .min_by(f64::total_cmp)
    }

    /// The price relevant to a fuel selection.
    ///
    /// For [`FuelSelection::Any`] this is the cheapest available product.
    /// Returns `0.0` when the station sells nothing that matches.
    pub fn for_selection(&self, selection: FuelSelection) -> f64 {
        match selection {
            FuelSelection::Any => self.min_positive().unwrap_or(0.0),
            FuelSelection::Only(fuel) => self.get(fuel),
        }
    }
}

/// A fuel station as published by the government dataset.
///
/// Stations are read-only once loaded; per-search derived data lives in the
/// engine's candidate wrappers, never on the station itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Dataset station id ("IDEESS").
    pub id: String,

    /// Brand sign on the forecourt ("Rótulo"), e.g. "REPSOL BILBAO".
    pub name: String,

    /// Street address.
    pub address: String,

    pub municipality: String,
    pub province: String,
    pub postal_code: String,

    pub location: Point,

    /// Free-text opening schedule, e.g. "L-D: 24H". Never parsed precisely;
    /// the engine applies a permissive heuristic only.
    pub schedule: String,

    pub prices: FuelPrices,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> FuelPrices {
        FuelPrices {
            gasoline_95: 1.55,
            gasoline_98: 1.72,
            diesel_a: 1.48,
            diesel_premium: 0.0,
            lpg: 0.0,
        }
    }

    #[test]
    fn price_for_specific_fuel() {
        let p = prices();
        assert_eq!(p.get(FuelType::Gasoline95), 1.55);
        assert_eq!(p.get(FuelType::DieselPremium), 0.0);
    }

    #[test]
    fn min_positive_skips_unsold_products() {
        assert_eq!(prices().min_positive(), Some(1.48));
        assert_eq!(FuelPrices::default().min_positive(), None);
    }

    #[test]
    fn selection_any_uses_cheapest() {
        assert_eq!(prices().for_selection(FuelSelection::Any), 1.48);
        assert_eq!(FuelPrices::default().for_selection(FuelSelection::Any), 0.0);
    }

    #[test]
    fn selection_only_uses_that_product() {
        let sel = FuelSelection::Only(FuelType::Gasoline98);
        assert_eq!(prices().for_selection(sel), 1.72);
    }

    #[test]
    fn parse_fuel_keys() {
        assert_eq!(FuelType::parse_key("gasolina95"), Some(FuelType::Gasoline95));
        assert_eq!(FuelType::parse_key("diesel"), Some(FuelType::DieselA));
        assert_eq!(FuelType::parse_key("glp"), Some(FuelType::Lpg));
        assert_eq!(FuelType::parse_key("hydrogen"), None);
    }

    #[test]
    fn labels_match_dataset_wording() {
        assert_eq!(FuelType::Gasoline95.label(), "Gasolina 95 E5");
        assert_eq!(FuelType::DieselA.label(), "Gasóleo A");
    }
}
