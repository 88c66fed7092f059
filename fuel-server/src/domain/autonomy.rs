//! Vehicle range model.

/// Default safety reserve kept in the tank, in km.
pub const DEFAULT_RESERVE_KM: f64 = 15.0;

/// The vehicle's remaining range and safety reserve.
///
/// An available range of zero (or anything non-positive / non-finite) means
/// the user did not state a range and autonomy is unlimited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autonomy {
    available_range_km: f64,
    reserve_min_km: f64,
}

impl Autonomy {
    /// Unlimited autonomy: range constraints never reject a candidate.
    pub fn unlimited() -> Self {
        Self {
            available_range_km: 0.0,
            reserve_min_km: DEFAULT_RESERVE_KM,
        }
    }

    /// Limited autonomy with the default safety reserve.
    pub fn limited(available_range_km: f64) -> Self {
        Self {
            available_range_km,
            reserve_min_km: DEFAULT_RESERVE_KM,
        }
    }

    /// Override the safety reserve.
    pub fn with_reserve(mut self, reserve_min_km: f64) -> Self {
        self.reserve_min_km = reserve_min_km;
        self
    }

    pub fn is_unlimited(&self) -> bool {
        !self.available_range_km.is_finite() || self.available_range_km <= 0.0
    }

    pub fn reserve_min_km(&self) -> f64 {
        self.reserve_min_km
    }

    /// Range usable for reaching a station: available minus reserve.
    ///
    /// `None` when autonomy is unlimited. May be non-positive when the
    /// stated range does not even cover the reserve; the engine rejects that
    /// as an input error.
    pub fn usable_range_km(&self) -> Option<f64> {
        if self.is_unlimited() {
            None
        } else {
            Some(self.available_range_km - self.reserve_min_km)
        }
    }
}
