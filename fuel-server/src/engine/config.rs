//! Engine configuration.

/// Tunable constants of the route-corridor search engine.
///
/// Defaults reproduce production behavior; tests inject extreme values
/// (corridor radius 0, reserve cap 1) to probe edge cases.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lateral corridor half-width around the route, in km. Fixed; the
    /// user-facing distance slider is the detour budget, not this.
    pub corridor_radius_km: f64,

    /// Route downsampling step for corridor/proximity checks, in km.
    pub sample_step_km: f64,

    /// Maximum reserve candidates kept per bucket.
    pub reserve_cap: usize,

    /// Confirmed stations per bucket before moving on.
    pub confirmations_per_bucket: usize,

    /// Fixed fuel consumption used for detour cost, in litres per 100 km.
    pub consumption_l_per_100km: f64,

    /// Bucket interval is `base_distance / interval_divisor`, clamped below.
    pub interval_divisor: f64,

    /// Lower clamp for the bucket interval, in km.
    pub interval_min_km: f64,

    /// Upper clamp for the bucket interval, in km.
    pub interval_max_km: f64,

    /// With limited autonomy the interval is additionally capped to
    /// `usable_range / range_interval_divisor`.
    pub range_interval_divisor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corridor_radius_km: 7.0,
            sample_step_km: 1.5,
            reserve_cap: 6,
            confirmations_per_bucket: 2,
            consumption_l_per_100km: 6.0,
            interval_divisor: 12.0,
            interval_min_km: 15.0,
            interval_max_km: 60.0,
            range_interval_divisor: 3.0,
        }
    }
}

impl EngineConfig {
    /// Set the corridor radius.
    pub fn with_corridor_radius(mut self, km: f64) -> Self {
        self.corridor_radius_km = km;
        self
    }

    /// Set the per-bucket reserve cap.
    pub fn with_reserve_cap(mut self, cap: usize) -> Self {
        self.reserve_cap = cap;
        self
    }

    /// Set the per-bucket confirmation target.
    pub fn with_confirmations_per_bucket(mut self, n: usize) -> Self {
        self.confirmations_per_bucket = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.corridor_radius_km, 7.0);
        assert_eq!(config.sample_step_km, 1.5);
        assert_eq!(config.reserve_cap, 6);
        assert_eq!(config.confirmations_per_bucket, 2);
        assert_eq!(config.consumption_l_per_100km, 6.0);
        assert_eq!(config.interval_min_km, 15.0);
        assert_eq!(config.interval_max_km, 60.0);
    }

    #[test]
    fn builders_override_fields() {
        let config = EngineConfig::default()
            .with_corridor_radius(0.0)
            .with_reserve_cap(1)
            .with_confirmations_per_bucket(1);

        assert_eq!(config.corridor_radius_km, 0.0);
        assert_eq!(config.reserve_cap, 1);
        assert_eq!(config.confirmations_per_bucket, 1);
    }
}
