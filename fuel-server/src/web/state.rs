//! Application state for the web layer.

use std::sync::Arc;

use crate::dataset::StationCatalog;
use crate::engine::EngineConfig;
use crate::geocode::Geocoder;
use crate::routing::CachedRoutes;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog, refreshed in the background
    pub catalog: StationCatalog,

    /// Cached routing provider
    pub routes: Arc<CachedRoutes>,

    /// Address geocoder
    pub geocoder: Arc<Geocoder>,

    /// Search engine configuration
    pub engine_config: Arc<EngineConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: StationCatalog,
        routes: CachedRoutes,
        geocoder: Geocoder,
        engine_config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            routes: Arc::new(routes),
            geocoder: Arc::new(geocoder),
            engine_config: Arc::new(engine_config),
        }
    }
}
