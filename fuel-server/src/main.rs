use std::net::SocketAddr;
use std::time::Duration;

use fuel_server::dataset::{DatasetClient, DatasetClientConfig, StationCatalog};
use fuel_server::engine::EngineConfig;
use fuel_server::geocode::Geocoder;
use fuel_server::routing::{
    CachedRoutes, GoogleRoutesConfig, RouteCacheConfig, Routing,
};
use fuel_server::web::{AppState, create_router};

/// How often to refresh the price dataset (30 minutes, the feed's cadence).
const DATASET_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Pick the routing backend from the environment
    let routing = match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(key) if !key.is_empty() => Routing::google(GoogleRoutesConfig::new(key))
            .expect("Failed to create routing client"),
        _ => {
            eprintln!(
                "Warning: GOOGLE_MAPS_API_KEY not set. Routes will be straight-line estimates."
            );
            Routing::haversine()
        }
    };
    let routes = CachedRoutes::new(routing, &RouteCacheConfig::default());

    let geocoder = Geocoder::new().expect("Failed to create geocoder");

    // Fetch the price dataset (fail fast if unavailable)
    println!("Fetching fuel price dataset...");
    let dataset_client = DatasetClient::new(DatasetClientConfig::default())
        .expect("Failed to create dataset client");
    let catalog = StationCatalog::fetch(dataset_client)
        .await
        .expect("Failed to fetch fuel price dataset");
    println!("Loaded {} stations", catalog.len().await);

    // Spawn background task to refresh prices on the feed's cadence
    let catalog_refresh = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(DATASET_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.refresh().await {
                Ok(count) => println!("Refreshed dataset: {} stations", count),
                Err(e) => eprintln!("Failed to refresh dataset: {}", e),
            }
        }
    });

    // Build app state
    let state = AppState::new(catalog, routes, geocoder, EngineConfig::default());

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Fuel route search listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health            - Health check");
    println!("  GET  /api/companies     - Companies in the dataset");
    println!("  POST /api/route/search  - Search stations along a route");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
