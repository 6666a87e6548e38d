use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use metro_planner::alerts::{AlertClient, AlertFeed, CachedAlertClient};
use metro_planner::config::AppConfig;
use metro_planner::planner::spawn_planner;
use metro_planner::stations::{JsonFileStore, StationCatalog, seed};
use metro_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_planner=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Station catalog over the JSON store
    let store = JsonFileStore::new(&config.stations_path);
    info!(path = %store.path().display(), "opening station store");
    let catalog = StationCatalog::new(Arc::new(store));

    // Seed Line 1 on first run, off the request path
    let seeding = catalog.clone();
    tokio::task::spawn_blocking(move || match seeding.seed(&seed::line_one()) {
        Ok(outcome) => info!(?outcome, "station seed finished"),
        Err(e) => warn!(error = %e, "station seed failed"),
    });

    let planner = spawn_planner(config.planner.clone(), catalog.subscribe());

    let alerts = CachedAlertClient::new(AlertClient::new(config.alerts.clone())?, &config.alert_cache);
    let alert_feed = AlertFeed::new();

    let state = AppState::new(catalog, planner, alerts, alert_feed);

    // Initial alert fetch
    let initial = state.clone();
    tokio::spawn(async move {
        initial.alert_feed.reload(initial.alerts.as_ref()).await;
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "metro planner listening");
    info!("GET  /api/stations        - list or search stations");
    info!("GET  /api/alerts          - service alerts");
    info!("GET  /api/route           - current route");
    info!("PUT  /api/route/origin    - select origin");
    info!("PUT  /api/route/destination - select destination");
    info!("POST /api/route/swap      - swap origin and destination");

    axum::serve(listener, app).await?;
    Ok(())
}
