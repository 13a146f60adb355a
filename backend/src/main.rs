//! FarmFlow DCRI Service - Backend Server
//!
//! Scores listed crops with the Dynamic Crop Risk Index and revises every
//! tracked crop once a day against fresh weather and soil readings.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use error::AppResult;
use external::{OpenMeteoClient, SoilGridsClient};
use services::{CropStore, RevisionUpdate, RiskScorer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Every listing and revision goes through this lock
    pub store: Arc<Mutex<CropStore>>,
    pub scorer: Arc<dyn RiskScorer>,
    pub weather: OpenMeteoClient,
    pub soil: SoilGridsClient,
    pub config: Arc<Config>,
}

impl AppState {
    /// Revise all stored crops while holding the store lock
    pub async fn run_daily_revision(&self) -> AppResult<Vec<RevisionUpdate>> {
        let mut store = self.store.lock().await;
        services::run_daily_revision(&mut *store, &self.weather, &self.soil, self.scorer.as_ref())
            .await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmflow_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting FarmFlow DCRI Server");
    tracing::info!("Environment: {}", config.environment);

    let store = CropStore::load(&config.storage.snapshot_path)?;
    if store.is_empty() {
        tracing::info!("No tracked crops yet");
    } else {
        tracing::info!(
            "Loaded {} crops from {}",
            store.len(),
            store.path().display()
        );
    }

    let scorer = services::select_scorer(&config.model);
    tracing::info!("DCRI scorer: {}", scorer.strategy());

    let weather = OpenMeteoClient::new(
        config.weather.api_endpoint.clone(),
        Duration::from_secs(config.weather.timeout_secs),
    )?;
    let soil = SoilGridsClient::new(
        config.soil.api_endpoint.clone(),
        Duration::from_secs(config.soil.timeout_secs),
    )?;

    // Create application state
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        scorer,
        weather,
        soil,
        config: Arc::new(config.clone()),
    };

    services::scheduler::spawn_daily_revision(state.clone(), &config.scheduler);

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "FarmFlow DCRI API v1"
}
