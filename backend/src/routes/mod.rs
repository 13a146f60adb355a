//! Route definitions for the FarmFlow DCRI service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/crop-listings", post(handlers::submit_listing))
        .nest("/crops", crop_routes())
        .nest("/dcri", dcri_routes())
}

/// Stored crop routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/:crop_id", get(handlers::get_crop))
}

/// DCRI revision routes
fn dcri_routes() -> Router<AppState> {
    Router::new().route("/daily-revision", post(handlers::trigger_daily_revision))
}
