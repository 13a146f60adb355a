//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::ScoringStrategy;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub scorer: ScoringStrategy,
    pub crops: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let crops = state.store.lock().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        scorer: state.scorer.strategy(),
        crops,
    })
}
