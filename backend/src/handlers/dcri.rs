//! HTTP handlers for crop listings and DCRI revision

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use shared::{CropRecord, GpsCoordinates};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{CropListing, CropTypePolicy, ListingOutcome, ListingService, RevisionUpdate};
use crate::AppState;

/// Listing submission body
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitListingRequest {
    #[validate(length(max = 128))]
    pub crop_id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub crop_name: String,
    /// Estimated diseased fraction (0-1); out-of-range values are clamped
    pub disease_fraction: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<SubmitListingRequest> for CropListing {
    fn from(request: SubmitListingRequest) -> Self {
        CropListing {
            crop_id: request.crop_id,
            crop_name: request.crop_name,
            disease_fraction: request.disease_fraction,
            location: GpsCoordinates::new(request.latitude, request.longitude),
        }
    }
}

/// Score a crop listing
pub async fn submit_listing(
    State(state): State<AppState>,
    Json(request): Json<SubmitListingRequest>,
) -> AppResult<Json<ListingOutcome>> {
    request.validate()?;

    let policy = CropTypePolicy::from_strict(state.config.scoring.strict_crop_types);
    let mut store = state.store.lock().await;
    let outcome = ListingService::new(
        &mut *store,
        &state.weather,
        &state.soil,
        state.scorer.as_ref(),
        policy,
    )
    .submit(request.into())
    .await?;

    Ok(Json(outcome))
}

/// List all stored crops
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropRecord>> {
    let store = state.store.lock().await;
    Json(store.get_all().into_iter().cloned().collect())
}

/// Get a stored crop by identifier
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<CropRecord>> {
    let store = state.store.lock().await;
    store
        .get(&crop_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Crop {}", crop_id)))
}

/// Run the daily revision immediately
pub async fn trigger_daily_revision(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RevisionUpdate>>> {
    let updates = state.run_daily_revision().await?;
    Ok(Json(updates))
}
