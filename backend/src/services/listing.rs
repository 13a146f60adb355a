//! Crop listing submission
//!
//! Scores a newly listed crop against current conditions and, when the
//! listing carries an identifier, records it for daily revision.

use chrono::Utc;
use serde::Serialize;
use shared::{
    validate_coordinates, AlphaScore, CropRecord, CropType, GpsCoordinates, SoilSnapshot,
    ValidationError, WeatherSnapshot,
};

use super::conditions::fetch_conditions;
use super::crop_store::CropStore;
use super::scoring::RiskScorer;
use crate::error::AppResult;
use crate::external::{SoilSource, WeatherSource};

/// A crop offered for listing
#[derive(Debug, Clone)]
pub struct CropListing {
    /// Absent or blank identifiers are scored but not stored
    pub crop_id: Option<String>,
    pub crop_name: String,
    pub disease_fraction: f64,
    pub location: GpsCoordinates,
}

/// Score and the conditions it was computed from
#[derive(Debug, Clone, Serialize)]
pub struct ListingOutcome {
    pub crop_id: Option<String>,
    pub crop_type: CropType,
    pub alpha_score: AlphaScore,
    pub weather: WeatherSnapshot,
    pub soil: SoilSnapshot,
    pub stored: bool,
}

/// How unknown crop names are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropTypePolicy {
    /// Score as Tomato and log a warning
    Lenient,
    /// Reject the listing
    Strict,
}

impl CropTypePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            CropTypePolicy::Strict
        } else {
            CropTypePolicy::Lenient
        }
    }

    fn resolve(self, crop_name: &str) -> Result<CropType, ValidationError> {
        let (crop_type, fallback) = CropType::resolve(crop_name);
        if !fallback {
            return Ok(crop_type);
        }
        match self {
            CropTypePolicy::Strict => Err(ValidationError::UnknownCropType(crop_name.to_string())),
            CropTypePolicy::Lenient => {
                tracing::warn!(crop_name, "Unknown crop type, scoring as {}", crop_type);
                Ok(crop_type)
            }
        }
    }
}

/// Listing workflow over a shared store and condition sources
pub struct ListingService<'a, W, S> {
    store: &'a mut CropStore,
    weather_source: &'a W,
    soil_source: &'a S,
    scorer: &'a dyn RiskScorer,
    policy: CropTypePolicy,
}

impl<'a, W: WeatherSource, S: SoilSource> ListingService<'a, W, S> {
    pub fn new(
        store: &'a mut CropStore,
        weather_source: &'a W,
        soil_source: &'a S,
        scorer: &'a dyn RiskScorer,
        policy: CropTypePolicy,
    ) -> Self {
        Self {
            store,
            weather_source,
            soil_source,
            scorer,
            policy,
        }
    }

    /// Score a listing and persist it when it carries an identifier
    pub async fn submit(self, listing: CropListing) -> AppResult<ListingOutcome> {
        validate_coordinates(&listing.location)?;
        let crop_type = self.policy.resolve(&listing.crop_name)?;

        let crop_id = listing
            .crop_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let conditions =
            fetch_conditions(self.weather_source, self.soil_source, listing.location).await;

        let record = CropRecord::new(
            crop_id.clone().unwrap_or_default(),
            crop_type,
            listing.location,
            listing.disease_fraction,
            Utc::now(),
        );
        let alpha_score = self.scorer.score(
            crop_type,
            record.disease_fraction,
            &conditions.weather,
            &conditions.soil,
        );

        let stored = crop_id.is_some();
        if stored {
            self.store.upsert(record)?;
            self.store.save()?;
        }

        tracing::info!(
            crop_id = crop_id.as_deref().unwrap_or("-"),
            crop = %crop_type,
            alpha = alpha_score.value(),
            stored,
            "Crop listing scored"
        );

        Ok(ListingOutcome {
            crop_id,
            crop_type,
            alpha_score,
            weather: conditions.weather,
            soil: conditions.soil,
            stored,
        })
    }
}
