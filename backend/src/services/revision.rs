//! Daily DCRI revision
//!
//! Walks every stored crop, drifts its disease estimate by a small random
//! step, rescores it against fresh conditions and persists the whole store
//! once at the end. A record that cannot be revised is logged and skipped;
//! the rest of the batch still runs.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use shared::{validate_coordinates, AlphaScore, CropRecord};

use super::conditions::fetch_conditions;
use super::crop_store::CropStore;
use super::scoring::RiskScorer;
use crate::error::AppResult;
use crate::external::{SoilSource, WeatherSource};

/// Largest change in disease fraction applied by one revision
pub const MAX_DAILY_DRIFT: f64 = 0.05;

/// Outcome of revising one crop
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RevisionUpdate {
    pub crop_id: String,
    pub alpha_score: AlphaScore,
    pub timestamp: DateTime<Utc>,
}

/// Revise every crop in `store` and persist the result
pub async fn run_daily_revision<W, S>(
    store: &mut CropStore,
    weather_source: &W,
    soil_source: &S,
    scorer: &dyn RiskScorer,
) -> AppResult<Vec<RevisionUpdate>>
where
    W: WeatherSource,
    S: SoilSource,
{
    let mut rng = StdRng::from_entropy();
    run_daily_revision_with_rng(store, weather_source, soil_source, scorer, &mut rng).await
}

/// [`run_daily_revision`] with a caller-supplied random source
pub async fn run_daily_revision_with_rng<W, S, R>(
    store: &mut CropStore,
    weather_source: &W,
    soil_source: &S,
    scorer: &dyn RiskScorer,
    rng: &mut R,
) -> AppResult<Vec<RevisionUpdate>>
where
    W: WeatherSource,
    S: SoilSource,
    R: Rng + Send,
{
    let started = Instant::now();
    let mut updates = Vec::with_capacity(store.len());
    let mut skipped = 0usize;

    for record in store.records_mut() {
        match revise_record(record, weather_source, soil_source, scorer, rng).await {
            Ok(update) => updates.push(update),
            Err(e) => {
                skipped += 1;
                tracing::warn!(crop_id = %record.crop_id, error = %e, "Skipping crop in daily revision");
            }
        }
    }

    if !updates.is_empty() {
        store.save()?;
    }

    tracing::info!(
        revised = updates.len(),
        skipped,
        strategy = %scorer.strategy(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Daily DCRI revision complete"
    );

    Ok(updates)
}

async fn revise_record<W, S, R>(
    record: &mut CropRecord,
    weather_source: &W,
    soil_source: &S,
    scorer: &dyn RiskScorer,
    rng: &mut R,
) -> AppResult<RevisionUpdate>
where
    W: WeatherSource,
    S: SoilSource,
    R: Rng + Send,
{
    validate_coordinates(&record.location)?;

    let conditions = fetch_conditions(weather_source, soil_source, record.location).await;

    let previous = record.disease_fraction;
    let drift = rng.gen_range(-MAX_DAILY_DRIFT..=MAX_DAILY_DRIFT);
    let timestamp = Utc::now();
    record.advance(previous + drift, timestamp);

    let alpha_score = scorer.score(
        record.crop_type,
        record.disease_fraction,
        &conditions.weather,
        &conditions.soil,
    );

    tracing::debug!(
        crop_id = %record.crop_id,
        previous,
        current = record.disease_fraction,
        alpha = alpha_score.value(),
        "Crop revised"
    );

    Ok(RevisionUpdate {
        crop_id: record.crop_id.clone(),
        alpha_score,
        timestamp,
    })
}
