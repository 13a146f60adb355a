//! DCRI scoring strategies
//!
//! Two interchangeable scorers sit behind [`RiskScorer`]:
//! - [`HeuristicScorer`]: the reference formula from the shared crate
//! - [`LearnedModelScorer`]: a trained predictor over the 8-feature vector,
//!   falling back to the heuristic for any call the predictor cannot answer
//!
//! The strategy is chosen once at startup by [`select_scorer`].

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{
    calculate_dcri, AlphaScore, CropType, DcriFeatures, SoilSnapshot, WeatherSnapshot,
    DCRI_FEATURE_COUNT,
};

use crate::config::ModelConfig;
use crate::error::{AppError, AppResult};

/// Which strategy a scorer implements
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    Heuristic,
    LearnedModel,
}

impl std::fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringStrategy::Heuristic => write!(f, "heuristic"),
            ScoringStrategy::LearnedModel => write!(f, "learned_model"),
        }
    }
}

/// Maps crop conditions to an alpha score. Implementations are pure and
/// must never fail; any internal error degrades to the heuristic.
pub trait RiskScorer: Send + Sync {
    fn strategy(&self) -> ScoringStrategy;

    fn score(
        &self,
        crop_type: CropType,
        disease_fraction: f64,
        weather: &WeatherSnapshot,
        soil: &SoilSnapshot,
    ) -> AlphaScore;
}

/// Reference heuristic scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl RiskScorer for HeuristicScorer {
    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::Heuristic
    }

    fn score(
        &self,
        _crop_type: CropType,
        disease_fraction: f64,
        weather: &WeatherSnapshot,
        soil: &SoilSnapshot,
    ) -> AlphaScore {
        let breakdown = calculate_dcri(disease_fraction, weather, soil);
        tracing::debug!(
            disease = breakdown.disease_component,
            climate = breakdown.climate_component,
            soil = breakdown.soil_component,
            alpha = breakdown.alpha_score.value(),
            "Heuristic DCRI"
        );
        breakdown.alpha_score
    }
}

/// A trained model returning a fractional alpha (nominally 0-1)
pub trait DcriPredictor: Send + Sync {
    fn predict(&self, features: &DcriFeatures) -> AppResult<f64>;
}

/// Standard-scaled linear model exported as JSON.
///
/// Features are standardized as `(x - mean) / scale` before the dot product.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LinearDcriModel {
    pub feature_means: [f64; DCRI_FEATURE_COUNT],
    pub feature_scales: [f64; DCRI_FEATURE_COUNT],
    pub coefficients: [f64; DCRI_FEATURE_COUNT],
    pub intercept: f64,
}

impl LinearDcriModel {
    /// Load and validate a model artifact
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Model(format!("Cannot read artifact {}: {}", path.display(), e))
        })?;
        let model: LinearDcriModel = serde_json::from_str(&contents).map_err(|e| {
            AppError::Model(format!("Invalid artifact {}: {}", path.display(), e))
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Reject artifacts that cannot produce finite scores or that would
    /// lower the score as disease increases.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(i) = self
            .feature_scales
            .iter()
            .position(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err(AppError::Model(format!(
                "feature scale {} must be positive and finite",
                i
            )));
        }

        let all_finite = self
            .feature_means
            .iter()
            .chain(self.coefficients.iter())
            .all(|v| v.is_finite())
            && self.intercept.is_finite();
        if !all_finite {
            return Err(AppError::Model("non-finite model parameter".to_string()));
        }

        if self.coefficients[DcriFeatures::DISEASE_INDEX] < 0.0 {
            return Err(AppError::Model(
                "disease coefficient must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

impl DcriPredictor for LinearDcriModel {
    fn predict(&self, features: &DcriFeatures) -> AppResult<f64> {
        let alpha = features
            .as_slice()
            .iter()
            .zip(self.feature_means.iter())
            .zip(self.feature_scales.iter())
            .zip(self.coefficients.iter())
            .map(|(((x, mean), scale), coef)| coef * (x - mean) / scale)
            .sum::<f64>()
            + self.intercept;

        if !alpha.is_finite() {
            return Err(AppError::Model(format!(
                "prediction is not finite for {:?}",
                features
            )));
        }
        Ok(alpha)
    }
}

/// Learned-model scorer with heuristic fallback
pub struct LearnedModelScorer<P> {
    predictor: P,
    fallback: HeuristicScorer,
}

impl<P: DcriPredictor> LearnedModelScorer<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            fallback: HeuristicScorer,
        }
    }
}

impl<P: DcriPredictor> RiskScorer for LearnedModelScorer<P> {
    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::LearnedModel
    }

    fn score(
        &self,
        crop_type: CropType,
        disease_fraction: f64,
        weather: &WeatherSnapshot,
        soil: &SoilSnapshot,
    ) -> AlphaScore {
        let features = DcriFeatures::new(crop_type, disease_fraction, weather, soil);

        match self.predictor.predict(&features) {
            Ok(alpha) => {
                let score = AlphaScore::from_fraction(alpha);
                tracing::debug!(alpha, score = score.value(), "Learned DCRI");
                score
            }
            Err(e) => {
                tracing::warn!(error = %e, "DCRI model failed, using heuristic");
                self.fallback
                    .score(crop_type, disease_fraction, weather, soil)
            }
        }
    }
}

/// Choose the scoring strategy from the configured model artifact
pub fn select_scorer(config: &ModelConfig) -> Arc<dyn RiskScorer> {
    let Some(path) = config.artifact_path.as_deref() else {
        tracing::info!("No DCRI model configured, using heuristic scorer");
        return Arc::new(HeuristicScorer);
    };

    match LinearDcriModel::load(path) {
        Ok(model) => {
            tracing::info!("DCRI model loaded from {}", path.display());
            tracing::warn!(
                "Learned DCRI scores are non-decreasing in disease only; climate and soil stress are not guaranteed to raise them"
            );
            Arc::new(LearnedModelScorer::new(model))
        }
        Err(e) => {
            tracing::warn!(error = %e, "DCRI model not available, using heuristic scorer");
            Arc::new(HeuristicScorer)
        }
    }
}
