//! Dynamic Crop Risk Index (DCRI) models and the reference heuristic
//!
//! The alpha score sums three independently capped components:
//! - disease: fraction × 400, range 0-400
//! - climate: deviation from 25°C / 60% humidity plus rainfall above 30mm, capped at 300
//! - soil: deviation from pH 6.5 / 50% moisture, capped at 300

use serde::{Deserialize, Serialize};

use super::{CropType, SoilSnapshot, WeatherSnapshot};
use crate::validation::clamp_disease_fraction;

pub const ALPHA_MAX: u16 = 1000;

pub const DISEASE_WEIGHT: f64 = 400.0;
pub const CLIMATE_CAP: f64 = 300.0;
pub const SOIL_CAP: f64 = 300.0;

// Comfort bands
pub const COMFORT_TEMPERATURE_C: f64 = 25.0;
pub const COMFORT_HUMIDITY_PERCENT: f64 = 60.0;
pub const RAINFALL_STRESS_THRESHOLD_MM: f64 = 30.0;
pub const COMFORT_SOIL_PH: f64 = 6.5;
pub const COMFORT_SOIL_MOISTURE_PERCENT: f64 = 50.0;

/// Region risk factor fed to the learned model; the listing flow has no
/// regional data so it is fixed.
pub const DEFAULT_REGION_RISK: f64 = 0.5;

pub const DCRI_FEATURE_COUNT: usize = 8;

/// Crop risk score in [0, 1000]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AlphaScore(u16);

impl AlphaScore {
    pub const MIN: AlphaScore = AlphaScore(0);
    pub const MAX: AlphaScore = AlphaScore(ALPHA_MAX);

    /// Round a raw score and clamp it into [0, 1000]. Non-finite input maps to 0.
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() {
            return AlphaScore::MIN;
        }
        AlphaScore(raw.round().clamp(0.0, ALPHA_MAX as f64) as u16)
    }

    /// Scale a fractional alpha in [0, 1] to the 0-1000 range
    pub fn from_fraction(alpha: f64) -> Self {
        Self::from_raw(alpha * ALPHA_MAX as f64)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for AlphaScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, ALPHA_MAX)
    }
}

/// Per-component view of a heuristic DCRI calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DcriBreakdown {
    pub disease_component: f64,
    pub climate_component: f64,
    pub soil_component: f64,
    pub alpha_score: AlphaScore,
}

pub fn disease_component(disease_fraction: f64) -> f64 {
    clamp_disease_fraction(disease_fraction) * DISEASE_WEIGHT
}

pub fn climate_component(weather: &WeatherSnapshot) -> f64 {
    let temp_stress = (weather.temperature - COMFORT_TEMPERATURE_C).abs() * 5.0;
    let humidity_stress = (weather.humidity - COMFORT_HUMIDITY_PERCENT).abs() * 2.0;
    let rainfall_stress = (weather.rainfall - RAINFALL_STRESS_THRESHOLD_MM).max(0.0) * 3.0;

    (temp_stress + humidity_stress + rainfall_stress).min(CLIMATE_CAP)
}

pub fn soil_component(soil: &SoilSnapshot) -> f64 {
    let ph_stress = (soil.ph - COMFORT_SOIL_PH).abs() * 50.0;
    let moisture_stress = (soil.moisture - COMFORT_SOIL_MOISTURE_PERCENT).abs() * 3.0;

    (ph_stress + moisture_stress).min(SOIL_CAP)
}

/// Heuristic DCRI with its component breakdown
pub fn calculate_dcri(
    disease_fraction: f64,
    weather: &WeatherSnapshot,
    soil: &SoilSnapshot,
) -> DcriBreakdown {
    let disease = disease_component(disease_fraction);
    let climate = climate_component(weather);
    let soil_score = soil_component(soil);

    DcriBreakdown {
        disease_component: disease,
        climate_component: climate,
        soil_component: soil_score,
        alpha_score: AlphaScore::from_raw(disease + climate + soil_score),
    }
}

/// Feature vector consumed by learned DCRI models, in training order:
/// crop code, disease %, soil moisture, temperature, humidity, rainfall,
/// soil pH, region risk factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcriFeatures(pub [f64; DCRI_FEATURE_COUNT]);

impl DcriFeatures {
    /// Position of the disease percentage feature
    pub const DISEASE_INDEX: usize = 1;

    pub fn new(
        crop_type: CropType,
        disease_fraction: f64,
        weather: &WeatherSnapshot,
        soil: &SoilSnapshot,
    ) -> Self {
        DcriFeatures([
            crop_type.code() as f64,
            clamp_disease_fraction(disease_fraction) * 100.0,
            soil.moisture,
            weather.temperature,
            weather.humidity,
            weather.rainfall,
            soil.ph,
            DEFAULT_REGION_RISK,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
