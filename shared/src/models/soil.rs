//! Soil data models

use serde::{Deserialize, Serialize};

pub const DEFAULT_SOIL_PH: f64 = 6.5;
pub const DEFAULT_SOIL_MOISTURE_PERCENT: f64 = 50.0;
pub const DEFAULT_NITROGEN: f64 = 30.0;
pub const DEFAULT_PHOSPHORUS: f64 = 25.0;
pub const DEFAULT_POTASSIUM: f64 = 35.0;

/// Normalized topsoil conditions at a crop location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilSnapshot {
    /// pH (0-14)
    pub ph: f64,
    /// Volumetric moisture (%)
    pub moisture: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl Default for SoilSnapshot {
    fn default() -> Self {
        Self {
            ph: DEFAULT_SOIL_PH,
            moisture: DEFAULT_SOIL_MOISTURE_PERCENT,
            nitrogen: DEFAULT_NITROGEN,
            phosphorus: DEFAULT_PHOSPHORUS,
            potassium: DEFAULT_POTASSIUM,
        }
    }
}

/// Soil readings as delivered by an upstream provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RawSoil {
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub moisture: Option<f64>,
    #[serde(default)]
    pub nitrogen: Option<f64>,
    #[serde(default)]
    pub phosphorus: Option<f64>,
    #[serde(default)]
    pub potassium: Option<f64>,
}

impl From<SoilSnapshot> for RawSoil {
    fn from(s: SoilSnapshot) -> Self {
        RawSoil {
            ph: Some(s.ph),
            moisture: Some(s.moisture),
            nitrogen: Some(s.nitrogen),
            phosphorus: Some(s.phosphorus),
            potassium: Some(s.potassium),
        }
    }
}
