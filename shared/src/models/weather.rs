//! Weather data models

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 60.0;
pub const DEFAULT_RAINFALL_MM: f64 = 10.0;
pub const DEFAULT_WIND_SPEED_KMH: f64 = 12.0;

/// Normalized weather conditions at a crop location. Every field is always
/// populated; missing upstream values are replaced by the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Precipitation (mm)
    pub rainfall: f64,
    /// Wind speed (km/h)
    pub wind_speed: f64,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_C,
            humidity: DEFAULT_HUMIDITY_PERCENT,
            rainfall: DEFAULT_RAINFALL_MM,
            wind_speed: DEFAULT_WIND_SPEED_KMH,
        }
    }
}

/// Weather readings as delivered by an upstream provider, any of which may
/// be missing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RawWeather {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub rainfall: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

impl From<WeatherSnapshot> for RawWeather {
    fn from(s: WeatherSnapshot) -> Self {
        RawWeather {
            temperature: Some(s.temperature),
            humidity: Some(s.humidity),
            rainfall: Some(s.rainfall),
            wind_speed: Some(s.wind_speed),
        }
    }
}
