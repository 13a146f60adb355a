//! Feature normalization
//!
//! Turns partial upstream weather and soil readings into fully populated
//! snapshots. Present, finite values are rounded (one decimal, two for pH);
//! anything else falls back to the documented default.

use crate::models::{RawSoil, RawWeather, SoilSnapshot, WeatherSnapshot};
use crate::types::round_to;

fn field_or(value: Option<f64>, decimals: i32, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => round_to(v, decimals),
        _ => default,
    }
}

pub fn normalize_weather(raw: &RawWeather) -> WeatherSnapshot {
    let defaults = WeatherSnapshot::default();
    WeatherSnapshot {
        temperature: field_or(raw.temperature, 1, defaults.temperature),
        humidity: field_or(raw.humidity, 1, defaults.humidity),
        rainfall: field_or(raw.rainfall, 1, defaults.rainfall),
        wind_speed: field_or(raw.wind_speed, 1, defaults.wind_speed),
    }
}

pub fn normalize_soil(raw: &RawSoil) -> SoilSnapshot {
    let defaults = SoilSnapshot::default();
    SoilSnapshot {
        ph: field_or(raw.ph, 2, defaults.ph),
        moisture: field_or(raw.moisture, 1, defaults.moisture),
        nitrogen: field_or(raw.nitrogen, 1, defaults.nitrogen),
        phosphorus: field_or(raw.phosphorus, 1, defaults.phosphorus),
        potassium: field_or(raw.potassium, 1, defaults.potassium),
    }
}

/// Normalize a weather/soil pair in one call
pub fn normalize(raw_weather: &RawWeather, raw_soil: &RawSoil) -> (WeatherSnapshot, SoilSnapshot) {
    (normalize_weather(raw_weather), normalize_soil(raw_soil))
}
