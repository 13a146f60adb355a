//! WebAssembly module for the FarmFlow crop risk platform
//!
//! Provides client-side computation for:
//! - DCRI (alpha score) previews before a listing is submitted
//! - Weather/soil normalization
//! - Crop type code lookup

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::normalization::*;
pub use shared::types::*;

/// Crop type code used by the learned model; unknown names map to 0 (Tomato)
#[wasm_bindgen]
pub fn crop_type_code(crop_name: &str) -> u8 {
    CropType::resolve(crop_name).0.code()
}

/// Heuristic alpha score from raw readings.
///
/// `weather_json` and `soil_json` may omit any field; missing values take the
/// same defaults the server applies.
#[wasm_bindgen]
pub fn calculate_alpha_score(
    disease_fraction: f64,
    weather_json: &str,
    soil_json: &str,
) -> Result<u16, JsValue> {
    let (weather, soil) = parse_readings(weather_json, soil_json)?;
    Ok(calculate_dcri(disease_fraction, &weather, &soil)
        .alpha_score
        .value())
}

#[derive(Serialize)]
struct NormalizedReadings {
    weather: WeatherSnapshot,
    soil: SoilSnapshot,
    breakdown: DcriBreakdown,
}

/// Normalize raw readings and return them with the DCRI breakdown as JSON
#[wasm_bindgen]
pub fn preview_dcri(
    disease_fraction: f64,
    weather_json: &str,
    soil_json: &str,
) -> Result<String, JsValue> {
    let (weather, soil) = parse_readings(weather_json, soil_json)?;
    let preview = NormalizedReadings {
        weather,
        soil,
        breakdown: calculate_dcri(disease_fraction, &weather, &soil),
    };

    serde_json::to_string(&preview)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode preview: {}", e)))
}

fn parse_readings(
    weather_json: &str,
    soil_json: &str,
) -> Result<(WeatherSnapshot, SoilSnapshot), JsValue> {
    let raw_weather: RawWeather = serde_json::from_str(weather_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))?;
    let raw_soil: RawSoil = serde_json::from_str(soil_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid soil JSON: {}", e)))?;

    Ok(normalize(&raw_weather, &raw_soil))
}
