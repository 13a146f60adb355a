//! Weather API client for fetching current conditions
//!
//! Integrates with the Open-Meteo forecast API (free, no API key)

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, RawWeather};

use super::WeatherSource;
use crate::error::{AppError, AppResult};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m";

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// Open-Meteo forecast response (only the `current` block is requested)
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    current: Option<OpenMeteoCurrent>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    precipitation: Option<f64>,
    wind_speed_10m: Option<f64>,
}

impl OpenMeteoClient {
    /// Create a new client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build weather client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch current conditions by GPS coordinates
    pub async fn get_current_weather(&self, location: GpsCoordinates) -> AppResult<RawWeather> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let data: OpenMeteoResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherService(format!("Failed to parse response: {}", e)))?;

        Ok(convert_current(data))
    }
}

impl WeatherSource for OpenMeteoClient {
    async fn fetch_weather(&self, location: GpsCoordinates) -> AppResult<RawWeather> {
        self.get_current_weather(location).await
    }
}

/// Map Open-Meteo's `current` block to raw readings; absent values stay `None`
fn convert_current(data: OpenMeteoResponse) -> RawWeather {
    let current = data.current.unwrap_or_default();
    RawWeather {
        temperature: current.temperature_2m,
        humidity: current.relative_humidity_2m,
        rainfall: current.precipitation,
        wind_speed: current.wind_speed_10m,
    }
}
