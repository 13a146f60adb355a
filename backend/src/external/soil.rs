//! Soil API client
//!
//! Integrates with ISRIC SoilGrids v2.0 for topsoil (0-5cm) pH and nitrogen.
//! SoilGrids has no moisture or P/K layers; those readings are left empty
//! for the normalizer to default.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, RawSoil};

use super::SoilSource;
use crate::error::{AppError, AppResult};

const PROPERTIES: &str = "nitrogen,phh2o,cec";
const DEPTH: &str = "0-5cm";

/// SoilGrids API client
#[derive(Clone)]
pub struct SoilGridsClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SoilGridsResponse {
    #[serde(default)]
    properties: SoilGridsProperties,
}

#[derive(Debug, Default, Deserialize)]
struct SoilGridsProperties {
    #[serde(default)]
    layers: Vec<SoilGridsLayer>,
}

#[derive(Debug, Deserialize)]
struct SoilGridsLayer {
    name: String,
    #[serde(default)]
    depths: Vec<SoilGridsDepth>,
}

#[derive(Debug, Deserialize)]
struct SoilGridsDepth {
    #[serde(default)]
    values: SoilGridsValues,
}

#[derive(Debug, Default, Deserialize)]
struct SoilGridsValues {
    mean: Option<f64>,
}

impl SoilGridsLayer {
    fn top_mean(&self) -> Option<f64> {
        self.depths.first().and_then(|d| d.values.mean)
    }
}

impl SoilGridsClient {
    /// Create a new client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build soil client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch topsoil properties by GPS coordinates
    pub async fn get_soil_properties(&self, location: GpsCoordinates) -> AppResult<RawSoil> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lon", location.longitude.to_string()),
                ("lat", location.latitude.to_string()),
                ("property", PROPERTIES.to_string()),
                ("depth", DEPTH.to_string()),
                ("value", "mean".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::SoilService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SoilService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let data: SoilGridsResponse = response
            .json()
            .await
            .map_err(|e| AppError::SoilService(format!("Failed to parse response: {}", e)))?;

        Ok(convert_layers(data))
    }
}

impl SoilSource for SoilGridsClient {
    async fn fetch_soil(&self, location: GpsCoordinates) -> AppResult<RawSoil> {
        self.get_soil_properties(location).await
    }
}

/// SoilGrids reports pH×10 (`phh2o`) and nitrogen in cg/kg; both are
/// divided by 10 to land on the scales the scorer expects.
fn convert_layers(data: SoilGridsResponse) -> RawSoil {
    let mut soil = RawSoil::default();

    for layer in &data.properties.layers {
        match layer.name.as_str() {
            "phh2o" => soil.ph = layer.top_mean().map(|v| v / 10.0),
            "nitrogen" => soil.nitrogen = layer.top_mean().map(|v| v / 10.0),
            _ => {}
        }
    }

    soil
}
