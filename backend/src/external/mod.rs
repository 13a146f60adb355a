//! External API integrations
//!
//! Weather and soil providers are consumed through the [`WeatherSource`] and
//! [`SoilSource`] traits so the listing flow and the daily revision can be
//! driven by any provider (or a test double).

use std::future::Future;

use shared::{GpsCoordinates, RawSoil, RawWeather};

use crate::error::AppResult;

pub mod soil;
pub mod weather;

pub use soil::SoilGridsClient;
pub use weather::OpenMeteoClient;

/// Current weather readings for a location
pub trait WeatherSource: Send + Sync {
    fn fetch_weather(
        &self,
        location: GpsCoordinates,
    ) -> impl Future<Output = AppResult<RawWeather>> + Send;
}

/// Topsoil readings for a location
pub trait SoilSource: Send + Sync {
    fn fetch_soil(&self, location: GpsCoordinates)
        -> impl Future<Output = AppResult<RawSoil>> + Send;
}
