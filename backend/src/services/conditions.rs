//! Current growing conditions for a location
//!
//! Weather and soil are fetched concurrently and normalized. A failed fetch
//! never fails the caller: the missing side is filled with defaults.

use shared::{normalize, GpsCoordinates, RawSoil, RawWeather, SoilSnapshot, WeatherSnapshot};

use crate::external::{SoilSource, WeatherSource};

/// Normalized conditions used to score a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub weather: WeatherSnapshot,
    pub soil: SoilSnapshot,
}

/// Fetch and normalize weather and soil for `location`
pub async fn fetch_conditions<W, S>(weather_source: &W, soil_source: &S, location: GpsCoordinates) -> Conditions
where
    W: WeatherSource,
    S: SoilSource,
{
    let (weather, soil) = tokio::join!(
        weather_source.fetch_weather(location),
        soil_source.fetch_soil(location)
    );

    let raw_weather = weather.unwrap_or_else(|e| {
        tracing::warn!(%location, error = %e, "Weather unavailable, using defaults");
        RawWeather::default()
    });
    let raw_soil = soil.unwrap_or_else(|e| {
        tracing::warn!(%location, error = %e, "Soil data unavailable, using defaults");
        RawSoil::default()
    });

    let (weather, soil) = normalize(&raw_weather, &raw_soil);
    Conditions { weather, soil }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Canned weather and soil sources shared by service tests

    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shared::{GpsCoordinates, RawSoil, RawWeather};

    use crate::error::{AppError, AppResult};
    use crate::external::{SoilSource, WeatherSource};

    /// Returns fixed readings, failing for selected latitudes
    #[derive(Default)]
    pub struct StubWeather {
        pub reading: RawWeather,
        pub failing_latitudes: HashSet<u64>,
        pub calls: AtomicUsize,
    }

    impl StubWeather {
        pub fn failing_at(latitude: f64) -> Self {
            Self {
                failing_latitudes: HashSet::from([latitude.to_bits()]),
                ..Self::default()
            }
        }
    }

    impl WeatherSource for StubWeather {
        async fn fetch_weather(&self, location: GpsCoordinates) -> AppResult<RawWeather> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_latitudes.contains(&location.latitude.to_bits()) {
                return Err(AppError::WeatherService("request timed out".to_string()));
            }
            Ok(self.reading)
        }
    }

    #[derive(Default)]
    pub struct StubSoil {
        pub reading: RawSoil,
        pub fail: bool,
    }

    impl SoilSource for StubSoil {
        async fn fetch_soil(&self, _location: GpsCoordinates) -> AppResult<RawSoil> {
            if self.fail {
                return Err(AppError::SoilService("API returned 503".to_string()));
            }
            Ok(self.reading)
        }
    }
}
