//! Feature normalization integration tests
//!
//! Tests for upstream reading normalization including:
//! - Defaults for missing or non-finite readings
//! - Idempotence on canonical snapshots

use proptest::prelude::*;
use shared::{normalize, RawSoil, RawWeather, SoilSnapshot, WeatherSnapshot};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Readings shaped like an Open-Meteo response with no rainfall reported
    #[test]
    fn test_partial_weather_reading() {
        let raw = RawWeather {
            temperature: Some(33.84),
            humidity: Some(55.0),
            rainfall: None,
            wind_speed: Some(4.96),
        };
        let (weather, _) = normalize(&raw, &RawSoil::default());

        assert_eq!(weather.temperature, 33.8);
        assert_eq!(weather.rainfall, 10.0);
        assert_eq!(weather.wind_speed, 5.0);
    }

    /// SoilGrids gives pH and nitrogen only
    #[test]
    fn test_partial_soil_reading() {
        let raw = RawSoil {
            ph: Some(6.125),
            nitrogen: Some(18.3),
            ..RawSoil::default()
        };
        let (_, soil) = normalize(&RawWeather::default(), &raw);

        assert_eq!(soil.nitrogen, 18.3);
        assert_eq!(soil.moisture, 50.0);
        assert_eq!(soil.phosphorus, 25.0);
        assert_eq!(soil.potassium, 35.0);
        assert!((soil.ph - 6.13).abs() < 0.011);
    }

    #[test]
    fn test_missing_everything() {
        let (weather, soil) = normalize(&RawWeather::default(), &RawSoil::default());
        assert_eq!(weather, WeatherSnapshot::default());
        assert_eq!(soil, SoilSnapshot::default());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn reading() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(f64::NAN)),
        8 => (-1000.0f64..1000.0).prop_map(Some),
    ]
}

fn raw_weather() -> impl Strategy<Value = RawWeather> {
    (reading(), reading(), reading(), reading()).prop_map(
        |(temperature, humidity, rainfall, wind_speed)| RawWeather {
            temperature,
            humidity,
            rainfall,
            wind_speed,
        },
    )
}

fn raw_soil() -> impl Strategy<Value = RawSoil> {
    (reading(), reading(), reading(), reading(), reading()).prop_map(
        |(ph, moisture, nitrogen, phosphorus, potassium)| RawSoil {
            ph,
            moisture,
            nitrogen,
            phosphorus,
            potassium,
        },
    )
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Normalizing twice gives the same snapshots as normalizing once
        #[test]
        fn prop_normalize_idempotent(weather in raw_weather(), soil in raw_soil()) {
            let (w1, s1) = normalize(&weather, &soil);
            let (w2, s2) = normalize(&w1.into(), &s1.into());
            prop_assert_eq!(w1, w2);
            prop_assert_eq!(s1, s2);
        }

        /// Normalized snapshots never contain NaN or infinity
        #[test]
        fn prop_normalized_values_finite(weather in raw_weather(), soil in raw_soil()) {
            let (w, s) = normalize(&weather, &soil);
            let values = [
                w.temperature, w.humidity, w.rainfall, w.wind_speed,
                s.ph, s.moisture, s.nitrogen, s.phosphorus, s.potassium,
            ];
            prop_assert!(values.iter().all(|v| v.is_finite()));
        }
    }
}
