//! DCRI scoring integration tests
//!
//! Tests for the heuristic risk index including:
//! - Bounded alpha score for any input
//! - Monotonicity in disease fraction and in climate/soil stress
//! - Comfort-band and extreme-condition reference cases

use proptest::prelude::*;
use shared::{
    calculate_dcri, AlphaScore, CropType, DcriFeatures, SoilSnapshot, WeatherSnapshot,
};

fn weather(temperature: f64, humidity: f64, rainfall: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature,
        humidity,
        rainfall,
        ..WeatherSnapshot::default()
    }
}

fn soil(ph: f64, moisture: f64) -> SoilSnapshot {
    SoilSnapshot {
        ph,
        moisture,
        ..SoilSnapshot::default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Tomato at 20% disease in ideal conditions scores the disease term only
    #[test]
    fn test_comfort_band_reference() {
        let breakdown = calculate_dcri(0.2, &WeatherSnapshot::default(), &SoilSnapshot::default());
        assert_eq!(breakdown.alpha_score.value(), 80);
        assert_eq!(breakdown.climate_component, 0.0);
        assert_eq!(breakdown.soil_component, 0.0);
    }

    /// Every component saturates under extreme stress
    #[test]
    fn test_extreme_conditions_clamp_to_max() {
        let breakdown = calculate_dcri(1.0, &weather(45.0, 100.0, 120.0), &soil(3.0, 5.0));
        assert_eq!(breakdown.disease_component, 400.0);
        assert_eq!(breakdown.climate_component, 300.0);
        assert_eq!(breakdown.soil_component, 300.0);
        assert_eq!(breakdown.alpha_score, AlphaScore::MAX);
    }

    /// Documented boundary case: maximum disease with every reading far outside its band
    #[test]
    fn test_boundary_tuple_scores_max() {
        let breakdown = calculate_dcri(1.0, &weather(100.0, 0.0, 1000.0), &soil(0.0, 100.0));
        assert_eq!(breakdown.climate_component, 300.0);
        assert_eq!(breakdown.soil_component, 300.0);
        assert_eq!(breakdown.alpha_score.value(), 1000);
    }

    /// Rainfall only counts above 30mm
    #[test]
    fn test_rainfall_threshold() {
        let dry = calculate_dcri(0.0, &weather(25.0, 60.0, 30.0), &SoilSnapshot::default());
        assert_eq!(dry.alpha_score.value(), 0);

        let wet = calculate_dcri(0.0, &weather(25.0, 60.0, 40.0), &SoilSnapshot::default());
        assert_eq!(wet.alpha_score.value(), 30);
    }

    /// Mixed stress: |28-25|*5 + |70-60|*2 = 35, |6.0-6.5|*50 + |40-50|*3 = 55
    #[test]
    fn test_component_arithmetic() {
        let breakdown = calculate_dcri(0.5, &weather(28.0, 70.0, 5.0), &soil(6.0, 40.0));
        assert_eq!(breakdown.climate_component, 35.0);
        assert_eq!(breakdown.soil_component, 55.0);
        assert_eq!(breakdown.alpha_score.value(), 290);
    }

    /// Out-of-range disease fractions are clamped, not rejected
    #[test]
    fn test_disease_fraction_clamped() {
        let defaults = (WeatherSnapshot::default(), SoilSnapshot::default());
        assert_eq!(calculate_dcri(-0.3, &defaults.0, &defaults.1).alpha_score.value(), 0);
        assert_eq!(calculate_dcri(2.5, &defaults.0, &defaults.1).alpha_score.value(), 400);
    }

    /// Unknown crops resolve to code 0 without error
    #[test]
    fn test_unknown_crop_code() {
        let (crop, fallback) = CropType::resolve("Dragonfruit");
        assert!(fallback);

        let features = DcriFeatures::new(crop, 0.2, &WeatherSnapshot::default(), &SoilSnapshot::default());
        assert_eq!(features.0[0], 0.0);
        assert_eq!(features.0[DcriFeatures::DISEASE_INDEX], 20.0);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn any_weather() -> impl Strategy<Value = WeatherSnapshot> {
    (-20.0f64..55.0, 0.0f64..100.0, 0.0f64..300.0, 0.0f64..120.0).prop_map(
        |(temperature, humidity, rainfall, wind_speed)| WeatherSnapshot {
            temperature,
            humidity,
            rainfall,
            wind_speed,
        },
    )
}

fn any_soil() -> impl Strategy<Value = SoilSnapshot> {
    (3.0f64..10.0, 0.0f64..100.0).prop_map(|(ph, moisture)| soil(ph, moisture))
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Alpha score is always within [0, 1000], even for wild inputs
        #[test]
        fn prop_alpha_score_bounded(
            fraction in -10.0f64..10.0,
            temperature in -1.0e6f64..1.0e6,
            humidity in -1.0e6f64..1.0e6,
            rainfall in -1.0e6f64..1.0e6,
            soil_state in any_soil(),
        ) {
            let alpha = calculate_dcri(fraction, &weather(temperature, humidity, rainfall), &soil_state).alpha_score;
            prop_assert!(alpha <= AlphaScore::MAX);
        }

        /// Raising the disease fraction never lowers the score
        #[test]
        fn prop_monotonic_in_disease(
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
            weather_state in any_weather(),
            soil_state in any_soil(),
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_alpha = calculate_dcri(low, &weather_state, &soil_state).alpha_score;
            let high_alpha = calculate_dcri(high, &weather_state, &soil_state).alpha_score;
            prop_assert!(low_alpha <= high_alpha);
        }

        /// Moving temperature further from the comfort band never lowers the score
        #[test]
        fn prop_monotonic_in_temperature_deviation(
            deviation in 0.0f64..40.0,
            extra in 0.0f64..20.0,
            above in any::<bool>(),
            fraction in 0.0f64..=1.0,
            soil_state in any_soil(),
        ) {
            let sign = if above { 1.0 } else { -1.0 };
            let near = weather(25.0 + sign * deviation, 60.0, 10.0);
            let far = weather(25.0 + sign * (deviation + extra), 60.0, 10.0);
            prop_assert!(
                calculate_dcri(fraction, &near, &soil_state).alpha_score
                    <= calculate_dcri(fraction, &far, &soil_state).alpha_score
            );
        }

        /// Moving soil pH further from 6.5 never lowers the score
        #[test]
        fn prop_monotonic_in_ph_deviation(
            deviation in 0.0f64..3.5,
            extra in 0.0f64..2.0,
            fraction in 0.0f64..=1.0,
            weather_state in any_weather(),
        ) {
            let near = soil(6.5 + deviation, 50.0);
            let far = soil(6.5 + deviation + extra, 50.0);
            prop_assert!(
                calculate_dcri(fraction, &weather_state, &near).alpha_score
                    <= calculate_dcri(fraction, &weather_state, &far).alpha_score
            );
        }

        /// In the comfort band only the disease term contributes
        #[test]
        fn prop_comfort_band_is_disease_only(
            fraction in 0.0f64..=1.0,
            rainfall in 0.0f64..=30.0,
            wind_speed in 0.0f64..100.0,
        ) {
            let calm = WeatherSnapshot { temperature: 25.0, humidity: 60.0, rainfall, wind_speed };
            let alpha = calculate_dcri(fraction, &calm, &SoilSnapshot::default()).alpha_score;
            prop_assert_eq!(alpha, AlphaScore::from_raw(fraction * 400.0));
        }
    }
}
