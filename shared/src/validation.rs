//! Validation utilities for FarmFlow inputs
//!
//! Scoring inputs are best-effort: out-of-range disease fractions are
//! clamped rather than rejected. Identifiers and coordinates are checked
//! strictly since they key persisted records and upstream lookups.

use thiserror::Error;

use crate::types::GpsCoordinates;

pub const MAX_CROP_ID_LEN: usize = 128;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("crop identifier must not be empty")]
    EmptyCropId,

    #[error("crop identifier exceeds {} characters", MAX_CROP_ID_LEN)]
    CropIdTooLong,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("unknown crop type: {0}")]
    UnknownCropType(String),
}

impl ValidationError {
    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyCropId | ValidationError::CropIdTooLong => "crop_id",
            ValidationError::LatitudeOutOfRange(_) => "latitude",
            ValidationError::LongitudeOutOfRange(_) => "longitude",
            ValidationError::UnknownCropType(_) => "crop_name",
        }
    }
}

/// Clamp a disease fraction into [0, 1]. NaN is treated as no disease.
pub fn clamp_disease_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

/// Validate a caller-supplied crop identifier
pub fn validate_crop_id(crop_id: &str) -> Result<(), ValidationError> {
    let trimmed = crop_id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCropId);
    }
    if trimmed.chars().count() > MAX_CROP_ID_LEN {
        return Err(ValidationError::CropIdTooLong);
    }
    Ok(())
}

/// Validate WGS84 coordinates
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), ValidationError> {
    let GpsCoordinates {
        latitude,
        longitude,
    } = *coordinates;

    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_disease_fraction() {
        assert_eq!(clamp_disease_fraction(0.35), 0.35);
        assert_eq!(clamp_disease_fraction(-0.1), 0.0);
        assert_eq!(clamp_disease_fraction(1.7), 1.0);
        assert_eq!(clamp_disease_fraction(f64::NAN), 0.0);
        assert_eq!(clamp_disease_fraction(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_validate_crop_id() {
        assert!(validate_crop_id("42").is_ok());
        assert!(validate_crop_id("field-7/tomato").is_ok());
        assert_eq!(validate_crop_id(""), Err(ValidationError::EmptyCropId));
        assert_eq!(validate_crop_id("   "), Err(ValidationError::EmptyCropId));
        assert_eq!(
            validate_crop_id(&"x".repeat(MAX_CROP_ID_LEN + 1)),
            Err(ValidationError::CropIdTooLong)
        );
    }

    #[test]
    fn test_validate_coordinates_valid() {
        let valid = [
            GpsCoordinates::new(18.7883, 98.9853),
            GpsCoordinates::new(-33.86, 151.2),
            GpsCoordinates::new(90.0, -180.0),
        ];
        for coords in valid {
            assert!(validate_coordinates(&coords).is_ok());
        }
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        let err = validate_coordinates(&GpsCoordinates::new(91.0, 10.0)).unwrap_err();
        assert_eq!(err.field(), "latitude");

        let err = validate_coordinates(&GpsCoordinates::new(10.0, 180.5)).unwrap_err();
        assert_eq!(err.field(), "longitude");

        assert!(validate_coordinates(&GpsCoordinates::new(f64::NAN, 0.0)).is_err());
    }
}
