//! Crop models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;
use crate::validation::clamp_disease_fraction;

/// Crops supported by the DCRI model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CropType {
    #[default]
    Tomato,
    Potato,
    Pepper,
    Corn,
    Apple,
    Grape,
    Wheat,
    Rice,
    Cotton,
}

impl CropType {
    pub const ALL: [CropType; 9] = [
        CropType::Tomato,
        CropType::Potato,
        CropType::Pepper,
        CropType::Corn,
        CropType::Apple,
        CropType::Grape,
        CropType::Wheat,
        CropType::Rice,
        CropType::Cotton,
    ];

    /// Stable feature code (0-8) used by the learned model
    pub fn code(&self) -> u8 {
        match self {
            CropType::Tomato => 0,
            CropType::Potato => 1,
            CropType::Pepper => 2,
            CropType::Corn => 3,
            CropType::Apple => 4,
            CropType::Grape => 5,
            CropType::Wheat => 6,
            CropType::Rice => 7,
            CropType::Cotton => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CropType::Tomato => "Tomato",
            CropType::Potato => "Potato",
            CropType::Pepper => "Pepper",
            CropType::Corn => "Corn",
            CropType::Apple => "Apple",
            CropType::Grape => "Grape",
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Cotton => "Cotton",
        }
    }

    /// Exact lookup by crop name. Names are case-sensitive, matching the
    /// names the listing clients submit.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|crop| crop.name() == name)
    }

    /// Lookup that falls back to Tomato (code 0) for unknown names.
    ///
    /// Returns the resolved crop and whether the fallback was taken so the
    /// caller can log or reject it.
    pub fn resolve(name: &str) -> (Self, bool) {
        match Self::from_name(name) {
            Some(crop) => (crop, false),
            None => (CropType::default(), true),
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Last known state of a listed crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecord {
    pub crop_id: String,
    pub crop_type: CropType,
    pub location: GpsCoordinates,
    /// Estimated diseased fraction of visible tissue (0-1)
    pub disease_fraction: f64,
    pub last_update: DateTime<Utc>,
}

impl CropRecord {
    pub fn new(
        crop_id: impl Into<String>,
        crop_type: CropType,
        location: GpsCoordinates,
        disease_fraction: f64,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            crop_id: crop_id.into(),
            crop_type,
            location,
            disease_fraction: clamp_disease_fraction(disease_fraction),
            last_update,
        }
    }

    /// Record a new disease estimate. The fraction is clamped to [0, 1].
    pub fn advance(&mut self, disease_fraction: f64, at: DateTime<Utc>) {
        self.disease_fraction = clamp_disease_fraction(disease_fraction);
        self.last_update = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_codes_are_stable() {
        let codes: Vec<u8> = CropType::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_from_name_round_trip() {
        for crop in CropType::ALL {
            assert_eq!(CropType::from_name(crop.name()), Some(crop));
        }
        assert_eq!(CropType::from_name("tomato"), None);
    }

    #[test]
    fn test_unknown_crop_falls_back_to_tomato() {
        let (crop, fallback) = CropType::resolve("Unknown");
        assert_eq!(crop, CropType::Tomato);
        assert_eq!(crop.code(), 0);
        assert!(fallback);

        let (crop, fallback) = CropType::resolve("Rice");
        assert_eq!(crop, CropType::Rice);
        assert!(!fallback);
    }

    #[test]
    fn test_record_clamps_disease_fraction() {
        let now = Utc::now();
        let mut record = CropRecord::new(
            "c1",
            CropType::Corn,
            GpsCoordinates::new(18.79, 98.98),
            1.4,
            now,
        );
        assert_eq!(record.disease_fraction, 1.0);

        record.advance(-0.2, now);
        assert_eq!(record.disease_fraction, 0.0);
    }
}
