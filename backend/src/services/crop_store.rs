//! Crop state store
//!
//! In-memory map from crop identifier to its last known state, persisted as
//! a single JSON object that is rewritten wholesale on every save:
//!
//! ```json
//! {"42": {"crop_name": "Tomato", "latitude": 18.78, "longitude": 98.98,
//!         "last_disease_pct": 0.31, "last_update": "2024-06-01T00:00:00.5Z"}}
//! ```
//!
//! Saves go through a sibling `.tmp` file and a rename so a failed write never
//! clobbers the previous snapshot. The store has a single writer per process;
//! callers serialize access (see `AppState::store`).

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{validate_crop_id, CropRecord, CropType, GpsCoordinates};

use crate::error::AppResult;

/// On-disk form of one crop
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEntry {
    crop_name: String,
    latitude: f64,
    longitude: f64,
    last_disease_pct: f64,
    #[serde(with = "snapshot_timestamp")]
    last_update: DateTime<Utc>,
}

type Snapshot = BTreeMap<String, SnapshotEntry>;

impl SnapshotEntry {
    fn from_record(record: &CropRecord) -> Self {
        Self {
            crop_name: record.crop_type.name().to_string(),
            latitude: record.location.latitude,
            longitude: record.location.longitude,
            last_disease_pct: record.disease_fraction,
            last_update: record.last_update,
        }
    }

    fn into_record(self, crop_id: String) -> CropRecord {
        let (crop_type, fallback) = CropType::resolve(&self.crop_name);
        if fallback {
            tracing::warn!(
                crop_id = %crop_id,
                crop_name = %self.crop_name,
                "Unknown crop type in snapshot, treating as {}",
                crop_type
            );
        }

        CropRecord::new(
            crop_id,
            crop_type,
            GpsCoordinates::new(self.latitude, self.longitude),
            self.last_disease_pct,
            self.last_update,
        )
    }
}

/// ISO-8601 timestamps. Written as RFC 3339 UTC; offset-less strings from
/// older snapshots are read as UTC.
mod snapshot_timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Durable crop state keyed by crop identifier
#[derive(Debug)]
pub struct CropStore {
    path: PathBuf,
    records: BTreeMap<String, CropRecord>,
}

impl CropStore {
    /// Create an empty store that will persist to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Load the store from its snapshot. A missing snapshot yields an empty
    /// store; an unreadable or malformed one is an error.
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No crop snapshot at {}, starting empty", path.display());
                return Ok(Self::new(path));
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        let records = snapshot
            .into_iter()
            .map(|(crop_id, entry)| (crop_id.clone(), entry.into_record(crop_id)))
            .collect();

        Ok(Self { path, records })
    }

    /// Atomically persist the full store
    pub fn save(&self) -> AppResult<()> {
        let snapshot: Snapshot = self
            .records
            .iter()
            .map(|(crop_id, record)| (crop_id.clone(), SnapshotEntry::from_record(record)))
            .collect();
        let json = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = temp_path(&self.path);
        let result = write_synced(&tmp_path, &json).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(
            crops = self.records.len(),
            "Crop snapshot saved to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Insert or replace a record, returning the previous state
    pub fn upsert(&mut self, record: CropRecord) -> AppResult<Option<CropRecord>> {
        validate_crop_id(&record.crop_id)?;
        Ok(self.records.insert(record.crop_id.clone(), record))
    }

    pub fn get(&self, crop_id: &str) -> Option<&CropRecord> {
        self.records.get(crop_id)
    }

    /// All records, ordered by identifier
    pub fn get_all(&self) -> Vec<&CropRecord> {
        self.records.values().collect()
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut CropRecord> {
        self.records.values_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
