//! Saving and reloading tracker state through a [`KeyValueStore`].
//!
//! Two independent JSON documents are kept:
//! - `monsterTrackerData`: array in catalog order of
//!   `{monsterName, deathTime, xCoordinate, yCoordinate}`, all raw strings
//! - `tombstonePositions`: object from map id to `{left, top}` CSS offsets
//!
//! Reads fail soft: a missing or malformed document loads as absent.

use crate::core::constants::{MARKERS_STORAGE_KEY, RECORDS_STORAGE_KEY};
use crate::error::{Result, TrackerError};
use crate::markers::{MarkerPosition, MarkerStore, Offset};
use crate::registry::RespawnRecord;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
    pub monster_name: String,
    #[serde(default)]
    pub death_time: String,
    #[serde(default)]
    pub x_coordinate: String,
    #[serde(default)]
    pub y_coordinate: String,
}

impl From<&RespawnRecord> for SavedRecord {
    fn from(record: &RespawnRecord) -> Self {
        Self {
            monster_name: record.monster_id.clone(),
            death_time: record.raw_death_time.clone(),
            x_coordinate: record.x_coordinate.clone(),
            y_coordinate: record.y_coordinate.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMarker {
    pub left: String,
    pub top: String,
}

impl From<&MarkerPosition> for SavedMarker {
    fn from(position: &MarkerPosition) -> Self {
        Self {
            left: position.left.to_string(),
            top: position.top.to_string(),
        }
    }
}

/// Whatever was found in storage at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub records: Option<Vec<SavedRecord>>,
    pub markers: Option<MarkerStore>,
}

pub fn encode_records(records: &[RespawnRecord]) -> Result<String> {
    let saved: Vec<SavedRecord> = records.iter().map(SavedRecord::from).collect();
    serde_json::to_string(&saved).map_err(|source| TrackerError::StorageCorrupt {
        key: RECORDS_STORAGE_KEY.to_string(),
        source,
    })
}

pub fn decode_records(json: &str) -> Result<Vec<SavedRecord>> {
    serde_json::from_str(json).map_err(|source| TrackerError::StorageCorrupt {
        key: RECORDS_STORAGE_KEY.to_string(),
        source,
    })
}

pub fn encode_markers(markers: &MarkerStore) -> Result<String> {
    let saved: BTreeMap<&str, SavedMarker> = markers
        .iter()
        .map(|(map_id, position)| (map_id, SavedMarker::from(position)))
        .collect();
    serde_json::to_string(&saved).map_err(|source| TrackerError::StorageCorrupt {
        key: MARKERS_STORAGE_KEY.to_string(),
        source,
    })
}

/// Entries whose offsets do not parse are dropped; the rest survive.
pub fn decode_markers(json: &str) -> Result<MarkerStore> {
    let saved: BTreeMap<String, SavedMarker> =
        serde_json::from_str(json).map_err(|source| TrackerError::StorageCorrupt {
            key: MARKERS_STORAGE_KEY.to_string(),
            source,
        })?;

    let mut markers = MarkerStore::new();
    for (map_id, marker) in saved {
        match (marker.left.parse::<Offset>(), marker.top.parse::<Offset>()) {
            (Ok(left), Ok(top)) => markers.set(&map_id, MarkerPosition { left, top }),
            _ => warn!(map = %map_id, left = %marker.left, top = %marker.top, "skipping unreadable marker"),
        }
    }
    Ok(markers)
}

pub struct PersistenceAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn try_save_records(&mut self, records: &[RespawnRecord]) -> Result<()> {
        let json = encode_records(records)?;
        self.store.set(RECORDS_STORAGE_KEY, &json)
    }

    pub fn try_save_markers(&mut self, markers: &MarkerStore) -> Result<()> {
        let json = encode_markers(markers)?;
        self.store.set(MARKERS_STORAGE_KEY, &json)
    }

    /// Writes the records; failures are logged and otherwise ignored.
    pub fn save_records(&mut self, records: &[RespawnRecord]) {
        match self.try_save_records(records) {
            Ok(()) => debug!(rows = records.len(), "saved respawn records"),
            Err(e) => warn!(error = %e, "failed to save respawn records"),
        }
    }

    /// Writes the markers; failures are logged and otherwise ignored.
    pub fn save_markers(&mut self, markers: &MarkerStore) {
        match self.try_save_markers(markers) {
            Ok(()) => debug!(maps = markers.len(), "saved marker positions"),
            Err(e) => warn!(error = %e, "failed to save marker positions"),
        }
    }

    pub fn save(&mut self, records: &[RespawnRecord], markers: &MarkerStore) {
        self.save_records(records);
        self.save_markers(markers);
    }

    /// Reads both documents. Missing or corrupt documents come back as `None`.
    pub fn load(&self) -> PersistedState {
        let records = self.store.get(RECORDS_STORAGE_KEY).and_then(|json| {
            decode_records(&json)
                .map_err(|e| warn!(error = %e, "discarding stored respawn records"))
                .ok()
        });
        let markers = self.store.get(MARKERS_STORAGE_KEY).and_then(|json| {
            decode_markers(&json)
                .map_err(|e| warn!(error = %e, "discarding stored marker positions"))
                .ok()
        });
        PersistedState { records, markers }
    }
}
