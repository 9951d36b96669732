//! Persistence boundary: full-store snapshots as plain records.
//!
//! The store exports an ordered list of [`TrackRecord`]s and can be rebuilt
//! from one atomically. Records are serde types, so the persistence layer can
//! write them in whatever container it likes; [`to_json`]/[`from_json`] cover
//! the common case.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::store::error::StoreError;
use crate::store::reassign::NEW_TRACK;
use crate::store::region::Region;
use crate::store::track::{Track, TrackId};
use crate::store::track_store::TrackStore;

/// One annotated frame of a track, as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRegion {
    pub frame: u64,
    pub region: Region,
}

/// Snapshot of a single track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: TrackId,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub subspecies: String,
    #[serde(default)]
    pub count_label: Option<u32>,
    pub regions: Vec<FrameRegion>,
}

impl TrackStore {
    /// Snapshot every track, ascending by ID, regions ascending by frame.
    pub fn export_all(&self) -> Vec<TrackRecord> {
        self.tracks()
            .iter()
            .map(|(id, track)| TrackRecord {
                id: *id,
                species: track.species.clone(),
                subspecies: track.subspecies.clone(),
                count_label: track.count_label,
                regions: track
                    .regions
                    .iter()
                    .map(|(frame, region)| FrameRegion {
                        frame: *frame,
                        region: *region,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Rebuild the store from records, replacing all current state.
    ///
    /// Validates that no record uses the reserved ID, that track IDs are
    /// unique, and that no track annotates the same frame twice. Fails
    /// atomically with [`StoreError::MalformedData`], leaving the current
    /// contents untouched, if any record violates an invariant.
    pub fn import_all(
        &mut self,
        records: impl IntoIterator<Item = TrackRecord>,
    ) -> Result<(), StoreError> {
        let mut tracks: BTreeMap<TrackId, Track> = BTreeMap::new();
        for record in records {
            if record.id == NEW_TRACK {
                return Err(StoreError::malformed("track id 0 is reserved"));
            }
            let mut track = Track::new(record.species, record.subspecies);
            track.count_label = record.count_label;
            for FrameRegion { frame, region } in record.regions {
                if track.regions.insert(frame, region).is_some() {
                    return Err(StoreError::malformed(format!(
                        "track {} has two regions at frame {frame}",
                        record.id
                    )));
                }
            }
            if tracks.insert(record.id, track).is_some() {
                return Err(StoreError::malformed(format!(
                    "duplicate track id {}",
                    record.id
                )));
            }
        }

        let count = tracks.len();
        self.replace_tracks(tracks);
        info!("imported {count} track(s)");
        Ok(())
    }
}

/// Encode records as pretty-printed JSON.
pub fn to_json(records: &[TrackRecord]) -> Result<String, StoreError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| StoreError::malformed(e.to_string()))?;
    info!("exported {} track(s) to JSON", records.len());
    Ok(json)
}

/// Decode records from JSON. Structural errors surface as
/// [`StoreError::MalformedData`]; store invariants are checked by
/// [`TrackStore::import_all`].
pub fn from_json(json: &str) -> Result<Vec<TrackRecord>, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::malformed(e.to_string()))
}
