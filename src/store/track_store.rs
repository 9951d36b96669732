//! The track store: all tracks and their frame-indexed regions.

use std::collections::BTreeMap;
use std::ops::Bound;

use log::{debug, warn};

use crate::store::error::StoreError;
use crate::store::reassign::{NEW_TRACK, Reassignment};
use crate::store::region::Region;
use crate::store::track::{Track, TrackId};

/// Policy for `add_region` on an already-annotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPolicy {
    /// Replace the existing region (logged at warn level).
    #[default]
    Overwrite,
    /// Fail with [`StoreError::DuplicateRegion`], leaving the existing
    /// region untouched.
    Strict,
}

/// Policy for reassignment when a moved frame is already annotated under the
/// destination track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReassignPolicy {
    /// The moved region replaces the destination's region. Reassignment is a
    /// deliberate operator action, so the source wins (logged at warn level).
    #[default]
    SourceWins,
    /// Fail the whole operation with [`StoreError::Conflict`] and perform no
    /// mutation.
    Strict,
}

/// Configuration for the track store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub add_policy: AddPolicy,
    pub reassign_policy: ReassignPolicy,
    /// When true, `next_track_id`/`prev_track_id` wrap around at the ends
    /// instead of failing.
    pub wrap_navigation: bool,
}

/// Owns every track and region of one annotated video.
///
/// All mutations are atomic: arguments are validated before any state
/// changes, and every error leaves the store observably untouched. The store
/// is single-owner; all external access goes through this API by value or by
/// ID lookup.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    tracks: BTreeMap<TrackId, Track>,
    config: StoreConfig,
}

impl TrackStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            config,
        }
    }

    /// Insert or replace the region at `frame` for `track_id`, creating the
    /// track if absent.
    ///
    /// Under [`AddPolicy::Strict`] an occupied frame fails with
    /// [`StoreError::DuplicateRegion`].
    pub fn add_region(
        &mut self,
        track_id: TrackId,
        frame: u64,
        region: Region,
    ) -> Result<(), StoreError> {
        if track_id == NEW_TRACK {
            return Err(StoreError::ReservedTrackId);
        }
        let occupied = self
            .tracks
            .get(&track_id)
            .is_some_and(|t| t.regions.contains_key(&frame));
        if occupied && self.config.add_policy == AddPolicy::Strict {
            return Err(StoreError::DuplicateRegion { track_id, frame });
        }

        let track = self.tracks.entry(track_id).or_default();
        if track.regions.insert(frame, region).is_some() {
            warn!("replaced region of track {track_id} at frame {frame}");
        } else {
            debug!(
                "added {} region to track {track_id} at frame {frame}",
                region.kind()
            );
        }
        Ok(())
    }

    /// Create an empty track with the given labels and return its ID.
    ///
    /// The ID is the lowest unused live ID, starting at 1. The track exists
    /// immediately so it can be selected and labeled before the first region
    /// is drawn.
    pub fn add_track(
        &mut self,
        species: impl Into<String>,
        subspecies: impl Into<String>,
    ) -> TrackId {
        let track_id = self.lowest_unused_id();
        self.tracks.insert(track_id, Track::new(species, subspecies));
        debug!("created track {track_id}");
        track_id
    }

    /// Remove the region at `frame` for `track_id`, destroying the track if
    /// this was its last region.
    pub fn remove_region(&mut self, track_id: TrackId, frame: u64) -> Result<(), StoreError> {
        let track = self
            .tracks
            .get_mut(&track_id)
            .ok_or(StoreError::TrackNotFound { track_id })?;
        if track.regions.remove(&frame).is_none() {
            return Err(StoreError::RegionNotFound { track_id, frame });
        }
        debug!("removed region of track {track_id} at frame {frame}");
        if track.is_empty() {
            self.tracks.remove(&track_id);
            debug!("track {track_id} drained, removed");
        }
        Ok(())
    }

    /// Remove a whole track and all its regions.
    pub fn remove_track(&mut self, track_id: TrackId) -> Result<(), StoreError> {
        self.tracks
            .remove(&track_id)
            .ok_or(StoreError::TrackNotFound { track_id })?;
        debug!("removed track {track_id}");
        Ok(())
    }

    /// Update the species label of a track.
    pub fn set_species(
        &mut self,
        track_id: TrackId,
        species: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.track_mut(track_id)?.species = species.into();
        Ok(())
    }

    /// Update the subspecies label of a track.
    pub fn set_subspecies(
        &mut self,
        track_id: TrackId,
        subspecies: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.track_mut(track_id)?.subspecies = subspecies.into();
        Ok(())
    }

    /// Update the count label of a track.
    pub fn set_count_label(
        &mut self,
        track_id: TrackId,
        count_label: Option<u32>,
    ) -> Result<(), StoreError> {
        self.track_mut(track_id)?.count_label = count_label;
        Ok(())
    }

    /// Every track with a region at `frame`, ascending by track ID.
    ///
    /// The iterator is finite and restartable; the presentation layer
    /// re-derives its displayed items from this query each frame.
    pub fn regions_at(
        &self,
        frame: u64,
    ) -> impl Iterator<Item = (TrackId, &Region, &Track)> + '_ {
        self.tracks
            .iter()
            .filter_map(move |(id, track)| track.region_at(frame).map(|r| (*id, r, track)))
    }

    /// Lowest frame at which `track_id` has a region.
    ///
    /// Fails with [`StoreError::TrackNotFound`] when the track does not
    /// exist or holds no regions.
    pub fn first_frame_of(&self, track_id: TrackId) -> Result<u64, StoreError> {
        self.tracks
            .get(&track_id)
            .and_then(Track::first_frame)
            .ok_or(StoreError::TrackNotFound { track_id })
    }

    /// Move every region of the source track with frame in
    /// `[from_frame, to_frame)` to the destination track.
    ///
    /// The destination is created if needed (inheriting the source's labels)
    /// and the source is destroyed if the move drains it. An empty
    /// intersecting range is a successful no-op. The operation is
    /// all-or-nothing: on any failure the store is unchanged.
    pub fn reassign(&mut self, req: &Reassignment) -> Result<(), StoreError> {
        if req.from_id == NEW_TRACK {
            return Err(StoreError::ReservedTrackId);
        }
        let source = self
            .tracks
            .get(&req.from_id)
            .ok_or(StoreError::TrackNotFound {
                track_id: req.from_id,
            })?;

        if req.from_frame >= req.to_frame {
            debug!("reassign from track {} over empty range, no-op", req.from_id);
            return Ok(());
        }

        let to_id = if req.targets_new_track() {
            self.lowest_unused_id()
        } else {
            req.to_id
        };
        if to_id == req.from_id {
            return Ok(());
        }

        let moved: Vec<(u64, Region)> = source
            .regions
            .range(req.from_frame..req.to_frame)
            .map(|(frame, region)| (*frame, *region))
            .collect();
        if moved.is_empty() {
            debug!(
                "reassign from track {} matched no frames in [{}, {}), no-op",
                req.from_id, req.from_frame, req.to_frame
            );
            return Ok(());
        }

        if self.config.reassign_policy == ReassignPolicy::Strict {
            if let Some(dest) = self.tracks.get(&to_id) {
                for (frame, _) in &moved {
                    if dest.regions.contains_key(frame) {
                        return Err(StoreError::Conflict {
                            to_id,
                            frame: *frame,
                        });
                    }
                }
            }
        }
        let species = source.species.clone();
        let subspecies = source.subspecies.clone();
        let count_label = source.count_label;

        // Validation done, no fallible step remains.
        if let Some(track) = self.tracks.get_mut(&req.from_id) {
            for (frame, _) in &moved {
                track.regions.remove(frame);
            }
            if track.is_empty() {
                self.tracks.remove(&req.from_id);
                debug!("track {} drained by reassignment, removed", req.from_id);
            }
        }

        let dest = self.tracks.entry(to_id).or_insert_with(|| Track {
            species,
            subspecies,
            count_label,
            regions: BTreeMap::new(),
        });
        let moved_count = moved.len();
        for (frame, region) in moved {
            if dest.regions.insert(frame, region).is_some() {
                warn!("reassignment replaced region of track {to_id} at frame {frame}");
            }
        }
        debug!(
            "reassigned {moved_count} region(s) from track {} to track {to_id}",
            req.from_id
        );
        Ok(())
    }

    /// Number of distinct tracks per species, counting each track once.
    /// Tracks with an empty species field are skipped.
    pub fn species_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for track in self.tracks.values() {
            if !track.species.is_empty() {
                *counts.entry(track.species.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Next live track ID above `current` in ascending order.
    ///
    /// At the top end this wraps to the lowest ID when `wrap_navigation` is
    /// set and fails with [`StoreError::TrackNotFound`] otherwise. `current`
    /// itself need not be live.
    pub fn next_track_id(&self, current: TrackId) -> Result<TrackId, StoreError> {
        let next = self
            .tracks
            .range((Bound::Excluded(current), Bound::Unbounded))
            .next()
            .map(|(id, _)| *id);
        match next {
            Some(id) => Ok(id),
            None if self.config.wrap_navigation => self
                .tracks
                .keys()
                .next()
                .copied()
                .ok_or(StoreError::TrackNotFound { track_id: current }),
            None => Err(StoreError::TrackNotFound { track_id: current }),
        }
    }

    /// Previous live track ID below `current`, mirroring
    /// [`next_track_id`](Self::next_track_id).
    pub fn prev_track_id(&self, current: TrackId) -> Result<TrackId, StoreError> {
        let prev = self
            .tracks
            .range((Bound::Unbounded, Bound::Excluded(current)))
            .next_back()
            .map(|(id, _)| *id);
        match prev {
            Some(id) => Ok(id),
            None if self.config.wrap_navigation => self
                .tracks
                .keys()
                .next_back()
                .copied()
                .ok_or(StoreError::TrackNotFound { track_id: current }),
            None => Err(StoreError::TrackNotFound { track_id: current }),
        }
    }

    /// Look up a track by ID.
    pub fn track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Live track IDs in ascending order.
    pub fn track_ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.keys().copied()
    }

    /// Number of live tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when no tracks are stored.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub(crate) fn tracks(&self) -> &BTreeMap<TrackId, Track> {
        &self.tracks
    }

    pub(crate) fn replace_tracks(&mut self, tracks: BTreeMap<TrackId, Track>) {
        self.tracks = tracks;
    }

    fn track_mut(&mut self, track_id: TrackId) -> Result<&mut Track, StoreError> {
        self.tracks
            .get_mut(&track_id)
            .ok_or(StoreError::TrackNotFound { track_id })
    }

    fn lowest_unused_id(&self) -> TrackId {
        let mut candidate = NEW_TRACK + 1;
        for &id in self.tracks.keys() {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::region::{Point, Rect};

    fn dot(x: f32) -> Region {
        Region::Dot(Point::new(x, x))
    }

    #[test]
    fn test_lowest_unused_id_fills_gaps() {
        let mut store = TrackStore::default();
        assert_eq!(store.add_track("cod", ""), 1);
        assert_eq!(store.add_track("cod", ""), 2);
        assert_eq!(store.add_track("cod", ""), 3);
        store.remove_track(2).unwrap();
        assert_eq!(store.add_track("skate", ""), 2);
        assert_eq!(store.add_track("skate", ""), 4);
    }

    #[test]
    fn test_add_region_rejects_sentinel() {
        let mut store = TrackStore::default();
        assert_eq!(
            store.add_region(NEW_TRACK, 0, dot(1.0)),
            Err(StoreError::ReservedTrackId)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_regions_at_ascending_by_id() {
        let mut store = TrackStore::default();
        store.add_region(9, 5, dot(1.0)).unwrap();
        store.add_region(2, 5, dot(2.0)).unwrap();
        store.add_region(4, 6, dot(3.0)).unwrap();

        let ids: Vec<_> = store.regions_at(5).map(|(id, _, _)| id).collect();
        assert_eq!(ids, vec![2, 9]);

        // Restartable.
        let again: Vec<_> = store.regions_at(5).map(|(id, _, _)| id).collect();
        assert_eq!(again, ids);
    }

    #[test]
    fn test_metadata_setters_require_track() {
        let mut store = TrackStore::default();
        assert_eq!(
            store.set_species(3, "cod"),
            Err(StoreError::TrackNotFound { track_id: 3 })
        );

        store.add_region(3, 0, Region::Box(Rect::new(0.0, 0.0, 5.0, 5.0)))
            .unwrap();
        store.set_species(3, "cod").unwrap();
        store.set_subspecies(3, "atlantic").unwrap();
        store.set_count_label(3, Some(2)).unwrap();

        let track = store.track(3).unwrap();
        assert_eq!(track.species, "cod");
        assert_eq!(track.subspecies, "atlantic");
        assert_eq!(track.count_label, Some(2));
    }

    #[test]
    fn test_reassign_to_self_is_noop() {
        let mut store = TrackStore::default();
        store.add_region(5, 10, dot(1.0)).unwrap();
        store
            .reassign(&Reassignment::new(5, 5, 0, u64::MAX))
            .unwrap();
        assert_eq!(store.track(5).unwrap().len(), 1);
    }
}
