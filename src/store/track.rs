//! Single annotated track: one identity across frames.

use std::collections::BTreeMap;

use crate::store::region::Region;

/// Unique track identifier. `0` is reserved, see [`NEW_TRACK`](crate::store::NEW_TRACK).
pub type TrackId = u64;

/// One tracked individual: species metadata plus a frame-indexed set of
/// regions. A track holds at most one region per frame; the `BTreeMap` key
/// makes that structural.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// Species name, empty when unknown.
    pub species: String,
    /// Subspecies name, empty when unset.
    pub subspecies: String,
    /// Count label, set when a region stands for a count rather than an
    /// individual.
    pub count_label: Option<u32>,
    /// Frame number to region, ascending by frame.
    pub regions: BTreeMap<u64, Region>,
}

impl Track {
    /// Create an empty track with the given labels.
    pub fn new(species: impl Into<String>, subspecies: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            subspecies: subspecies.into(),
            count_label: None,
            regions: BTreeMap::new(),
        }
    }

    /// Lowest frame with a region, if any.
    pub fn first_frame(&self) -> Option<u64> {
        self.regions.keys().next().copied()
    }

    /// Highest frame with a region, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.regions.keys().next_back().copied()
    }

    /// Region at the given frame, if any.
    pub fn region_at(&self, frame: u64) -> Option<&Region> {
        self.regions.get(&frame)
    }

    /// Number of annotated frames.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when the track has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
