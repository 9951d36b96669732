//! Reassignment request: move a frame range of one track to another identity.

use crate::store::track::TrackId;

/// Reserved track ID requesting a fresh destination track.
///
/// Live track IDs start at 1; `0` never identifies a stored track.
pub const NEW_TRACK: TrackId = 0;

/// Request to move every region of `from_id` with frame in
/// `[from_frame, to_frame)` to `to_id`.
///
/// `to_frame` is exclusive; [`Reassignment::to_end_of_video`] uses `u64::MAX`
/// so "everything from here on" needs no knowledge of the video length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reassignment {
    /// ID to reassign from.
    pub from_id: TrackId,
    /// ID to reassign to, or [`NEW_TRACK`] for a fresh track.
    pub to_id: TrackId,
    /// First frame to reassign (inclusive).
    pub from_frame: u64,
    /// Frame to stop reassignment (exclusive).
    pub to_frame: u64,
}

impl Reassignment {
    /// Create a reassignment over an explicit frame range.
    pub fn new(from_id: TrackId, to_id: TrackId, from_frame: u64, to_frame: u64) -> Self {
        Self {
            from_id,
            to_id,
            from_frame,
            to_frame,
        }
    }

    /// Reassign everything from `from_frame` to the end of the video.
    ///
    /// The open end is `u64::MAX`, which stays exclusive like every other
    /// range end, so a region at frame `u64::MAX` itself is not moved. No
    /// real media indexes a frame there.
    pub fn to_end_of_video(from_id: TrackId, to_id: TrackId, from_frame: u64) -> Self {
        Self::new(from_id, to_id, from_frame, u64::MAX)
    }

    /// Whether this request targets a fresh track.
    pub fn targets_new_track(&self) -> bool {
        self.to_id == NEW_TRACK
    }
}
