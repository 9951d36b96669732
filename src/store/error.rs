//! Error types for track store operations.

use thiserror::Error;

use crate::store::track::TrackId;

/// Errors reported by [`TrackStore`](crate::store::TrackStore) operations.
///
/// Every failure leaves the store's prior state fully intact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced track does not exist (or holds no regions where regions
    /// are required).
    #[error("track {track_id} not found")]
    TrackNotFound {
        /// The missing track ID
        track_id: TrackId,
    },

    /// No region at the referenced frame for this track.
    #[error("track {track_id} has no region at frame {frame}")]
    RegionNotFound {
        /// Track that was addressed
        track_id: TrackId,
        /// Frame that held no region
        frame: u64,
    },

    /// Strict-mode add collided with an existing region.
    #[error("track {track_id} already has a region at frame {frame}")]
    DuplicateRegion {
        /// Track that was addressed
        track_id: TrackId,
        /// Frame already occupied
        frame: u64,
    },

    /// Strict-mode reassignment would overwrite a destination region.
    #[error("reassignment would overwrite region of track {to_id} at frame {frame}")]
    Conflict {
        /// Destination track
        to_id: TrackId,
        /// First colliding frame
        frame: u64,
    },

    /// The reserved new-track sentinel was used where a real ID is required.
    #[error("track id 0 is reserved for new-track requests")]
    ReservedTrackId,

    /// Imported data violates a store invariant.
    #[error("malformed annotation data: {message}")]
    MalformedData {
        /// Description of the violation
        message: String,
    },
}

impl StoreError {
    /// Create a malformed-data error with a message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData {
            message: message.into(),
        }
    }
}
