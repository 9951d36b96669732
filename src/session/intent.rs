//! Discrete user gestures forwarded by the presentation layer.

use crate::store::{Line, Point, Reassignment, Rect, TrackId};

/// One user gesture, mapped 1:1 onto a store operation by the session.
///
/// Draw intents target the session's selected track at its current frame;
/// when no track is selected, drawing creates a fresh one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Draw a bounding box at the current frame.
    DrawBox(Rect),
    /// Draw a line at the current frame.
    DrawLine(Line),
    /// Draw a dot at the current frame.
    DrawDot(Point),
    /// Change the selected track.
    SelectTrack(TrackId),
    /// Move a frame range of one track to another identity.
    Reassign(Reassignment),
    /// Remove one region.
    RemoveRegion { track_id: TrackId, frame: u64 },
}
