//! Annotation track store for fish video/image annotation tools.
//!
//! Tracks are persistent identities for individual fish across frames, each
//! carrying species/subspecies/count metadata and at most one region (box,
//! line, or dot) per frame. The [`store::TrackStore`] owns all of them and
//! applies mutations atomically, including the operator-driven
//! [`store::Reassignment`] that splits a track's identity at a frame
//! boundary. The [`session`] module binds a store to an opaque
//! [`session::FrameSource`] and maps presentation gestures onto store
//! operations. Rendering, media decoding, and file I/O stay outside.

pub mod session;
pub mod store;

pub use session::{AnnotatorSession, FrameSource, Intent, SessionError};
pub use store::{
    AddPolicy, FrameRegion, Line, NEW_TRACK, Point, Reassignment, ReassignPolicy, Rect, Region,
    StoreConfig, StoreError, Track, TrackId, TrackRecord, TrackStore, from_json, to_json,
};
