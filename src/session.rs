//! Session module for connecting media backends and presentation layers to
//! the track store.
//!
//! The presentation layer forwards user gestures as [`Intent`]s; the media
//! backend implements [`FrameSource`]; [`AnnotatorSession`] binds the two to
//! one [`TrackStore`](crate::store::TrackStore).

mod annotator;
mod frame_source;
mod intent;

pub use annotator::{AnnotatorSession, SessionError};
pub use frame_source::FrameSource;
pub use intent::Intent;
