mod error;
mod reassign;
mod region;
mod snapshot;
mod track;
mod track_store;

pub use error::StoreError;
pub use reassign::{NEW_TRACK, Reassignment};
pub use region::{Line, Point, Rect, Region};
pub use snapshot::{FrameRegion, TrackRecord, from_json, to_json};
pub use track::{Track, TrackId};
pub use track_store::{AddPolicy, ReassignPolicy, StoreConfig, TrackStore};
