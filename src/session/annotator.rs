//! AnnotatorSession for binding a frame source to a track store.

use log::debug;
use thiserror::Error;

use crate::session::frame_source::FrameSource;
use crate::session::intent::Intent;
use crate::store::{Region, StoreConfig, StoreError, TrackId, TrackStore};

/// Errors surfaced by a session, combining store failures with frame source
/// failures so the presentation layer renders one error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError<E> {
    /// A track store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The frame source failed to produce a frame.
    #[error("frame source error: {0}")]
    Source(E),

    /// A frame index beyond the end of the media was requested.
    #[error("frame {frame} is out of range, media has {frame_count} frame(s)")]
    FrameOutOfRange { frame: u64, frame_count: u64 },

    /// A gesture required a selected track but none is selected.
    #[error("no track is selected")]
    NoSelection,
}

/// An annotation session over one piece of media.
///
/// Owns the [`TrackStore`] and the [`FrameSource`], the frame cursor, and
/// the selected track, and maps presentation [`Intent`]s onto store
/// operations. Exclusive `&mut self` access is the single-control-flow
/// guarantee the store requires; any background decoding must hand completed
/// frames to the thread driving this session.
pub struct AnnotatorSession<F: FrameSource> {
    source: F,
    store: TrackStore,
    current_frame: u64,
    selected: Option<TrackId>,
}

impl<F: FrameSource> AnnotatorSession<F> {
    /// Create a session with the given store configuration.
    pub fn new(source: F, config: StoreConfig) -> Self {
        Self {
            source,
            store: TrackStore::new(config),
            current_frame: 0,
            selected: None,
        }
    }

    /// Create a session with default store configuration.
    pub fn with_default_config(source: F) -> Self {
        Self::new(source, StoreConfig::default())
    }

    /// Apply one user gesture.
    ///
    /// Draw intents target the selected track at the current frame; drawing
    /// with no selection creates a fresh unlabeled track and selects it,
    /// like adding a new individual.
    pub fn apply(&mut self, intent: Intent) -> Result<(), SessionError<F::Error>> {
        debug!("applying intent {intent:?}");
        match intent {
            Intent::DrawBox(rect) => self.draw(Region::Box(rect)),
            Intent::DrawLine(line) => self.draw(Region::Line(line)),
            Intent::DrawDot(point) => self.draw(Region::Dot(point)),
            Intent::SelectTrack(track_id) => {
                if self.store.track(track_id).is_none() {
                    return Err(StoreError::TrackNotFound { track_id }.into());
                }
                self.selected = Some(track_id);
                Ok(())
            }
            Intent::Reassign(req) => {
                self.store.reassign(&req)?;
                self.drop_stale_selection();
                Ok(())
            }
            Intent::RemoveRegion { track_id, frame } => {
                self.store.remove_region(track_id, frame)?;
                self.drop_stale_selection();
                Ok(())
            }
        }
    }

    /// Jump to `frame` and fetch it for display.
    pub fn seek(&mut self, frame: u64) -> Result<F::Frame, SessionError<F::Error>> {
        let frame_count = self.source.frame_count();
        if frame >= frame_count {
            return Err(SessionError::FrameOutOfRange { frame, frame_count });
        }
        let image = self.source.frame_at(frame).map_err(SessionError::Source)?;
        self.current_frame = frame;
        Ok(image)
    }

    /// Advance one frame, clamped to the last frame of the media.
    pub fn next_frame(&mut self) -> Result<F::Frame, SessionError<F::Error>> {
        let last = self.last_frame()?;
        self.seek(self.current_frame.saturating_add(1).min(last))
    }

    /// Step back one frame, clamped to the first frame.
    pub fn prev_frame(&mut self) -> Result<F::Frame, SessionError<F::Error>> {
        // Checks emptiness so the error names the media, not frame 0.
        self.last_frame()?;
        self.seek(self.current_frame.saturating_sub(1))
    }

    /// Advance one frame and copy the selected track's region there.
    ///
    /// The copied region is the selected track's region at the current
    /// frame, so the same individual can be annotated frame by frame without
    /// redrawing. Fails with [`SessionError::NoSelection`] when no track is
    /// selected, [`StoreError::RegionNotFound`] when the selected track has
    /// no region at the current frame, and
    /// [`SessionError::FrameOutOfRange`] at the last frame of the media.
    pub fn next_and_copy(&mut self) -> Result<F::Frame, SessionError<F::Error>> {
        let track_id = self.selected.ok_or(SessionError::NoSelection)?;
        let frame = self.current_frame;
        let region = self
            .store
            .track(track_id)
            .and_then(|t| t.region_at(frame))
            .copied()
            .ok_or(StoreError::RegionNotFound { track_id, frame })?;

        let next = frame + 1;
        let frame_count = self.source.frame_count();
        if next >= frame_count {
            return Err(SessionError::FrameOutOfRange {
                frame: next,
                frame_count,
            });
        }
        self.store.add_region(track_id, next, region)?;
        self.seek(next)
    }

    /// Jump to the first frame where `track_id` has a region.
    pub fn go_to_first_frame_of(
        &mut self,
        track_id: TrackId,
    ) -> Result<F::Frame, SessionError<F::Error>> {
        let frame = self.store.first_frame_of(track_id)?;
        self.seek(frame)
    }

    /// Get a reference to the track store.
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Get a mutable reference to the track store.
    pub fn store_mut(&mut self) -> &mut TrackStore {
        &mut self.store
    }

    /// Get a reference to the frame source.
    pub fn source(&self) -> &F {
        &self.source
    }

    /// Get a mutable reference to the frame source.
    pub fn source_mut(&mut self) -> &mut F {
        &mut self.source
    }

    /// Currently selected track, if any.
    pub fn selected_track(&self) -> Option<TrackId> {
        self.selected
    }

    /// Current frame cursor.
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    fn draw(&mut self, region: Region) -> Result<(), SessionError<F::Error>> {
        let track_id = match self.selected {
            Some(id) => id,
            None => {
                let id = self.store.add_track("", "");
                self.selected = Some(id);
                id
            }
        };
        self.store.add_region(track_id, self.current_frame, region)?;
        Ok(())
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.store.track(id).is_none() {
                self.selected = None;
            }
        }
    }

    fn last_frame(&self) -> Result<u64, SessionError<F::Error>> {
        let frame_count = self.source.frame_count();
        if frame_count == 0 {
            return Err(SessionError::FrameOutOfRange {
                frame: 0,
                frame_count,
            });
        }
        Ok(frame_count - 1)
    }
}
