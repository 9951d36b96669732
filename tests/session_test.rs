use fishtrack_rs::store::{Line, Point, Reassignment, Rect, NEW_TRACK};
use fishtrack_rs::{AnnotatorSession, FrameSource, Intent, SessionError};

/// Frame source that "decodes" an index into itself.
struct CountingSource {
    frames: u64,
    fetched: u64,
}

impl CountingSource {
    fn new(frames: u64) -> Self {
        Self { frames, fetched: 0 }
    }
}

impl FrameSource for CountingSource {
    type Frame = u64;
    type Error = std::convert::Infallible;

    fn frame_count(&self) -> u64 {
        self.frames
    }

    fn frame_at(&mut self, index: u64) -> Result<Self::Frame, Self::Error> {
        self.fetched += 1;
        Ok(index)
    }
}

#[test]
fn test_annotating_across_frames() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(100));

    // Frame 0: draw a box. No selection yet, so a track is created.
    session
        .apply(Intent::DrawBox(Rect::new(10.0, 10.0, 40.0, 30.0)))
        .unwrap();
    let id = session.selected_track().unwrap();

    // Advance and annotate the same individual on the next two frames.
    assert_eq!(session.next_frame().unwrap(), 1);
    session
        .apply(Intent::DrawBox(Rect::new(12.0, 11.0, 40.0, 30.0)))
        .unwrap();
    assert_eq!(session.next_frame().unwrap(), 2);
    session
        .apply(Intent::DrawLine(Line::new(
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
        )))
        .unwrap();

    let track = session.store().track(id).unwrap();
    assert_eq!(track.len(), 3);
    assert_eq!(track.first_frame(), Some(0));
    assert_eq!(track.last_frame(), Some(2));
    assert_eq!(session.store().regions_at(1).count(), 1);
}

#[test]
fn test_reassign_intent_and_track_follow() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(100));

    for frame in 0..6 {
        session.seek(frame).unwrap();
        session
            .apply(Intent::DrawDot(Point::new(frame as f32, 0.0)))
            .unwrap();
    }
    let id = session.selected_track().unwrap();

    // Operator decides frames 3.. belong to a different fish.
    session
        .apply(Intent::Reassign(Reassignment::to_end_of_video(
            id, NEW_TRACK, 3,
        )))
        .unwrap();

    let new_id = session.store().next_track_id(id).unwrap();
    assert_eq!(session.store().first_frame_of(new_id), Ok(3));

    // Jump to where the new track starts.
    assert_eq!(session.go_to_first_frame_of(new_id).unwrap(), 3);
    assert_eq!(session.current_frame(), 3);
}

#[test]
fn test_reassigning_away_selected_track_clears_selection() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(10));
    session
        .apply(Intent::DrawDot(Point::new(1.0, 2.0)))
        .unwrap();
    let id = session.selected_track().unwrap();

    session
        .apply(Intent::Reassign(Reassignment::to_end_of_video(
            id, NEW_TRACK, 0,
        )))
        .unwrap();

    // The source track drained and vanished, so the selection is gone too.
    assert_eq!(session.selected_track(), None);
}

#[test]
fn test_next_and_copy_repeats_region_on_next_frame() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(5));
    session
        .apply(Intent::DrawBox(Rect::new(10.0, 10.0, 40.0, 30.0)))
        .unwrap();
    let id = session.selected_track().unwrap();

    assert_eq!(session.next_and_copy().unwrap(), 1);
    assert_eq!(session.current_frame(), 1);

    let track = session.store().track(id).unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.region_at(1), track.region_at(0));

    // Chains: the copy is itself the region to copy next.
    assert_eq!(session.next_and_copy().unwrap(), 2);
    assert_eq!(session.store().track(id).unwrap().len(), 3);
}

#[test]
fn test_next_and_copy_requires_selection_and_region() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(5));
    assert_eq!(session.next_and_copy().unwrap_err(), SessionError::NoSelection);

    // Selected track with no region at the current frame.
    session
        .apply(Intent::DrawDot(Point::new(1.0, 1.0)))
        .unwrap();
    let id = session.selected_track().unwrap();
    session.seek(3).unwrap();
    assert_eq!(
        session.next_and_copy().unwrap_err(),
        SessionError::Store(fishtrack_rs::StoreError::RegionNotFound {
            track_id: id,
            frame: 3
        })
    );
    // Nothing was copied anywhere.
    assert_eq!(session.store().track(id).unwrap().len(), 1);
}

#[test]
fn test_next_and_copy_stops_at_last_frame() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(2));
    session.seek(1).unwrap();
    session
        .apply(Intent::DrawDot(Point::new(1.0, 1.0)))
        .unwrap();
    let id = session.selected_track().unwrap();

    assert_eq!(
        session.next_and_copy().unwrap_err(),
        SessionError::FrameOutOfRange {
            frame: 2,
            frame_count: 2
        }
    );
    assert_eq!(session.current_frame(), 1);
    assert_eq!(session.store().track(id).unwrap().len(), 1);
}

#[test]
fn test_frame_navigation_clamps() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(3));

    assert_eq!(session.prev_frame().unwrap(), 0);
    assert_eq!(session.next_frame().unwrap(), 1);
    assert_eq!(session.next_frame().unwrap(), 2);
    // Already at the last frame.
    assert_eq!(session.next_frame().unwrap(), 2);
    assert_eq!(session.current_frame(), 2);
}

#[test]
fn test_empty_media_navigation_fails() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(0));
    assert!(matches!(
        session.next_frame().unwrap_err(),
        SessionError::FrameOutOfRange { frame_count: 0, .. }
    ));
}

#[test]
fn test_store_errors_flow_back_through_session() {
    let mut session = AnnotatorSession::with_default_config(CountingSource::new(10));
    let err = session
        .apply(Intent::RemoveRegion {
            track_id: 42,
            frame: 0,
        })
        .unwrap_err();
    assert!(matches!(err, SessionError::Store(_)));
    assert_eq!(
        err.to_string(),
        "track 42 not found",
        "store errors keep their message through the session wrapper"
    );
}
