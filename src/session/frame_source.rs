//! Trait for media backends supplying decoded frames.

/// Trait for media backends supplying decoded frames by index.
///
/// The annotation core never interprets pixel data, so the frame type is
/// fully opaque. Implement this trait to connect any decoder or image list
/// to an [`AnnotatorSession`](crate::session::AnnotatorSession).
///
/// # Example
///
/// ```ignore
/// use fishtrack_rs::FrameSource;
///
/// struct ImageFolder {
///     paths: Vec<std::path::PathBuf>,
/// }
///
/// impl FrameSource for ImageFolder {
///     type Frame = Vec<u8>;
///     type Error = std::io::Error;
///
///     fn frame_count(&self) -> u64 {
///         self.paths.len() as u64
///     }
///
///     fn frame_at(&mut self, index: u64) -> Result<Self::Frame, Self::Error> {
///         std::fs::read(&self.paths[index as usize])
///     }
/// }
/// ```
pub trait FrameSource {
    /// Opaque decoded frame handed to the presentation layer.
    type Frame;
    /// Error type for decode failures.
    type Error;

    /// Total number of frames in the media.
    fn frame_count(&self) -> u64;

    /// Fetch the decoded frame at `index`.
    ///
    /// `index` is always below [`frame_count`](Self::frame_count) when
    /// called through the session.
    fn frame_at(&mut self, index: u64) -> Result<Self::Frame, Self::Error>;
}
