//! Seams to the external providers: camera capture and hand-pose estimation.
//!
//! Consumers don't need to know whether frames come from a webcam, a
//! LeapMotion controller projected into a virtual frame, or a test script.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::landmark::Hand;

// ════════════════════════════════════════════════════════════════════════════
// Frames
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        FrameSize { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One video frame as handed to a detector.
///
/// Pixel data stays with the provider; the pipeline only needs the frame
/// geometry and a monotonically increasing sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub size: FrameSize,
    pub sequence: u64,
}

// ════════════════════════════════════════════════════════════════════════════
// Provider traits
// ════════════════════════════════════════════════════════════════════════════

/// A camera stream.
pub trait VideoSource {
    /// Acquire a video-only stream and report its frame size.
    fn open(&mut self) -> Result<FrameSize, TrackError>;

    /// The latest frame, or `None` while the stream has nothing to show yet.
    fn current_frame(&mut self) -> Option<Frame>;
}

/// Something that produces a ready-to-use [`HandDetector`].
///
/// Consumed by loading: a loader is used once.
pub trait ModelLoader {
    fn load(self: Box<Self>) -> Result<Box<dyn HandDetector>, TrackError>;
}

/// Given a frame, return zero or more hands.
pub trait HandDetector {
    fn estimate_hands(&mut self, frame: &Frame) -> Result<Vec<Hand>, TrackError>;
}

impl<V: VideoSource + ?Sized> VideoSource for Box<V> {
    fn open(&mut self) -> Result<FrameSize, TrackError> {
        (**self).open()
    }

    fn current_frame(&mut self) -> Option<Frame> {
        (**self).current_frame()
    }
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn estimate_hands(&mut self, frame: &Frame) -> Result<Vec<Hand>, TrackError> {
        (**self).estimate_hands(frame)
    }
}
