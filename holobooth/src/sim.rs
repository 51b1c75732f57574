//! Pointer-driven simulation of a camera and hand detector.
//!
//! The window writes the pointer position into a shared [`Pointer`]; the
//! simulated detector reports one open-palm hand whose tracked landmark sits
//! under the pointer, or no hands while the pointer is outside the window.
//! This lets the whole pipeline run without a webcam or a model.

use std::cell::Cell;
use std::rc::Rc;

use hand_track::{Frame, FrameSize, Hand, HandDetector, ModelLoader, TrackError, VideoSource};

// ════════════════════════════════════════════════════════════════════════════
// Pointer
// ════════════════════════════════════════════════════════════════════════════

/// Pointer position in window-normalized coordinates (`0.0..=1.0` each axis),
/// shared between the window and the simulated detector.
#[derive(Clone, Debug, Default)]
pub struct Pointer(Rc<Cell<Option<(f32, f32)>>>);

impl Pointer {
    pub fn set(&self, pos: Option<(f32, f32)>) {
        self.0.set(pos);
    }

    pub fn get(&self) -> Option<(f32, f32)> {
        self.0.get()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PointerVideo
// ════════════════════════════════════════════════════════════════════════════

/// A "camera" producing frames of a fixed size once opened.
#[derive(Debug)]
pub struct PointerVideo {
    size:     FrameSize,
    opened:   bool,
    sequence: u64,
}

impl PointerVideo {
    pub fn new(size: FrameSize) -> Self {
        PointerVideo { size, opened: false, sequence: 0 }
    }
}

impl VideoSource for PointerVideo {
    fn open(&mut self) -> Result<FrameSize, TrackError> {
        if self.size.is_empty() {
            return Err(TrackError::CameraUnavailable(format!(
                "simulated frame size {}x{} is empty",
                self.size.width, self.size.height
            )));
        }
        self.opened = true;
        Ok(self.size)
    }

    fn current_frame(&mut self) -> Option<Frame> {
        if !self.opened {
            return None;
        }
        self.sequence += 1;
        Some(Frame { size: self.size, sequence: self.sequence })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PointerModel / PointerDetector
// ════════════════════════════════════════════════════════════════════════════

pub struct PointerModel {
    pointer:   Pointer,
    anchor:    usize,
    palm_span: f32,
}

impl PointerModel {
    /// `anchor` is the landmark placed exactly under the pointer.
    pub fn new(pointer: Pointer, anchor: usize, palm_span: f32) -> Self {
        PointerModel { pointer, anchor, palm_span }
    }
}

impl ModelLoader for PointerModel {
    fn load(self: Box<Self>) -> Result<Box<dyn HandDetector>, TrackError> {
        Ok(Box::new(PointerDetector {
            pointer:   self.pointer,
            anchor:    self.anchor,
            palm_span: self.palm_span,
        }))
    }
}

struct PointerDetector {
    pointer:   Pointer,
    anchor:    usize,
    palm_span: f32,
}

impl HandDetector for PointerDetector {
    fn estimate_hands(&mut self, frame: &Frame) -> Result<Vec<Hand>, TrackError> {
        let Some((u, v)) = self.pointer.get() else {
            return Ok(Vec::new());
        };
        let x = u * frame.size.width as f32;
        let y = v * frame.size.height as f32;
        Ok(vec![Hand::open_palm(self.anchor, x, y, self.palm_span)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_track::{InputTracker, Offset, TrackerConfig, TRACKED_LANDMARK};

    const VGA: FrameSize = FrameSize { width: 640, height: 480 };

    fn detector(pointer: &Pointer) -> Box<dyn HandDetector> {
        Box::new(PointerModel::new(pointer.clone(), TRACKED_LANDMARK, 60.0)).load().unwrap()
    }

    #[test]
    fn video_has_no_frame_until_opened() {
        let mut v = PointerVideo::new(VGA);
        assert!(v.current_frame().is_none());
        assert_eq!(v.open(), Ok(VGA));
        assert_eq!(v.current_frame().map(|f| f.size), Some(VGA));
    }

    #[test]
    fn empty_frame_size_cannot_open() {
        let mut v = PointerVideo::new(FrameSize::new(0, 480));
        assert!(matches!(v.open(), Err(TrackError::CameraUnavailable(_))));
    }

    #[test]
    fn pointer_outside_reports_no_hands() {
        let pointer = Pointer::default();
        let mut d = detector(&pointer);
        let frame = Frame { size: VGA, sequence: 1 };
        assert_eq!(d.estimate_hands(&frame), Ok(vec![]));
    }

    #[test]
    fn pointer_maps_into_frame_pixels() {
        let pointer = Pointer::default();
        let mut d = detector(&pointer);
        pointer.set(Some((0.75, 0.25)));
        let hands = d.estimate_hands(&Frame { size: VGA, sequence: 1 }).unwrap();
        assert_eq!(hands.len(), 1);
        let lm = hands[0].landmark(TRACKED_LANDMARK).unwrap();
        assert_eq!((lm.x, lm.y), (480.0, 120.0));
    }

    #[test]
    fn pointer_drives_tracker_end_to_end() {
        let pointer = Pointer::default();
        let mut d = detector(&pointer);
        let mut v = PointerVideo::new(VGA);
        v.open().unwrap();
        let mut t = InputTracker::new(TrackerConfig::default());
        let mut offset = Offset::ZERO;

        pointer.set(Some((0.5, 0.5)));
        t.tick(&mut v, &mut d, &mut offset);
        assert_eq!(offset, Offset::ZERO);

        // Right edge, top edge → (+5, +5) with the default one-tenth scale.
        pointer.set(Some((1.0, 0.0)));
        t.tick(&mut v, &mut d, &mut offset);
        assert_eq!(offset, Offset::new(5.0, 5.0));

        // Pointer leaves: hold.
        pointer.set(None);
        t.tick(&mut v, &mut d, &mut offset);
        assert_eq!(offset, Offset::new(5.0, 5.0));
    }
}
