//! Scripted providers for tests and demos.
//!
//! None of these touch hardware.  [`ScriptedDetector`] replays a queue of
//! results and then reports no hands forever.

use std::collections::VecDeque;

use crate::error::TrackError;
use crate::landmark::Hand;
use crate::source::{Frame, FrameSize, HandDetector, ModelLoader, VideoSource};

// ────────────────────────────────────────────────────────────────────────────
// Video
// ────────────────────────────────────────────────────────────────────────────

/// A camera that always has a frame of the same size (or never has one).
#[derive(Debug, Clone)]
pub struct StaticVideo {
    size:     FrameSize,
    ready:    bool,
    deny:     Option<TrackError>,
    sequence: u64,
}

impl StaticVideo {
    pub fn ready(size: FrameSize) -> Self {
        StaticVideo { size, ready: true, deny: None, sequence: 0 }
    }

    pub fn not_ready() -> Self {
        StaticVideo { size: FrameSize::new(640, 480), ready: false, deny: None, sequence: 0 }
    }

    /// `open()` fails with `err`.
    pub fn failing(err: TrackError) -> Self {
        StaticVideo { deny: Some(err), ..StaticVideo::ready(FrameSize::new(640, 480)) }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
}

impl VideoSource for StaticVideo {
    fn open(&mut self) -> Result<FrameSize, TrackError> {
        match &self.deny {
            Some(e) => Err(e.clone()),
            None => Ok(self.size),
        }
    }

    fn current_frame(&mut self) -> Option<Frame> {
        if !self.ready {
            return None;
        }
        self.sequence += 1;
        Some(Frame { size: self.size, sequence: self.sequence })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Detector / loader
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ScriptedDetector {
    script: VecDeque<Result<Vec<Hand>, TrackError>>,
    calls:  usize,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Result<Vec<Hand>, TrackError>>) -> Self {
        ScriptedDetector { script: script.into(), calls: 0 }
    }

    /// How many times `estimate_hands` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl HandDetector for ScriptedDetector {
    fn estimate_hands(&mut self, _frame: &Frame) -> Result<Vec<Hand>, TrackError> {
        self.calls += 1;
        self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Loader that hands out a [`ScriptedDetector`], or fails.
#[derive(Debug)]
pub struct ScriptedLoader {
    result: Result<ScriptedDetector, TrackError>,
}

impl ScriptedLoader {
    pub fn ok(detector: ScriptedDetector) -> Self {
        ScriptedLoader { result: Ok(detector) }
    }

    pub fn failing(err: TrackError) -> Self {
        ScriptedLoader { result: Err(err) }
    }
}

impl ModelLoader for ScriptedLoader {
    fn load(self: Box<Self>) -> Result<Box<dyn HandDetector>, TrackError> {
        self.result.map(|d| Box::new(d) as Box<dyn HandDetector>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_video_sequences_frames() {
        let mut v = StaticVideo::ready(FrameSize::new(4, 3));
        assert_eq!(v.current_frame().map(|f| f.sequence), Some(1));
        assert_eq!(v.current_frame().map(|f| f.sequence), Some(2));
        v.set_ready(false);
        assert!(v.current_frame().is_none());
    }

    #[test]
    fn scripted_detector_runs_dry_to_no_hands() {
        let mut d = ScriptedDetector::new(vec![Err(TrackError::NotLoaded)]);
        let f = Frame { size: FrameSize::new(1, 1), sequence: 0 };
        assert!(d.estimate_hands(&f).is_err());
        assert_eq!(d.estimate_hands(&f), Ok(vec![]));
        assert_eq!(d.calls(), 2);
    }

    #[test]
    fn failing_loader_reports_error() {
        let l: Box<dyn ModelLoader> = Box::new(ScriptedLoader::failing(TrackError::ModelLoad("x".into())));
        assert!(matches!(l.load(), Err(TrackError::ModelLoad(_))));
    }
}
