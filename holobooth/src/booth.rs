//! The booth: the single context object both loops work on.
//!
//! `Booth` owns the scene, the shared [`Offset`], the input tracker and the
//! two providers.  The detection tick writes the offset; the render tick
//! reads it.  Both run on the caller's thread, one after the other, so there
//! is never more than one borrower.

use std::fmt;

use tracing::info;

use hand_track::{
    BoxMesh, FrameSize, HandDetector, InputTracker, ModelLoader, Offset, Scene, SurfaceSize,
    TickOutcome, TrackError, TrackerConfig, TrackerStats, VideoSource,
};

use crate::raster::{Raster, BG_COLOR};

// ════════════════════════════════════════════════════════════════════════════
// Startup stages
// ════════════════════════════════════════════════════════════════════════════

/// Linear startup sequence; `Running` is reached only if every earlier stage
/// succeeded, and is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    AcquireRenderer,
    AcquireCamera,
    LoadModel,
    Running,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::AcquireRenderer => "acquire renderer",
            Stage::AcquireCamera   => "acquire camera",
            Stage::LoadModel       => "load model",
            Stage::Running         => "running",
        };
        f.write_str(s)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Booth
// ════════════════════════════════════════════════════════════════════════════

pub struct Booth {
    scene:        Scene,
    offset:       Offset,
    tracker:      InputTracker,
    video:        Box<dyn VideoSource>,
    detector:     Box<dyn HandDetector>,
    frame_size:   FrameSize,
    last_outcome: Option<TickOutcome>,
    show_preview: bool,
}

impl Booth {
    /// Run the startup sequence against an already-acquired output surface:
    /// open the camera, then load the model.  Any failure aborts startup.
    pub fn start(
        surface: SurfaceSize,
        mesh: BoxMesh,
        tracker: TrackerConfig,
        mut video: Box<dyn VideoSource>,
        loader: Box<dyn ModelLoader>,
    ) -> Result<Booth, TrackError> {
        let scene = Scene::new(surface, mesh);

        info!(stage = %Stage::AcquireCamera, "requesting video-only stream");
        let frame_size = video.open()?;
        info!(width = frame_size.width, height = frame_size.height, "camera ready");

        info!(stage = %Stage::LoadModel, "loading hand-pose model");
        let detector = loader.load()?;
        info!("hand-pose model loaded");

        info!(stage = %Stage::Running, "entering steady state");
        Ok(Booth {
            scene,
            offset: Offset::ZERO,
            tracker: InputTracker::new(tracker),
            video,
            detector,
            frame_size,
            last_outcome: None,
            show_preview: true,
        })
    }

    pub fn set_preview(&mut self, on: bool) {
        self.show_preview = on;
    }

    // ── Ticks ─────────────────────────────────────────────────────────────

    /// One detection tick.  Never fails; see [`TickOutcome`].
    pub fn detect_tick(&mut self) -> &TickOutcome {
        let outcome = self.tracker.tick(&mut *self.video, &mut *self.detector, &mut self.offset);
        self.last_outcome.insert(outcome)
    }

    /// One render tick: move the mesh to the current offset and redraw.
    pub fn render_tick(&mut self, raster: &mut Raster) {
        self.scene.apply_offset(self.offset);

        let surface = self.scene.surface();
        raster.resize(surface.width, surface.height);
        raster.clear(BG_COLOR);
        raster.draw_scene(&self.scene);

        if self.show_preview {
            let landmark = self.tracker.last_landmark().map(|(lm, _)| lm);
            raster.draw_preview(self.frame_size, landmark, self.tracker.hand_visible());
        }
        raster.draw_status(&self.status_line());
    }

    /// Viewport changed size.  Zero-area sizes (minimised windows) are
    /// ignored.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.scene.resize(width, height) {
            info!(width, height, aspect = self.scene.camera.aspect, "viewport resized");
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn offset(&self) -> Offset                     { self.offset }
    pub fn scene(&self) -> &Scene                      { &self.scene }
    pub fn surface(&self) -> SurfaceSize               { self.scene.surface() }
    pub fn stats(&self) -> TrackerStats                { self.tracker.stats() }
    pub fn last_outcome(&self) -> Option<&TickOutcome> { self.last_outcome.as_ref() }

    pub fn status_line(&self) -> String {
        let state = self.last_outcome.as_ref().map_or("starting", TickOutcome::label);
        format!(
            "{}  {}  x={:+.2} y={:+.2}  ticks={}",
            Stage::Running,
            state,
            self.offset.x,
            self.offset.y,
            self.tracker.stats().ticks,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use hand_track::testing::{ScriptedDetector, ScriptedLoader, StaticVideo};
    use hand_track::{Hand, Landmark, TRACKED_LANDMARK};

    const VGA: FrameSize = FrameSize { width: 640, height: 480 };
    const SURFACE: SurfaceSize = SurfaceSize { width: 320, height: 240 };

    fn hand_at(x: f32, y: f32) -> Hand {
        Hand::with_landmark_at(TRACKED_LANDMARK, Landmark::new(x, y, 0.0))
    }

    fn booth(script: Vec<Result<Vec<Hand>, TrackError>>) -> Booth {
        Booth::start(
            SURFACE,
            BoxMesh::new(1.0, 2.0, 1.0, 0xFF0000),
            TrackerConfig::default(),
            Box::new(StaticVideo::ready(VGA)),
            Box::new(ScriptedLoader::ok(ScriptedDetector::new(script))),
        )
        .unwrap()
    }

    /// Records whether `load` was ever reached.
    struct SpyLoader(Rc<Cell<bool>>);

    impl ModelLoader for SpyLoader {
        fn load(self: Box<Self>) -> Result<Box<dyn HandDetector>, TrackError> {
            self.0.set(true);
            Ok(Box::new(ScriptedDetector::default()))
        }
    }

    #[test]
    fn denied_camera_aborts_before_model_load() {
        let loaded = Rc::new(Cell::new(false));
        let result = Booth::start(
            SURFACE,
            BoxMesh::new(1.0, 2.0, 1.0, 0xFF0000),
            TrackerConfig::default(),
            Box::new(StaticVideo::failing(TrackError::CameraDenied("NotAllowedError".into()))),
            Box::new(SpyLoader(loaded.clone())),
        );
        assert!(matches!(result, Err(TrackError::CameraDenied(_))));
        assert!(!loaded.get());
    }

    #[test]
    fn model_load_failure_aborts_startup() {
        let result = Booth::start(
            SURFACE,
            BoxMesh::new(1.0, 2.0, 1.0, 0xFF0000),
            TrackerConfig::default(),
            Box::new(StaticVideo::ready(VGA)),
            Box::new(ScriptedLoader::failing(TrackError::ModelLoad("no weights".into()))),
        );
        assert!(matches!(result, Err(TrackError::ModelLoad(_))));
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::AcquireRenderer < Stage::AcquireCamera);
        assert!(Stage::AcquireCamera < Stage::LoadModel);
        assert!(Stage::LoadModel < Stage::Running);
    }

    #[test]
    fn starts_at_origin() {
        let b = booth(vec![]);
        assert_eq!(b.offset(), Offset::ZERO);
        assert!(b.last_outcome().is_none());
    }

    #[test]
    fn render_tick_applies_latest_offset() {
        let mut b = booth(vec![Ok(vec![hand_at(448.0, 288.0)])]);
        let mut r = Raster::new(SURFACE.width, SURFACE.height);

        b.detect_tick();
        assert_eq!(b.offset(), Offset::new(2.0, -1.0));
        // The mesh only moves on the render tick.
        assert_eq!(b.scene().mesh.position.x, 0.0);

        b.render_tick(&mut r);
        assert_eq!(b.scene().mesh.position.x, 2.0);
        assert_eq!(b.scene().mesh.position.y, -1.0);
        assert_eq!(b.scene().mesh.position.z, 0.0);
    }

    #[test]
    fn zero_hands_keeps_box_in_place() {
        let mut b = booth(vec![Ok(vec![hand_at(448.0, 288.0)]), Ok(vec![])]);
        b.detect_tick();
        let out = b.detect_tick().clone();
        assert_eq!(out, TickOutcome::Held);
        assert_eq!(b.offset(), Offset::new(2.0, -1.0));
    }

    #[test]
    fn detect_failure_is_not_fatal() {
        let mut b = booth(vec![
            Err(TrackError::Detection("stalled".into())),
            Ok(vec![hand_at(320.0, 240.0)]),
        ]);
        assert!(matches!(b.detect_tick(), TickOutcome::DetectFailed(_)));
        assert!(matches!(b.detect_tick(), TickOutcome::Updated(_)));
        assert_eq!(b.stats().ticks, 2);
    }

    #[test]
    fn resize_keeps_offset_and_geometry() {
        let mut b = booth(vec![Ok(vec![hand_at(448.0, 288.0)])]);
        b.detect_tick();
        let mesh = b.scene().mesh;

        b.resize(1000, 500);
        assert_eq!(b.scene().camera.aspect, 2.0);
        assert_eq!(b.surface(), SurfaceSize { width: 1000, height: 500 });
        assert_eq!(b.offset(), Offset::new(2.0, -1.0));
        assert_eq!(b.scene().mesh, mesh);
    }

    #[test]
    fn render_follows_resized_surface() {
        let mut b = booth(vec![]);
        let mut r = Raster::new(SURFACE.width, SURFACE.height);
        b.resize(200, 100);
        b.render_tick(&mut r);
        assert_eq!((r.width(), r.height()), (200, 100));
    }

    #[test]
    fn status_line_reports_offset_and_state() {
        let mut b = booth(vec![Ok(vec![hand_at(448.0, 288.0)])]);
        assert!(b.status_line().contains("starting"));
        b.detect_tick();
        let s = b.status_line();
        assert!(s.contains("tracking"), "{s}");
        assert!(s.contains("x=+2.00 y=-1.00"), "{s}");
    }
}
