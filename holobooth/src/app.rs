//! Top-level run loop.
//!
//! One iteration per display refresh:
//!
//! 1. poll the window (quit, size, pointer)
//! 2. follow a viewport resize
//! 3. detection tick, if the [`Schedule`] says it is due
//! 4. render tick
//! 5. present

use std::time::Instant;

use tracing::{debug, info};

use hand_track::{FrameSize, ModelLoader, SurfaceSize, VideoSource};

use crate::booth::{Booth, Stage};
use crate::config::{BoothConfig, SourceKind};
use crate::error::{BoothError, Result};
use crate::raster::Raster;
use crate::schedule::Schedule;
use crate::sim::{Pointer, PointerModel, PointerVideo};
use crate::window::Viewport;

type Providers = (Box<dyn VideoSource>, Box<dyn ModelLoader>);

/// Build the camera and model for the configured source.
pub fn build_source(cfg: &BoothConfig, pointer: &Pointer) -> Result<Providers> {
    match cfg.source {
        SourceKind::Sim => {
            let size = FrameSize::new(cfg.sim.frame_width, cfg.sim.frame_height);
            Ok((
                Box::new(PointerVideo::new(size)),
                Box::new(PointerModel::new(pointer.clone(), cfg.tracker.landmark_index, cfg.sim.palm_span)),
            ))
        }
        #[cfg(feature = "leap")]
        SourceKind::Leap => Ok((
            Box::new(crate::leap::LeapVideo::default()),
            Box::new(crate::leap::LeapModel),
        )),
        #[cfg(not(feature = "leap"))]
        SourceKind::Leap => Err(BoothError::UnsupportedSource("leap".to_string())),
    }
}

/// Run the booth until the window closes or the user quits.
pub fn run(cfg: BoothConfig) -> Result<()> {
    let pointer = Pointer::default();
    // Resolve the source before opening a window so a bad choice fails fast.
    let (video, loader) = build_source(&cfg, &pointer)?;

    info!(stage = %Stage::AcquireRenderer, "opening window");
    let mut viewport = Viewport::new(&cfg.window.title, cfg.window.width, cfg.window.height)?;
    let (width, height) = viewport.size();

    let mut booth = Booth::start(
        SurfaceSize { width, height },
        cfg.mesh.mesh(),
        cfg.tracker,
        video,
        loader,
    )
    .map_err(BoothError::from)?;
    booth.set_preview(cfg.preview);

    let mut raster = Raster::new(width, height);
    let mut schedule = Schedule::new(cfg.cadence);
    debug!(cadence = ?schedule.cadence(), "detection schedule");

    while viewport.is_open() {
        let input = viewport.poll();
        if input.quit {
            break;
        }
        pointer.set(input.pointer);

        let (w, h) = input.size;
        if (SurfaceSize { width: w, height: h }) != booth.surface() {
            booth.resize(w, h);
        }

        if schedule.due(Instant::now()) {
            booth.detect_tick();
        }
        booth.render_tick(&mut raster);
        viewport.present(&raster)?;
    }

    info!(stats = ?booth.stats(), "window closed");
    Ok(())
}
