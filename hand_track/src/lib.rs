//! # hand_track
//!
//! The part of holobooth that does not need a window: hand landmarks, the
//! landmark → offset mapping, the per-tick input tracker, and the scene model
//! (camera, box mesh, output surface) the render loop draws from.
//!
//! ## Data flow
//!
//! ```text
//! VideoSource ──frame──▶ HandDetector ──Vec<Hand>──▶ InputTracker ──Offset──▶ Scene.mesh
//! ```
//!
//! Camera capture and pose estimation are external providers reached through
//! the [`source::VideoSource`], [`source::ModelLoader`] and
//! [`source::HandDetector`] traits.  The binary crate supplies concrete ones;
//! [`testing`] supplies scripted doubles.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_track::{FrameSize, Hand, Landmark, Offset, TrackerConfig, InputTracker};
//! use hand_track::testing::{ScriptedDetector, StaticVideo};
//!
//! let mut video = StaticVideo::ready(FrameSize::new(640, 480));
//! let mut detector = ScriptedDetector::new(vec![
//!     Ok(vec![Hand::with_landmark_at(9, Landmark::new(420.0, 240.0, 0.0))]),
//! ]);
//! let mut tracker = InputTracker::new(TrackerConfig::default());
//! let mut offset = Offset::ZERO;
//!
//! tracker.tick(&mut video, &mut detector, &mut offset);
//! assert_eq!(offset.x, 1.5625);
//! ```

pub mod error;
pub mod landmark;
pub mod offset;
pub mod scene;
pub mod source;
pub mod testing;
pub mod tracker;

pub use error::TrackError;
pub use landmark::{Hand, Landmark, HAND_LANDMARKS, TRACKED_LANDMARK};
pub use offset::{Offset, Scale};
pub use scene::{BoxMesh, PerspectiveCamera, Scene, SurfaceSize};
pub use source::{Frame, FrameSize, HandDetector, ModelLoader, VideoSource};
pub use tracker::{InputTracker, TickOutcome, TrackerConfig, TrackerStats, ZeroHandPolicy};
