//! Error types for the tracking pipeline.

use thiserror::Error;

/// Failures reported by video sources, model loaders and detectors.
///
/// `CameraDenied`, `CameraUnavailable` and `ModelLoad` are fatal during
/// startup.  `Detection` and `NotLoaded` only ever cost one tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("camera access denied: {0}")]
    CameraDenied(String),

    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("failed to load hand-pose model: {0}")]
    ModelLoad(String),

    #[error("hand detection failed: {0}")]
    Detection(String),

    #[error("hand-pose model not loaded")]
    NotLoaded,
}
