//! Configuration parsing and validation.
//!
//! Everything has a default, so an empty file (or no file) is a valid
//! configuration.  Example `holobooth.toml`:
//!
//! ```toml
//! source  = "sim"
//! cadence = { interval_ms = 100 }
//!
//! [tracker]
//! landmark_index = 9
//! zero_hands     = "hold"
//! scale          = { mode = "fixed", x = 100.0, y = 100.0 }
//!
//! [box]
//! color = 0x00ff00
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use hand_track::scene::MAX_BOX_DEPTH;
use hand_track::{BoxMesh, FrameSize, TrackerConfig, HAND_LANDMARKS};

use crate::error::{BoothError, ConfigError};
use crate::raster::{preview_height, MIN_PREVIEW_H};
use crate::schedule::Cadence;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "holobooth.toml";

// ════════════════════════════════════════════════════════════════════════════
// BoothConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoothConfig {
    pub window:  WindowConfig,
    pub tracker: TrackerConfig,
    pub cadence: Cadence,
    pub source:  SourceKind,
    pub sim:     SimConfig,
    #[serde(rename = "box")]
    pub mesh:    BoxConfig,
    /// Draw the webcam preview inset.
    pub preview: bool,
}

impl Default for BoothConfig {
    fn default() -> Self {
        BoothConfig {
            window:  WindowConfig::default(),
            tracker: TrackerConfig::default(),
            cadence: Cadence::EveryFrame,
            source:  SourceKind::Sim,
            sim:     SimConfig::default(),
            mesh:    BoxConfig::default(),
            preview: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width:  usize,
    pub height: usize,
    pub title:  String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { width: 960, height: 600, title: "holobooth".to_string() }
    }
}

/// Where hands come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The mouse pointer over the window stands in for the hand.
    #[default]
    Sim,
    /// LeapMotion controller (needs the `leap` feature).
    Leap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub frame_width:  u32,
    pub frame_height: u32,
    /// Palm width of the synthesized hand, frame pixels.
    pub palm_span:    f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { frame_width: 640, frame_height: 480, palm_span: 60.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub width:  f32,
    pub height: f32,
    pub depth:  f32,
    /// 0xRRGGBB
    pub color:  u32,
}

impl Default for BoxConfig {
    fn default() -> Self {
        BoxConfig { width: 1.0, height: 2.0, depth: 1.0, color: 0xFF0000 }
    }
}

impl BoxConfig {
    pub fn mesh(&self) -> BoxMesh {
        BoxMesh::new(self.width, self.height, self.depth, self.color)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Loading / validation
// ════════════════════════════════════════════════════════════════════════════

impl BoothConfig {
    /// Load from `path` if given, else from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, BoothError> {
        if let Some(p) = path {
            info!("Loading config from: {}", p.display());
            return Self::from_file(p);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            info!("Loading config from: {}", fallback.display());
            return Self::from_file(&fallback);
        }
        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, BoothError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(s: &str) -> Result<Self, BoothError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &str, message: &str) -> Result<(), ConfigError> {
            Err(ConfigError::InvalidValue { field: field.to_string(), message: message.to_string() })
        }

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window", "width and height must be greater than 0");
        }
        if self.sim.frame_width == 0 || self.sim.frame_height == 0 {
            return invalid("sim", "frame_width and frame_height must be greater than 0");
        }
        let sim_frame = FrameSize::new(self.sim.frame_width, self.sim.frame_height);
        if self.preview && self.source == SourceKind::Sim && preview_height(sim_frame) < MIN_PREVIEW_H {
            return invalid("sim", "frame is too wide for the preview inset");
        }
        if !(self.sim.palm_span.is_finite() && self.sim.palm_span > 0.0) {
            return invalid("sim.palm_span", "must be a positive number");
        }
        if self.tracker.landmark_index >= HAND_LANDMARKS {
            return invalid("tracker.landmark_index", "must be between 0 and 20");
        }
        if !self.tracker.scale.is_valid() {
            return invalid("tracker.scale", "scale factors must be positive");
        }
        if self.cadence == Cadence::Interval(0) {
            return invalid("cadence.interval_ms", "interval must be greater than 0");
        }
        let m = &self.mesh;
        if [m.width, m.height, m.depth].iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return invalid("box", "width, height and depth must be positive");
        }
        if m.depth >= MAX_BOX_DEPTH {
            return invalid("box.depth", &format!("must be less than {} to stay in front of the camera", MAX_BOX_DEPTH));
        }
        if m.color > 0xFF_FFFF {
            return invalid("box.color", "must be a 0xRRGGBB value");
        }
        Ok(())
    }
}
