//! Landmark → offset mapping.
//!
//! The offset is the landmark's displacement from the frame centre divided by
//! a per-axis scale factor, with Y flipped so that "up in the image" is
//! "up in the scene":
//!
//! ```text
//! offset.x =  (landmark.x - width  / 2) / scale_x
//! offset.y = -(landmark.y - height / 2) / scale_y
//! ```

use serde::{Deserialize, Serialize};

use crate::landmark::Landmark;
use crate::source::FrameSize;

// ════════════════════════════════════════════════════════════════════════════
// Offset
// ════════════════════════════════════════════════════════════════════════════

/// Normalized 2D displacement applied to the tracked mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Offset { x, y }
    }

    /// Map a landmark in a frame of `size` to an offset.
    ///
    /// Returns `None` when the result would not be finite (zero-sized
    /// frame, zero scale factor, NaN landmark).
    pub fn from_landmark(landmark: &Landmark, size: FrameSize, scale: Scale) -> Option<Offset> {
        let (sx, sy) = scale.factors(size);
        if sx == 0.0 || sy == 0.0 {
            return None;
        }
        let half_w = size.width as f32 / 2.0;
        let half_h = size.height as f32 / 2.0;
        let offset = Offset {
            x: (landmark.x - half_w) / sx,
            y: -(landmark.y - half_h) / sy,
        };
        offset.is_finite().then_some(offset)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scale
// ════════════════════════════════════════════════════════════════════════════

/// How the pixel displacement is normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Scale {
    /// Scale factor is `dimension / divisions` on each axis, so the frame
    /// edge lands at ±`divisions / 2`.
    FrameFraction { divisions: f32 },
    /// Constant pixel-per-unit factors.
    Fixed { x: f32, y: f32 },
}

impl Default for Scale {
    fn default() -> Self {
        Scale::FrameFraction { divisions: 10.0 }
    }
}

impl Scale {
    /// Flat 100 px per unit on both axes.
    pub const FLAT_100: Scale = Scale::Fixed { x: 100.0, y: 100.0 };

    /// Resolve `(scale_x, scale_y)` for a frame of `size`.
    pub fn factors(&self, size: FrameSize) -> (f32, f32) {
        match *self {
            Scale::FrameFraction { divisions } => (
                size.width as f32 / divisions,
                size.height as f32 / divisions,
            ),
            Scale::Fixed { x, y } => (x, y),
        }
    }

    /// All factors strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        match *self {
            Scale::FrameFraction { divisions } => ok(divisions),
            Scale::Fixed { x, y } => ok(x) && ok(y),
        }
    }
}
