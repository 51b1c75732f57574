//! The input tracker: one detection tick at a time.
//!
//! Each tick pulls the current frame, runs the detector, and, if a hand was
//! found, overwrites the shared [`Offset`] from the first hand's tracked
//! landmark.  Nothing a tick can encounter stops the tracker; failures are
//! reported as a [`TickOutcome`], logged, counted, and retried next tick.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::landmark::{Hand, Landmark, HAND_LANDMARKS, TRACKED_LANDMARK};
use crate::offset::{Offset, Scale};
use crate::source::{FrameSize, HandDetector, VideoSource};

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// What to do with the offset on a tick that sees no hands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroHandPolicy {
    /// Keep the last offset; the box stays where the hand was last seen.
    #[default]
    Hold,
    /// Snap back to the origin.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Which landmark of the first hand drives the offset.
    pub landmark_index: usize,
    pub scale:          Scale,
    pub zero_hands:     ZeroHandPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            landmark_index: TRACKED_LANDMARK,
            scale:          Scale::default(),
            zero_hands:     ZeroHandPolicy::Hold,
        }
    }
}

impl TrackerConfig {
    pub fn is_valid(&self) -> bool {
        self.landmark_index < HAND_LANDMARKS && self.scale.is_valid()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tick outcome / stats
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// A hand was seen and the offset now holds this value.
    Updated(Offset),
    /// No hands; the offset was left untouched.
    Held,
    /// No hands; the offset was reset to zero.
    Reset,
    /// The video source had no frame yet.
    FrameNotReady,
    /// The detector returned an error.
    DetectFailed(String),
    /// A hand was reported without the tracked landmark.
    LandmarkMissing,
    /// The mapping produced a non-finite value (zero-sized frame etc.).
    DegenerateFrame,
}

impl TickOutcome {
    /// True when the tick left the offset exactly as it found it.
    pub fn offset_unchanged(&self) -> bool {
        !matches!(self, TickOutcome::Updated(_) | TickOutcome::Reset)
    }

    /// Short label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            TickOutcome::Updated(_)      => "tracking",
            TickOutcome::Held            => "no hand",
            TickOutcome::Reset           => "no hand, reset",
            TickOutcome::FrameNotReady   => "waiting for frame",
            TickOutcome::DetectFailed(_) => "detect failed",
            TickOutcome::LandmarkMissing => "landmark missing",
            TickOutcome::DegenerateFrame => "bad frame",
        }
    }
}

/// Running totals, one counter per outcome kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerStats {
    pub ticks:            u64,
    pub updated:          u64,
    pub no_hands:         u64,
    pub frame_not_ready:  u64,
    pub detect_failed:    u64,
    pub landmark_missing: u64,
    pub degenerate:       u64,
}

impl TrackerStats {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Updated(_)              => self.updated += 1,
            TickOutcome::Held | TickOutcome::Reset => self.no_hands += 1,
            TickOutcome::FrameNotReady           => self.frame_not_ready += 1,
            TickOutcome::DetectFailed(_)         => self.detect_failed += 1,
            TickOutcome::LandmarkMissing         => self.landmark_missing += 1,
            TickOutcome::DegenerateFrame         => self.degenerate += 1,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InputTracker
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct InputTracker {
    config:        TrackerConfig,
    stats:         TrackerStats,
    hand_visible:  bool,
    /// Tracked landmark and its frame from the most recent update.
    last_landmark: Option<(Landmark, FrameSize)>,
}

impl InputTracker {
    pub fn new(config: TrackerConfig) -> Self {
        InputTracker {
            config,
            stats:         TrackerStats::default(),
            hand_visible:  false,
            last_landmark: None,
        }
    }

    pub fn stats(&self) -> TrackerStats                { self.stats }
    pub fn hand_visible(&self) -> bool                 { self.hand_visible }
    pub fn last_landmark(&self) -> Option<(Landmark, FrameSize)> { self.last_landmark }

    /// Run one detection tick against `video` and `detector`, updating
    /// `offset` in place.
    pub fn tick<V, D>(&mut self, video: &mut V, detector: &mut D, offset: &mut Offset) -> TickOutcome
    where
        V: VideoSource + ?Sized,
        D: HandDetector + ?Sized,
    {
        let outcome = match video.current_frame() {
            None => TickOutcome::FrameNotReady,
            Some(frame) => match detector.estimate_hands(&frame) {
                Ok(hands) => self.apply(&hands, frame.size, offset),
                Err(e) => {
                    warn!(frame = frame.sequence, error = %e, "hand detection failed, skipping tick");
                    TickOutcome::DetectFailed(e.to_string())
                }
            },
        };
        self.stats.record(&outcome);
        outcome
    }

    /// Fold one detection result into `offset`.
    pub fn apply(&mut self, hands: &[Hand], size: FrameSize, offset: &mut Offset) -> TickOutcome {
        let Some(hand) = hands.first() else {
            if self.hand_visible {
                debug!("hand lost");
                self.hand_visible = false;
            }
            return match self.config.zero_hands {
                ZeroHandPolicy::Hold => TickOutcome::Held,
                ZeroHandPolicy::Reset => {
                    *offset = Offset::ZERO;
                    TickOutcome::Reset
                }
            };
        };

        if !self.hand_visible {
            debug!(hands = hands.len(), "hand acquired");
            self.hand_visible = true;
        }

        let Some(landmark) = hand.landmark(self.config.landmark_index) else {
            return TickOutcome::LandmarkMissing;
        };
        match Offset::from_landmark(landmark, size, self.config.scale) {
            Some(next) => {
                trace!(x = next.x, y = next.y, "offset");
                *offset = next;
                self.last_landmark = Some((*landmark, size));
                TickOutcome::Updated(next)
            }
            None => TickOutcome::DegenerateFrame,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
