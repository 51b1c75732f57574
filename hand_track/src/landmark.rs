//! Hand landmarks as returned by a pose detector.
//!
//! Coordinates are in frame pixels, image convention: `x` grows right, `y`
//! grows *down*.  `z` is detector-specific depth and is carried but unused.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices (21-point hand topology)
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in a full hand.
pub const HAND_LANDMARKS: usize = 21;

/// The landmark whose position drives the box.
pub const TRACKED_LANDMARK: usize = 9;

// ════════════════════════════════════════════════════════════════════════════
// Landmark / Hand
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

/// One detected hand: an ordered landmark list.
///
/// Detectors normally return [`HAND_LANDMARKS`] points but nothing here
/// relies on that; lookups are bounds-checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Hand { landmarks }
    }

    /// A hand long enough to contain `index`, every landmark collapsed onto
    /// `at`.  Handy for detectors that only know one point.
    pub fn with_landmark_at(index: usize, at: Landmark) -> Self {
        Hand { landmarks: vec![at; HAND_LANDMARKS.max(index + 1)] }
    }

    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Synthesize a plausible open-palm skeleton whose `anchor` landmark sits
    /// at `(x, y)`.  `span` is roughly the palm width in pixels.
    pub fn open_palm(anchor: usize, x: f32, y: f32, span: f32) -> Self {
        // Layout relative to the wrist, in palm widths; y up is negative.
        const LAYOUT: [(f32, f32); HAND_LANDMARKS] = [
            ( 0.00,  0.00),                                         // wrist
            (-0.35, -0.15), (-0.60, -0.35), (-0.75, -0.55), (-0.85, -0.75), // thumb
            (-0.25, -0.90), (-0.28, -1.25), (-0.30, -1.45), (-0.32, -1.65), // index
            ( 0.00, -0.95), ( 0.00, -1.35), ( 0.00, -1.58), ( 0.00, -1.80), // middle
            ( 0.22, -0.88), ( 0.24, -1.22), ( 0.25, -1.42), ( 0.26, -1.60), // ring
            ( 0.42, -0.78), ( 0.48, -1.02), ( 0.51, -1.18), ( 0.54, -1.32), // pinky
        ];
        let (ax, ay) = LAYOUT.get(anchor).copied().unwrap_or((0.0, 0.0));
        let landmarks = LAYOUT
            .iter()
            .map(|&(dx, dy)| Landmark::new(x + (dx - ax) * span, y + (dy - ay) * span, 0.0))
            .collect();
        Hand { landmarks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_landmark_is_middle_mcp() {
        assert_eq!(TRACKED_LANDMARK, MIDDLE_MCP);
    }

    #[test]
    fn with_landmark_at_has_full_length() {
        let h = Hand::with_landmark_at(9, Landmark::new(1.0, 2.0, 0.0));
        assert_eq!(h.landmarks.len(), HAND_LANDMARKS);
        assert_eq!(h.landmark(9), Some(&Landmark::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn with_landmark_at_grows_for_large_index() {
        let h = Hand::with_landmark_at(30, Landmark::default());
        assert_eq!(h.landmarks.len(), 31);
    }

    #[test]
    fn landmark_out_of_range_is_none() {
        let h = Hand::new(vec![Landmark::default(); 5]);
        assert!(h.landmark(9).is_none());
    }

    #[test]
    fn open_palm_places_anchor_exactly() {
        let h = Hand::open_palm(TRACKED_LANDMARK, 100.0, 200.0, 60.0);
        assert_eq!(h.landmarks.len(), HAND_LANDMARKS);
        let a = h.landmark(TRACKED_LANDMARK).unwrap();
        assert_eq!((a.x, a.y), (100.0, 200.0));
        // Fingertips sit above (smaller y than) the wrist.
        assert!(h.landmark(MIDDLE_TIP).unwrap().y < h.landmark(WRIST).unwrap().y);
    }
}
