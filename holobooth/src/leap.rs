//! LeapMotion hand source.
//!
//! The controller reports joints in millimetres above the device.  They are
//! projected into a virtual 640×480 "camera" frame so the rest of the
//! pipeline sees ordinary image-space landmarks:
//!
//! * x ∈ [-200, 200] mm  →  [0, 640] px
//! * y ∈ [ 100, 400] mm  →  [480, 0] px (higher hand = smaller image y)
//!
//! LeapC queues events (tracking frames, device and policy notices) faster
//! than a detection tick consumes them, so each tick drains the queue and
//! keeps only the newest tracking frame.  The queue handling and projection
//! are plain functions; only [`LeapModel`] and its detector need the `leap`
//! feature and the LeapC shared library.

#[cfg(feature = "leap")]
use leaprs::{Connection, ConnectionConfig, Event};
#[cfg(feature = "leap")]
use tracing::{debug, info};

use hand_track::{Frame, FrameSize, Hand, Landmark, TrackError, VideoSource, HAND_LANDMARKS};
#[cfg(feature = "leap")]
use hand_track::{HandDetector, ModelLoader};

const VIRTUAL_FRAME: FrameSize = FrameSize { width: 640, height: 480 };
const X_HALF_RANGE_MM: f32 = 200.0;
const Y_MIN_MM: f32 = 100.0;
const Y_MAX_MM: f32 = 400.0;
/// How long the first poll of a tick may wait for an event.
pub const POLL_TIMEOUT_MS: u32 = 10;
/// Upper bound on events consumed per tick.
pub const MAX_DRAIN: usize = 64;

/// Project one Leap-space point (mm) into virtual frame pixels.
pub fn project_mm(x: f32, y: f32, z: f32, frame: FrameSize) -> Landmark {
    let u = (x + X_HALF_RANGE_MM) / (2.0 * X_HALF_RANGE_MM);
    let v = 1.0 - (y - Y_MIN_MM) / (Y_MAX_MM - Y_MIN_MM);
    Landmark::new(u * frame.width as f32, v * frame.height as f32, z)
}

/// Build a hand from its palm centre and the twenty digit joints (thumb
/// first, four per digit, knuckle to tip), all in millimetres.
pub fn hand_from_joints(
    palm: [f32; 3],
    joints: impl IntoIterator<Item = [f32; 3]>,
    frame: FrameSize,
) -> Hand {
    let mut landmarks = Vec::with_capacity(HAND_LANDMARKS);
    landmarks.push(project_mm(palm[0], palm[1], palm[2], frame));
    landmarks.extend(joints.into_iter().map(|[x, y, z]| project_mm(x, y, z, frame)));
    Hand::new(landmarks)
}

// ════════════════════════════════════════════════════════════════════════════
// Event queue
// ════════════════════════════════════════════════════════════════════════════

/// One poll of the event queue, reduced to what a detection tick cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Polled<T> {
    Tracking(T),
    /// A device, policy or log event.
    Other,
    /// Nothing arrived before the timeout.
    Empty,
}

/// Drain queued events and return the newest tracking payload.
///
/// `poll` receives the timeout to wait: [`POLL_TIMEOUT_MS`] for the first
/// call, 0 afterwards.  Stops at the first empty poll or after
/// [`MAX_DRAIN`] events.  `Ok(None)` means no tracking event was queued.
/// An error ends the drain; it is returned only if no tracking payload was
/// seen before it.
pub fn drain_latest<T, E>(mut poll: impl FnMut(u32) -> Result<Polled<T>, E>) -> Result<Option<T>, E> {
    let mut latest = None;
    for i in 0..MAX_DRAIN {
        let timeout = if i == 0 { POLL_TIMEOUT_MS } else { 0 };
        match poll(timeout) {
            Ok(Polled::Tracking(t)) => latest = Some(t),
            Ok(Polled::Other) => {}
            Ok(Polled::Empty) => break,
            Err(e) if latest.is_none() => return Err(e),
            Err(_) => break,
        }
    }
    Ok(latest)
}

// ════════════════════════════════════════════════════════════════════════════
// LeapVideo: the virtual camera
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct LeapVideo {
    opened:   bool,
    sequence: u64,
}

impl VideoSource for LeapVideo {
    fn open(&mut self) -> Result<FrameSize, TrackError> {
        self.opened = true;
        Ok(VIRTUAL_FRAME)
    }

    fn current_frame(&mut self) -> Option<Frame> {
        if !self.opened {
            return None;
        }
        self.sequence += 1;
        Some(Frame { size: VIRTUAL_FRAME, sequence: self.sequence })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapModel / LeapDetector
// ════════════════════════════════════════════════════════════════════════════

/// "Loading the model" means connecting to the LeapC service.
#[cfg(feature = "leap")]
#[derive(Debug, Default)]
pub struct LeapModel;

#[cfg(feature = "leap")]
impl ModelLoader for LeapModel {
    fn load(self: Box<Self>) -> Result<Box<dyn HandDetector>, TrackError> {
        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| TrackError::ModelLoad(format!("LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| TrackError::ModelLoad(format!("LeapMotion device: {:?}", e)))?;
        info!("LeapMotion connection open");
        Ok(Box::new(LeapDetector { connection, last_hands: Vec::new() }))
    }
}

#[cfg(feature = "leap")]
struct LeapDetector {
    connection: Connection,
    /// Hands from the newest tracking frame, reused on ticks where only
    /// non-tracking events (or none) arrived.
    last_hands: Vec<Hand>,
}

#[cfg(feature = "leap")]
impl HandDetector for LeapDetector {
    fn estimate_hands(&mut self, frame: &Frame) -> Result<Vec<Hand>, TrackError> {
        let size = frame.size;
        let connection = &mut self.connection;
        let latest = drain_latest(|timeout| {
            let msg = match connection.poll(timeout) {
                Ok(msg) => msg,
                Err(leaprs::Error::Timeout) => return Ok(Polled::Empty),
                Err(e) => return Err(TrackError::Detection(format!("{:?}", e))),
            };
            let Event::Tracking(tracking) = msg.event() else {
                return Ok(Polled::Other);
            };
            let hands: Vec<Hand> = tracking
                .hands()
                .map(|hand| {
                    let palm = hand.palm().position();
                    let joints: Vec<[f32; 3]> = hand
                        .digits()
                        .into_iter()
                        .flat_map(|digit| {
                            [
                                digit.metacarpal().next_joint(),
                                digit.proximal().next_joint(),
                                digit.intermediate().next_joint(),
                                digit.distal().next_joint(),
                            ]
                        })
                        .map(|j| [j.x, j.y, j.z])
                        .collect();
                    hand_from_joints([palm.x, palm.y, palm.z], joints, size)
                })
                .collect();
            Ok(Polled::Tracking(hands))
        })?;

        match latest {
            Some(hands) => self.last_hands = hands,
            None => debug!("no tracking event this tick; reusing last hands"),
        }
        Ok(self.last_hands.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Poll function over a fixed queue; records each timeout it was given.
    fn scripted<'a>(
        events: Vec<Result<Polled<u32>, &'static str>>,
        timeouts: &'a mut Vec<u32>,
    ) -> impl FnMut(u32) -> Result<Polled<u32>, &'static str> + 'a {
        let mut queue: VecDeque<_> = events.into();
        move |timeout| {
            timeouts.push(timeout);
            queue.pop_front().unwrap_or(Ok(Polled::Empty))
        }
    }

    #[test]
    fn device_centre_at_mid_height_is_frame_centre() {
        let lm = project_mm(0.0, 250.0, 0.0, VIRTUAL_FRAME);
        assert_eq!((lm.x, lm.y), (320.0, 240.0));
    }

    #[test]
    fn higher_hand_is_higher_in_frame() {
        let low = project_mm(0.0, 150.0, 0.0, VIRTUAL_FRAME);
        let high = project_mm(0.0, 350.0, 0.0, VIRTUAL_FRAME);
        assert!(high.y < low.y);
    }

    #[test]
    fn range_edges_hit_frame_edges() {
        let lm = project_mm(200.0, 100.0, 0.0, VIRTUAL_FRAME);
        assert_eq!((lm.x, lm.y), (640.0, 480.0));
    }

    #[test]
    fn drain_keeps_newest_tracking_frame() {
        let mut timeouts = Vec::new();
        let poll = scripted(
            vec![
                Ok(Polled::Tracking(1)),
                Ok(Polled::Other),
                Ok(Polled::Tracking(2)),
                Ok(Polled::Tracking(3)),
                Ok(Polled::Other),
            ],
            &mut timeouts,
        );
        assert_eq!(drain_latest(poll), Ok(Some(3)));
        assert_eq!(timeouts, vec![POLL_TIMEOUT_MS, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn non_tracking_events_alone_are_not_an_error() {
        let mut timeouts = Vec::new();
        let poll = scripted(vec![Ok(Polled::Other), Ok(Polled::Other)], &mut timeouts);
        assert_eq!(drain_latest(poll), Ok(None));
    }

    #[test]
    fn empty_queue_waits_once() {
        let mut timeouts = Vec::new();
        let poll = scripted(vec![], &mut timeouts);
        assert_eq!(drain_latest(poll), Ok(None));
        assert_eq!(timeouts, vec![POLL_TIMEOUT_MS]);
    }

    #[test]
    fn error_before_any_frame_propagates() {
        let mut timeouts = Vec::new();
        let poll = scripted(vec![Ok(Polled::Other), Err("device lost")], &mut timeouts);
        assert_eq!(drain_latest(poll), Err("device lost"));
    }

    #[test]
    fn error_after_a_frame_keeps_the_frame() {
        let mut timeouts = Vec::new();
        let poll = scripted(vec![Ok(Polled::Tracking(7)), Err("device lost")], &mut timeouts);
        assert_eq!(drain_latest(poll), Ok(Some(7)));
    }

    #[test]
    fn drain_is_bounded() {
        let mut calls = 0;
        let result = drain_latest(|_| -> Result<Polled<usize>, ()> {
            calls += 1;
            Ok(Polled::Tracking(calls))
        });
        assert_eq!(result, Ok(Some(MAX_DRAIN)));
        assert_eq!(calls, MAX_DRAIN);
    }

    #[test]
    fn joints_become_a_full_hand() {
        let joints = (0..20).map(|i| [i as f32 * 10.0 - 100.0, 250.0, 0.0]);
        let hand = hand_from_joints([0.0, 250.0, 0.0], joints, VIRTUAL_FRAME);
        assert_eq!(hand.landmarks.len(), HAND_LANDMARKS);
        let palm = hand.landmark(0).unwrap();
        assert_eq!((palm.x, palm.y), (320.0, 240.0));
        // Landmark 9 is the middle-finger knuckle.
        let knuckle = hand.landmark(9).unwrap();
        assert_eq!(knuckle.x, project_mm(-20.0, 250.0, 0.0, VIRTUAL_FRAME).x);
    }
}
