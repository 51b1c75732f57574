//! Detection cadence.
//!
//! The main loop runs once per display refresh.  A [`Schedule`] decides on
//! each of those iterations whether a detection tick runs too.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Detect on every display refresh.
    #[default]
    EveryFrame,
    /// Detect at most once per this many milliseconds.
    #[serde(rename = "interval_ms")]
    Interval(u64),
}

#[derive(Debug)]
pub struct Schedule {
    cadence: Cadence,
    last:    Option<Instant>,
}

impl Schedule {
    pub fn new(cadence: Cadence) -> Self {
        Schedule { cadence, last: None }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// True when a detection tick should run at `now`; records it as run.
    pub fn due(&mut self, now: Instant) -> bool {
        let interval = match self.cadence {
            Cadence::EveryFrame => return true,
            Cadence::Interval(ms) => Duration::from_millis(ms),
        };
        match self.last {
            Some(last) if now.saturating_duration_since(last) < interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_frame_always_due() {
        let mut s = Schedule::new(Cadence::EveryFrame);
        let t = Instant::now();
        assert!((0..5).all(|_| s.due(t)));
    }

    #[test]
    fn interval_fires_first_then_waits() {
        let mut s = Schedule::new(Cadence::Interval(100));
        let t0 = Instant::now();
        assert!(s.due(t0));
        assert!(!s.due(t0 + Duration::from_millis(16)));
        assert!(!s.due(t0 + Duration::from_millis(99)));
        assert!(s.due(t0 + Duration::from_millis(100)));
        assert!(!s.due(t0 + Duration::from_millis(150)));
        assert!(s.due(t0 + Duration::from_millis(216)));
    }

    #[test]
    fn interval_never_fires_faster_than_period() {
        let mut s = Schedule::new(Cadence::Interval(50));
        let t0 = Instant::now();
        // 60 Hz display ticks over one second.
        let fired = (0..60)
            .filter(|i| s.due(t0 + Duration::from_micros(16_667 * i)))
            .count();
        assert!(fired <= 20, "fired {fired} times");
        assert!(fired >= 15, "fired {fired} times");
    }

    #[test]
    fn cadence_from_toml() {
        #[derive(Deserialize)]
        struct Wrap { cadence: Cadence }
        let w: Wrap = toml::from_str("cadence = \"every_frame\"").unwrap();
        assert_eq!(w.cadence, Cadence::EveryFrame);
        let w: Wrap = toml::from_str("cadence = { interval_ms = 100 }").unwrap();
        assert_eq!(w.cadence, Cadence::Interval(100));
    }
}
