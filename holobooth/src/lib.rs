//! # holobooth
//!
//! Moves a 3D box around a window by following a tracked hand.
//!
//! ## Pipeline
//!
//! | Tick | Reads | Writes |
//! |---|---|---|
//! | Detection (every frame, or every `interval_ms`) | video frame → detector | `Offset` |
//! | Render (every display refresh) | `Offset` | box position, window pixels |
//!
//! The offset is the tracked landmark's displacement from the frame centre,
//! one-tenth of the frame per unit by default, Y pointing up.  When no hand
//! is seen the box stays where it was.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**, the mouse pointer over the window is
//!   the hand; move it out of the window to "lose" the hand.
//! * `leap`: **Hardware mode**, polls a real LeapMotion controller via LeapC.
//!
//! ### Keys
//!
//! | Key | Action |
//! |---|---|
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod booth;
pub mod config;
pub mod error;
pub mod leap;
pub mod raster;
pub mod schedule;
pub mod sim;
pub mod window;

pub use error::{BoothError, ConfigError, Result};
