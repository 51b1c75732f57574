//! The output surface: a resizable `minifb` window.
//!
//! Owns no scene state.  Each frame the main loop polls it for input and
//! hands it a finished [`Raster`] to present.

use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::error::{BoothError, Result};
use crate::raster::Raster;

/// What the window reported this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowInput {
    pub quit:    bool,
    /// Current client-area size in pixels.
    pub size:    (usize, usize),
    /// Pointer position normalized to `0.0..=1.0`, `None` when outside.
    pub pointer: Option<(f32, f32)>,
}

pub struct Viewport {
    window: Window,
}

impl Viewport {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| BoothError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Viewport { window })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    pub fn poll(&self) -> WindowInput {
        let quit = !self.window.is_open()
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No);
        let size = self.window.get_size();
        let pointer = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .and_then(|(x, y)| normalize_pointer(x, y, size));
        WindowInput { quit, size, pointer }
    }

    /// Push a finished frame to the screen.
    pub fn present(&mut self, raster: &Raster) -> Result<()> {
        self.window
            .update_with_buffer(raster.buffer(), raster.width(), raster.height())
            .map_err(|e| BoothError::Window(e.to_string()))
    }
}

/// Window pixels → `0.0..=1.0`.  `None` outside the client area or for a
/// zero-area window.
pub fn normalize_pointer(x: f32, y: f32, (w, h): (usize, usize)) -> Option<(f32, f32)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (u, v) = (x / w as f32, y / h as f32);
    ((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)).then_some((u, v))
}
