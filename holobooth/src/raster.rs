//! Software rasterizer for the booth scene.
//!
//! Draws into a packed `0xAARRGGBB` buffer that the window presents as-is.
//!
//! ```text
//! ┌──────────────────────────────────────────────┬───────────┐
//! │                                              │ webcam    │
//! │                  ┌──┐                        │ preview   │
//! │                  │  │  ← box, moved by hand  │   +  •    │
//! │                  │  │                        └───────────┤
//! │                  └──┘                                    │
//! │ status bar                                               │
//! └──────────────────────────────────────────────────────────┘
//! ```

use glam::Vec3;

use hand_track::scene::BOX_TRIANGLES;
use hand_track::{FrameSize, Landmark, Scene};

// ════════════════════════════════════════════════════════════════════════════
// Palette / layout
// ════════════════════════════════════════════════════════════════════════════

pub const BG_COLOR:       u32   = 0xFF1A1A2E;
const PREVIEW_BG:         u32   = 0xFF0F3460;
const PREVIEW_BORDER:     u32   = 0xFF888888;
const PREVIEW_CROSS:      u32   = 0xFF3C5A80;
const HAND_SEEN:          u32   = 0xFF3CE07A;
const HAND_STALE:         u32   = 0xFF777777;
const STATUS_BG:          u32   = 0xFF16213E;
const STATUS_FG:          u32   = 0xFFEEEEEE;
const PREVIEW_W:          usize = 160;
const PREVIEW_MARGIN:     usize = 10;
const STATUS_H:           usize = 16;
/// Shorter insets have no interior to place the landmark in.
pub const MIN_PREVIEW_H:  usize = 2;
const GLYPH_ADVANCE:      usize = 4;

// ════════════════════════════════════════════════════════════════════════════
// Raster
// ════════════════════════════════════════════════════════════════════════════

pub struct Raster {
    width:  usize,
    height: usize,
    color:  Vec<u32>,
    depth:  Vec<f32>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Raster {
            width,
            height,
            color: vec![BG_COLOR; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize  { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn buffer(&self) -> &[u32] { &self.color }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.color[y * self.width + x])
    }

    /// Reallocate to a new output size; contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        *self = Raster::new(width, height);
    }

    pub fn clear(&mut self, color: u32) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    // ── Scene ─────────────────────────────────────────────────────────────

    /// Draw the box mesh with a flat colour and a depth test.
    pub fn draw_scene(&mut self, scene: &Scene) {
        let mvp = scene.mvp();
        let color = 0xFF000000 | (scene.mesh.color & 0x00FF_FFFF);
        let projected: Vec<Option<Vec3>> = scene
            .mesh
            .vertices()
            .iter()
            .map(|&v| scene.project(&mvp, v))
            .collect();

        for tri in BOX_TRIANGLES.iter() {
            // No near-plane clipping: config validation keeps the box in
            // front of the near plane (see `scene::MAX_BOX_DEPTH`).
            if let (Some(a), Some(b), Some(c)) = (projected[tri[0]], projected[tri[1]], projected[tri[2]]) {
                self.fill_triangle(a, b, c, color);
            }
        }
    }

    /// Edge-function fill over the triangle's bounding box, sampling pixel
    /// centres.  Either winding is accepted.
    fn fill_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: u32) {
        let area = edge(a, b, c);
        if area.abs() < f32::EPSILON {
            return;
        }
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let max_x = (a.x.max(b.x).max(c.x).ceil().max(0.0) as usize).min(self.width);
        let max_y = (a.y.max(b.y).max(c.y).ceil().max(0.0) as usize).min(self.height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let p = Vec3::new(px as f32 + 0.5, py as f32 + 0.5, 0.0);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                let idx = py * self.width + px;
                if z < self.depth[idx] {
                    self.depth[idx] = z;
                    self.color[idx] = color;
                }
            }
        }
    }

    // ── Overlays ──────────────────────────────────────────────────────────

    /// Webcam preview inset in the top-right corner: frame outline, centre
    /// cross, and the tracked landmark.
    pub fn draw_preview(&mut self, frame: FrameSize, landmark: Option<Landmark>, hand_visible: bool) {
        if self.width < PREVIEW_W + 2 * PREVIEW_MARGIN {
            return;
        }
        let h = preview_height(frame);
        if h < MIN_PREVIEW_H || self.height < h + 2 * PREVIEW_MARGIN + STATUS_H {
            return;
        }
        let x0 = self.width - PREVIEW_W - PREVIEW_MARGIN;
        let y0 = PREVIEW_MARGIN;

        self.fill_rect(x0, y0, PREVIEW_W, h, PREVIEW_BG);
        self.fill_rect(x0 + PREVIEW_W / 2, y0, 1, h, PREVIEW_CROSS);
        self.fill_rect(x0, y0 + h / 2, PREVIEW_W, 1, PREVIEW_CROSS);
        self.draw_border(x0, y0, PREVIEW_W, h, PREVIEW_BORDER);

        if let Some(lm) = landmark {
            let u = (lm.x / frame.width as f32).clamp(0.0, 1.0);
            let v = (lm.y / frame.height as f32).clamp(0.0, 1.0);
            let cx = x0 + (u * (PREVIEW_W - 1) as f32) as usize;
            let cy = y0 + (v * (h - 1) as f32) as usize;
            let color = if hand_visible { HAND_SEEN } else { HAND_STALE };
            self.fill_rect(cx.saturating_sub(2), cy.saturating_sub(2), 5, 5, color);
        }
    }

    /// One line of text on a bar along the bottom edge.
    pub fn draw_status(&mut self, text: &str) {
        if self.height < STATUS_H {
            return;
        }
        let y = self.height - STATUS_H;
        self.fill_rect(0, y, self.width, STATUS_H, STATUS_BG);
        self.draw_text(text, 8, y + 5, STATUS_FG);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.color[row * self.width + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.color[y * self.width + x] = color;
        }
    }

    /// 3×5 bitmap text; unknown characters draw as a centre dot.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, color: u32) {
        for (i, ch) in text.chars().enumerate() {
            let gx = x + i * GLYPH_ADVANCE;
            if gx + GLYPH_ADVANCE > self.width {
                break;
            }
            let bits = glyph(ch);
            for row in 0..5 {
                for col in 0..3 {
                    if bits & (1 << (14 - (row * 3 + col))) != 0 {
                        self.set_pixel(gx + col, y + row, color);
                    }
                }
            }
        }
    }
}

/// Height of the preview inset for a frame of `size`; 0 for an empty frame.
pub fn preview_height(size: FrameSize) -> usize {
    if size.is_empty() {
        return 0;
    }
    PREVIEW_W * size.height as usize / size.width as usize
}

/// Twice the signed area of `(a, b, p)` in screen space.
fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 font, five 3-bit rows packed top row first
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> u16 {
    match c.to_ascii_uppercase() {
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b111_001_111_100_111,
        '3' => 0b111_001_011_001_111,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_111_001_111,
        '6' => 0b111_100_111_101_111,
        '7' => 0b111_001_010_010_010,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_111,
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'J' => 0b001_001_001_101_010,
        'K' => 0b101_110_100_110_101,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_111_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'P' => 0b110_101_110_100_100,
        'Q' => 0b010_101_101_110_011,
        'R' => 0b110_101_110_101_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_111,
        'V' => 0b101_101_101_101_010,
        'W' => 0b101_101_111_111_101,
        'X' => 0b101_101_010_101_101,
        'Y' => 0b101_101_010_010_010,
        'Z' => 0b111_001_010_100_111,
        '.' => 0b000_000_000_000_010,
        ',' => 0b000_000_000_010_100,
        ':' => 0b000_010_000_010_000,
        '-' => 0b000_000_111_000_000,
        '+' => 0b000_010_111_010_000,
        '=' => 0b000_111_000_111_000,
        '/' => 0b001_001_010_100_100,
        '(' => 0b010_100_100_100_010,
        ')' => 0b010_001_001_001_010,
        ' ' => 0,
        _   => 0b000_000_010_000_000,
    }
}
