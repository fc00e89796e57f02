use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The two states a pixel can be in; there is no blending.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Pixel {
    #[default]
    Black,
    White,
}

impl Pixel {
    pub fn is_white(self) -> bool {
        self == Pixel::White
    }
}

/// # FrameBuffer
/// A 64x32 monochrome bitmap indexed as `[y][x]`, plus a dirty flag recording that the
/// contents changed since they were last presented.
///
/// Coordinates passed to `get` and `set` must be in bounds; the interpreter clips sprite
/// pixels before they reach the frame buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[Pixel; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub const WIDTH: usize = DISPLAY_WIDTH;
    pub const HEIGHT: usize = DISPLAY_HEIGHT;

    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[Pixel::Black; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Turns every pixel black. Leaves the dirty flag alone.
    pub fn clear(&mut self) {
        self.pixels = [[Pixel::Black; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        self.pixels[y][x] = pixel;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Rows from top to bottom, each from left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    pub fn lit_pixels(&self) -> usize {
        self.rows().flatten().filter(|p| p.is_white()).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
