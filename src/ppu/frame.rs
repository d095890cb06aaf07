// Frame buffer - RGBA8 pixel output of the PPU
//
// The NES has a resolution of 256×240 pixels. The PPU writes each pixel as it
// is produced; a front-end consumes the whole buffer once per frame.

use super::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Bytes per pixel (R, G, B, A)
pub const BYTES_PER_PIXEL: usize = 4;

/// Total size of the frame buffer in bytes
pub const FRAME_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL;

/// RGBA8 frame buffer, row-major, 4 bytes per pixel
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a frame buffer filled with opaque black
    pub fn new() -> Self {
        let mut pixels = vec![0; FRAME_SIZE];
        pixels
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .for_each(|pixel| pixel[3] = 0xFF);
        Self { pixels }
    }

    /// Store an opaque pixel
    ///
    /// Coordinates are always in range when called from the PPU; anything
    /// outside the screen is ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return;
        }
        let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
        self.pixels[offset..offset + 3].copy_from_slice(&rgb);
        self.pixels[offset + 3] = 0xFF;
    }

    /// RGBA value of one pixel
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        rgba
    }

    /// Raw RGBA bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish_non_exhaustive()
    }
}
