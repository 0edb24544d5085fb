//! Row-major pixel buffer owned by the frame renderer.
//!
//! The buffer is reused in place across frames while its dimensions are
//! stable, and reallocated (old contents discarded) whenever the requested
//! resolution changes. After a render pass it is handed to the display layer
//! as a read-only data source.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};

use crate::material::Color;

/// Row-major buffer of linear, unclamped RGB pixels.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl FrameBuffer {
    /// Empty zero-sized buffer; call [`FrameBuffer::allocate`] (or let the
    /// renderer do it) before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Discard the current contents and size the buffer for `width` x
    /// `height` black pixels.
    pub fn allocate(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![Vec3A::ZERO; width as usize * height as usize];
    }

    /// Pixel at (x, y). Out-of-range coordinates are a programming error.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[self.index(x, y)]
    }

    /// Store a pixel at (x, y). Out-of-range coordinates are a programming
    /// error.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.data[index] = color;
    }

    /// Mutable view of the rows, for the parallel pixel loop. Each row is a
    /// disjoint slice, so rows can be filled concurrently.
    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Color> {
        self.data.chunks_mut(self.width.max(1) as usize)
    }

    /// Convert to the interchange image type consumed by the output layer.
    /// Values stay linear and unclamped.
    pub fn to_image(&self) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, y);
            Rgb([c.x, c.y, c.z])
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        (x + y * self.width) as usize
    }
}
