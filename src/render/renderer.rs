//! Owned color and depth buffers.
//!
//! Provides the [`Renderer`] struct, which allocates the color buffer and the
//! depth buffer once and hands out [`FrameBuffer`] views for rasterization.

use super::depth::DepthBuffer;
use super::framebuffer::FrameBuffer;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: DepthBuffer,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32, background: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![background; size],
            depth_buffer: DepthBuffer::new(width, height),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clear the color buffer to `color` and reset the depth buffer.
    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
        self.depth_buffer.clear();
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, &mut self.depth_buffer)
    }
}

/// View an ARGB buffer as bytes in native order, which on little-endian
/// machines is the BGRA byte layout SDL2's `ARGB8888` format expects.
pub fn as_bytes(buffer: &[u32]) -> &[u8] {
    // SAFETY: u32 has no padding and u8 has alignment 1; the length covers
    // exactly the same memory.
    unsafe { std::slice::from_raw_parts(buffer.as_ptr() as *const u8, buffer.len() * 4) }
}
