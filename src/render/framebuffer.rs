//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view over a color buffer and a [`DepthBuffer`] of the same size.
//! All visibility decisions go through [`DepthBuffer::update`].

use super::depth::DepthBuffer;

/// A view into color and depth buffers.
///
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut DepthBuffer,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view.
    ///
    /// # Panics
    /// Panics in debug builds if the color buffer length doesn't match the
    /// depth buffer dimensions.
    pub fn new(color_buffer: &'a mut [u32], depth_buffer: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            depth_buffer.width() as usize * depth_buffer.height() as usize,
            "Color buffer size doesn't match depth buffer"
        );
        Self {
            color_buffer,
            depth_buffer,
        }
    }

    pub fn width(&self) -> u32 {
        self.depth_buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.depth_buffer.height()
    }

    pub fn depth(&self) -> &DepthBuffer {
        self.depth_buffer
    }

    /// Depth-test `depth` at (x, y) and, if it passes, write the color
    /// produced by `shade`.
    ///
    /// `shade` only runs for pixels that survive the depth test. Returns
    /// whether the pixel was written. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel_with_depth<F>(&mut self, x: u32, y: u32, depth: f64, shade: F) -> bool
    where
        F: FnOnce() -> u32,
    {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        if !self.depth_buffer.update(x, y, depth) {
            return false;
        }
        let idx = y as usize * self.width() as usize + x as usize;
        self.color_buffer[idx] = shade();
        true
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width() && y < self.height() {
            Some(self.color_buffer[y as usize * self.width() as usize + x as usize])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occluded_pixel_keeps_color_and_skips_shading() {
        let mut color = vec![0u32; 4];
        let mut depth = DepthBuffer::new(2, 2);
        let mut fb = FrameBuffer::new(&mut color, &mut depth);

        assert!(fb.set_pixel_with_depth(1, 0, -10.0, || 0xFFFF0000));
        let written = fb.set_pixel_with_depth(1, 0, -20.0, || panic!("shaded occluded pixel"));
        assert!(!written);
        assert_eq!(fb.pixel(1, 0), Some(0xFFFF0000));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut color = vec![0u32; 4];
        let mut depth = DepthBuffer::new(2, 2);
        let mut fb = FrameBuffer::new(&mut color, &mut depth);
        assert!(!fb.set_pixel_with_depth(2, 0, -1.0, || 1));
        assert_eq!(fb.pixel(0, 2), None);
        assert_eq!(fb.depth().filled(), 0);
    }
}
