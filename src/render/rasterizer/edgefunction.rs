//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute a bounding box around the triangle, clipped to the buffer
//! 2. For each pixel center in the box, evaluate the three edge functions
//! 3. Scale them by the reciprocal signed area to get barycentric weights
//! 4. A pixel is inside when all three weights are non-negative
//!
//! Scaling by the signed area makes the inside test independent of winding:
//! for either orientation interior points have three non-negative weights.
//!
//! # Edge Function
//!
//! For vertex `i` the weight is the signed area of the triangle formed by the
//! pixel and the two other vertices:
//!
//! ```text
//! w_i(P) = cross(P_j - P, P_k - P) / cross(P_1 - P_0, P_2 - P_0)
//! ```
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::PixelShader;
use super::{Rasterizer, ScreenTriangle};
use crate::math::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates over every pixel in the triangle's bounding box. Each covered
/// pixel gets an interpolated depth that is tested through the frame
/// buffer's depth buffer; only survivors are shaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Creates a new edge function rasterizer instance.
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    /// Inclusive pixel bounds of the triangle clipped to a `width` x `height`
    /// buffer, or `None` when nothing is on screen.
    fn bounds(triangle: &ScreenTriangle, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let [v0, v1, v2] = triangle.points;

        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0);
        let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(width as f64 - 1.0);
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0);
        let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(height as f64 - 1.0);

        if !(min_x <= max_x && min_y <= max_y) {
            return None;
        }
        Some((min_x as u32, max_x as u32, min_y as u32, max_y as u32))
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &ScreenTriangle,
        inv_area: f64,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        let Some((min_x, max_x, min_y, max_y)) =
            Self::bounds(triangle, buffer.width(), buffer.height())
        else {
            return 0;
        };

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let lambda = triangle.barycentric(p, inv_area);

                if lambda[0] < 0.0 || lambda[1] < 0.0 || lambda[2] < 0.0 {
                    continue;
                }

                let z = triangle.depth_at(lambda);
                if buffer.set_pixel_with_depth(x, y, z, || shader.shade(lambda)) {
                    written += 1;
                }
            }
        }
        written
    }
}
