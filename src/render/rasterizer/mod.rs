//! Triangle rasterization.
//!
//! A [`ScreenTriangle`] is a triangle whose vertices have already been
//! projected to raster coordinates, together with the view-space depth of
//! each vertex. The [`EdgeFunctionRasterizer`] scan-converts it, depth-tests
//! every covered pixel and hands surviving pixels to a [`PixelShader`].

mod edgefunction;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use shader::{FlatShader, PixelShader, TextureShader};

use super::framebuffer::FrameBuffer;
use crate::math::{cross_2d, Vec2};

/// Twice the signed area of the screen triangle `(p0, p1, p2)`:
/// `cross(p1 - p0, p2 - p0)`.
///
/// Raster Y grows downward, so a triangle that winds counter-clockwise in
/// projected (Y up) space has a negative area here and faces the viewer.
#[inline]
pub fn signed_area(p0: Vec2, p1: Vec2, p2: Vec2) -> f64 {
    cross_2d(p1 - p0, p2 - p0)
}

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    /// Raster positions.
    pub points: [Vec2; 3],
    /// View-space Z of each vertex (larger = nearer).
    pub depths: [f64; 3],
}

impl ScreenTriangle {
    pub fn new(points: [Vec2; 3], depths: [f64; 3]) -> Self {
        Self { points, depths }
    }

    #[inline]
    pub fn signed_area(&self) -> f64 {
        let [p0, p1, p2] = self.points;
        signed_area(p0, p1, p2)
    }

    /// Whether the triangle faces away from the viewer (positive area).
    #[inline]
    pub fn is_back_facing(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Barycentric weights of `p` given the reciprocal of the signed area.
    ///
    /// Each weight is the signed area of the sub-triangle formed by `p` and
    /// the two other vertices, scaled by `inv_area`. The weights sum to 1 and
    /// are all non-negative exactly when `p` lies inside the triangle.
    #[inline]
    pub fn barycentric(&self, p: Vec2, inv_area: f64) -> [f64; 3] {
        let [p0, p1, p2] = self.points;
        let v0 = p0 - p;
        let v1 = p1 - p;
        let v2 = p2 - p;
        [
            v1.cross(v2) * inv_area,
            v2.cross(v0) * inv_area,
            v0.cross(v1) * inv_area,
        ]
    }

    /// Interpolated view-space depth.
    #[inline]
    pub fn depth_at(&self, lambda: [f64; 3]) -> f64 {
        lambda[0] * self.depths[0] + lambda[1] * self.depths[1] + lambda[2] * self.depths[2]
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define which pixels a triangle covers. Depth testing and
/// shading go through the [`FrameBuffer`] and the supplied shader.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// `inv_area` is the reciprocal of [`ScreenTriangle::signed_area`]; the
    /// caller has already rejected degenerate triangles. Returns the number
    /// of pixels that passed the depth test and were written.
    fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &ScreenTriangle,
        inv_area: f64,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tri() -> ScreenTriangle {
        ScreenTriangle::new(
            [
                Vec2::new(10.0, 10.0),
                Vec2::new(10.0, 90.0),
                Vec2::new(70.0, 40.0),
            ],
            [-1.0, -2.0, -3.0],
        )
    }

    #[test]
    fn barycentric_weights_sum_to_one() {
        let t = tri();
        let inv_area = 1.0 / t.signed_area();
        for &(x, y) in &[(20.5, 30.5), (15.0, 80.0), (50.25, 41.75), (11.0, 11.0)] {
            let l = t.barycentric(Vec2::new(x, y), inv_area);
            assert_abs_diff_eq!(l[0] + l[1] + l[2], 1.0, epsilon = 1e-9);
            assert!(l.iter().all(|&w| w >= 0.0));
        }
    }

    #[test]
    fn barycentric_at_vertices_is_unit() {
        let t = tri();
        let inv_area = 1.0 / t.signed_area();
        for (i, &p) in t.points.iter().enumerate() {
            let l = t.barycentric(p, inv_area);
            for (j, &w) in l.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(w, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn outside_point_has_negative_weight() {
        let t = tri();
        let l = t.barycentric(Vec2::new(0.0, 0.0), 1.0 / t.signed_area());
        assert!(l.iter().any(|&w| w < 0.0));
    }

    #[test]
    fn depth_interpolates_linearly() {
        let t = tri();
        assert_abs_diff_eq!(t.depth_at([1.0 / 3.0; 3]), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn winding_sign() {
        // Counter-clockwise in Y-up projected space becomes negative in raster space.
        let front = ScreenTriangle::new(
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0)],
            [0.0; 3],
        );
        assert!(front.signed_area() < 0.0);
        assert!(!front.is_back_facing());

        let back = ScreenTriangle::new(
            [Vec2::new(0.0, 0.0), Vec2::new(0.0, -1.0), Vec2::new(1.0, 0.0)],
            [0.0; 3],
        );
        assert!(back.is_back_facing());
    }
}
