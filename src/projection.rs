//! Pinhole perspective projection and viewport mapping.

use crate::math::{Vec2, Vec3};

/// View-space Z values closer to zero than this cannot be projected.
pub const MIN_DEPTH: f64 = 1e-9;

/// Perspective projection parameters.
///
/// Maps a view-space point to raster coordinates:
///
/// ```text
/// offset = focal * point.xy / -point.z
/// pixel  = (half_width + offset.x, half_height - offset.y)
/// ```
///
/// Y is flipped because raster rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Focal length in pixels.
    focal_length: f64,
    half_width: f64,
    half_height: f64,
}

impl Projection {
    pub fn new(focal_length: f64, width: u32, height: u32) -> Self {
        Self {
            focal_length,
            half_width: width as f64 / 2.0,
            half_height: height as f64 / 2.0,
        }
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Perspective-divided offset from the viewport center, Y up.
    ///
    /// Returns `None` when `point.z` is (nearly) zero or the result is not
    /// finite.
    #[inline]
    pub fn project_offset(&self, point: Vec3) -> Option<Vec2> {
        if point.z.abs() < MIN_DEPTH {
            return None;
        }
        let inv = self.focal_length / -point.z;
        let offset = Vec2::new(point.x * inv, point.y * inv);
        offset.is_finite().then_some(offset)
    }

    /// Map a projected offset to raster coordinates.
    #[inline]
    pub fn to_viewport(&self, offset: Vec2) -> Vec2 {
        Vec2::new(self.half_width + offset.x, self.half_height - offset.y)
    }

    /// Project a view-space point straight to raster coordinates.
    #[inline]
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        self.project_offset(point).map(|offset| self.to_viewport(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_on_axis_lands_at_center() {
        let proj = Projection::new(600.0, 800, 600);
        let p = proj.project(Vec3::new(0.0, 0.0, -600.0)).unwrap();
        assert_relative_eq!(p.x, 400.0);
        assert_relative_eq!(p.y, 300.0);
    }

    #[test]
    fn y_is_flipped() {
        let proj = Projection::new(600.0, 800, 600);
        let p = proj.project(Vec3::new(10.0, 10.0, -600.0)).unwrap();
        assert_relative_eq!(p.x, 410.0);
        assert_relative_eq!(p.y, 290.0);
    }

    #[test]
    fn farther_points_shrink() {
        let proj = Projection::new(100.0, 2, 2);
        let near = proj.project_offset(Vec3::new(1.0, 0.0, -10.0)).unwrap();
        let far = proj.project_offset(Vec3::new(1.0, 0.0, -20.0)).unwrap();
        assert_relative_eq!(near.x, 10.0);
        assert_relative_eq!(far.x, 5.0);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let proj = Projection::new(600.0, 800, 600);
        assert_eq!(proj.project(Vec3::new(1.0, 1.0, 0.0)), None);
        assert_eq!(proj.project(Vec3::new(1.0, 1.0, 1e-12)), None);
    }
}
