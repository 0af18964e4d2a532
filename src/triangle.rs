//! Textured triangles.
//!
//! A [`Face`] owns three vertices and a shared [`Material`]. Its geometry is
//! immutable; all per-frame state (projected points, reciprocal area) lives on
//! the stack of [`Face::draw`].

use std::sync::Arc;

use log::trace;

use crate::camera::View;
use crate::error::LoadError;
use crate::material::Material;
use crate::math::{Vec2, Vec3};
use crate::render::{
    DrawOutcome, EdgeFunctionRasterizer, FrameBuffer, Rasterizer, ScreenTriangle, TextureShader,
};

/// Signed areas with a smaller magnitude are treated as degenerate.
pub const MIN_AREA: f64 = 1e-12;

/// A mesh vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Texture coordinate (s, t) with t pointing up.
    pub tex_coord: Vec2,
    /// Carried for loaders and future shading; not used by the rasterizer.
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, tex_coord: Vec2, normal: Vec3) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

/// A textured triangle. Vertex order defines the winding.
#[derive(Clone, Debug)]
pub struct Face {
    vertices: [Vertex; 3],
    material: Arc<Material>,
}

impl Face {
    pub fn new(vertices: [Vertex; 3], material: Arc<Material>) -> Self {
        Self { vertices, material }
    }

    /// Build a face from a vertex list, rejecting anything but a triangle.
    pub fn from_slice(vertices: &[Vertex], material: Arc<Material>) -> Result<Self, LoadError> {
        let vertices: [Vertex; 3] = vertices
            .try_into()
            .map_err(|_| LoadError::VertexCount(vertices.len()))?;
        Ok(Self::new(vertices, material))
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Transform and project the face for `view`.
    ///
    /// Returns `None` when any vertex cannot be projected.
    pub fn project(&self, view: &View) -> Option<ScreenTriangle> {
        let mut points = [Vec2::ZERO; 3];
        let mut depths = [0.0; 3];
        for (i, vertex) in self.vertices.iter().enumerate() {
            let p = view.transform(vertex.position);
            points[i] = view.projection.project(p)?;
            depths[i] = p.z;
        }
        Some(ScreenTriangle::new(points, depths))
    }

    /// Rasterize the face into `buffer` as seen from `view`.
    ///
    /// Back faces and degenerate faces return early without touching the
    /// buffer.
    pub fn draw(&self, view: &View, buffer: &mut FrameBuffer) -> DrawOutcome {
        self.draw_with(&EdgeFunctionRasterizer, view, buffer)
    }

    pub fn draw_with<R: Rasterizer>(
        &self,
        rasterizer: &R,
        view: &View,
        buffer: &mut FrameBuffer,
    ) -> DrawOutcome {
        let Some(triangle) = self.project(view) else {
            trace!("face with material '{}' not projectable", self.material.name());
            return DrawOutcome::Degenerate;
        };

        let area = triangle.signed_area();
        if !area.is_finite() {
            return DrawOutcome::Degenerate;
        }
        if triangle.is_back_facing() {
            return DrawOutcome::Culled;
        }
        if area > -MIN_AREA {
            return DrawOutcome::Degenerate;
        }

        let shader = TextureShader::new(
            self.material.texture(),
            [
                self.vertices[0].tex_coord,
                self.vertices[1].tex_coord,
                self.vertices[2].tex_coord,
            ],
        );
        let pixels = rasterizer.fill_triangle(&triangle, 1.0 / area, buffer, &shader);
        DrawOutcome::Drawn { pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Projection;
    use crate::render::DepthBuffer;
    use crate::texture::Texture;

    const GREEN: u32 = 0xFF00FF00;

    fn material() -> Arc<Material> {
        Material::shared("green", Texture::solid(2, 2, GREEN).unwrap())
    }

    /// Focal length equal to the camera distance, so a point at z = 0 in
    /// model space projects to offset (x, y).
    fn flat_view() -> View {
        View::new(0.0, 0.0, 100.0, Projection::new(100.0, 64, 64))
    }

    fn vertex(x: f64, y: f64) -> Vertex {
        Vertex::new(Vec3::new(x, y, 0.0), Vec2::new(x / 20.0, y / 20.0), Vec3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn counter_clockwise_face_is_drawn() {
        let face = Face::new([vertex(0.0, 0.0), vertex(20.0, 0.0), vertex(0.0, 20.0)], material());
        let mut color = vec![0u32; 64 * 64];
        let mut depth = DepthBuffer::new(64, 64);
        let outcome = face.draw(&flat_view(), &mut FrameBuffer::new(&mut color, &mut depth));

        match outcome {
            DrawOutcome::Drawn { pixels } => assert!(pixels > 100),
            other => panic!("expected drawn, got {other:?}"),
        }
        // Just up-right of the projected origin (32, 32)
        assert_eq!(color[30 * 64 + 34], GREEN);
        assert!(!depth.is_empty(34, 30));
    }

    #[test]
    fn clockwise_face_is_culled_without_touching_depth() {
        let face = Face::new([vertex(0.0, 0.0), vertex(0.0, 20.0), vertex(20.0, 0.0)], material());
        let mut color = vec![0u32; 64 * 64];
        let mut depth = DepthBuffer::new(64, 64);
        let outcome = face.draw(&flat_view(), &mut FrameBuffer::new(&mut color, &mut depth));

        assert_eq!(outcome, DrawOutcome::Culled);
        assert_eq!(depth.filled(), 0);
        assert!(color.iter().all(|&c| c == 0));
    }

    #[test]
    fn collinear_face_is_degenerate() {
        let face = Face::new([vertex(0.0, 0.0), vertex(5.0, 5.0), vertex(10.0, 10.0)], material());
        let mut color = vec![0u32; 64 * 64];
        let mut depth = DepthBuffer::new(64, 64);
        let outcome = face.draw(&flat_view(), &mut FrameBuffer::new(&mut color, &mut depth));
        assert_eq!(outcome, DrawOutcome::Degenerate);
        assert_eq!(depth.filled(), 0);
    }

    #[test]
    fn vertex_at_camera_plane_is_degenerate() {
        // z = 100 in model space lands exactly on view z = 0
        let mut v = vertex(0.0, 20.0);
        v.position.z = 100.0;
        let face = Face::new([vertex(0.0, 0.0), vertex(20.0, 0.0), v], material());
        let mut color = vec![0u32; 64 * 64];
        let mut depth = DepthBuffer::new(64, 64);
        let outcome = face.draw(&flat_view(), &mut FrameBuffer::new(&mut color, &mut depth));
        assert_eq!(outcome, DrawOutcome::Degenerate);
        assert_eq!(depth.filled(), 0);
    }

    #[test]
    fn projected_depths_are_view_space_z() {
        let face = Face::new([vertex(0.0, 0.0), vertex(20.0, 0.0), vertex(0.0, 20.0)], material());
        let tri = face.project(&flat_view()).unwrap();
        assert_eq!(tri.depths, [-100.0; 3]);
        assert_eq!(tri.points[1], Vec2::new(52.0, 32.0));
        assert_eq!(tri.points[2], Vec2::new(32.0, 12.0));
    }

    #[test]
    fn from_slice_requires_three_vertices() {
        let vs = [vertex(0.0, 0.0), vertex(1.0, 0.0)];
        assert!(matches!(
            Face::from_slice(&vs, material()),
            Err(LoadError::VertexCount(2))
        ));
        let vs = [vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)];
        assert!(Face::from_slice(&vs, material()).is_ok());
    }
}
