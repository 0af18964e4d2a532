//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage, barycentric weights and the depth test.
//! A shader only turns the weights of a surviving pixel into a color.

use crate::math::Vec2;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that sum to 1
/// for any point inside the triangle and can interpolate any per-vertex
/// attribute: `attr = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`.
pub trait PixelShader {
    /// Compute the ARGB color for a pixel given its barycentric coordinates.
    fn shade(&self, lambda: [f64; 3]) -> u32;
}

/// Flat shader - returns a constant color for all pixels.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f64; 3]) -> u32 {
        self.color
    }
}

/// Texture shader - samples texture at interpolated (s, t) coordinates.
///
/// The texture color replaces the surface color entirely; there is no
/// lighting term.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    tex_coords: [Vec2; 3],
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, tex_coords: [Vec2; 3]) -> Self {
        Self {
            texture,
            tex_coords,
        }
    }

    /// Interpolate texture coordinates using barycentric weights
    #[inline]
    pub fn interpolate(&self, lambda: [f64; 3]) -> (f64, f64) {
        let [a, b, c] = self.tex_coords;
        let s = lambda[0] * a.x + lambda[1] * b.x + lambda[2] * c.x;
        let t = lambda[0] * a.y + lambda[1] * b.y + lambda[2] * c.y;
        (s, t)
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f64; 3]) -> u32 {
        let (s, t) = self.interpolate(lambda);
        self.texture.sample(s, t)
    }
}
