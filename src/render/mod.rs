//! Rendering internals: depth buffer, frame buffer views and the triangle
//! rasterizer.

pub mod depth;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use depth::{DepthBuffer, EMPTY_DEPTH};
pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    signed_area, EdgeFunctionRasterizer, FlatShader, PixelShader, Rasterizer, ScreenTriangle,
    TextureShader,
};
pub use renderer::Renderer;

/// What happened when a face was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Faces away from the viewer; nothing was touched.
    Culled,
    /// Could not be projected, or projects to (near) zero area.
    Degenerate,
    /// Rasterized; `pixels` passed the depth test and were written.
    Drawn { pixels: usize },
}
