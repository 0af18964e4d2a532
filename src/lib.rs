//! A CPU-based textured triangle renderer with screen-space ambient occlusion.
//!
//! Textured triangles are projected with a pinhole camera, back-face culled,
//! depth tested and texture mapped into a color buffer. The finished depth
//! buffer then feeds a horizon-angle SSAO estimator whose blurred overlay is
//! composited over the color buffer. Everything runs on the CPU; SDL2 is only
//! used by the optional `ssao-view` binary for window management and display.
//!
//! # Quick Start
//!
//! ```ignore
//! use ssao_renderer::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default())?;
//! let mesh = Mesh::from_obj("head.obj", Placement::new(70.0, Vec3::new(0.0, 30.0, 0.0)))?;
//! let stats = engine.render(&mesh);
//! let frame: &[u32] = engine.presentation();
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod material;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod ssao;
pub mod texture;
pub mod triangle;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Turntable, View};
pub use config::{AoConfig, RenderConfig};
pub use engine::{DisplayMode, Engine, FrameStats};
pub use error::{ConfigError, LoadError, TextureError};
#[cfg(feature = "window")]
pub use error::WindowError;
pub use material::Material;
pub use mesh::{Mesh, Placement};
pub use projection::Projection;
pub use render::{DepthBuffer, DrawOutcome, EMPTY_DEPTH};
pub use ssao::AmbientOcclusion;
pub use texture::Texture;
pub use triangle::{Face, Vertex};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use ssao_renderer::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Turntable, View};

    // Configuration
    pub use crate::config::{AoConfig, RenderConfig};

    // Engine
    pub use crate::engine::{DisplayMode, Engine, FrameStats};

    // Scene
    pub use crate::material::Material;
    pub use crate::mesh::{Mesh, Placement};
    pub use crate::texture::Texture;
    pub use crate::triangle::{Face, Vertex};

    // Math
    pub use crate::math::{Vec2, Vec3};

    // Rendering
    pub use crate::projection::Projection;
    pub use crate::render::{DepthBuffer, DrawOutcome};
    pub use crate::ssao::AmbientOcclusion;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        EdgeFunctionRasterizer, FlatShader, FrameBuffer, Rasterizer, ScreenTriangle,
    };
}
