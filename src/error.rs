//! Error types.
//!
//! Construction and configuration problems are reported through these enums.
//! Per-pixel and per-face numerical edge cases are never errors: the
//! rasterizer skips them (see [`crate::render::DrawOutcome`]).

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("focal length must be finite and positive, got {0}")]
    FocalLength(f64),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("ambient occlusion needs at least one {0}")]
    AoZero(&'static str),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A texture that cannot be built from the supplied pixels.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("expected {expected} pixels for the texture, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Failure while turning an OBJ/MTL pair into faces.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: TextureError,
    },

    #[error("mesh '{0}' has faces but no material")]
    MissingMaterial(String),

    #[error("material '{0}' has no diffuse texture")]
    MissingTexture(String),

    #[error("mesh '{0}' has no texture coordinates")]
    MissingTexCoords(String),

    #[error("a face needs exactly 3 vertices, got {0}")]
    VertexCount(usize),
}

/// SDL reports failures as strings.
#[cfg(feature = "window")]
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("SDL error: {0}")]
    Sdl(String),
}
