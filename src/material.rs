//! Named surface material.

use std::sync::Arc;

use crate::texture::Texture;

/// A named material with a diffuse texture. Read-only once loaded and shared
/// between faces through [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    texture: Texture,
}

impl Material {
    pub fn new(name: impl Into<String>, texture: Texture) -> Self {
        Self {
            name: name.into(),
            texture,
        }
    }

    /// Convenience for wrapping a new material in an [`Arc`].
    pub fn shared(name: impl Into<String>, texture: Texture) -> Arc<Self> {
        Arc::new(Self::new(name, texture))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}
