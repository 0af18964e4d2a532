use std::path::Path;

use crate::error::TextureError;

/// A 2D texture for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    /// Build a texture from row-major ARGB pixels.
    pub fn new(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A texture filled with a single color.
    pub fn solid(width: u32, height: u32, color: u32) -> Result<Self, TextureError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    /// A `size` x `size` checkerboard with `cells` squares per side.
    pub fn checker(size: u32, cells: u32, a: u32, b: u32) -> Result<Self, TextureError> {
        let cell = (size / cells.max(1)).max(1);
        let data = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if (x / cell + y / cell) % 2 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect();
        Self::new(size, size, data)
    }

    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Self::new(width, height, data)
    }

    /// Texel at integer column/row. Row 0 is the top of the image.
    #[inline]
    pub fn pixel(&self, col: u32, row: u32) -> u32 {
        self.data[(row * self.width + col) as usize]
    }

    /// Texel column selected by texture coordinate `s`.
    #[inline]
    pub fn column(&self, s: f64) -> u32 {
        let s = wrap_unit(s);
        ((s * (self.width - 1) as f64).round() as u32).min(self.width - 1)
    }

    /// Texel row selected by texture coordinate `t`. `t = 0` is the bottom
    /// row, matching OBJ's bottom-left origin.
    #[inline]
    pub fn row(&self, t: f64) -> u32 {
        let t = wrap_unit(t);
        (((1.0 - t) * (self.height - 1) as f64).round() as u32).min(self.height - 1)
    }

    /// Sample with nearest-neighbor filtering and repeat wrapping.
    ///
    /// Coordinates outside [0, 1) wrap, negative ones included, so
    /// `s = -0.25` and `s = 0.75` hit the same column.
    #[inline]
    pub fn sample(&self, s: f64, t: f64) -> u32 {
        self.pixel(self.column(s), self.row(t))
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Wrap a coordinate into [0, 1). Non-finite input maps to 0.
#[inline]
pub fn wrap_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
