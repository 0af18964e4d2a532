//! Render configuration.
//!
//! [`RenderConfig`] is the single source of truth for viewport size, camera
//! placement and the ambient occlusion knobs. It can be loaded from a JSON
//! file; any field the file omits keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors;
use crate::error::ConfigError;

/// Tunables of the screen-space ambient occlusion pass.
///
/// Changing any of these changes the produced image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AoConfig {
    /// Number of screen-space directions walked per pixel.
    pub directions: u32,
    /// Number of unit steps taken along each direction.
    pub max_steps: u32,
    /// Openness above this snaps to fully open.
    pub threshold: f64,
    /// Multiplier applied to openness at or below the threshold.
    pub gain: f64,
    /// Box blur radius; the kernel is `(2r + 1)^2` pixels.
    pub blur_radius: u32,
}

impl Default for AoConfig {
    fn default() -> Self {
        Self {
            directions: 8,
            max_steps: 64,
            threshold: 0.65,
            gain: 1.3,
            blur_radius: 3,
        }
    }
}

impl AoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directions == 0 {
            return Err(ConfigError::AoZero("direction"));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::AoZero("step"));
        }
        check_finite("ao threshold", self.threshold)?;
        check_finite("ao gain", self.gain)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Pinhole focal length in pixels.
    pub focal_length: f64,
    /// Fixed pitch applied after the turntable yaw, in radians.
    pub camera_pitch: f64,
    /// Distance the scene is pushed down the -Z view axis.
    pub camera_distance: f64,
    /// Yaw added per rendered frame, in radians.
    pub rotation_step: f64,
    /// ARGB color the color buffer is cleared to.
    pub background: u32,
    pub ao: AoConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            focal_length: 600.0,
            camera_pitch: -0.25,
            camera_distance: 600.0,
            rotation_step: 0.025,
            background: colors::BACKGROUND,
            ao: AoConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Default configuration with a different viewport.
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(ConfigError::FocalLength(self.focal_length));
        }
        check_finite("camera pitch", self.camera_pitch)?;
        check_finite("camera distance", self.camera_distance)?;
        check_finite("rotation step", self.rotation_step)?;
        self.ao.validate()
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}
