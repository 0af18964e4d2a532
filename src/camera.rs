//! Turntable camera.
//!
//! The scene is never mutated to animate it. Instead a [`Turntable`] holds a
//! yaw angle that advances once per frame, and each frame takes an immutable
//! [`View`] snapshot that the rasterizer consumes.
//!
//! # Coordinate System
//!
//! Right-handed view space:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer; the camera looks down -Z
//!
//! Model-space points are yawed (Y axis), pitched (X axis), then pushed
//! `camera_distance` units down -Z.

use crate::config::RenderConfig;
use crate::math::Vec3;
use crate::projection::Projection;

/// Rotation phase accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turntable {
    angle: f64,
    step: f64,
}

impl Turntable {
    pub fn new(step: f64) -> Self {
        Self { angle: 0.0, step }
    }

    /// A turntable frozen at `angle` (step 0).
    pub fn at(angle: f64) -> Self {
        Self { angle, step: 0.0 }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advance by one step, keeping the angle within [0, TAU).
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.step).rem_euclid(std::f64::consts::TAU);
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }
}

/// Everything needed to place and project geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Yaw around Y in radians.
    pub yaw: f64,
    /// Pitch around X in radians, applied after yaw.
    pub pitch: f64,
    /// Translation along -Z applied after both rotations.
    pub camera_distance: f64,
    pub projection: Projection,
}

impl View {
    pub fn new(yaw: f64, pitch: f64, camera_distance: f64, projection: Projection) -> Self {
        Self {
            yaw,
            pitch,
            camera_distance,
            projection,
        }
    }

    /// Build the view for `turntable`'s current angle from a config.
    pub fn from_config(config: &RenderConfig, turntable: &Turntable) -> Self {
        Self::new(
            turntable.angle(),
            config.camera_pitch,
            config.camera_distance,
            Projection::new(config.focal_length, config.width, config.height),
        )
    }

    /// Model space to view space.
    #[inline]
    pub fn transform(&self, point: Vec3) -> Vec3 {
        let mut p = point.rotate_y(self.yaw).rotate_x(self.pitch);
        p.z -= self.camera_distance;
        p
    }
}
