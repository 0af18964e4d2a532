//! Small value types for geometry.
//!
//! [`Vec3`] carries model/view-space positions; [`Vec2`] carries screen-space
//! points and texture coordinates. Everything is passed by value.

pub mod vec2;
pub mod vec3;

pub use vec2::{cross_2d, Vec2};
pub use vec3::Vec3;
