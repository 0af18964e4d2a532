//! Screen-space ambient occlusion.
//!
//! For every covered pixel the estimator walks a fixed number of screen-space
//! directions and records, per direction, the steepest horizon angle the depth
//! buffer rises to. The average unblocked angle becomes an openness value in
//! [0, 1], which is shaped by a response curve and encoded as a translucent
//! overlay color. A box blur then softens the overlay.
//!
//! The cost is `O(width * height * directions * max_steps)` per frame, which
//! dominates the pipeline.
//!
//! Reference: <https://github.com/ssloy/tinyrenderer/wiki/Lesson-8-Ambient-occlusion>

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::colors::{self, pack_argb, unpack_argb};
use crate::config::AoConfig;
use crate::math::Vec2;
use crate::render::DepthBuffer;

/// Owns the overlay and blurred overlay buffers. Allocated once and reused
/// every frame.
pub struct AmbientOcclusion {
    config: AoConfig,
    width: u32,
    height: u32,
    overlay: Vec<u32>,
    blurred: Vec<u32>,
    /// Unit direction vectors, computed once from `config.directions`.
    directions: Vec<Vec2>,
}

impl AmbientOcclusion {
    pub fn new(width: u32, height: u32, config: AoConfig) -> Self {
        let size = width as usize * height as usize;
        let step = TAU / config.directions as f64;
        let directions = (0..config.directions)
            .map(|i| {
                let (sin, cos) = (i as f64 * step).sin_cos();
                Vec2::new(cos, sin)
            })
            .collect();
        Self {
            config,
            width,
            height,
            overlay: vec![colors::OVERLAY_CLEAR; size],
            blurred: vec![colors::OVERLAY_CLEAR; size],
            directions,
        }
    }

    pub fn config(&self) -> &AoConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The unblurred overlay from the last [`process`](Self::process).
    pub fn overlay(&self) -> &[u32] {
        &self.overlay
    }

    /// The overlay after the last [`blur`](Self::blur).
    pub fn blurred(&self) -> &[u32] {
        &self.blurred
    }

    /// Openness of the covered pixel at (x, y) before the response curve.
    pub fn openness(&self, depth: &DepthBuffer, x: u32, y: u32) -> f64 {
        let origin = Vec2::new(x as f64, y as f64);
        let total: f64 = self
            .directions
            .iter()
            .map(|&dir| FRAC_PI_2 - max_elevation_angle(depth, origin, dir, self.config.max_steps))
            .sum();
        (total / (FRAC_PI_2 * self.directions.len() as f64)).clamp(0.0, 1.0)
    }

    /// Recompute the overlay from a fully populated depth buffer.
    ///
    /// Empty pixels keep the cleared (transparent) overlay value.
    pub fn process(&mut self, depth: &DepthBuffer) {
        debug_assert_eq!(depth.width(), self.width);
        debug_assert_eq!(depth.height(), self.height);

        self.overlay.fill(colors::OVERLAY_CLEAR);
        for y in 0..self.height {
            for x in 0..self.width {
                if depth.is_empty(x, y) {
                    continue;
                }
                let openness = response_curve(self.openness(depth, x, y), &self.config);
                self.overlay[y as usize * self.width as usize + x as usize] = encode_openness(openness);
            }
        }
    }

    /// Box-blur the overlay into the blurred buffer and return it.
    pub fn blur(&mut self) -> &[u32] {
        box_blur(
            &self.overlay,
            &mut self.blurred,
            self.width,
            self.height,
            self.config.blur_radius,
        );
        &self.blurred
    }
}

/// Steepest horizon angle seen from `origin` along `dir`.
///
/// Walks `t = 0, 1, .., max_steps - 1` unit steps. The walk stops at the
/// first sample outside the buffer. Samples closer than one pixel are
/// skipped. The running maximum starts at 0, so surfaces below the origin
/// never count as blocking.
pub fn max_elevation_angle(depth: &DepthBuffer, origin: Vec2, dir: Vec2, max_steps: u32) -> f64 {
    let width = depth.width() as f64;
    let height = depth.height() as f64;
    let base = depth.get(origin.x as u32, origin.y as u32);

    let mut max_angle = 0.0_f64;
    for t in 0..max_steps {
        let cur = origin + dir * t as f64;
        if cur.x < 0.0 || cur.y < 0.0 || cur.x >= width || cur.y >= height {
            break;
        }
        let distance = (cur - origin).magnitude();
        if distance < 1.0 {
            continue;
        }
        let elevation = depth.get(cur.x as u32, cur.y as u32) - base;
        max_angle = max_angle.max((elevation / distance).atan());
    }
    max_angle
}

/// Sharpen the falloff: openness above the threshold counts as fully open,
/// the rest is scaled by the gain and clamped to [0, 1].
#[inline]
pub fn response_curve(openness: f64, config: &AoConfig) -> f64 {
    if openness > config.threshold {
        1.0
    } else {
        (openness * config.gain).clamp(0.0, 1.0)
    }
}

/// Overlay color for an openness value. Alpha falls from 255 (fully
/// occluded) to 0 (fully open); the tint shifts from dark blue to red.
#[inline]
pub fn encode_openness(openness: f64) -> u32 {
    let o = openness.clamp(0.0, 1.0);
    pack_argb(
        (255.0 - o * 255.0) as u8,
        (o * 255.0) as u8,
        0,
        (64.0 - o * 64.0) as u8,
    )
}

/// Normalized box filter with a `(2r + 1)^2` kernel.
///
/// Pixels whose kernel would reach outside the image are copied unchanged.
/// Color channels are weighted by alpha while filtering and divided by the
/// summed alpha afterwards, so transparent pixels contribute no tint.
pub fn box_blur(src: &[u32], dst: &mut [u32], width: u32, height: u32, radius: u32) {
    debug_assert_eq!(src.len(), width as usize * height as usize);
    debug_assert_eq!(dst.len(), src.len());

    dst.copy_from_slice(src);
    let (w, h, r) = (width as usize, height as usize, radius as usize);
    if r == 0 || w <= r.saturating_mul(2) || h <= r.saturating_mul(2) {
        return;
    }

    let size = 2 * r + 1;
    let weight = 1.0 / (size * size) as f64;

    for y in r..h - r {
        for x in r..w - r {
            let mut alpha = 0.0f64;
            let mut color = [0.0f64; 3];
            for ky in y - r..=y + r {
                for &pixel in &src[ky * w + x - r..=ky * w + x + r] {
                    let [a, rd, g, b] = unpack_argb(pixel);
                    let a = a as f64;
                    alpha += a;
                    color[0] += rd as f64 * a;
                    color[1] += g as f64 * a;
                    color[2] += b as f64 * a;
                }
            }
            let [rd, g, b] = if alpha > 0.0 {
                color.map(|c| (c / alpha).round().clamp(0.0, 255.0) as u8)
            } else {
                [0; 3]
            };
            let a = (alpha * weight).round().clamp(0.0, 255.0) as u8;
            dst[y * w + x] = pack_argb(a, rd, g, b);
        }
    }
}
