//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns
//! every per-frame buffer and runs the frame pipeline:
//!
//! 1. clear the color and depth buffers
//! 2. project, cull and rasterize every face at the turntable's angle
//! 3. run ambient occlusion over the finished depth buffer and blur it
//! 4. composite the buffers selected by the [`DisplayMode`]

use std::fmt;

use log::{debug, trace};

use crate::camera::{Turntable, View};
use crate::colors;
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::mesh::Mesh;
use crate::render::renderer::{as_bytes, Renderer};
use crate::render::{DepthBuffer, DrawOutcome};
use crate::ssao::AmbientOcclusion;

/// Which buffers end up in the presentation buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Textured color only (key: 0)
    Flat,
    /// Blurred occlusion overlay on the background (key: 1)
    OcclusionOnly,
    /// Blurred occlusion overlay over the textured color (key: 2)
    #[default]
    FlatWithOcclusion,
}

impl DisplayMode {
    fn needs_occlusion(self) -> bool {
        !matches!(self, DisplayMode::Flat)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Flat => write!(f, "Flat"),
            DisplayMode::OcclusionOnly => write!(f, "OcclusionOnly"),
            DisplayMode::FlatWithOcclusion => write!(f, "FlatWithOcclusion"),
        }
    }
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    pub degenerate: usize,
    /// Pixels that passed the depth test.
    pub pixels: usize,
}

impl FrameStats {
    fn record(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::Culled => self.culled += 1,
            DrawOutcome::Degenerate => self.degenerate += 1,
            DrawOutcome::Drawn { pixels } => {
                self.drawn += 1;
                self.pixels += pixels;
            }
        }
    }
}

pub struct Engine {
    config: RenderConfig,
    renderer: Renderer,
    occlusion: AmbientOcclusion,
    presentation: Vec<u32>,
    turntable: Turntable,
    display_mode: DisplayMode,
}

impl Engine {
    /// Validate `config` and allocate all buffers.
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (width, height) = (config.width, config.height);
        Ok(Self {
            renderer: Renderer::new(width, height, config.background),
            occlusion: AmbientOcclusion::new(width, height, config.ao),
            presentation: vec![config.background; width as usize * height as usize],
            turntable: Turntable::new(config.rotation_step),
            display_mode: DisplayMode::default(),
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn turntable(&self) -> &Turntable {
        &self.turntable
    }

    pub fn turntable_mut(&mut self) -> &mut Turntable {
        &mut self.turntable
    }

    /// The view the next frame will be rendered with.
    pub fn view(&self) -> View {
        View::from_config(&self.config, &self.turntable)
    }

    /// Render one frame and advance the turntable.
    pub fn render(&mut self, mesh: &Mesh) -> FrameStats {
        let stats = self.render_at(mesh, self.view());
        self.turntable.advance();
        stats
    }

    /// Render one frame from an explicit view without touching the turntable.
    pub fn render_at(&mut self, mesh: &Mesh, view: View) -> FrameStats {
        self.renderer.clear(self.config.background);

        let mut stats = FrameStats::default();
        {
            let mut fb = self.renderer.as_framebuffer();
            for (i, face) in mesh.faces().iter().enumerate() {
                let outcome = face.draw(&view, &mut fb);
                trace!("face {i}: {outcome:?}");
                stats.record(outcome);
            }
        }

        if self.display_mode.needs_occlusion() {
            self.occlusion.process(self.renderer.depth_buffer());
            self.occlusion.blur();
        }
        self.composite();

        debug!(
            "frame yaw={:.3}: {} drawn, {} culled, {} degenerate, {} pixels",
            view.yaw, stats.drawn, stats.culled, stats.degenerate, stats.pixels
        );
        stats
    }

    fn composite(&mut self) {
        match self.display_mode {
            DisplayMode::Flat => {
                self.presentation
                    .copy_from_slice(self.renderer.color_buffer());
            }
            DisplayMode::OcclusionOnly => {
                let background = self.config.background;
                for (out, &ao) in self.presentation.iter_mut().zip(self.occlusion.blurred()) {
                    *out = colors::alpha_blend(background, ao);
                }
            }
            DisplayMode::FlatWithOcclusion => {
                let color = self.renderer.color_buffer();
                let blurred = self.occlusion.blurred();
                for ((out, &c), &ao) in self.presentation.iter_mut().zip(color).zip(blurred) {
                    *out = colors::alpha_blend(c, ao);
                }
            }
        }
    }

    /// Textured color from the last frame, before compositing.
    pub fn color_buffer(&self) -> &[u32] {
        self.renderer.color_buffer()
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        self.renderer.depth_buffer()
    }

    pub fn occlusion(&self) -> &AmbientOcclusion {
        &self.occlusion
    }

    /// The composited frame.
    pub fn presentation(&self) -> &[u32] {
        &self.presentation
    }

    /// Returns the composited frame as bytes (ARGB8888 format)
    pub fn presentation_bytes(&self) -> &[u8] {
        as_bytes(&self.presentation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::texture::Texture;

    const TEAL: u32 = 0xFF008080;

    fn small_config() -> RenderConfig {
        RenderConfig::with_viewport(64, 48)
    }

    fn quad() -> Mesh {
        Mesh::quad(40.0, Material::shared("teal", Texture::solid(2, 2, TEAL).unwrap()))
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(Engine::new(RenderConfig::with_viewport(0, 0)).is_err());
    }

    #[test]
    fn render_advances_turntable() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.render(&Mesh::default());
        engine.render(&Mesh::default());
        assert!((engine.turntable().angle() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn render_at_leaves_turntable_alone() {
        let mut engine = Engine::new(small_config()).unwrap();
        let view = engine.view();
        engine.render_at(&quad(), view);
        assert_eq!(engine.turntable().angle(), 0.0);
    }

    #[test]
    fn quad_from_behind_is_culled() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.turntable_mut().set_angle(std::f64::consts::PI);
        let stats = engine.render(&quad());
        assert_eq!(stats.culled, 2);
        assert_eq!(engine.depth_buffer().filled(), 0);
        assert!(engine.color_buffer().iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn flat_mode_presents_color_buffer() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.set_display_mode(DisplayMode::Flat);
        let stats = engine.render(&quad());
        assert_eq!(stats.drawn, 2);
        assert_eq!(engine.presentation(), engine.color_buffer());
    }

    #[test]
    fn flat_quad_has_no_visible_occlusion() {
        // A camera-facing quad is close to flat in the depth buffer, so the
        // overlay stays transparent in its interior.
        let mut engine = Engine::new(small_config()).unwrap();
        engine.render(&quad());
        let center = (24 * 64 + 32) as usize;
        assert_eq!(engine.color_buffer()[center], TEAL);
        assert_eq!(colors::alpha(engine.occlusion().overlay()[center]), 0);
        assert_eq!(engine.presentation()[center], TEAL);
    }

    #[test]
    fn occlusion_only_mode_starts_from_background() {
        let mut engine = Engine::new(small_config()).unwrap();
        engine.set_display_mode(DisplayMode::OcclusionOnly);
        engine.render(&Mesh::default());
        assert!(engine.presentation().iter().all(|&c| c == colors::BACKGROUND));
    }

    #[test]
    fn huge_blur_radius_leaves_overlay_unblurred() {
        let mut config = small_config();
        config.ao.blur_radius = u32::MAX;
        let mut engine = Engine::new(config).unwrap();
        engine.render(&quad());
        assert_eq!(engine.occlusion().blurred(), engine.occlusion().overlay());
    }

    #[test]
    fn presentation_bytes_cover_frame() {
        let engine = Engine::new(small_config()).unwrap();
        assert_eq!(engine.presentation_bytes().len(), 64 * 48 * 4);
    }
}
