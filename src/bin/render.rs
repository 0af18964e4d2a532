//! Headless renderer: draws a few frames and writes the last one as a PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use ssao_renderer::prelude::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Textured color only
    Flat,
    /// Occlusion overlay on the background
    Occlusion,
    /// Occlusion overlay over the textured color
    Combined,
}

impl From<Mode> for DisplayMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Flat => DisplayMode::Flat,
            Mode::Occlusion => DisplayMode::OcclusionOnly,
            Mode::Combined => DisplayMode::FlatWithOcclusion,
        }
    }
}

#[derive(Parser)]
#[command(about = "Render a textured mesh with ambient occlusion to a PNG")]
struct Args {
    /// OBJ file to render. A checkered quad is drawn when omitted.
    obj: Option<PathBuf>,

    /// PNG file to write
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,

    /// JSON render configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which buffers end up in the image
    #[arg(long, value_enum, default_value_t = Mode::Combined)]
    mode: Mode,

    /// Number of frames to render; the turntable advances once per frame
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Uniform scale applied to the OBJ positions
    #[arg(long, default_value_t = 70.0)]
    scale: f64,

    /// Vertical offset applied to the OBJ positions after scaling
    #[arg(long, default_value_t = 30.0)]
    ty: f64,

    /// Start angle of the turntable in radians
    #[arg(long, default_value_t = 0.0)]
    angle: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };

    let mesh = match &args.obj {
        Some(path) => Mesh::from_obj(path, Placement::new(args.scale, Vec3::new(0.0, args.ty, 0.0)))
            .with_context(|| format!("loading {}", path.display()))?,
        None => Mesh::checker_quad(300.0)?,
    };

    let mut engine = Engine::new(config)?;
    engine.set_display_mode(args.mode.into());
    engine.turntable_mut().set_angle(args.angle);

    let mut stats = FrameStats::default();
    for _ in 0..args.frames.max(1) {
        stats = engine.render(&mesh);
    }
    info!(
        "last frame: {} drawn, {} culled, {} degenerate, {} pixels",
        stats.drawn, stats.culled, stats.degenerate, stats.pixels
    );

    let frame = engine.presentation();
    let width = engine.width();
    let image = image::RgbaImage::from_fn(width, engine.height(), |x, y| {
        let argb = frame[(y * width + x) as usize];
        let [a, r, g, b] = argb.to_be_bytes();
        image::Rgba([r, g, b, a])
    });
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "{}: {}x{} {} ({} faces drawn)",
        args.output.display(),
        width,
        engine.height(),
        engine.display_mode(),
        stats.drawn
    );
    Ok(())
}
