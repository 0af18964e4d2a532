use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ssao_renderer::prelude::*;
use ssao_renderer::window::{FrameLimiter, Window, WindowEvent, FPS};

#[derive(Parser)]
#[command(about = "Spin a textured mesh with live ambient occlusion")]
struct Args {
    /// OBJ file to show. A checkered quad is drawn when omitted.
    obj: Option<PathBuf>,

    /// JSON render configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Uniform scale applied to the OBJ positions
    #[arg(long, default_value_t = 70.0)]
    scale: f64,

    /// Vertical offset applied to the OBJ positions after scaling
    #[arg(long, default_value_t = 30.0)]
    ty: f64,
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
    let mut window = Window::new("ssao", engine.width(), engine.height())?;
    window.show_mode(engine.display_mode());
    let mut limiter = FrameLimiter::new(&window, FPS);
    info!("keys: 0 flat, 1 occlusion, 2 combined, Esc quits");

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::SetMode(mode) => {
                info!("display mode: {mode}");
                engine.set_display_mode(mode);
                window.show_mode(mode);
            }
            WindowEvent::None => {}
        }

        engine.render(&mesh);
        window.present(engine.presentation_bytes())?;

        limiter.wait(&window);
    }

    Ok(())
}
