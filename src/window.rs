//! SDL2 window used by the `ssao-view` binary.
//!
//! Only presentation and input live here; every pixel is produced by the
//! [`Engine`](crate::Engine) on the CPU.

use std::time::Duration;

use log::warn;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::engine::DisplayMode;
use crate::error::WindowError;

pub const FPS: u64 = 60;

/// What the render loop should do after draining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    SetMode(DisplayMode),
}

impl WindowEvent {
    fn from_key(key: Keycode) -> Self {
        match key {
            Keycode::Escape => WindowEvent::Quit,
            Keycode::Num0 => WindowEvent::SetMode(DisplayMode::Flat),
            Keycode::Num1 => WindowEvent::SetMode(DisplayMode::OcclusionOnly),
            Keycode::Num2 => WindowEvent::SetMode(DisplayMode::FlatWithOcclusion),
            _ => WindowEvent::None,
        }
    }
}

/// Sleep-based fixed-rate frame pacing. Frames that run long are not
/// compensated for.
pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, fps: u64) -> Self {
        Self {
            previous_frame_time: window.ticks(),
            frame_ms: 1000 / fps.max(1),
        }
    }

    /// Sleep out the remainder of the current frame.
    pub fn wait(&mut self, window: &Window) {
        let now = window.ticks();
        let elapsed = now.saturating_sub(self.previous_frame_time);
        if elapsed < self.frame_ms {
            std::thread::sleep(Duration::from_millis(self.frame_ms - elapsed));
        }
        self.previous_frame_time = window.ticks();
    }
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // `frame` borrows from `_texture_creator` and must drop first.
    frame: Texture<'static>,
    _texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
    title: String,
    width: u32,
    height: u32,
}

impl Window {
    /// Open a fixed-size window with an ARGB8888 streaming texture matching
    /// the engine's viewport.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, WindowError> {
        let sdl_context = sdl2::init().map_err(WindowError::Sdl)?;
        let video = sdl_context.video().map_err(WindowError::Sdl)?;
        let timer = sdl_context.timer().map_err(WindowError::Sdl)?;

        let window = video
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| WindowError::Sdl(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| WindowError::Sdl(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(WindowError::Sdl)?;

        // SAFETY: the creator is boxed, never moved out of the Window, and
        // outlives `frame` by field order.
        let creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let frame = creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| WindowError::Sdl(e.to_string()))?;

        Ok(Self {
            canvas,
            frame,
            _texture_creator: texture_creator,
            event_pump,
            timer,
            title: title.to_owned(),
            width,
            height,
        })
    }

    /// Drain pending events. Quit wins over a mode change; among mode
    /// changes the last key pressed wins.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            let next = match event {
                Event::Quit { .. } => WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => WindowEvent::from_key(key),
                _ => WindowEvent::None,
            };
            match next {
                WindowEvent::Quit => return WindowEvent::Quit,
                WindowEvent::SetMode(_) => result = next,
                WindowEvent::None => {}
            }
        }
        result
    }

    /// Show the display mode in the title bar.
    pub fn show_mode(&mut self, mode: DisplayMode) {
        let title = format!("{} [{}]", self.title, mode);
        if let Err(e) = self.canvas.window_mut().set_title(&title) {
            warn!("could not set window title: {e}");
        }
    }

    /// Upload an ARGB8888 frame and present it.
    pub fn present(&mut self, frame: &[u8]) -> Result<(), WindowError> {
        self.frame
            .update(None, frame, (self.width * 4) as usize)
            .map_err(|e| WindowError::Sdl(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(&self.frame, None, Some(Rect::new(0, 0, self.width, self.height)))
            .map_err(WindowError::Sdl)?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Milliseconds since SDL initialization.
    pub fn ticks(&self) -> u64 {
        self.timer.ticks64()
    }
}
