//! SDL2 presentation: a window, a streaming texture the size of the
//! `PixelBuffer`, and event polling. The rasterizer never touches SDL; it only
//! hands over a finished buffer once per frame.

use super::{ChannelOrder, PixelBuffer};
use crate::error::{RasterError, Result};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    order: ChannelOrder,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    /// New drawable size; the frame's buffer must be rebuilt
    Resized { width: u32, height: u32 },
}

fn sdl_err(e: impl ToString) -> RasterError {
    RasterError::Present(e.to_string())
}

/// Texture format whose in-memory bytes match `order`
fn texture_format(order: ChannelOrder) -> PixelFormatEnum {
    let little = cfg!(target_endian = "little");
    match (order, little) {
        (ChannelOrder::Rgba, true) => PixelFormatEnum::ABGR8888,
        (ChannelOrder::Rgba, false) => PixelFormatEnum::RGBA8888,
        (ChannelOrder::Bgra, true) => PixelFormatEnum::ARGB8888,
        (ChannelOrder::Bgra, false) => PixelFormatEnum::BGRA8888,
    }
}

/// Byte order closest to the window's native format, so uploads avoid a swizzle
fn native_order(format: PixelFormatEnum) -> ChannelOrder {
    match format {
        PixelFormatEnum::ARGB8888 | PixelFormatEnum::RGB888 => ChannelOrder::Bgra,
        _ => ChannelOrder::Rgba,
    }
}

impl Display {
    /// Create a resizable window.
    /// `order` forces a channel order; `None` follows the window's native format.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
        order: Option<ChannelOrder>,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(sdl_err)?;
        let video_subsystem = sdl_context.video().map_err(sdl_err)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(sdl_err)?;

        let order = order.unwrap_or_else(|| native_order(window.window_pixel_format()));

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(sdl_err)?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(sdl_err)?;

        log::info!(
            "window {}x{} created, vsync={}, channel order {:?}",
            width,
            height,
            vsync,
            order
        );

        Ok((
            Self {
                canvas,
                event_pump,
                order,
            },
            texture_creator,
        ))
    }

    /// Channel order every frame buffer for this window must use
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    pub fn set_title(&mut self, title: &str) {
        if let Err(e) = self.canvas.window_mut().set_title(title) {
            log::warn!("failed to set window title: {}", e);
        }
    }

    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        debug_assert_eq!((target.width, target.height), (buffer.width(), buffer.height()));
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(sdl_err)?;

        self.canvas.copy(&target.texture, None, None).map_err(sdl_err)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } if w > 0 && h > 0 => events.push(InputEvent::Resized {
                    width: w as u32,
                    height: h as u32,
                }),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching a buffer of `width`x`height` in `order`
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
        order: ChannelOrder,
    ) -> Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(texture_format(order), width, height)
            .map_err(sdl_err)?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}
