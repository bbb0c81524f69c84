mod color;
mod pixel_buffer;
#[cfg(feature = "window")]
mod window;

pub use color::{ChannelOrder, Color};
pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "window")]
pub use window::{Display, InputEvent, RenderTarget};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
