//! CPU software rasterizer
//!
//! Lines, flat/Gouraud/textured scanline polygons and Sutherland-Hodgman
//! frustum clipping into a packed RGBA or BGRA `PixelBuffer`. Presentation
//! through SDL2 is behind the `window` feature.

pub mod config;
pub mod display;
pub mod error;
pub mod math3d;
pub mod raster;
pub mod simd;
pub mod texture;
pub mod util;

pub use config::RasterConfig;
pub use display::{ChannelOrder, Color, PixelBuffer};
pub use error::{RasterError, Result};
pub use raster::{clip_polygon, Frustum, LineAlgorithm, ScreenPolygon, Vertex, ViewPolygon};
pub use texture::Texture;
