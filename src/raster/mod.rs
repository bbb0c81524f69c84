//! Rasterization: lines, scanline polygon fills and frustum clipping.
//!
//! Draw calls are methods on `PixelBuffer`; geometry types live in `vertex`.

mod clip;
mod interpolate;
mod line;
mod polygon;
mod vertex;

pub use clip::{clip_polygon, Frustum, Plane};
pub use interpolate::{lerp_payload, AttributeStepper};
pub use line::LineAlgorithm;
pub use vertex::{
    Point, Polygon, ScreenPolygon, ScreenVertex, Vertex, ViewPolygon, ViewVertex, BLUE,
    COLOR_ATTRIBUTES, GREEN, RED, TEXTURED_ATTRIBUTES, TEX_U, TEX_V,
};
