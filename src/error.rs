//! Error type for setup paths (config, textures, polygon construction, window).
//!
//! Draw calls never fail; they clamp or skip instead.

/// Everything that can go wrong outside the draw hot path
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("vertex payload has {got} attributes, polygon expects {expected}")]
    PayloadWidth { expected: usize, got: usize },

    #[error("texture plane has {got} texels, expected {expected}")]
    TextureSize { expected: usize, got: usize },

    #[error("presentation error: {0}")]
    Present(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;
