//! Renderer settings, stored as JSON

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::display::{ChannelOrder, Color, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{RasterError, Result};
use crate::raster::LineAlgorithm;

/// Resolution, pixel layout and draw defaults for a renderer session.
/// Missing fields in a file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub width: u32,
    pub height: u32,
    /// Forces the buffer's channel order; `None` follows the presentation
    pub channel_order: Option<ChannelOrder>,
    pub line_algorithm: LineAlgorithm,
    pub vsync: bool,
    pub clear_color: Color,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            channel_order: None,
            line_algorithm: LineAlgorithm::default(),
            vsync: true,
            clear_color: Color::BLACK,
        }
    }
}

impl RasterConfig {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scanfill-{}-{}.json", name, std::process::id()))
    }

    #[test_log::test]
    fn test_save_load_roundtrip() {
        let config = RasterConfig {
            width: 320,
            height: 200,
            channel_order: Some(ChannelOrder::Bgra),
            line_algorithm: LineAlgorithm::Naive,
            vsync: false,
            clear_color: Color::new(0.1, 0.2, 0.3),
        };
        let path = temp_path("roundtrip");
        config.save(&path).unwrap();
        let loaded = RasterConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RasterConfig = serde_json::from_str(r#"{ "width": 800, "line_algorithm": "naive" }"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.line_algorithm, LineAlgorithm::Naive);
        assert_eq!(config.channel_order, None);
        assert!(config.vsync);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let path = temp_path("zero");
        fs::write(&path, r#"{ "width": 0 }"#).unwrap();
        let err = RasterConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, RasterError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let path = temp_path("malformed");
        fs::write(&path, "{ width: ").unwrap();
        let err = RasterConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, RasterError::Config(_)));
    }
}
