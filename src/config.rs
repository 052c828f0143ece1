//! Configuration persistence for FlyAR settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::{ShapeKind, Size};

/// Drawing color with 8-bit channels, as recorded in the export file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Blue pen
        Self { r: 0, g: 0, b: 255 }
    }
}

impl ShapeColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value; the top byte is ignored
    pub fn from_rgb32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_rgb32)
    }

    /// Convert to image crate RGBA format (always opaque)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Default save location for images saved without an explicit path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

impl SaveLocation {
    pub fn dir(self) -> Option<PathBuf> {
        match self {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyArConfig {
    /// Pen color for new shapes
    pub pen_color: ShapeColor,
    /// Pen stroke width in pixels
    pub pen_width: u32,
    /// Destination of the object export
    pub export_path: PathBuf,
    /// Initial viewport width in pixels
    pub canvas_width: u32,
    /// Initial viewport height in pixels
    pub canvas_height: u32,
    /// Shape offered first when placing
    pub default_shape: ShapeKind,
    /// Height offered first when placing (1-15)
    pub default_height: i32,
    /// X radius offered first when placing, in pixels (10-50)
    pub default_x_radius: i32,
    /// Y radius offered first when placing, in pixels (10-50)
    pub default_y_radius: i32,
    /// Where images go when saved without a path
    pub save_location: SaveLocation,
}

impl Default for FlyArConfig {
    fn default() -> Self {
        Self {
            pen_color: ShapeColor::default(),
            pen_width: 3,
            export_path: PathBuf::from("../TestData/Data.txt"),
            canvas_width: 500,
            canvas_height: 500,
            default_shape: ShapeKind::Circle,
            default_height: 1,
            default_x_radius: 20,
            default_y_radius: 20,
            save_location: SaveLocation::Pictures,
        }
    }
}

impl FlyArConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "flyar";

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::read_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self, path: Option<&Path>) {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            log::error!("No config directory available for saving");
            return;
        };

        if let Err(err) = self.write_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn read_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config dir {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_rgb32() {
        assert_eq!(ShapeColor::from_rgb32(0xFF0000FF), ShapeColor::new(0, 0, 255));
        assert_eq!(ShapeColor::from_rgb32(0x123456), ShapeColor::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(ShapeColor::from_hex("#00ff80"), Some(ShapeColor::new(0, 255, 128)));
        assert_eq!(ShapeColor::from_hex("0000FF"), Some(ShapeColor::default()));
        assert_eq!(ShapeColor::from_hex("#fff"), None);
        assert_eq!(ShapeColor::from_hex("#gggggg"), None);
        assert_eq!(ShapeColor::from_hex("+fffff"), None);
        assert_eq!(ShapeColor::from_hex("#+fffff"), None);
    }

    #[test]
    fn test_default_matches_widget_defaults() {
        let config = FlyArConfig::default();
        assert_eq!(config.pen_color, ShapeColor::new(0, 0, 255));
        assert_eq!(config.pen_width, 3);
        assert_eq!(config.export_path, PathBuf::from("../TestData/Data.txt"));
        assert_eq!(config.default_shape, ShapeKind::Circle);
        assert_eq!(config.default_height, 1);
        assert_eq!(config.default_x_radius, 20);
        assert_eq!(config.default_y_radius, 20);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = FlyArConfig {
            pen_color: ShapeColor::new(10, 20, 30),
            pen_width: 7,
            default_shape: ShapeKind::Square,
            ..Default::default()
        };
        config.write_to(&path).unwrap();

        assert_eq!(FlyArConfig::read_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "pen_width": 9 }"#).unwrap();

        let config = FlyArConfig::load(Some(&path));
        assert_eq!(config.pen_width, 9);
        assert_eq!(config.canvas_width, 500);
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(FlyArConfig::load(Some(&path)), FlyArConfig::default());
    }
}
