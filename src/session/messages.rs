//! Message types for a drawing session
//!
//! This module contains:
//! - Pointer buttons
//! - Msg enum describing every input the widget reacts to

use std::path::PathBuf;

use crate::config::ShapeColor;
use crate::domain::{Rect, ScreenPoint, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" | "l" => Some(MouseButton::Left),
            "right" | "r" => Some(MouseButton::Right),
            "middle" | "m" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Everything the session can be asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // ------------------------------------------------------------------
    // Pointer and window events
    // ------------------------------------------------------------------
    /// Pointer pressed; left starts a placement
    Press(MouseButton, ScreenPoint),
    /// Pointer released
    Release(MouseButton, ScreenPoint),
    /// Viewport resized
    Resize(Size),
    /// Paint a region of the canvas into a frame and write it as PNG,
    /// to a temporary file when no path is given
    Paint {
        region: Option<Rect>,
        path: Option<PathBuf>,
    },

    // ------------------------------------------------------------------
    // Image actions
    // ------------------------------------------------------------------
    /// Load a raster image
    Open(PathBuf),
    /// Save the raster and export the records
    Save {
        path: Option<PathBuf>,
        format: Option<String>,
    },
    /// Clear the raster and the records
    Clear,

    // ------------------------------------------------------------------
    // Pen settings
    // ------------------------------------------------------------------
    PenColor(ShapeColor),
    PenWidth(u32),

    // ------------------------------------------------------------------
    // Console
    // ------------------------------------------------------------------
    /// Print the records in export format
    List,
    /// Persist pen and shape defaults to the config file
    Remember,
    Help,
    Quit,
}

impl Msg {
    #[cfg(test)]
    pub fn press(x: i32, y: i32) -> Self {
        Msg::Press(MouseButton::Left, ScreenPoint::new(x, y))
    }

    #[cfg(test)]
    pub fn release(x: i32, y: i32) -> Self {
        Msg::Release(MouseButton::Left, ScreenPoint::new(x, y))
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Msg::Resize(Size::new(width, height))
    }

    pub fn save_to(path: impl Into<PathBuf>) -> Self {
        Msg::Save {
            path: Some(path.into()),
            format: None,
        }
    }
}
