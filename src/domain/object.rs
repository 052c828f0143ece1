//! Placed object records, as consumed by the AR renderer

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{PixelRadii, ScreenPoint, to_world};
use crate::config::ShapeColor;

/// Kind of shape, encoded as its numeric code in the export file
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Circle = 1,
    Square = 2,
}

impl ShapeKind {
    pub const MIN_CODE: i32 = 1;
    pub const MAX_CODE: i32 = 2;

    /// Numeric code used in prompts and the export file
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ShapeKind::Circle),
            2 => Some(ShapeKind::Square),
            _ => None,
        }
    }
}

/// One recorded shape. Every field is set at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    pub kind: ShapeKind,
    pub color: ShapeColor,
    /// Position in world units
    pub x: f32,
    pub y: f32,
    /// Extrusion height
    pub z: f32,
    /// Radii in world units
    pub x_radius: f32,
    pub y_radius: f32,
}

impl PlacedObject {
    /// Build a record from a screen placement, converting to world units
    pub fn new(
        kind: ShapeKind,
        color: ShapeColor,
        anchor: ScreenPoint,
        height: f32,
        radii: PixelRadii,
    ) -> Self {
        let world = to_world(anchor, radii);
        Self {
            kind,
            color,
            x: world.x,
            y: world.y,
            z: height,
            x_radius: world.x_radius,
            y_radius: world.y_radius,
        }
    }
}

/// Export line without the trailing newline:
/// `type, r, g, b, x, y, z, xRadius, yRadius`
impl fmt::Display for PlacedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}, {}, {}",
            self.kind.code(),
            self.color.r,
            self.color.g,
            self.color.b,
            self.x,
            self.y,
            self.z,
            self.x_radius,
            self.y_radius
        )
    }
}
