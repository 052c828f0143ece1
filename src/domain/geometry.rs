//! Screen geometry and the screen-to-world transform

/// Screen x that maps to world x = 0
pub const WORLD_ORIGIN_X: f32 = 250.0;
/// Screen y that maps to world y = 0 (world y grows upward)
pub const WORLD_FLIP_Y: f32 = 500.0;
/// Screen pixels per world unit
pub const PIXELS_PER_UNIT: f32 = 50.0;

/// A point on the canvas in screen pixels (y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size of a raster or viewport in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two sizes
    pub fn expanded_to(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    pub fn rect(self) -> Rect {
        Rect::from_xywh(
            0,
            0,
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }
}

/// Logical Size and Position of a rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from coordinates
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Swap edges so that left <= right and top <= bottom
    pub fn normalized(&self) -> Rect {
        Rect {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// Move each edge by the given deltas, clamping at the `i32` range
    pub fn adjusted(&self, dl: i32, dt: i32, dr: i32, db: i32) -> Rect {
        Rect {
            left: self.left.saturating_add(dl),
            top: self.top.saturating_add(dt),
            right: self.right.saturating_add(dr),
            bottom: self.bottom.saturating_add(db),
        }
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(Rect {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Shape radii in screen pixels, as chosen in the placement prompts
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRadii {
    pub x: f32,
    pub y: f32,
}

impl PixelRadii {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Position and radii in normalized world units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPlacement {
    pub x: f32,
    pub y: f32,
    pub x_radius: f32,
    pub y_radius: f32,
}

/// Map a screen placement into the renderer's world space.
///
/// x is shifted by the origin and the half x radius; y is flipped around
/// [`WORLD_FLIP_Y`] and shifted by the half y radius. Everything is scaled
/// down by [`PIXELS_PER_UNIT`].
pub fn to_world(point: ScreenPoint, radii: PixelRadii) -> WorldPlacement {
    WorldPlacement {
        x: (point.x as f32 - WORLD_ORIGIN_X + radii.x / 2.0) / PIXELS_PER_UNIT,
        y: (WORLD_FLIP_Y - point.y as f32 + radii.y / 2.0) / PIXELS_PER_UNIT,
        x_radius: radii.x / PIXELS_PER_UNIT,
        y_radius: radii.y / PIXELS_PER_UNIT,
    }
}
