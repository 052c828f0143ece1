use crate::config::{FlyArConfig, ShapeColor};
use crate::domain::{PlacedObject, ShapeKind};
use crate::placement::Placement;

/// Pen and remembered shape parameters for the current session.
///
/// The remembered parameters seed the defaults of the next placement's
/// prompts and only change when a placement commits.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub pen_color: ShapeColor,
    pub pen_width: u32,
    pub shape: ShapeKind,
    pub height: i32,
    pub x_radius: i32,
    pub y_radius: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&FlyArConfig::default())
    }
}

impl From<&FlyArConfig> for SessionConfig {
    fn from(config: &FlyArConfig) -> Self {
        Self {
            pen_color: config.pen_color,
            pen_width: config.pen_width,
            shape: config.default_shape,
            height: config.default_height,
            x_radius: config.default_x_radius,
            y_radius: config.default_y_radius,
        }
    }
}

impl SessionConfig {
    /// Remember the parameters of a committed placement
    pub fn remember(&mut self, placement: &Placement) {
        self.shape = placement.kind;
        self.height = placement.height;
        self.x_radius = placement.x_radius;
        self.y_radius = placement.y_radius;
    }

    /// Copy the session values back into a config for persisting
    pub fn store(&self, config: &mut FlyArConfig) {
        config.pen_color = self.pen_color;
        config.pen_width = self.pen_width;
        config.default_shape = self.shape;
        config.default_height = self.height;
        config.default_x_radius = self.x_radius;
        config.default_y_radius = self.y_radius;
    }
}

/// Recorded objects in insertion order
#[derive(Clone, Debug, Default)]
pub struct ObjectState {
    pub objects: Vec<PlacedObject>,
    /// Index the next record gets; reset by `clear_all`
    pub object_count: usize,
}

impl ObjectState {
    /// Append a record and return its index
    pub fn add(&mut self, object: PlacedObject) -> usize {
        let index = self.object_count;
        self.objects.push(object);
        self.object_count += 1;
        index
    }

    pub fn clear_all(&mut self) {
        self.objects.clear();
        self.object_count = 0;
    }
}
