//! Shape geometry shared by the rasterizer and the dirty-region math

use crate::domain::{PixelRadii, Rect, ScreenPoint};

/// Shape (rectangle/circle) geometry constants
pub mod shape {
    /// Extra pixels around the stroke included in the dirty region
    pub const DIRTY_MARGIN: i32 = 2;

    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
}

/// Bounding box of a placed shape: the anchor is the top-left corner and the
/// pixel radii are used as width and height
#[inline]
pub fn shape_bounds(anchor: ScreenPoint, radii: PixelRadii) -> (f32, f32, f32, f32) {
    let min_x = anchor.x as f32;
    let min_y = anchor.y as f32;
    normalize_rect(min_x, min_y, min_x + radii.x, min_y + radii.y)
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Calculate ellipse center and radii from bounding box
#[inline]
pub fn ellipse_from_bounds(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> (f32, f32, f32, f32) {
    let cx = (min_x + max_x) * 0.5;
    let cy = (min_y + max_y) * 0.5;
    let rx = ((max_x - min_x) * 0.5).max(1.0);
    let ry = ((max_y - min_y) * 0.5).max(1.0);
    (cx, cy, rx, ry)
}

/// Region touched by stroking a shape with the given pen width
pub fn dirty_rect(anchor: ScreenPoint, radii: PixelRadii, pen_width: u32) -> Rect {
    let (min_x, min_y, max_x, max_y) = shape_bounds(anchor, radii);
    let pad = i32::try_from(pen_width / 2)
        .unwrap_or(i32::MAX)
        .saturating_add(shape::DIRTY_MARGIN);
    Rect::new(
        min_x.floor() as i32,
        min_y.floor() as i32,
        max_x.ceil() as i32,
        max_y.ceil() as i32,
    )
    .normalized()
    .adjusted(-pad, -pad, pad, pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_bounds_uses_radii_as_size() {
        let bounds = shape_bounds(ScreenPoint::new(100, 40), PixelRadii::new(20.0, 30.0));
        assert_eq!(bounds, (100.0, 40.0, 120.0, 70.0));
    }

    #[test]
    fn test_ellipse_from_bounds() {
        let (cx, cy, rx, ry) = ellipse_from_bounds(100.0, 40.0, 120.0, 70.0);
        assert_eq!((cx, cy, rx, ry), (110.0, 55.0, 10.0, 15.0));
    }

    #[test]
    fn test_dirty_rect_pads_by_pen() {
        let rect = dirty_rect(ScreenPoint::new(10, 10), PixelRadii::new(20.0, 20.0), 3);
        // 3 / 2 + 2 = 3
        assert_eq!(rect, Rect::new(7, 7, 33, 33));
    }

    #[test]
    fn test_dirty_rect_clamps_at_extremes() {
        let rect = dirty_rect(ScreenPoint::new(i32::MAX - 10, 0), PixelRadii::new(20.0, 20.0), 3);
        assert_eq!(rect.right, i32::MAX);
        assert!(rect.left < rect.right);

        let rect = dirty_rect(ScreenPoint::new(0, 0), PixelRadii::new(20.0, 20.0), u32::MAX);
        assert_eq!(rect, Rect::new(-i32::MAX, -i32::MAX, i32::MAX, i32::MAX));
    }
}
