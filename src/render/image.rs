//! Shape rasterization using tiny-skia
//!
//! Shapes are stroked directly onto the canvas raster.

use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, shape};
use crate::config::ShapeColor;
use crate::domain::{PixelRadii, ScreenPoint, ShapeKind};

/// Stroke settings for drawing shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: ShapeColor,
    pub width: u32,
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

/// Build an ellipse path using cubic bezier curves
fn build_ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<tiny_skia::Path> {
    let kx = rx * shape::BEZIER_K;
    let ky = ry * shape::BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - ry);

    // Top to right
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);

    // Right to bottom
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);

    // Bottom to left
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);

    // Left to top
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);

    pb.close();
    pb.finish()
}

fn build_rect_path(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(min_x, min_y);
    pb.line_to(max_x, min_y);
    pb.line_to(max_x, max_y);
    pb.line_to(min_x, max_y);
    pb.close();
    pb.finish()
}

/// Stroke a circle (ellipse) or square (rectangle) outline onto an image.
///
/// The anchor is the top-left corner of the shape's bounding box and the
/// pixel radii are its width and height.
pub fn draw_shape_on_image(
    img: &mut RgbaImage,
    kind: ShapeKind,
    anchor: ScreenPoint,
    radii: PixelRadii,
    pen: Pen,
) {
    let (min_x, min_y, max_x, max_y) = geometry::shape_bounds(anchor, radii);
    let path = match kind {
        ShapeKind::Circle => {
            let (cx, cy, rx, ry) = geometry::ellipse_from_bounds(min_x, min_y, max_x, max_y);
            build_ellipse_path(cx, cy, rx, ry)
        }
        ShapeKind::Square => build_rect_path(min_x, min_y, max_x, max_y),
    };
    let Some(path) = path else {
        log::debug!("Skipping degenerate {:?} at {:?}", kind, anchor);
        return;
    };

    with_pixmap(img, |pixmap| {
        let [r, g, b, a] = pen.color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: pen.width.max(1) as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]))
    }

    const BLUE_PEN: Pen = Pen {
        color: ShapeColor { r: 0, g: 0, b: 255 },
        width: 3,
    };

    #[test]
    fn test_square_stroke_hits_edges_only() {
        let mut img = white(100, 100);
        draw_shape_on_image(
            &mut img,
            ShapeKind::Square,
            ScreenPoint::new(20, 20),
            PixelRadii::new(40.0, 40.0),
            BLUE_PEN,
        );

        assert_eq!(img.get_pixel(20, 40).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(40, 60).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(40, 40).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(90, 90).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_circle_stroke_leaves_corners() {
        let mut img = white(100, 100);
        draw_shape_on_image(
            &mut img,
            ShapeKind::Circle,
            ScreenPoint::new(20, 20),
            PixelRadii::new(40.0, 40.0),
            BLUE_PEN,
        );

        // Leftmost point of the ellipse is on the stroke, the box corner is not
        assert_ne!(img.get_pixel(20, 40).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(20, 20).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(40, 40).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_shape_outside_image_is_clipped() {
        let mut img = white(10, 10);
        draw_shape_on_image(
            &mut img,
            ShapeKind::Square,
            ScreenPoint::new(200, 200),
            PixelRadii::new(20.0, 20.0),
            BLUE_PEN,
        );
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
