//! Raster surface backing the drawing widget
//!
//! The raster is always at least as large as the viewport. Growing the
//! viewport grows the raster with some headroom; shrinking never does.

use std::io;
use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};

use crate::config::ShapeColor;
use crate::domain::{PixelRadii, Rect, ScreenPoint, ShapeKind, Size};
use crate::render::geometry;
use crate::render::image::{Pen, draw_shape_on_image};

/// Extra pixels added on each axis when the raster has to grow
pub const GROW_PADDING: u32 = 128;

/// Largest viewport side the raster follows; bigger requests are clamped
pub const MAX_VIEWPORT_SIDE: u32 = 16_384;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    viewport: Size,
    modified: bool,
}

impl Canvas {
    /// White raster matching the viewport
    pub fn new(viewport: Size) -> Self {
        let viewport = clamp_viewport(viewport);
        Self {
            image: RgbaImage::from_pixel(viewport.width, viewport.height, WHITE),
            viewport,
            modified: false,
        }
    }

    pub fn raster_size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Load an image file; the raster becomes the image padded to the viewport.
    ///
    /// On failure the current raster is kept.
    pub fn open(&mut self, path: &Path) -> anyhow::Result<()> {
        let loaded = image::open(path)
            .with_context(|| format!("loading image {}", path.display()))?
            .to_rgba8();
        log::debug!(
            "Loaded {}: {}x{} pixels",
            path.display(),
            loaded.width(),
            loaded.height()
        );

        let size = Size::new(loaded.width(), loaded.height()).expanded_to(self.viewport);
        self.image = resize_image(loaded, size);
        self.modified = false;
        Ok(())
    }

    /// Write the visible part of the raster (exactly the viewport size).
    ///
    /// `format` is an extension-like name (`png`, `jpg`, ...); without it the
    /// format comes from the path.
    pub fn save(&mut self, path: &Path, format: Option<&str>) -> anyhow::Result<()> {
        let format = image_format(path, format)?;
        let visible = resize_image(self.image.clone(), self.viewport);

        if format == ImageFormat::Png {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_png(&mut file, &visible)
                .with_context(|| format!("encoding {}", path.display()))?;
        } else {
            DynamicImage::ImageRgba8(visible)
                .to_rgb8()
                .save_with_format(path, format)
                .with_context(|| format!("saving {}", path.display()))?;
        }

        log::info!("Saved canvas to {}", path.display());
        self.modified = false;
        Ok(())
    }

    /// Reset every pixel to white
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = WHITE;
        }
        self.modified = true;
    }

    /// Track a new viewport size, growing the raster if it no longer fits.
    ///
    /// Returns true when the raster was reallocated.
    pub fn resize(&mut self, viewport: Size) -> bool {
        let viewport = clamp_viewport(viewport);
        self.viewport = viewport;
        let raster = self.raster_size();
        if viewport.width <= raster.width && viewport.height <= raster.height {
            return false;
        }

        let grown = Size::new(
            viewport.width.saturating_add(GROW_PADDING).max(raster.width),
            viewport.height.saturating_add(GROW_PADDING).max(raster.height),
        );
        log::debug!("Growing raster from {:?} to {:?}", raster, grown);
        let image = std::mem::take(&mut self.image);
        self.image = resize_image(image, grown);
        true
    }

    /// Copy the `dirty` region of the raster into `target` at the same position
    pub fn paint(&self, dirty: Rect, target: &mut RgbaImage) {
        let target_rect = Size::new(target.width(), target.height()).rect();
        let Some(region) = dirty
            .normalized()
            .intersect(self.raster_size().rect())
            .and_then(|r| r.intersect(target_rect))
        else {
            return;
        };

        let patch = imageops::crop_imm(
            &self.image,
            region.left as u32,
            region.top as u32,
            region.width() as u32,
            region.height() as u32,
        )
        .to_image();
        imageops::replace(target, &patch, i64::from(region.left), i64::from(region.top));
    }

    /// Stroke a shape outline and return the region that changed
    pub fn draw_shape(
        &mut self,
        kind: ShapeKind,
        anchor: ScreenPoint,
        radii: PixelRadii,
        color: ShapeColor,
        pen_width: u32,
    ) -> Rect {
        draw_shape_on_image(
            &mut self.image,
            kind,
            anchor,
            radii,
            Pen {
                color,
                width: pen_width,
            },
        );
        self.modified = true;
        geometry::dirty_rect(anchor, radii, pen_width)
    }
}

fn clamp_viewport(viewport: Size) -> Size {
    let clamped = Size::new(
        viewport.width.min(MAX_VIEWPORT_SIDE),
        viewport.height.min(MAX_VIEWPORT_SIDE),
    );
    if clamped != viewport {
        log::warn!("Viewport {:?} too large, clamping to {:?}", viewport, clamped);
    }
    clamped
}

/// Place `image` at the origin of a white raster of `size`, cropping or
/// padding as needed
pub fn resize_image(image: RgbaImage, size: Size) -> RgbaImage {
    if image.dimensions() == (size.width, size.height) {
        return image;
    }
    let mut resized = RgbaImage::from_pixel(size.width, size.height, WHITE);
    imageops::overlay(&mut resized, &image, 0, 0);
    resized
}

fn image_format(path: &Path, format: Option<&str>) -> anyhow::Result<ImageFormat> {
    match format {
        Some(name) => ImageFormat::from_extension(name)
            .with_context(|| format!("unknown image format {name:?}")),
        None => ImageFormat::from_path(path)
            .with_context(|| format!("cannot tell image format of {}", path.display())),
    }
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
