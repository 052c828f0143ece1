//! FlyAr drawing widget
//!
//! This widget handles:
//! - Pointer presses that run a placement through the prompter
//! - Recording committed placements and stroking them onto the canvas
//! - Resize and paint events for the raster surface
//! - Opening, saving (with object export) and clearing

use std::path::Path;

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::config::{FlyArConfig, ShapeColor};
use crate::domain::{PlacedObject, Rect, ScreenPoint, Size};
use crate::export::ObjectExporter;
use crate::placement::prompt::Prompter;
use crate::placement::{Advance, Placement, PlacementSequencer};
use crate::session::messages::MouseButton;
use crate::session::state::{ObjectState, SessionConfig};

#[derive(Debug)]
pub struct FlyAr {
    canvas: Canvas,
    objects: ObjectState,
    sequencer: PlacementSequencer,
    session: SessionConfig,
    exporter: ObjectExporter,
    scribbling: bool,
    /// Region touched by the last placement, waiting to be repainted
    dirty: Option<Rect>,
}

impl FlyAr {
    pub fn new(config: &FlyArConfig) -> Self {
        Self {
            canvas: Canvas::new(config.canvas_size()),
            objects: ObjectState::default(),
            sequencer: PlacementSequencer::new(),
            session: SessionConfig::from(config),
            exporter: ObjectExporter::new(&config.export_path),
            scribbling: false,
            dirty: None,
        }
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects.objects
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn exporter(&self) -> &ObjectExporter {
        &self.exporter
    }

    pub fn is_modified(&self) -> bool {
        self.canvas.is_modified()
    }

    #[cfg(test)]
    pub fn is_scribbling(&self) -> bool {
        self.scribbling
    }

    /// Take the region that needs repainting since the last call
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    pub fn set_pen_color(&mut self, color: ShapeColor) {
        self.session.pen_color = color;
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.session.pen_width = width;
    }

    /// Load an image into the canvas
    pub fn open_image(&mut self, path: &Path) -> anyhow::Result<()> {
        self.canvas.open(path)
    }

    /// Save the visible canvas, then export the recorded objects.
    ///
    /// Nothing is exported when the image cannot be written. An export
    /// failure is only logged; the save itself still counts as successful.
    pub fn save_image(&mut self, path: &Path, format: Option<&str>) -> anyhow::Result<()> {
        self.canvas.save(path, format)?;

        if let Err(err) = self.exporter.export(self.objects()) {
            log::warn!("Object export skipped: {:?}", err);
        }
        Ok(())
    }

    /// Whiten the canvas and forget every recorded object
    pub fn clear_image(&mut self) {
        self.canvas.clear();
        self.objects.clear_all();
        self.dirty = Some(self.canvas.viewport().rect());
    }

    /// Run a placement on left press. Returns the record index on commit.
    pub fn mouse_press(
        &mut self,
        button: MouseButton,
        point: ScreenPoint,
        prompter: &mut dyn Prompter,
    ) -> Option<usize> {
        if button != MouseButton::Left {
            return None;
        }

        let committed = self.run_placement(point, prompter);
        self.scribbling = true;
        committed.map(|placement| self.commit(placement))
    }

    pub fn mouse_release(&mut self, button: MouseButton) {
        if button == MouseButton::Left && self.scribbling {
            self.scribbling = false;
        }
    }

    /// Viewport changed size
    pub fn resize(&mut self, size: Size) {
        if self.canvas.resize(size) {
            self.dirty = Some(self.canvas.viewport().rect());
        }
    }

    /// Blit the `dirty` region of the canvas into a frame buffer
    pub fn paint(&self, dirty: Rect, frame: &mut RgbaImage) {
        self.canvas.paint(dirty, frame);
    }

    fn run_placement(
        &mut self,
        point: ScreenPoint,
        prompter: &mut dyn Prompter,
    ) -> Option<Placement> {
        if !self.sequencer.begin(point) {
            return None;
        }

        while let Some(prompt) = self.sequencer.prompt(&self.session) {
            let Some(value) = prompter.ask(&prompt) else {
                self.sequencer.cancel();
                return None;
            };
            match self.sequencer.confirm(value) {
                Ok(Advance::Next(_)) => {}
                Ok(Advance::Committed(placement)) => return Some(placement),
                Err(err) => {
                    log::debug!("Rejected {:?} answer: {}", prompt.field, err);
                    prompter.reject(&prompt, &err.to_string());
                }
            }
        }
        None
    }

    fn commit(&mut self, placement: Placement) -> usize {
        let radii = placement.radii();
        let dirty = self.canvas.draw_shape(
            placement.kind,
            placement.anchor,
            radii,
            self.session.pen_color,
            self.session.pen_width,
        );
        self.dirty = Some(match self.dirty {
            Some(prev) => Rect::new(
                prev.left.min(dirty.left),
                prev.top.min(dirty.top),
                prev.right.max(dirty.right),
                prev.bottom.max(dirty.bottom),
            ),
            None => dirty,
        });

        let object = PlacedObject::new(
            placement.kind,
            self.session.pen_color,
            placement.anchor,
            placement.height as f32,
            radii,
        );
        let index = self.objects.add(object);
        self.session.remember(&placement);
        log::debug!("Placed object #{}: {}", index, self.objects.objects[index]);
        index
    }
}
