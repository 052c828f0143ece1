use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{Rgba, RgbaImage};

use crate::canvas::write_png;
use crate::config::{FlyArConfig, SaveLocation};
use crate::core::console::Console;
use crate::domain::Rect;
use crate::fl;
use crate::session::commands::parse_command;
use crate::session::messages::{MouseButton, Msg};
use crate::widget::FlyAr;

/// Whether the command loop keeps going after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub widget: FlyAr,
    pub config: FlyArConfig,
    /// Explicit config file, if one was given on the command line
    pub config_path: Option<PathBuf>,
    /// Window surface the widget paints into
    frame: RgbaImage,
}

impl App {
    pub fn new(config: FlyArConfig, config_path: Option<PathBuf>) -> Self {
        let widget = FlyAr::new(&config);
        let viewport = widget.canvas().viewport();
        Self {
            widget,
            config,
            config_path,
            frame: RgbaImage::from_pixel(viewport.width, viewport.height, Rgba([255; 4])),
        }
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> anyhow::Result<()> {
        loop {
            console.ready()?;
            let Some(line) = console.read_line()? else {
                break;
            };

            let msg = match parse_command(&line) {
                Ok(Some(msg)) => msg,
                Ok(None) => continue,
                Err(err) => {
                    log::warn!("Bad command {:?}: {}", line, err);
                    console.say(fl!("error", reason = format!("{err:#}")))?;
                    continue;
                }
            };

            match self.update(msg, console) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => {
                    log::warn!("Command {:?} failed: {:?}", line, err);
                    console.say(fl!("error", reason = format!("{err:#}")))?;
                }
            }
        }

        if self.widget.is_modified() {
            log::info!("Exiting with unsaved changes");
        }
        Ok(())
    }

    pub fn update<R: BufRead, W: Write>(
        &mut self,
        msg: Msg,
        console: &mut Console<R, W>,
    ) -> anyhow::Result<Flow> {
        match msg {
            Msg::Press(button, point) => {
                if let Some(index) = self.widget.mouse_press(button, point, console) {
                    let line = self.widget.objects()[index].to_string();
                    console.say(fl!("placed", index = index, record = line))?;
                } else if button == MouseButton::Left {
                    console.say(fl!("placement-cancelled"))?;
                }
            }
            Msg::Release(button, _) => self.widget.mouse_release(button),
            Msg::Resize(size) => self.widget.resize(size),
            Msg::Paint { region, path } => {
                self.paint(region);
                let path = self.write_frame(path)?;
                console.say(fl!("painted", path = path.display().to_string()))?;
            }
            Msg::Open(path) => {
                self.widget.open_image(&path)?;
                console.say(fl!("opened", path = path.display().to_string()))?;
            }
            Msg::Save { path, format } => {
                let path = match path {
                    Some(path) => path,
                    None => default_image_path(self.config.save_location)
                        .context("no directory to save into")?,
                };
                self.widget.save_image(&path, format.as_deref())?;
                console.say(fl!(
                    "saved",
                    path = path.display().to_string(),
                    count = self.widget.objects().len(),
                    export = self.widget.exporter().path().display().to_string()
                ))?;
            }
            Msg::Clear => {
                self.widget.clear_image();
                console.say(fl!("cleared"))?;
            }
            Msg::PenColor(color) => self.widget.set_pen_color(color),
            Msg::PenWidth(width) => self.widget.set_pen_width(width),
            Msg::List => {
                for object in self.widget.objects() {
                    console.say(object)?;
                }
            }
            Msg::Remember => {
                self.widget.session().store(&mut self.config);
                self.config.save(self.config_path.as_deref());
                console.say(fl!("remembered"))?;
            }
            Msg::Help => console.say(fl!("help"))?,
            Msg::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Repaint the frame: the given region, or whatever the widget marked dirty
    fn paint(&mut self, region: Option<Rect>) {
        let viewport = self.widget.canvas().viewport();
        let mut region = region.or_else(|| self.widget.take_dirty());

        if self.frame.dimensions() != (viewport.width, viewport.height) {
            self.frame = RgbaImage::from_pixel(viewport.width, viewport.height, Rgba([255; 4]));
            region = Some(viewport.rect());
        }
        if let Some(region) = region {
            self.widget.paint(region, &mut self.frame);
        }
    }

    /// Write the frame as PNG, into a kept temporary file when no path is given
    fn write_frame(&self, path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        match path {
            Some(path) => {
                let mut file = File::create(&path)
                    .with_context(|| format!("creating frame {}", path.display()))?;
                write_png(&mut file, &self.frame)?;
                Ok(path)
            }
            None => {
                let mut file = tempfile::Builder::new()
                    .prefix("flyar-frame-")
                    .suffix(".png")
                    .tempfile()?;
                write_png(&mut file, &self.frame)?;
                let (_, path) = file.keep()?;
                Ok(path)
            }
        }
    }
}

/// Timestamped image path in the configured save location
pub fn default_image_path(location: SaveLocation) -> Option<PathBuf> {
    let mut path = location.dir()?;
    let name = chrono::Local::now()
        .format("FlyAR_%Y-%m-%d_%H-%M-%S.png")
        .to_string();
    path.push(name);
    Some(path)
}

/// Open the initial image, if any, reporting but not failing on errors
pub fn open_initial(app: &mut App, path: &Path) {
    if let Err(err) = app.widget.open_image(path) {
        log::error!("Could not open {}: {:?}", path.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(dir: &Path) -> App {
        let config = FlyArConfig {
            export_path: dir.join("Data.txt"),
            ..Default::default()
        };
        App::new(config, Some(dir.join("config.json")))
    }

    fn run_script(app: &mut App, script: &str) -> String {
        let mut console = Console::new(script.as_bytes(), Vec::new(), false);
        app.run(&mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_script_places_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let out = dir.path().join("out.png");

        let script = format!(
            "press 300 450\n1\n1\n20\n20\nrelease 300 450\n\
             color 255 0 0\npress 250 500\n2\n4\n10\n50\n\
             save {}\nquit\n",
            out.display()
        );
        run_script(&mut app, &script);

        assert!(out.exists());
        let text = std::fs::read_to_string(dir.path().join("Data.txt")).unwrap();
        assert_eq!(
            text,
            "1, 0, 0, 255, 1.2, 1.2, 1, 0.4, 0.4\n2, 255, 0, 0, 0.1, 0.5, 4, 0.2, 1\n"
        );
    }

    #[test]
    fn test_script_cancel_keeps_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        run_script(&mut app, "press 10 10\n1\n3\ncancel\nlist\n");
        assert!(app.widget.objects().is_empty());
    }

    #[test]
    fn test_script_defaults_on_empty_answers() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        let output = run_script(&mut app, "press 300 450\n\n\n\n\nlist\n");
        assert_eq!(app.widget.objects().len(), 1);
        assert!(output.contains("1, 0, 0, 255, 1.2, 1.2, 1, 0.4, 0.4"));
    }

    #[test]
    fn test_bad_commands_do_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        run_script(
            &mut app,
            "bogus\nopen /no/such/image.png\nwidth 7\nquit\nwidth 9\n",
        );
        assert_eq!(app.widget.session().pen_width, 7);
    }

    #[test]
    fn test_clear_empties_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        run_script(&mut app, "press 0 0\n1\n1\n20\n20\nclear\n");
        assert!(app.widget.objects().is_empty());
    }

    #[test]
    fn test_paint_writes_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        let frame = dir.path().join("frame.png");

        run_script(
            &mut app,
            &format!(
                "width 3\npress 20 20\n2\n1\n40\n40\nresize 600 300\npaint {}\n",
                frame.display()
            ),
        );

        let painted = image::open(&frame).unwrap().to_rgba8();
        assert_eq!(painted.dimensions(), (600, 300));
        assert_eq!(painted.get_pixel(20, 40).0, [0, 0, 255, 255]);
        assert_eq!(app.frame.dimensions(), (600, 300));
    }

    #[test]
    fn test_frame_without_path_goes_to_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path());

        let path = app.write_frame(None).unwrap();
        let written = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written.dimensions(), (500, 500));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("flyar-frame-"));
    }

    #[test]
    fn test_remember_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        run_script(&mut app, "width 6\npress 0 0\n2\n3\n30\n40\nremember\n");
        let saved = FlyArConfig::read_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(saved.pen_width, 6);
        assert_eq!(saved.default_shape, crate::domain::ShapeKind::Square);
        assert_eq!(saved.default_x_radius, 30);
        assert_eq!(saved.default_y_radius, 40);
    }
}
