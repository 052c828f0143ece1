//! Flat-file export of placed objects for the AR renderer
//!
//! One record per line, `type, r, g, b, x, y, z, xRadius, yRadius`, in
//! insertion order. Each export truncates the destination.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::domain::PlacedObject;

/// Write every record as one line
pub fn write_objects<W: Write>(mut w: W, objects: &[PlacedObject]) -> std::io::Result<()> {
    for object in objects {
        writeln!(w, "{object}")?;
    }
    w.flush()
}

#[derive(Debug, Clone)]
pub struct ObjectExporter {
    path: PathBuf,
}

impl ObjectExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the destination with the given records.
    ///
    /// The file is opened on each call and closed before returning. Returns
    /// the number of lines written.
    pub fn export(&self, objects: &[PlacedObject]) -> anyhow::Result<usize> {
        let file = File::create(&self.path)
            .with_context(|| format!("opening export file {}", self.path.display()))?;
        write_objects(BufWriter::new(file), objects)
            .with_context(|| format!("writing export file {}", self.path.display()))?;

        log::info!(
            "Exported {} objects to {}",
            objects.len(),
            self.path.display()
        );
        Ok(objects.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeColor;
    use crate::domain::{PixelRadii, ScreenPoint, ShapeKind};

    fn sample() -> Vec<PlacedObject> {
        vec![
            PlacedObject::new(
                ShapeKind::Circle,
                ShapeColor::new(0, 0, 255),
                ScreenPoint::new(300, 450),
                1.0,
                PixelRadii::new(20.0, 20.0),
            ),
            PlacedObject::new(
                ShapeKind::Square,
                ShapeColor::new(255, 0, 0),
                ScreenPoint::new(250, 500),
                4.0,
                PixelRadii::new(10.0, 50.0),
            ),
            PlacedObject::new(
                ShapeKind::Circle,
                ShapeColor::new(12, 34, 56),
                ScreenPoint::new(100, 100),
                15.0,
                PixelRadii::new(30.0, 40.0),
            ),
        ]
    }

    #[test]
    fn test_write_objects_lines() {
        let mut out = Vec::new();
        write_objects(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1, 0, 0, 255, 1.2, 1.2, 1, 0.4, 0.4");
        assert_eq!(lines[1], "2, 255, 0, 0, 0.1, 0.5, 4, 0.2, 1");
        assert_eq!(lines[2], "1, 12, 34, 56, -2.7, 8.4, 15, 0.6, 0.8");
        for line in lines {
            assert_eq!(line.split(", ").count(), 9);
        }
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_export_empty_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Data.txt");
        let exporter = ObjectExporter::new(&path);

        assert_eq!(exporter.export(&[]).unwrap(), 0);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_export_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Data.txt");
        let exporter = ObjectExporter::new(&path);

        exporter.export(&sample()).unwrap();
        exporter.export(&sample()[..1]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "1, 0, 0, 255, 1.2, 1.2, 1, 0.4, 0.4\n");
    }

    #[test]
    fn test_export_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ObjectExporter::new(dir.path().join("missing").join("Data.txt"));
        assert!(exporter.export(&sample()).is_err());
    }
}
