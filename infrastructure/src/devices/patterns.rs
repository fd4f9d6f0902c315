//! PNG pattern library.

use keybow_application::{PatternError, PatternSourcePort};
use keybow_domain::{Pattern, Rgb, StoreName};
use image::ImageError;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves pattern names to `<dir>/<name>.png`.
///
/// Column `x` of row `y` is the colour of LED `x` in frame `y`.
#[derive(Debug, Clone)]
pub struct PngPatternLibrary {
    dir: PathBuf,
}

impl PngPatternLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &StoreName) -> PathBuf {
        self.dir.join(format!("{}.png", name.as_str()))
    }
}

fn decode(path: &Path) -> Result<Pattern, PatternError> {
    let image = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) if io.kind() == io::ErrorKind::NotFound => {
            PatternError::NotFound(path.to_path_buf())
        }
        other => PatternError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let rgb = image.to_rgb8();
    let width = rgb.width() as usize;
    let pixels = rgb.pixels().map(|p| Rgb::new(p[0], p[1], p[2])).collect();
    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        rgb.width(),
        rgb.height()
    );
    Ok(Pattern::new(width, pixels))
}

impl PatternSourcePort for PngPatternLibrary {
    fn load(&self, name: &StoreName) -> Result<Pattern, PatternError> {
        decode(&self.path_for(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn name(s: &str) -> StoreName {
        StoreName::parse(s).unwrap()
    }

    #[test]
    fn test_rows_become_frames() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8 * 10, y as u8, 7]));
        img.save(dir.path().join("wave.png")).unwrap();

        let library = PngPatternLibrary::new(dir.path());
        let pattern = library.load(&name("wave")).unwrap();
        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.frame_count(), 2);
        assert_eq!(
            pattern.frame(1).unwrap(),
            &[Rgb::new(0, 1, 7), Rgb::new(10, 1, 7), Rgb::new(20, 1, 7)][..]
        );
    }

    #[test]
    fn test_missing_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let library = PngPatternLibrary::new(dir.path());
        assert!(matches!(
            library.load(&name("absent")),
            Err(PatternError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_pattern() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("junk.png"), b"not a png").unwrap();
        let library = PngPatternLibrary::new(dir.path());
        assert!(matches!(
            library.load(&name("junk")),
            Err(PatternError::Decode { .. })
        ));
    }
}
