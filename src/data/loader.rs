//! Image dimension probing.
//!
//! The viewer never decodes pixels itself: it only needs the natural size of
//! the image and the size it is displayed at inside the viewport. Standard
//! formats (PNG, JPEG, BMP, TIFF, WebP) are probed through the `image` crate,
//! which reads just the header.

use std::path::Path;

use crate::error::ViewerError;
use crate::geometry::Size;

/// Description of the image currently shown in the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// File name without extension; matched against a note's `imageName`.
    pub name: String,
    /// Natural pixel size.
    pub natural: Size,
    /// Laid-out size inside the viewport, before pan/zoom/rotate.
    pub display: Size,
}

impl LoadedImage {
    /// Describe an image whose display size is already known (e.g. reported by
    /// a host layout engine).
    pub fn new(name: impl Into<String>, natural: Size, display: Size) -> Self {
        Self {
            name: name.into(),
            natural,
            display,
        }
    }

    /// Describe an image laid out the default way: scaled down to fit the
    /// viewport, never scaled up.
    pub fn fitted(name: impl Into<String>, natural: Size, viewport: Size) -> Self {
        Self::new(name, natural, natural.fit_within(viewport))
    }

    /// Read the dimensions of an image file and fit it into `viewport`.
    pub fn probe(path: &Path, viewport: Size) -> Result<Self, ViewerError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| ViewerError::InvalidImage {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let name = image_base_name(path);
        let natural = Size::new(f64::from(width), f64::from(height));
        let loaded = Self::fitted(name, natural, viewport);

        log::info!(
            "Probed '{}': {}x{} natural, {:.0}x{:.0} displayed",
            loaded.name,
            width,
            height,
            loaded.display.width,
            loaded.display.height
        );
        Ok(loaded)
    }

    /// Both sizes usable for mapping.
    pub fn is_valid(&self) -> bool {
        self.natural.is_valid() && self.display.is_valid()
    }
}

/// File name with its last extension removed (`scan.v2.png` -> `scan.v2`).
pub fn image_base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_base_name_strips_last_extension() {
        assert_eq!(image_base_name(Path::new("/data/chest.png")), "chest");
        assert_eq!(image_base_name(Path::new("scan.v2.jpeg")), "scan.v2");
        assert_eq!(image_base_name(Path::new("noext")), "noext");
    }

    #[test]
    fn test_fitted_layout() {
        let img = LoadedImage::fitted("a", Size::new(3000.0, 1500.0), Size::new(1200.0, 1200.0));
        assert_eq!(img.display, Size::new(1200.0, 600.0));
        assert!(img.is_valid());
    }

    #[test]
    fn test_zero_sized_image_is_invalid() {
        let img = LoadedImage::new("a", Size::new(0.0, 0.0), Size::new(0.0, 0.0));
        assert!(!img.is_valid());
    }

    #[test]
    fn test_probe_png() {
        let path = std::env::temp_dir().join(format!("medmark-probe-{}.png", std::process::id()));
        image::RgbImage::new(800, 600).save(&path).unwrap();

        let img = LoadedImage::probe(&path, Size::new(1200.0, 1200.0)).unwrap();
        assert_eq!(img.natural, Size::new(800.0, 600.0));
        assert_eq!(img.display, Size::new(800.0, 600.0));
        assert!(img.name.starts_with("medmark-probe-"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_probe_missing_file() {
        let err = LoadedImage::probe(
            &PathBuf::from("/definitely/not/here.png"),
            Size::new(1200.0, 1200.0),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::InvalidImage { .. }));
    }
}
