//! Source image loading
//!
//! Decodes the input PNG and normalizes it to 8-bit RGB. Any alpha channel is
//! discarded (color channels are kept as stored, not composited), so fully
//! transparent pixels keep whatever color they carry underneath.

use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for source loading
#[derive(Debug, Error)]
pub enum SourceError {
    /// Input file does not exist
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Input file is not a PNG
    #[error("input file must be a PNG file: {}", .0.display())]
    NotPng(PathBuf),
    /// Decoding failed
    #[error("cannot open image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded source raster plus what normalization did to it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: RgbImage,
    /// Color type of the file before conversion, e.g. `Rgba8`
    pub original_color: image::ColorType,
    /// Whether an alpha channel was dropped
    pub had_alpha: bool,
}

impl SourceImage {
    /// Normalize an already decoded image.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let original_color = image.color();
        let had_alpha = original_color.has_alpha();
        let image = match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        };
        Self { image, original_color, had_alpha }
    }

    /// Whether conversion to RGB was needed.
    pub fn was_converted(&self) -> bool {
        self.original_color != image::ColorType::Rgb8
    }
}

/// Check if a path has a `.png` extension (case-insensitive).
pub fn is_png_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Load and normalize a PNG source image.
pub fn load_source(path: &Path) -> Result<SourceImage, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    if !is_png_file(path) {
        return Err(SourceError::NotPng(path.to_path_buf()));
    }

    let decoded = image::open(path)
        .map_err(|source| SourceError::Decode { path: path.to_path_buf(), source })?;
    let source = SourceImage::from_dynamic(decoded);

    if source.was_converted() {
        log::info!("converted {} from {:?} to RGB", path.display(), source.original_color);
    }
    if source.had_alpha {
        log::info!("{}: alpha channel discarded", path.display());
    }

    Ok(source)
}
