//! Frame rendering
//!
//! Applies a substitution table to the source raster, producing a fresh
//! frame. The source is never modified.

use image::RgbImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::color::Color;
use crate::frame_map::SubstitutionTable;

/// Error type for frame rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The frame buffer could not be allocated
    #[error("out of memory allocating a {bytes}-byte frame buffer")]
    OutOfMemory {
        /// Size of the failed allocation
        bytes: usize,
    },
    /// Buffer length does not match the image dimensions
    #[error("frame buffer does not match {width}x{height} dimensions")]
    BadDimensions { width: u32, height: u32 },
}

/// Allocate a copy of the source pixels, reporting allocation failure.
fn copy_buffer(source: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let raw = source.as_raw();
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(raw.len())
        .map_err(|_| RenderError::OutOfMemory { bytes: raw.len() })?;
    buf.extend_from_slice(raw);
    Ok(buf)
}

/// Render one frame by substituting every targeted pixel color.
///
/// Pixels whose color is not in `table` are copied unchanged. Rows are
/// processed in parallel; each pixel depends only on its own original value.
pub fn render_frame(source: &RgbImage, table: &SubstitutionTable) -> Result<RgbImage, RenderError> {
    let (width, height) = source.dimensions();
    let mut buf = copy_buffer(source)?;

    if !table.is_empty() && !buf.is_empty() {
        let row_len = width as usize * 3;
        buf.par_chunks_mut(row_len).for_each(|row| {
            for px in row.chunks_exact_mut(3) {
                let original = Color::new(px[0], px[1], px[2]);
                if let Some(replacement) = table.get(original) {
                    px.copy_from_slice(&replacement.channels());
                }
            }
        });
    }

    RgbImage::from_raw(width, height, buf).ok_or(RenderError::BadDimensions { width, height })
}
