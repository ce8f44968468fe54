//! Rasterization of gradient-colored polylines to transparent RGBA images.
//!
//! The canvas carries no axes, frame, or background fill; the only painted
//! pixels are the anti-aliased strokes themselves, which keeps the output
//! composable over any backdrop.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

pub mod figure;
pub mod line;
pub mod polyline;
pub mod viewport;

pub use figure::Figure;
pub use polyline::{StrokeStyle, crop_to_content, render_gradient_polyline};
pub use viewport::Viewport;

#[derive(Debug, Error)]
pub enum RasterErrors {
    #[error("coordinate sequences differ in length (xs: {xs}, ys: {ys}, ts: {ts})")]
    MismatchedLengths { xs: usize, ys: usize, ts: usize },
    #[error("need at least 2 points to form a segment, got {0}")]
    TooFewPoints(usize),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Encodes the image as a PNG at `path`.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), RasterErrors> {
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
