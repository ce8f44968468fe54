use colormap::{Colormap, Normalize};
use image::RgbaImage;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{Figure, RasterErrors, Viewport, line::draw_stroke};

/// Uniform stroke settings applied to every segment of a polyline.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct StrokeStyle {
    pub alpha: f32,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            width: 1.0,
        }
    }
}

/// Draws a time-colored polyline into a transparent canvas.
///
/// Consecutive samples `(xs[i], ys[i])` and `(xs[i+1], ys[i+1])` form segment
/// `i`, colored by `colormap` at the normalized value of `ts[i]`. Each
/// segment's color depends only on its own parameter value, never on draw
/// order.
/// The canvas spans exactly the data bounds and the result is cropped to the
/// bounding box of rendered pixels.
pub fn render_gradient_polyline(
    xs: &[f64],
    ys: &[f64],
    ts: &[f64],
    colormap: Colormap,
    style: StrokeStyle,
    figure: Figure,
) -> Result<RgbaImage, RasterErrors> {
    if xs.len() != ys.len() || ts.len() != xs.len() {
        return Err(RasterErrors::MismatchedLengths {
            xs: xs.len(),
            ys: ys.len(),
            ts: ts.len(),
        });
    }
    if xs.len() < 2 {
        return Err(RasterErrors::TooFewPoints(xs.len()));
    }

    let viewport = Viewport::from_data(xs, ys, figure.pixel_width(), figure.pixel_height());
    let norm = Normalize::from_samples(ts);
    let mut img = RgbaImage::new(viewport.width(), viewport.height());

    for i in 0..xs.len() - 1 {
        let p0 = viewport.map(Point2::new(xs[i], ys[i]));
        let p1 = viewport.map(Point2::new(xs[i + 1], ys[i + 1]));
        let color = colormap.lookup(norm.apply(ts[i])).with_alpha(style.alpha);
        draw_stroke(&mut img, p0, p1, &color, style.width);
    }

    Ok(crop_to_content(img))
}

/// Crops to the bounding box of pixels with nonzero alpha.
///
/// A fully transparent image comes back unchanged.
pub fn crop_to_content(img: RgbaImage) -> RgbaImage {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x {
        return img;
    }
    image::imageops::crop_imm(&img, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image()
}
