use nalgebra::Point2;

/// Maps data coordinates onto a fixed-size pixel canvas.
///
/// The data bounds stretch to fill the full canvas (no margins, no preserved
/// aspect ratio) and the y axis is inverted so larger data values sit higher
/// in the image. Zero-extent bounds are padded by half a unit on each side so
/// single-valued data still lands on the canvas.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(
        (min_x, max_x): (f64, f64),
        (min_y, max_y): (f64, f64),
        width: u32,
        height: u32,
    ) -> Self {
        let (min_x, max_x) = pad_degenerate(min_x, max_x);
        let (min_y, max_y) = pad_degenerate(min_y, max_y);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            width,
            height,
        }
    }

    /// Builds a viewport spanning the min and max of the data sequences.
    pub fn from_data(xs: &[f64], ys: &[f64], width: u32, height: u32) -> Self {
        Self::new(bounds(xs), bounds(ys), width, height)
    }

    pub fn map(&self, p: Point2<f64>) -> Point2<f64> {
        let sx = (self.width - 1) as f64 / (self.max_x - self.min_x);
        let sy = (self.height - 1) as f64 / (self.max_y - self.min_y);
        Point2::new(
            (p.x - self.min_x) * sx,
            (self.height - 1) as f64 - (p.y - self.min_y) * sy,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &v| (lo.min(v), hi.max(v)),
    )
}

fn pad_degenerate(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else if min.is_finite() {
        (min - 0.5, min + 0.5)
    } else {
        (0.0, 1.0)
    }
}
