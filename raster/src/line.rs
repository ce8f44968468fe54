use colormap::Color;
use image::RgbaImage;
use nalgebra::{Point2, Vector2};

// Xiaolin Wu's anti-aliased line algorithm,
// http://en.wikipedia.org/wiki/Xiaolin_Wu%27s_line_algorithm

#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Composites `color` at `(x, y)` with the given coverage, src-over.
///
/// Out-of-bounds pixels are clipped silently so strokes can run off the
/// canvas edge.
fn plot(img: &mut RgbaImage, x: i64, y: i64, rgba: [f32; 4], coverage: f64) {
    if coverage <= 0.0 || x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let src_a = (rgba[3] * coverage as f32).clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    let dst_a = px[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for c in 0..3 {
        let dst = px[c] as f32 / 255.0;
        let out = (rgba[c] * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
        px[c] = (out * 255.0).round() as u8;
    }
    px[3] = (out_a * 255.0).round() as u8;
}

/// Draws a 1px anti-aliased line from `p0` to `p1` in pixel coordinates.
pub fn draw_line(img: &mut RgbaImage, p0: Point2<f64>, p1: Point2<f64>, color: &Color) {
    let rgba: [f32; 4] = color.into();
    let (mut x0, mut y0) = (p0.x, p0.y);
    let (mut x1, mut y1) = (p1.x, p1.y);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let mut put = |x: i64, y: i64, coverage: f64| {
        if steep {
            plot(img, y, x, rgba, coverage);
        } else {
            plot(img, x, y, rgba, coverage);
        }
    };

    let dx = x1 - x0;
    let gradient = if dx > 0.0 { (y1 - y0) / dx } else { 1.0 };

    // first endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    put(xpxl1, ypxl1, rfpart(yend) * xgap);
    put(xpxl1, ypxl1 + 1, fpart(yend) * xgap);
    let mut intery = yend + gradient;

    // second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    put(xpxl2, ypxl2, rfpart(yend) * xgap);
    put(xpxl2, ypxl2 + 1, fpart(yend) * xgap);

    // main loop
    for x in xpxl1 + 1..xpxl2 {
        put(x, intery.floor() as i64, rfpart(intery));
        put(x, intery.floor() as i64 + 1, fpart(intery));
        intery += gradient;
    }
}

/// Strokes a segment with the given width by laying unit-offset parallel
/// lines perpendicular to the segment direction.
pub fn draw_stroke(
    img: &mut RgbaImage,
    p0: Point2<f64>,
    p1: Point2<f64>,
    color: &Color,
    width: f32,
) {
    let n = width.round().max(1.0) as i32;
    if n == 1 {
        draw_line(img, p0, p1, color);
        return;
    }
    let d = p1 - p0;
    let len = d.norm();
    let perp = if len > 0.0 {
        Vector2::new(-d.y, d.x) / len
    } else {
        Vector2::x()
    };
    for i in 0..n {
        let offset = perp * (i as f64 - (n as f64 - 1.0) / 2.0);
        draw_line(img, p0 + offset, p1 + offset, color);
    }
}
