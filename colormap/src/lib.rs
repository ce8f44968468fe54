//! Scalar-to-color gradients for time-parameterized drawing.

use serde::{Deserialize, Serialize};

pub mod map;
pub mod norm;

pub use map::{Colormap, ColormapErrors};
pub use norm::Normalize;

/// An RGBA color with f32 components in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };

    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };

    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with its alpha replaced.
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a.clamp(0.0, 1.0);
        self
    }

    pub fn alpha(&self) -> f32 {
        self.a
    }

    /// Quantizes to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<&Color> for [f32; 4] {
    fn from(color: &Color) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_hits_the_endpoints() {
        assert_eq!(Color::BLUE.to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(Color::new(0.0, 0.5, 1.0, 0.8).to_rgba8(), [0, 128, 255, 204]);
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Color::RED.with_alpha(2.0).alpha(), 1.0);
        assert_eq!(Color::RED.with_alpha(-1.0).alpha(), 0.0);
    }
}
