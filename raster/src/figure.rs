use serde::{Deserialize, Serialize};

/// Physical figure dimensions; pixel size is inches times dots per inch.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    dpi: u32,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    pub fn pixel_width(&self) -> u32 {
        ((self.width_in * self.dpi as f64).round() as u32).max(1)
    }

    pub fn pixel_height(&self) -> u32 {
        ((self.height_in * self.dpi as f64).round() as u32).max(1)
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}
