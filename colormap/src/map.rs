use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;

#[derive(Debug, Error, PartialEq)]
pub enum ColormapErrors {
    #[error("unknown colormap '{0}'")]
    UnknownColormap(String),
}

/// Monotonic scalar-to-color gradients.
///
/// Every map is an analytic ramp whose channels vary monotonically with the
/// input, so ordered scalars always produce an ordered sweep of hues. Lookup
/// input is clamped to [0, 1]; the returned alpha is always 1.0 (stroke
/// transparency is the renderer's concern).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Blue to green-cyan.
    #[default]
    Winter,
    /// Cyan to magenta.
    Cool,
    /// Red to yellow.
    Autumn,
    /// Black to white.
    Gray,
}

impl Colormap {
    pub fn lookup(&self, s: f64) -> Color {
        let s = s.clamp(0.0, 1.0) as f32;
        match self {
            Colormap::Winter => Color::new(0.0, s, 1.0 - 0.5 * s, 1.0),
            Colormap::Cool => Color::new(s, 1.0 - s, 1.0, 1.0),
            Colormap::Autumn => Color::new(1.0, s, 0.0, 1.0),
            Colormap::Gray => Color::new(s, s, s, 1.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Winter => "winter",
            Colormap::Cool => "cool",
            Colormap::Autumn => "autumn",
            Colormap::Gray => "gray",
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = ColormapErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "winter" => Ok(Colormap::Winter),
            "cool" => Ok(Colormap::Cool),
            "autumn" => Ok(Colormap::Autumn),
            "gray" => Ok(Colormap::Gray),
            other => Err(ColormapErrors::UnknownColormap(other.to_string())),
        }
    }
}
