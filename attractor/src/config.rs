use std::path::PathBuf;

use colormap::Colormap;
use serde::{Deserialize, Serialize};

/// Which state component feeds a projection axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Complete configuration for one attractor render.
///
/// `Default` is the canonical picture: the classic Lorenz parameters from a
/// slightly perturbed origin, integrated for 300 time units at step 0.01 and
/// projected onto the x-z plane with the winter gradient.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AttractorConfig {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    pub state0: [f64; 3],
    pub t_max: f64,
    pub dt: f64,
    pub projection: (Axis, Axis),
    pub colormap: Colormap,
    pub alpha: f32,
    pub linewidth: f32,
    /// Figure size in inches (width, height).
    pub figsize: (f64, f64),
    pub dpi: u32,
    pub output_path: PathBuf,
    /// When set, the full trajectory is also exported as t,x,y,z rows.
    pub trajectory_csv: Option<PathBuf>,
    /// Draw a progress bar while integrating.
    #[serde(skip)]
    pub progress: bool,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            state0: [0.1, 0.0, 0.0],
            t_max: 300.0,
            dt: 0.01,
            projection: (Axis::X, Axis::Z),
            colormap: Colormap::Winter,
            alpha: 0.8,
            linewidth: 1.0,
            figsize: (10.0, 8.0),
            dpi: 300,
            output_path: PathBuf::from("lorenz_attractor.png"),
            trajectory_csv: None,
            progress: false,
        }
    }
}

impl AttractorConfig {
    pub fn with_state0(mut self, state0: [f64; 3]) -> Self {
        self.state0 = state0;
        self
    }

    pub fn with_time_span(mut self, t_max: f64, dt: f64) -> Self {
        self.t_max = t_max;
        self.dt = dt;
        self
    }

    pub fn with_projection(mut self, horizontal: Axis, vertical: Axis) -> Self {
        self.projection = (horizontal, vertical);
        self
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn with_figsize(mut self, width_in: f64, height_in: f64, dpi: u32) -> Self {
        self.figsize = (width_in, height_in);
        self.dpi = dpi;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_trajectory_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.trajectory_csv = Some(path.into());
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}
