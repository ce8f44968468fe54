//! Renders the Lorenz attractor as a time-colored polyline.
//!
//! One [`run`] call owns the whole pipeline: integrate the system across the
//! configured time grid, project the trajectory onto two state components,
//! rasterize the projection as a gradient stroke, and write the PNG. There is
//! no process-wide state; everything a run needs lives in its
//! [`AttractorConfig`].

use std::path::PathBuf;

pub mod config;
pub mod lorenz;
pub mod saving;

use diffeq::{
    OdeErrors, OdeProblem, RungeKuttaMethod, grid::TimeGrid, state::StateArray,
};
use indicatif::ProgressBar;
use raster::{Figure, RasterErrors, StrokeStyle, render_gradient_polyline, save_png};
use thiserror::Error;

pub use crate::config::{AttractorConfig, Axis};
pub use crate::lorenz::Lorenz;

#[derive(Debug, Error)]
pub enum AttractorErrors {
    #[error(transparent)]
    Ode(#[from] OdeErrors),
    #[error(transparent)]
    Raster(#[from] RasterErrors),
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a successful run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub samples: usize,
    pub width: u32,
    pub height: u32,
}

/// Integrates, projects, renders, and writes the image, in that order.
///
/// Fails before writing anything if the integration diverges or the renderer
/// rejects its input; the output file either holds one complete image or is
/// never created.
pub fn run(config: &AttractorConfig) -> Result<RunSummary, AttractorErrors> {
    let grid = TimeGrid::new(0.0, config.t_max, config.dt).map_err(OdeErrors::from)?;

    let model = Lorenz::new(config.sigma, config.rho, config.beta);
    let mut problem = OdeProblem::new(model);
    if config.progress {
        problem = problem.with_progress(ProgressBar::new(grid.len() as u64));
    }
    let result = problem.solve_grid(
        &StateArray::new(config.state0),
        &grid,
        RungeKuttaMethod::Rk4,
    )?;

    if let Some(path) = &config.trajectory_csv {
        saving::write_trajectory_csv(&result, path)?;
    }

    let (horizontal, vertical) = config.projection;
    let xs = result.component(horizontal.index());
    let ys = result.component(vertical.index());

    let style = StrokeStyle {
        alpha: config.alpha,
        width: config.linewidth,
    };
    let figure = Figure::new(config.figsize.0, config.figsize.1, config.dpi);
    let img = render_gradient_polyline(&xs, &ys, &result.t, config.colormap, style, figure)?;
    save_png(&img, &config.output_path)?;

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        samples: result.len(),
        width: img.width(),
        height: img.height(),
    })
}
