use std::error::Error;

use diffeq::{OdeModel, state::StateArray};
use serde::{Deserialize, Serialize};

/// The Lorenz convection system.
///
/// With the classic parameters (σ=10, ρ=28, β=8/3) trajectories settle onto
/// the familiar two-lobed strange attractor.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Lorenz {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Lorenz {
    pub fn new(sigma: f64, rho: f64, beta: f64) -> Self {
        Self { sigma, rho, beta }
    }
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl OdeModel<3> for Lorenz {
    fn f(
        &mut self,
        _t: f64,
        x: &StateArray<3>,
        dx: &mut StateArray<3>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        dx[0] = self.sigma * (x[1] - x[0]);
        dx[1] = x[0] * (self.rho - x[2]) - x[1];
        dx[2] = x[0] * x[1] - self.beta * x[2];
        Ok(())
    }
}
