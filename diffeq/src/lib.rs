//! Explicit Runge-Kutta integration of ordinary differential equations.
//!
//! A model implements [`OdeModel`] by filling in the derivative in place;
//! [`OdeProblem`] drives it either across a fixed [`TimeGrid`] (one state per
//! grid point) or adaptively over a span with an embedded error estimate.
//! Non-finite states are fatal: a solve either returns the complete
//! trajectory or an error, never a partial result.

use std::{error::Error, fmt::Debug};

pub mod grid;
pub mod result;
pub mod rk;
pub mod state;
pub mod stepping;
pub mod tableau;

use indicatif::ProgressBar;
use thiserror::Error as ThisError;

use crate::{
    grid::{GridErrors, TimeGrid},
    result::MemoryResult,
    rk::RungeKutta,
    state::StateArray,
    stepping::{AdaptiveStepControl, error_norm},
    tableau::ButcherTableau,
};

/// Trait for defining a dynamical system model that can be numerically integrated.
///
/// Types implementing this trait must define how to compute the derivative
/// (or RHS function) of the ODE at a given time and state.
pub trait OdeModel<const N: usize>: Debug {
    /// Compute the derivative at time `t` and state `x`, storing the result in `dx`.
    fn f(
        &mut self,
        t: f64,
        x: &StateArray<N>,
        dx: &mut StateArray<N>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

#[derive(Debug, ThisError)]
pub enum OdeErrors {
    #[error("state became non-finite at t = {t}")]
    NumericalDivergence { t: f64 },
    #[error("step size underflowed below {min_dt:e} at t = {t}")]
    StepSizeUnderflow { t: f64, min_dt: f64 },
    #[error("model evaluation failed at t = {t}: {source}")]
    Model {
        t: f64,
        source: Box<dyn Error + Send + Sync>,
    },
    #[error("{0:?} has no embedded error estimate and cannot step adaptively")]
    AdaptiveUnsupported(RungeKuttaMethod),
    #[error(transparent)]
    Grid(#[from] GridErrors),
}

/// The available solver schemes. Both are at least 4th order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RungeKuttaMethod {
    /// Classical Runge-Kutta 4th-order method.
    #[default]
    Rk4,
    /// Dormand-Prince 5(4) embedded method.
    DoPri45,
}

/// Container for a complete ODE problem: the model plus solve configuration.
pub struct OdeProblem<Model, const N: usize> {
    model: Model,
    progress: Option<ProgressBar>,
}

impl<Model, const N: usize> OdeProblem<Model, N>
where
    Model: OdeModel<N>,
{
    pub fn new(model: Model) -> Self {
        Self {
            model,
            progress: None,
        }
    }

    /// Attaches a progress bar that ticks once per completed step.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Integrates across every grid point in one call.
    ///
    /// The first recorded state equals `x0` and exactly `grid.len()` states
    /// come back, in time order.
    pub fn solve_grid(
        &mut self,
        x0: &StateArray<N>,
        grid: &TimeGrid,
        method: RungeKuttaMethod,
    ) -> Result<MemoryResult<N>, OdeErrors> {
        match method {
            RungeKuttaMethod::Rk4 => {
                self.solve_grid_with(x0, grid, RungeKutta::new(ButcherTableau::<4>::RK4))
            }
            RungeKuttaMethod::DoPri45 => {
                self.solve_grid_with(x0, grid, RungeKutta::new(ButcherTableau::<7>::DOPRI45))
            }
        }
    }

    fn solve_grid_with<const STAGES: usize>(
        &mut self,
        x0: &StateArray<N>,
        grid: &TimeGrid,
        mut rk: RungeKutta<STAGES, N>,
    ) -> Result<MemoryResult<N>, OdeErrors> {
        let points = grid.points();
        if !x0.is_finite() {
            return Err(OdeErrors::NumericalDivergence { t: points[0] });
        }

        let mut result = MemoryResult::with_capacity(points.len());
        let mut x = *x0;
        result.push(points[0], x);

        if let Some(bar) = &self.progress {
            bar.set_length(points.len() as u64);
        }

        for w in points.windows(2) {
            let (t, t_next) = (w[0], w[1]);
            let y = rk.step(&mut self.model, t, t_next - t, &x)?;
            if !y.is_finite() {
                return Err(OdeErrors::NumericalDivergence { t: t_next });
            }
            result.push(t_next, y);
            x = y;
            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = &self.progress {
            bar.finish_and_clear();
        }
        Ok(result)
    }

    /// Integrates over `tspan` with adaptive step control, recording every
    /// accepted step.
    pub fn solve_adaptive(
        &mut self,
        x0: &StateArray<N>,
        tspan: (f64, f64),
        control: AdaptiveStepControl,
        method: RungeKuttaMethod,
    ) -> Result<MemoryResult<N>, OdeErrors> {
        let mut rk = match method {
            RungeKuttaMethod::DoPri45 => RungeKutta::new(ButcherTableau::<7>::DOPRI45),
            RungeKuttaMethod::Rk4 => return Err(OdeErrors::AdaptiveUnsupported(method)),
        };

        let (t0, tf) = tspan;
        if !x0.is_finite() {
            return Err(OdeErrors::NumericalDivergence { t: t0 });
        }

        let mut h = control.initial_dt.unwrap_or((tf - t0) / 100.0);
        if let Some(max_dt) = control.max_dt {
            h = h.min(max_dt);
        }

        let mut result = MemoryResult::with_capacity(((tf - t0) / h).ceil() as usize);
        let mut x = *x0;
        let mut t = t0;
        result.push(t, x);

        let floor = control.min_dt.unwrap_or(f64::EPSILON * 16.0);
        while tf - t > f64::EPSILON * tf.abs().max(1.0) {
            h = h.min(tf - t);
            let y = rk.step(&mut self.model, t, h, &x)?;
            let Some(y_star) = rk.embedded(&x, h) else {
                return Err(OdeErrors::AdaptiveUnsupported(method));
            };
            // a non-finite trial step counts as an infinitely bad one, so it
            // is rejected and the step shrinks toward the floor
            let mut err = error_norm(&x, &y, &y_star, control.rel_tol, control.abs_tol);
            if !err.is_finite() || !y.is_finite() {
                err = f64::INFINITY;
            }

            if err <= 1.0 {
                t += h;
                x = y;
                result.push(t, x);
            } else if h <= floor {
                return if y.is_finite() {
                    Err(OdeErrors::StepSizeUnderflow { t, min_dt: floor })
                } else {
                    Err(OdeErrors::NumericalDivergence { t })
                };
            }

            h = control.next_step(h, err, rk.order()).max(floor);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[derive(Debug)]
    struct Decay {
        lambda: f64,
    }

    impl OdeModel<1> for Decay {
        fn f(
            &mut self,
            _t: f64,
            x: &StateArray<1>,
            dx: &mut StateArray<1>,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            dx[0] = -self.lambda * x[0];
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Oscillator;

    impl OdeModel<2> for Oscillator {
        fn f(
            &mut self,
            _t: f64,
            x: &StateArray<2>,
            dx: &mut StateArray<2>,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            dx[0] = x[1];
            dx[1] = -x[0];
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Blowup;

    impl OdeModel<1> for Blowup {
        fn f(
            &mut self,
            _t: f64,
            x: &StateArray<1>,
            dx: &mut StateArray<1>,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            // y' = y^2 from y(0) = 2 has a pole at t = 0.5
            dx[0] = x[0] * x[0];
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BadModel;

    impl OdeModel<1> for BadModel {
        fn f(
            &mut self,
            _t: f64,
            _x: &StateArray<1>,
            dx: &mut StateArray<1>,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            dx[0] = f64::NAN;
            Ok(())
        }
    }

    #[test]
    fn grid_solve_returns_one_state_per_grid_point() {
        let grid = TimeGrid::new(0.0, 1.0, 0.01).unwrap();
        let x0 = StateArray::new([1.0]);
        let result = OdeProblem::new(Decay { lambda: 1.0 })
            .solve_grid(&x0, &grid, RungeKuttaMethod::Rk4)
            .unwrap();
        assert_eq!(result.len(), grid.len());
        assert_eq!(result.y[0], x0);
        assert_eq!(result.t[0], grid.first());
    }

    #[test]
    fn rk4_matches_exponential_decay() {
        let grid = TimeGrid::new(0.0, 1.0 + 0.01, 0.01).unwrap();
        let result = OdeProblem::new(Decay { lambda: 1.0 })
            .solve_grid(&StateArray::new([1.0]), &grid, RungeKuttaMethod::Rk4)
            .unwrap();
        let last = result.y[result.len() - 1][0];
        assert_abs_diff_eq!(last, (-grid.last()).exp(), epsilon = 1e-9);
    }

    #[test]
    fn rk4_closes_the_oscillator_orbit() {
        // one full period of x'' = -x returns to the initial state
        let period = std::f64::consts::TAU;
        let grid = TimeGrid::new(0.0, period + 1e-3, 1e-3).unwrap();
        let result = OdeProblem::new(Oscillator)
            .solve_grid(&StateArray::new([1.0, 0.0]), &grid, RungeKuttaMethod::Rk4)
            .unwrap();
        let last = result.y[result.len() - 1];
        assert_abs_diff_eq!(last[0], (grid.last()).cos(), epsilon = 1e-8);
        assert_abs_diff_eq!(last[1], -(grid.last()).sin(), epsilon = 1e-8);
    }

    #[test]
    fn identical_solves_are_bit_identical() {
        let grid = TimeGrid::new(0.0, 2.0, 0.01).unwrap();
        let x0 = StateArray::new([1.0, 0.0]);
        let a = OdeProblem::new(Oscillator)
            .solve_grid(&x0, &grid, RungeKuttaMethod::Rk4)
            .unwrap();
        let b = OdeProblem::new(Oscillator)
            .solve_grid(&x0, &grid, RungeKuttaMethod::Rk4)
            .unwrap();
        assert_eq!(a.t, b.t);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn blowup_is_reported_as_divergence() {
        let grid = TimeGrid::new(0.0, 2.0, 0.01).unwrap();
        let err = OdeProblem::new(Blowup)
            .solve_grid(&StateArray::new([2.0]), &grid, RungeKuttaMethod::Rk4)
            .unwrap_err();
        assert!(matches!(err, OdeErrors::NumericalDivergence { .. }));
    }

    #[test]
    fn nan_derivative_is_reported_as_divergence() {
        let grid = TimeGrid::new(0.0, 1.0, 0.1).unwrap();
        let err = OdeProblem::new(BadModel)
            .solve_grid(&StateArray::new([1.0]), &grid, RungeKuttaMethod::Rk4)
            .unwrap_err();
        assert!(matches!(err, OdeErrors::NumericalDivergence { .. }));
    }

    #[test]
    fn non_finite_initial_state_is_rejected() {
        let grid = TimeGrid::new(0.0, 1.0, 0.1).unwrap();
        let err = OdeProblem::new(Decay { lambda: 1.0 })
            .solve_grid(&StateArray::new([f64::NAN]), &grid, RungeKuttaMethod::Rk4)
            .unwrap_err();
        assert!(matches!(err, OdeErrors::NumericalDivergence { .. }));
    }

    #[test]
    fn adaptive_dopri45_matches_exponential_decay() {
        let control = AdaptiveStepControl::default()
            .with_rel_tol(1e-8)
            .with_abs_tol(1e-10);
        let result = OdeProblem::new(Decay { lambda: 1.0 })
            .solve_adaptive(
                &StateArray::new([1.0]),
                (0.0, 5.0),
                control,
                RungeKuttaMethod::DoPri45,
            )
            .unwrap();
        let (t_last, y_last) = (result.t[result.len() - 1], result.y[result.len() - 1][0]);
        assert_abs_diff_eq!(t_last, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y_last, (-5.0f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn rk4_cannot_step_adaptively() {
        let err = OdeProblem::new(Decay { lambda: 1.0 })
            .solve_adaptive(
                &StateArray::new([1.0]),
                (0.0, 1.0),
                AdaptiveStepControl::default(),
                RungeKuttaMethod::Rk4,
            )
            .unwrap_err();
        assert!(matches!(err, OdeErrors::AdaptiveUnsupported(_)));
    }
}
