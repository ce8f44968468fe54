use crate::state::StateArray;

/// Adaptive step-size controller.
///
/// Accepts a step when the tolerance-scaled RMS error is at or below one and
/// grows or shrinks the step with the standard `0.9 * (1/err)^(1/(order-1))`
/// rule, clamped by the optional step bounds.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveStepControl {
    /// Relative tolerance used for error estimation.
    pub rel_tol: f64,
    /// Absolute tolerance used for error estimation.
    pub abs_tol: f64,
    /// Optional minimum allowed step size.
    pub min_dt: Option<f64>,
    /// Optional maximum allowed step size.
    pub max_dt: Option<f64>,
    /// Optional first step; defaults to 1/100th of the span.
    pub initial_dt: Option<f64>,
}

impl Default for AdaptiveStepControl {
    fn default() -> Self {
        Self {
            rel_tol: 1e-3,
            abs_tol: 1e-6,
            min_dt: None,
            max_dt: None,
            initial_dt: None,
        }
    }
}

impl AdaptiveStepControl {
    pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    pub fn with_abs_tol(mut self, abs_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self
    }

    pub fn with_min_dt(mut self, min_dt: f64) -> Self {
        self.min_dt = Some(min_dt);
        self
    }

    pub fn with_max_dt(mut self, max_dt: f64) -> Self {
        self.max_dt = Some(max_dt);
        self
    }

    pub fn with_initial_dt(mut self, initial_dt: f64) -> Self {
        self.initial_dt = Some(initial_dt);
        self
    }

    /// Computes the next step size from the current step and normalized error.
    pub(crate) fn next_step(&self, dt: f64, error: f64, order: usize) -> f64 {
        const EPS: f64 = 1e-14;
        let error = error.max(EPS);
        let mut factor = 0.9 * (1.0 / error).powf(1.0 / (order as f64 - 1.0));
        // bound growth so a single tiny error estimate cannot fling the step
        factor = factor.clamp(0.1, 5.0);
        let mut new_dt = dt * factor;
        if let Some(min_dt) = self.min_dt {
            new_dt = new_dt.max(min_dt);
        }
        if let Some(max_dt) = self.max_dt {
            new_dt = new_dt.min(max_dt);
        }
        new_dt
    }
}

/// Tolerance-scaled RMS error between a step and its embedded companion.
///
/// Each component is scaled by `abs_tol + rel_tol * max(|x0_i|, |y_i|)`; a
/// result at or below 1.0 means the step met the requested tolerances.
pub(crate) fn error_norm<const N: usize>(
    x0: &StateArray<N>,
    y: &StateArray<N>,
    y_star: &StateArray<N>,
    rel_tol: f64,
    abs_tol: f64,
) -> f64 {
    if N == 0 {
        return 0.0;
    }
    let mut sum_squared_errors = 0.0;
    for i in 0..N {
        let scale = abs_tol + rel_tol * x0[i].abs().max(y[i].abs());
        let e = (y[i] - y_star[i]) / scale;
        sum_squared_errors += e * e;
    }
    (sum_squared_errors / N as f64).sqrt()
}
