use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GridErrors {
    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("grid bounds must be finite, got [{t0}, {t_max}]")]
    NonFiniteBounds { t0: f64, t_max: f64 },
    #[error("grid span is empty: t_max ({t_max}) must exceed t0 ({t0})")]
    EmptySpan { t0: f64, t_max: f64 },
}

/// An immutable, strictly increasing sequence of sample times with a fixed step.
///
/// Covers `[t0, t_max)` with `ceil((t_max - t0) / dt)` points; the fixed-grid
/// solvers produce exactly one state per point.
#[derive(Clone, Debug)]
pub struct TimeGrid {
    points: Vec<f64>,
    dt: f64,
}

impl TimeGrid {
    pub fn new(t0: f64, t_max: f64, dt: f64) -> Result<Self, GridErrors> {
        if !t0.is_finite() || !t_max.is_finite() {
            return Err(GridErrors::NonFiniteBounds { t0, t_max });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(GridErrors::InvalidStep(dt));
        }
        if t_max <= t0 {
            return Err(GridErrors::EmptySpan { t0, t_max });
        }
        let n = ((t_max - t0) / dt).ceil() as usize;
        let points = (0..n).map(|i| t0 + i as f64 * dt).collect();
        Ok(Self { points, dt })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn first(&self) -> f64 {
        self.points[0]
    }

    pub fn last(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn covers_the_half_open_span() {
        let grid = TimeGrid::new(0.0, 300.0, 0.01).unwrap();
        assert_eq!(grid.len(), 30000);
        assert_eq!(grid.first(), 0.0);
        assert_abs_diff_eq!(grid.last(), 299.99, epsilon = 1e-9);
    }

    #[test]
    fn points_are_strictly_increasing() {
        let grid = TimeGrid::new(0.0, 1.0, 0.1).unwrap();
        for w in grid.points().windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn partial_last_step_still_gets_a_point() {
        // span of 0.25 with dt 0.1 -> points at 0.0, 0.1, 0.2
        let grid = TimeGrid::new(0.0, 0.25, 0.1).unwrap();
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(
            TimeGrid::new(0.0, 1.0, 0.0).unwrap_err(),
            GridErrors::InvalidStep(0.0)
        );
        assert_eq!(
            TimeGrid::new(0.0, 1.0, -0.1).unwrap_err(),
            GridErrors::InvalidStep(-0.1)
        );
        assert!(matches!(
            TimeGrid::new(1.0, 1.0, 0.1).unwrap_err(),
            GridErrors::EmptySpan { .. }
        ));
        assert!(matches!(
            TimeGrid::new(f64::NAN, 1.0, 0.1).unwrap_err(),
            GridErrors::NonFiniteBounds { .. }
        ));
    }
}
