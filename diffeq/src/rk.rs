use crate::{OdeErrors, OdeModel, state::StateArray, tableau::ButcherTableau};

/// Explicit Runge-Kutta core with preallocated stage buffers.
///
/// One instance is reused across every step of a solve so the stage loop
/// never allocates.
pub struct RungeKutta<const STAGES: usize, const N: usize> {
    tableau: ButcherTableau<STAGES>,
    k: [StateArray<N>; STAGES],
    stage: StateArray<N>,
    scaled: StateArray<N>,
}

impl<const STAGES: usize, const N: usize> RungeKutta<STAGES, N> {
    pub fn new(tableau: ButcherTableau<STAGES>) -> Self {
        Self {
            tableau,
            k: [StateArray::default(); STAGES],
            stage: StateArray::default(),
            scaled: StateArray::default(),
        }
    }

    /// Order of the solution propagated by this scheme.
    pub fn order(&self) -> usize {
        self.tableau.order
    }

    /// True when the tableau carries embedded weights for error estimation.
    pub fn has_embedded(&self) -> bool {
        self.tableau.b2.is_some()
    }

    /// Advances one step of size `h` from state `x` at time `t`.
    pub fn step<Model: OdeModel<N>>(
        &mut self,
        model: &mut Model,
        t: f64,
        h: f64,
        x: &StateArray<N>,
    ) -> Result<StateArray<N>, OdeErrors> {
        model
            .f(t, x, &mut self.k[0])
            .map_err(|source| OdeErrors::Model { t, source })?;

        for s in 1..STAGES {
            // in-place accumulation of the intermediate point for stage s
            self.stage = StateArray::default();
            for i in 0..s {
                if self.tableau.a[s][i] == 0.0 {
                    continue;
                }
                self.scaled = self.k[i];
                self.scaled *= self.tableau.a[s][i];
                self.stage += &self.scaled;
            }
            self.stage *= h;
            self.stage += x;

            let ts = t + self.tableau.c[s] * h;
            model
                .f(ts, &self.stage, &mut self.k[s])
                .map_err(|source| OdeErrors::Model { t: ts, source })?;
        }

        let mut y = *x;
        for s in 0..STAGES {
            if self.tableau.b[s] == 0.0 {
                continue;
            }
            self.scaled = self.k[s];
            self.scaled *= self.tableau.b[s] * h;
            y += &self.scaled;
        }
        Ok(y)
    }

    /// Companion solution from the embedded weights.
    ///
    /// Valid only immediately after [`step`](Self::step) with the same `x` and
    /// `h`, since it reuses the stage derivatives of that step. Returns `None`
    /// when the tableau has no embedded weights.
    pub fn embedded(&mut self, x: &StateArray<N>, h: f64) -> Option<StateArray<N>> {
        let b2 = self.tableau.b2?;
        let mut y = *x;
        for s in 0..STAGES {
            if b2[s] == 0.0 {
                continue;
            }
            self.scaled = self.k[s];
            self.scaled *= b2[s] * h;
            y += &self.scaled;
        }
        Some(y)
    }
}
