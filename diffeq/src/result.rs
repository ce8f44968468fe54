use crate::state::StateArray;

/// In-memory storage of a solve: parallel time and state vectors.
///
/// Preallocated to the expected number of saves; fixed-grid solves fill it
/// exactly, adaptive solves push accepted steps as they land.
#[derive(Clone, Debug, Default)]
pub struct MemoryResult<const N: usize> {
    /// Recorded times.
    pub t: Vec<f64>,
    /// Recorded states, one per time.
    pub y: Vec<StateArray<N>>,
}

impl<const N: usize> MemoryResult<N> {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            t: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, t: f64, y: StateArray<N>) {
        self.t.push(t);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Extracts component `i` of every recorded state as its own vector.
    pub fn component(&self, i: usize) -> Vec<f64> {
        self.y.iter().map(|state| state[i]).collect()
    }
}
