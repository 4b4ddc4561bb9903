//! Benchmark parameter types.

use std::fmt;

/// Parameters for a neighbour graph or pipeline benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of rows in the dataset.
    pub point_count: usize,
    /// Distance threshold used when linking points.
    pub eps: f64,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},eps={}", self.point_count, self.eps)
    }
}
