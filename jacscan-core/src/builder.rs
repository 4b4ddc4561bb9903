//! Builder utilities for configuring jacscan runs.
//!
//! Exposes the execution strategy selection surface and the parameter
//! validation performed before constructing [`Jacscan`] instances.

use std::num::NonZeroUsize;

use crate::{Result, error::JacscanError, jacscan::Jacscan};

/// Default maximum Jaccard distance between linked points.
pub const DEFAULT_EPS: f64 = 0.15;

/// Default minimum combined weight for a point to escape the noise group.
pub const DEFAULT_MIN_PTS: usize = 2;

/// Indicates how [`Jacscan`] builds the neighbour graph when
/// [`Jacscan::run`] is invoked.
///
/// `Auto` resolves deterministically: it uses the parallel builder when the
/// `parallel` feature is compiled in and the sequential builder otherwise.
/// Both builders produce identical graphs.
///
/// # Examples
/// ```
/// use jacscan_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select the builder automatically.
    Auto,
    /// Build the graph on the calling thread.
    Sequential,
    /// Build the graph on the Rayon thread pool.
    Parallel,
}

/// Configures and constructs [`Jacscan`] instances.
///
/// # Examples
/// ```
/// use jacscan_core::{ExecutionStrategy, JacscanBuilder};
///
/// let jacscan = JacscanBuilder::new()
///     .with_eps(0.4)
///     .with_min_pts(3)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(jacscan.eps(), 0.4);
/// assert_eq!(jacscan.min_pts().get(), 3);
/// assert_eq!(jacscan.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct JacscanBuilder {
    eps: f64,
    min_pts: usize,
    execution_strategy: ExecutionStrategy,
    report: bool,
}

impl Default for JacscanBuilder {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_pts: DEFAULT_MIN_PTS,
            execution_strategy: ExecutionStrategy::Auto,
            report: false,
        }
    }
}

impl JacscanBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use jacscan_core::{ExecutionStrategy, JacscanBuilder};
    ///
    /// let builder = JacscanBuilder::new();
    /// assert_eq!(builder.eps(), 0.15);
    /// assert_eq!(builder.min_pts(), 2);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert!(!builder.report());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the maximum Jaccard distance between neighbours.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Returns the configured distance threshold.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Overrides the minimum combined weight.
    #[must_use]
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Returns the configured density threshold.
    #[must_use]
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Sets the execution strategy to use when running the algorithm.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Enables stage timing and summary reporting through `tracing`.
    #[must_use]
    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    /// Returns whether reporting is enabled.
    #[must_use]
    pub fn report(&self) -> bool {
        self.report
    }

    /// Validates the configuration and constructs a [`Jacscan`] instance.
    ///
    /// # Errors
    /// Returns [`JacscanError::InvalidEps`] when `eps` is not a finite value
    /// in `[0, 1]` and [`JacscanError::InvalidMinPts`] when `min_pts` is zero.
    ///
    /// # Examples
    /// ```
    /// use jacscan_core::{JacscanBuilder, JacscanError};
    ///
    /// let err = JacscanBuilder::new().with_eps(1.5).build().unwrap_err();
    /// assert!(matches!(err, JacscanError::InvalidEps { .. }));
    /// ```
    pub fn build(self) -> Result<Jacscan> {
        if !(0.0..=1.0).contains(&self.eps) {
            return Err(JacscanError::InvalidEps { got: self.eps });
        }
        let min_pts = NonZeroUsize::new(self.min_pts)
            .ok_or(JacscanError::InvalidMinPts { got: self.min_pts })?;

        Ok(Jacscan::new(
            self.eps,
            min_pts,
            self.execution_strategy,
            self.report,
        ))
    }
}
