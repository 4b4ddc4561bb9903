//! Core clustering orchestration for the jacscan library.
//!
//! Provides the [`Jacscan`] runtime entry point, which drives the condense,
//! neighbour graph, expansion and restore stages in order and reports their
//! timings to a [`DiagnosticsSink`].

use std::{num::NonZeroUsize, time::Instant};

use tracing::{info, instrument};

use crate::{
    Result,
    builder::{ExecutionStrategy, JacscanBuilder},
    condense::condense,
    diagnostics::{DiagnosticsSink, NullSink, RunSummary, Stage, StageReport, TracingSink},
    error::JacscanError,
    expand::expand_clusters,
    graph::NeighborGraph,
    matrix::CsrMatrix,
    restore::restore_indices,
    result::ClusteringResult,
};

/// Entry point for running the clustering pipeline.
///
/// # Examples
/// ```
/// use jacscan_core::{CsrMatrix, JacscanBuilder};
///
/// let matrix = CsrMatrix::from_rows(
///     8,
///     [vec![1, 2, 3], vec![1, 2, 3], vec![1, 2, 4], vec![5, 6], vec![5, 6, 7]],
/// )?;
/// let jacscan = JacscanBuilder::new().with_eps(0.4).with_min_pts(2).build()?;
/// let result = jacscan.run(&matrix)?;
/// assert_eq!(result.groups(), &[vec![2], vec![0, 1], vec![3, 4]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Jacscan {
    eps: f64,
    min_pts: NonZeroUsize,
    execution_strategy: ExecutionStrategy,
    report: bool,
}

impl Jacscan {
    pub(crate) fn new(
        eps: f64,
        min_pts: NonZeroUsize,
        execution_strategy: ExecutionStrategy,
        report: bool,
    ) -> Self {
        Self {
            eps,
            min_pts,
            execution_strategy,
            report,
        }
    }

    /// Returns the maximum Jaccard distance between neighbours.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Returns the minimum combined weight for non-noise points.
    #[must_use]
    pub fn min_pts(&self) -> NonZeroUsize {
        self.min_pts
    }

    /// Returns the execution strategy that will be used when running.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns whether runs report through [`TracingSink`].
    #[must_use]
    pub fn report(&self) -> bool {
        self.report
    }

    /// Clusters the rows of `matrix`.
    ///
    /// When reporting is enabled stage timings and the final summary are
    /// emitted through [`TracingSink`].
    ///
    /// # Errors
    /// Returns [`JacscanError::BackendUnavailable`] when the configured
    /// strategy is not compiled into this build.
    pub fn run(&self, matrix: &CsrMatrix) -> Result<ClusteringResult> {
        if self.report {
            self.run_with_sink(matrix, &mut TracingSink)
        } else {
            self.run_with_sink(matrix, &mut NullSink)
        }
    }

    /// Clusters the rows of `matrix`, reporting progress to `sink`.
    ///
    /// # Errors
    /// Returns [`JacscanError::BackendUnavailable`] when the configured
    /// strategy is not compiled into this build.
    #[instrument(
        name = "core.run",
        err,
        skip(self, matrix, sink),
        fields(
            rows = matrix.rows(),
            nnz = matrix.nnz(),
            eps = self.eps,
            min_pts = %self.min_pts,
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn run_with_sink(
        &self,
        matrix: &CsrMatrix,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<ClusteringResult> {
        let parallel = self.resolve_parallel()?;
        let started = Instant::now();

        let stage_start = Instant::now();
        let points = condense(matrix);
        sink.stage_completed(&StageReport {
            stage: Stage::Condense,
            elapsed: stage_start.elapsed(),
            items: points.len(),
        });

        let stage_start = Instant::now();
        let graph = self.build_graph(&points, parallel);
        sink.stage_completed(&StageReport {
            stage: Stage::NeighborGraph,
            elapsed: stage_start.elapsed(),
            items: graph.edge_count(),
        });

        let stage_start = Instant::now();
        let partition = expand_clusters(&points, &graph, self.min_pts.get());
        sink.stage_completed(&StageReport {
            stage: Stage::Expand,
            elapsed: stage_start.elapsed(),
            items: partition.clusters().len(),
        });

        let stage_start = Instant::now();
        let result = restore_indices(&points, &partition);
        sink.stage_completed(&StageReport {
            stage: Stage::Restore,
            elapsed: stage_start.elapsed(),
            items: result.point_count(),
        });

        sink.finished(&RunSummary {
            elapsed: started.elapsed(),
            total_clusters: result.groups().len(),
            largest_cluster: result.largest_cluster_size(),
            noise: result.noise().len(),
        });
        info!(
            clusters = result.cluster_count(),
            noise = result.noise().len(),
            "clustering completed"
        );
        Ok(result)
    }

    fn resolve_parallel(&self) -> Result<bool> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(false),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => Ok(true),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => Ok(false),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(JacscanError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
        }
    }

    #[cfg(feature = "parallel")]
    fn build_graph(&self, points: &[crate::CondensedPoint], parallel: bool) -> NeighborGraph {
        if parallel {
            NeighborGraph::build_parallel(points, self.eps)
        } else {
            NeighborGraph::build(points, self.eps)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn build_graph(&self, points: &[crate::CondensedPoint], _parallel: bool) -> NeighborGraph {
        NeighborGraph::build(points, self.eps)
    }
}

/// Clusters `matrix` in one call.
///
/// `clusters[0]` of the returned groups is noise; the rest are clusters.
///
/// # Errors
/// Returns [`JacscanError::InvalidEps`] or [`JacscanError::InvalidMinPts`]
/// for out-of-range parameters.
///
/// # Examples
/// ```
/// use jacscan_core::{CsrMatrix, cluster};
///
/// let result = cluster(&CsrMatrix::empty(0), 0.5, 1, false)?;
/// assert_eq!(result.groups(), &[Vec::<usize>::new()]);
/// # Ok::<(), jacscan_core::JacscanError>(())
/// ```
pub fn cluster(
    matrix: &CsrMatrix,
    eps: f64,
    min_pts: usize,
    report: bool,
) -> Result<ClusteringResult> {
    JacscanBuilder::new()
        .with_eps(eps)
        .with_min_pts(min_pts)
        .with_report(report)
        .build()?
        .run(matrix)
}

/// Validates raw CSR arrays and clusters them in one call.
///
/// Parameters are checked before the matrix structure.
///
/// # Errors
/// Returns [`JacscanError::InvalidEps`] or [`JacscanError::InvalidMinPts`]
/// for out-of-range parameters and [`JacscanError::InvalidInput`] for a
/// malformed matrix.
///
/// # Examples
/// ```
/// use jacscan_core::{ErrorCategory, cluster_csr};
///
/// let err = cluster_csr(3, vec![0, 2, 1], vec![0, 1], 0.5, 1, false).unwrap_err();
/// assert_eq!(err.category(), ErrorCategory::InvalidInput);
/// ```
pub fn cluster_csr(
    columns: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    eps: f64,
    min_pts: usize,
    report: bool,
) -> Result<ClusteringResult> {
    let jacscan = JacscanBuilder::new()
        .with_eps(eps)
        .with_min_pts(min_pts)
        .with_report(report)
        .build()?;
    let matrix = CsrMatrix::try_new(columns, indptr, indices).map_err(JacscanError::from)?;
    jacscan.run(&matrix)
}
