//! Observational reporting of stage timings and run summaries.
//!
//! Sinks only observe a run; nothing they do can influence the clusters that
//! are returned.

use std::{fmt, time::Duration};

use tracing::info;

/// Pipeline stage being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Deduplicating rows into condensed points.
    Condense,
    /// Building the neighbour graph.
    NeighborGraph,
    /// Density test and cluster expansion.
    Expand,
    /// Mapping condensed groups back to row indices.
    Restore,
}

impl Stage {
    /// Stable lower-case label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Condense => "condense",
            Self::NeighborGraph => "neighbor_graph",
            Self::Expand => "expand",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing for one completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    /// Stage that finished.
    pub stage: Stage,
    /// Wall-clock time spent in the stage.
    pub elapsed: Duration,
    /// Number of items the stage produced: condensed points, graph edges,
    /// clusters, or restored points respectively.
    pub items: usize,
}

/// Totals reported once a run has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Wall-clock time for the whole pipeline.
    pub elapsed: Duration,
    /// Number of groups including the noise group.
    pub total_clusters: usize,
    /// Size of the largest non-noise cluster.
    pub largest_cluster: usize,
    /// Number of points in the noise group.
    pub noise: usize,
}

/// Receiver for pipeline progress.
///
/// # Examples
/// ```
/// use jacscan_core::{DiagnosticsSink, RunSummary, StageReport};
///
/// #[derive(Default)]
/// struct Collect(Vec<StageReport>);
///
/// impl DiagnosticsSink for Collect {
///     fn stage_completed(&mut self, report: &StageReport) {
///         self.0.push(*report);
///     }
/// }
///
/// let mut sink = Collect::default();
/// sink.finished(&RunSummary {
///     elapsed: std::time::Duration::ZERO,
///     total_clusters: 1,
///     largest_cluster: 0,
///     noise: 0,
/// });
/// assert!(sink.0.is_empty());
/// ```
pub trait DiagnosticsSink {
    /// Called after each stage completes.
    fn stage_completed(&mut self, report: &StageReport);

    /// Called once the result is ready. The default ignores the summary.
    fn finished(&mut self, _summary: &RunSummary) {}
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn stage_completed(&mut self, _report: &StageReport) {}
}

/// Sink that emits `info` events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn stage_completed(&mut self, report: &StageReport) {
        info!(
            stage = report.stage.as_str(),
            elapsed_ms = report.elapsed.as_secs_f64() * 1_000.0,
            items = report.items,
            "stage completed"
        );
    }

    fn finished(&mut self, summary: &RunSummary) {
        info!(
            elapsed_ms = summary.elapsed.as_secs_f64() * 1_000.0,
            total_clusters = summary.total_clusters,
            largest_cluster = summary.largest_cluster,
            noise = summary.noise,
            "clustering finished"
        );
    }
}
