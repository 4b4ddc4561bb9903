//! Neighbour graph construction over condensed points.
//!
//! Condensed points are visited in descending order of feature-set size. For
//! a point `i` only smaller-or-equal points later in that order are compared,
//! and the scan stops at the first candidate whose size alone rules out a
//! match: if `Fj` were a subset of `Fi` the distance would be
//! `1 - |Fj| / |Fi|`, and that lower bound only grows as `|Fj|` shrinks. The
//! pruning is exact; no pair within `eps` is ever skipped.
//!
//! The parallel builder runs each scan on Rayon with its own edge buffer and
//! merges the buffers in scan order, so it produces exactly the graph the
//! sequential builder does.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    condense::CondensedPoint,
    feature_set::{best_case_distance, jaccard_distance_from_counts},
};

/// Counters gathered while building a [`NeighborGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Pairs whose intersection was computed.
    pub comparisons: usize,
    /// Scans cut short by the size bound.
    pub pruned_scans: usize,
    /// Undirected edges accepted.
    pub edges: usize,
}

/// Undirected adjacency between condensed point identifiers.
///
/// `j` appears in `neighbors(i)` exactly when `i` appears in `neighbors(j)`.
/// Each list is sorted ascending and never contains its owner.
///
/// # Examples
/// ```
/// use jacscan_core::{CsrMatrix, NeighborGraph, condense};
///
/// let matrix = CsrMatrix::from_rows(8, [vec![5, 6], vec![5, 6, 7], vec![1]])?;
/// let points = condense(&matrix);
/// let graph = NeighborGraph::build(&points, 0.4);
/// assert_eq!(graph.neighbors(0), &[1]);
/// assert_eq!(graph.neighbors(1), &[0]);
/// assert!(graph.neighbors(2).is_empty());
/// # Ok::<(), jacscan_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborGraph {
    adjacency: Vec<Vec<usize>>,
    stats: GraphStats,
}

struct Scan {
    edges: Vec<(usize, usize)>,
    comparisons: usize,
    pruned: bool,
}

impl NeighborGraph {
    /// Builds the graph on the calling thread.
    #[must_use]
    #[instrument(name = "core.neighbor_graph", skip(points), fields(condensed = points.len(), parallel = false))]
    pub fn build(points: &[CondensedPoint], eps: f64) -> Self {
        let order = order_by_cardinality(points);
        let scans = (0..order.len())
            .map(|position| scan_tail(points, &order, position, eps))
            .collect::<Vec<_>>();
        Self::assemble(points.len(), scans)
    }

    /// Builds the graph with one Rayon task per scan.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[must_use]
    #[instrument(name = "core.neighbor_graph", skip(points), fields(condensed = points.len(), parallel = true))]
    pub fn build_parallel(points: &[CondensedPoint], eps: f64) -> Self {
        let order = order_by_cardinality(points);
        let scans = (0..order.len())
            .into_par_iter()
            .map(|position| scan_tail(points, &order, position, eps))
            .collect::<Vec<_>>();
        Self::assemble(points.len(), scans)
    }

    fn assemble(len: usize, scans: Vec<Scan>) -> Self {
        let mut adjacency = vec![Vec::new(); len];
        let mut stats = GraphStats::default();
        for scan in scans {
            stats.comparisons += scan.comparisons;
            stats.pruned_scans += usize::from(scan.pruned);
            stats.edges += scan.edges.len();
            for (left, right) in scan.edges {
                if let Some(list) = adjacency.get_mut(left) {
                    list.push(right);
                }
                if let Some(list) = adjacency.get_mut(right) {
                    list.push(left);
                }
            }
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        record_metrics(&stats);
        debug!(
            comparisons = stats.comparisons,
            pruned_scans = stats.pruned_scans,
            edges = stats.edges,
            "neighbour graph assembled"
        );
        Self { adjacency, stats }
    }

    /// Neighbours of condensed point `id`; empty when `id` is out of range.
    #[must_use]
    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of condensed points covered by the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns whether the graph covers no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.stats.edges
    }

    /// Counters gathered during construction.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        self.stats
    }
}

/// Identifiers sorted by descending feature-set size, ties by ascending id.
fn order_by_cardinality(points: &[CondensedPoint]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|&id| {
        let size = points.get(id).map_or(0, |point| point.features().len());
        (std::cmp::Reverse(size), id)
    });
    order
}

fn scan_tail(points: &[CondensedPoint], order: &[usize], position: usize, eps: f64) -> Scan {
    let mut scan = Scan {
        edges: Vec::new(),
        comparisons: 0,
        pruned: false,
    };
    let (Some(&id), Some(tail)) = (order.get(position), order.get(position + 1..)) else {
        return scan;
    };
    let Some(anchor) = points.get(id) else {
        return scan;
    };
    let anchor_len = anchor.features().len();

    for &other_id in tail {
        let Some(other) = points.get(other_id) else {
            continue;
        };
        let other_len = other.features().len();
        if best_case_distance(anchor_len, other_len) > eps {
            scan.pruned = true;
            break;
        }
        scan.comparisons += 1;
        let shared = anchor.features().intersection_len(other.features());
        if jaccard_distance_from_counts(shared, anchor_len, other_len) <= eps {
            scan.edges.push((id, other_id));
        }
    }
    scan
}

#[cfg(feature = "metrics")]
fn record_metrics(stats: &GraphStats) {
    metrics::counter!("jacscan_pair_comparisons").increment(stats.comparisons as u64);
    metrics::counter!("jacscan_pruned_scans").increment(stats.pruned_scans as u64);
    metrics::counter!("jacscan_graph_edges").increment(stats.edges as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_metrics(_stats: &GraphStats) {}
