//! Density test and breadth-first cluster expansion over condensed points.
//!
//! A condensed point is noise when its own weight plus the weights of all its
//! neighbours falls short of `min_pts`. Every other point seeds or joins a
//! cluster: expansion follows the neighbour relation transitively and makes
//! no core/border distinction, so any non-noise point reachable from a seed
//! joins that seed's cluster. Noise points are never traversed.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::{condense::CondensedPoint, graph::NeighborGraph};

/// Lifecycle of a condensed point during expansion.
///
/// Transitions are one-way: `Unvisited` becomes either `Noise` or
/// `Assigned`, and neither terminal state changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointState {
    /// Not yet reached.
    Unvisited,
    /// Failed the density test.
    Noise,
    /// Member of the cluster with this zero-based discovery index.
    Assigned(usize),
}

/// Condensed identifiers split into a noise group and clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CondensedPartition {
    noise: Vec<usize>,
    clusters: Vec<Vec<usize>>,
    states: Vec<PointState>,
}

impl CondensedPartition {
    /// Condensed identifiers that failed the density test, ascending.
    #[must_use]
    pub fn noise(&self) -> &[usize] {
        &self.noise
    }

    /// Clusters in discovery order; members in visiting order.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Final state of condensed point `id`, or `None` when out of range.
    #[must_use]
    pub fn state(&self, id: usize) -> Option<PointState> {
        self.states.get(id).copied()
    }
}

/// Combined weight of `id` and all of its neighbours.
#[must_use]
pub fn neighborhood_weight(points: &[CondensedPoint], graph: &NeighborGraph, id: usize) -> usize {
    let own = points.get(id).map_or(0, CondensedPoint::weight);
    graph
        .neighbors(id)
        .iter()
        .filter_map(|&neighbor| points.get(neighbor))
        .map(CondensedPoint::weight)
        .fold(own, usize::saturating_add)
}

/// Partitions condensed points into noise and density-connected clusters.
///
/// Seeds are taken in ascending identifier order and each cluster is grown
/// with a FIFO worklist kept apart from the adjacency lists.
///
/// # Examples
/// ```
/// use jacscan_core::{CsrMatrix, NeighborGraph, condense, expand_clusters};
///
/// let matrix = CsrMatrix::from_rows(
///     8,
///     [vec![1, 2, 3], vec![1, 2, 3], vec![1, 2, 4], vec![5, 6], vec![5, 6, 7]],
/// )?;
/// let points = condense(&matrix);
/// let graph = NeighborGraph::build(&points, 0.4);
/// let partition = expand_clusters(&points, &graph, 2);
/// assert_eq!(partition.noise(), &[1]);
/// assert_eq!(partition.clusters(), &[vec![0], vec![2, 3]]);
/// # Ok::<(), jacscan_core::MatrixError>(())
/// ```
#[must_use]
#[instrument(name = "core.expand", skip(points, graph), fields(condensed = points.len()))]
pub fn expand_clusters(
    points: &[CondensedPoint],
    graph: &NeighborGraph,
    min_pts: usize,
) -> CondensedPartition {
    let mut states = vec![PointState::Unvisited; points.len()];
    let mut partition = CondensedPartition::default();

    for (id, state) in states.iter_mut().enumerate() {
        if neighborhood_weight(points, graph, id) < min_pts {
            *state = PointState::Noise;
            partition.noise.push(id);
        }
    }

    let mut worklist = VecDeque::new();
    for seed in 0..points.len() {
        if states.get(seed) != Some(&PointState::Unvisited) {
            continue;
        }
        let cluster_index = partition.clusters.len();
        let mut members = vec![seed];
        if let Some(state) = states.get_mut(seed) {
            *state = PointState::Assigned(cluster_index);
        }
        worklist.clear();
        worklist.extend(graph.neighbors(seed).iter().copied());

        while let Some(next) = worklist.pop_front() {
            let Some(state) = states.get_mut(next) else {
                continue;
            };
            if *state != PointState::Unvisited {
                continue;
            }
            *state = PointState::Assigned(cluster_index);
            members.push(next);
            worklist.extend(
                graph
                    .neighbors(next)
                    .iter()
                    .copied()
                    .filter(|&candidate| states.get(candidate) == Some(&PointState::Unvisited)),
            );
        }
        partition.clusters.push(members);
    }
    partition.states = states;

    debug!(
        clusters = partition.clusters.len(),
        noise = partition.noise.len(),
        "expansion finished"
    );
    partition
}
