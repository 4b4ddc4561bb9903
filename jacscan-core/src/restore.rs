//! Expansion of condensed groups back into original point indices.

use tracing::instrument;

use crate::{condense::CondensedPoint, expand::CondensedPartition, result::ClusteringResult};

/// Maps each condensed group to the original rows it stands for.
///
/// The noise group keeps position 0 and clusters follow in discovery order.
/// Indices inside every group are ascending.
#[must_use]
#[instrument(name = "core.restore", skip(points, partition), fields(clusters = partition.clusters().len()))]
pub fn restore_indices(points: &[CondensedPoint], partition: &CondensedPartition) -> ClusteringResult {
    let expand = |ids: &[usize]| -> Vec<usize> {
        let mut members: Vec<usize> = ids
            .iter()
            .filter_map(|&id| points.get(id))
            .flat_map(|point| point.members().iter().copied())
            .collect();
        members.sort_unstable();
        members
    };

    let mut groups = Vec::with_capacity(partition.clusters().len() + 1);
    groups.push(expand(partition.noise()));
    groups.extend(partition.clusters().iter().map(|cluster| expand(cluster.as_slice())));

    let point_count = points.iter().map(CondensedPoint::weight).sum();
    ClusteringResult::from_partition(groups, point_count)
}
