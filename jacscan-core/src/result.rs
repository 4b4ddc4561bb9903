//! Result types for clustering operations.
//!
//! A [`ClusteringResult`] is an ordered list of groups of original point
//! indices. Group 0 is always the noise group; every later group is a
//! density-connected cluster. Together the groups partition the points.

use thiserror::Error;

/// Represents the output of a [`crate::Jacscan::run`] invocation.
///
/// # Examples
/// ```
/// use jacscan_core::{ClusterId, ClusteringResult};
///
/// let result = ClusteringResult::try_from_groups(vec![vec![2], vec![0, 1], vec![3, 4]])?;
/// assert_eq!(result.noise(), &[2]);
/// assert_eq!(result.cluster_count(), 2);
/// assert_eq!(result.point_count(), 5);
/// assert_eq!(result.assignments()[3], ClusterId::new(2));
/// # Ok::<(), jacscan_core::InvalidPartition>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    groups: Vec<Vec<usize>>,
    point_count: usize,
}

/// Error returned when groups do not partition `0..N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPartition {
    /// No noise group was supplied.
    #[error("groups must start with the noise group")]
    MissingNoiseGroup,
    /// A cluster after the noise group had no members.
    #[error("cluster at position {position} is empty")]
    EmptyCluster {
        /// Position of the empty group.
        position: usize,
    },
    /// An index was not below the total number of points.
    #[error("point index {index} is out of range for {points} points")]
    OutOfRange {
        /// Offending point index.
        index: usize,
        /// Total number of points across all groups.
        points: usize,
    },
    /// An index appeared in more than one position.
    #[error("point index {index} appears more than once")]
    Duplicate {
        /// Repeated point index.
        index: usize,
    },
}

impl ClusteringResult {
    /// Wraps groups produced by the pipeline, which partition by construction.
    pub(crate) fn from_partition(groups: Vec<Vec<usize>>, point_count: usize) -> Self {
        Self {
            groups,
            point_count,
        }
    }

    /// Validates that `groups` partition `0..N`, where `N` is the total
    /// number of indices supplied.
    ///
    /// # Errors
    /// Returns [`InvalidPartition::MissingNoiseGroup`] when `groups` is
    /// empty, [`InvalidPartition::EmptyCluster`] when a non-noise group has no
    /// members, [`InvalidPartition::OutOfRange`] when an index is not below
    /// `N`, and [`InvalidPartition::Duplicate`] when an index repeats.
    pub fn try_from_groups(groups: Vec<Vec<usize>>) -> Result<Self, InvalidPartition> {
        if groups.is_empty() {
            return Err(InvalidPartition::MissingNoiseGroup);
        }
        if let Some(position) = groups
            .iter()
            .enumerate()
            .skip(1)
            .find_map(|(position, group)| group.is_empty().then_some(position))
        {
            return Err(InvalidPartition::EmptyCluster { position });
        }

        let points = groups.iter().map(Vec::len).sum();
        let mut seen = vec![false; points];
        for &index in groups.iter().flatten() {
            let slot = seen
                .get_mut(index)
                .ok_or(InvalidPartition::OutOfRange { index, points })?;
            if *slot {
                return Err(InvalidPartition::Duplicate { index });
            }
            *slot = true;
        }

        Ok(Self::from_partition(groups, points))
    }

    /// Original indices that failed the density test.
    #[must_use]
    pub fn noise(&self) -> &[usize] {
        self.groups.first().map_or(&[], Vec::as_slice)
    }

    /// Density-connected clusters, excluding noise.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<usize>] {
        self.groups.get(1..).unwrap_or_default()
    }

    /// Every group, noise first.
    #[must_use]
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Consumes the result and returns its groups, noise first.
    #[must_use]
    pub fn into_groups(self) -> Vec<Vec<usize>> {
        self.groups
    }

    /// Number of clusters, excluding noise.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Number of original points covered.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Size of the largest cluster, or `0` when there is none.
    #[must_use]
    pub fn largest_cluster_size(&self) -> usize {
        self.clusters().iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Per-point group identifiers; [`ClusterId::NOISE`] marks noise.
    ///
    /// # Examples
    /// ```
    /// use jacscan_core::{ClusterId, ClusteringResult};
    ///
    /// let result = ClusteringResult::try_from_groups(vec![vec![1], vec![0, 2]])?;
    /// let labels: Vec<u64> = result.assignments().iter().map(|id| id.get()).collect();
    /// assert_eq!(labels, [1, 0, 1]);
    /// assert!(result.assignments()[1].is_noise());
    /// # Ok::<(), jacscan_core::InvalidPartition>(())
    /// ```
    #[must_use]
    pub fn assignments(&self) -> Vec<ClusterId> {
        let mut labels = vec![ClusterId::NOISE; self.point_count];
        for (group, members) in self.groups.iter().enumerate() {
            for &index in members {
                if let Some(label) = labels.get_mut(index) {
                    *label = ClusterId::new(group as u64);
                }
            }
        }
        labels
    }
}

/// Identifier assigned to a group within a [`ClusteringResult`].
///
/// # Examples
/// ```
/// use jacscan_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// assert!(!id.is_noise());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Identifier of the noise group.
    pub const NOISE: Self = Self(0);

    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> u64 { self.0 }

    /// Returns whether this identifier denotes the noise group.
    #[must_use]
    pub fn is_noise(self) -> bool {
        self == Self::NOISE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_groups(vec![], InvalidPartition::MissingNoiseGroup)]
    #[case::empty_cluster(vec![vec![0], vec![]], InvalidPartition::EmptyCluster { position: 1 })]
    #[case::out_of_range(vec![vec![0], vec![2]], InvalidPartition::OutOfRange { index: 2, points: 2 })]
    #[case::duplicate(vec![vec![0, 1], vec![1, 0]], InvalidPartition::Duplicate { index: 1 })]
    fn try_from_groups_rejects_non_partitions(
        #[case] groups: Vec<Vec<usize>>,
        #[case] expected: InvalidPartition,
    ) {
        let err = ClusteringResult::try_from_groups(groups).expect_err("groups must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn empty_noise_group_is_a_valid_empty_result() {
        let result = ClusteringResult::try_from_groups(vec![vec![]]).expect("empty result is valid");
        assert!(result.noise().is_empty());
        assert!(result.clusters().is_empty());
        assert_eq!(result.cluster_count(), 0);
        assert_eq!(result.largest_cluster_size(), 0);
        assert!(result.assignments().is_empty());
    }

    #[rstest]
    fn summary_accessors_report_sizes() {
        let result = ClusteringResult::try_from_groups(vec![vec![5], vec![0, 1, 2], vec![3, 4]])
            .expect("groups partition 0..6");
        assert_eq!(result.cluster_count(), 2);
        assert_eq!(result.largest_cluster_size(), 3);
        assert_eq!(result.point_count(), 6);
        assert_eq!(result.clone().into_groups().len(), 3);
    }
}
