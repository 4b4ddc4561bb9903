//! Canonical feature sets and Jaccard distance.
//!
//! A feature set is the sorted, deduplicated list of column indices present in
//! a row. Sorting gives structural equality and hashing by content, and lets
//! intersections be counted with a linear merge.

use std::cmp::Ordering;

/// Sorted, duplicate-free set of feature (column) indices.
///
/// # Examples
/// ```
/// use jacscan_core::FeatureSet;
///
/// let left = FeatureSet::from_unsorted(&[3, 1, 2, 1]);
/// let right = FeatureSet::from_unsorted(&[2, 3, 4]);
/// assert_eq!(left.as_slice(), &[1, 2, 3]);
/// assert_eq!(left.intersection_len(&right), 2);
/// assert!((left.jaccard_distance(&right) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureSet(Box<[usize]>);

impl FeatureSet {
    /// Canonicalises arbitrary column indices into a feature set.
    #[must_use]
    pub fn from_unsorted(columns: &[usize]) -> Self {
        let mut sorted = columns.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        Self(sorted.into_boxed_slice())
    }

    /// Number of distinct features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted feature indices.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Counts the features shared with `other`.
    #[must_use]
    pub fn intersection_len(&self, other: &Self) -> usize {
        let mut left = self.0.iter().peekable();
        let mut right = other.0.iter().peekable();
        let mut shared = 0_usize;
        while let (Some(&&a), Some(&&b)) = (left.peek(), right.peek()) {
            match a.cmp(&b) {
                Ordering::Less => {
                    left.next();
                }
                Ordering::Greater => {
                    right.next();
                }
                Ordering::Equal => {
                    shared += 1;
                    left.next();
                    right.next();
                }
            }
        }
        shared
    }

    /// Jaccard distance to `other`. Two empty sets are at distance `0`.
    #[must_use]
    pub fn jaccard_distance(&self, other: &Self) -> f64 {
        jaccard_distance_from_counts(self.intersection_len(other), self.len(), other.len())
    }
}

/// Jaccard distance `1 - |A ∩ B| / |A ∪ B|` from set cardinalities.
///
/// The union is derived as `|A| + |B| - |A ∩ B|`. An empty union (both sets
/// empty) yields `0`.
///
/// # Examples
/// ```
/// use jacscan_core::jaccard_distance_from_counts;
///
/// assert_eq!(jaccard_distance_from_counts(0, 0, 0), 0.0);
/// assert_eq!(jaccard_distance_from_counts(0, 2, 3), 1.0);
/// assert!((jaccard_distance_from_counts(2, 2, 3) - (1.0 / 3.0)).abs() < 1e-12);
/// ```
#[must_use]
pub fn jaccard_distance_from_counts(intersection: usize, left: usize, right: usize) -> f64 {
    let union = (left + right).saturating_sub(intersection);
    if union == 0 {
        return 0.0;
    }
    1.0 - intersection as f64 / union as f64
}

/// Smallest distance achievable between a set of `larger` features and one of
/// `smaller` features, reached when the smaller set is a subset of the larger.
///
/// Evaluated with the same formula as [`jaccard_distance_from_counts`], so a
/// pair rejected here is always rejected by the exact test.
#[must_use]
pub(crate) fn best_case_distance(larger: usize, smaller: usize) -> f64 {
    jaccard_distance_from_counts(smaller, larger, smaller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1, 2, 3], &[1, 2, 3], 0.0)]
    #[case(&[1, 2, 3], &[1, 2, 4], 0.5)]
    #[case(&[5, 6], &[5, 6, 7], 1.0 / 3.0)]
    #[case(&[1], &[2], 1.0)]
    #[case(&[], &[], 0.0)]
    #[case(&[], &[4], 1.0)]
    fn jaccard_distance_matches_definition(
        #[case] left: &[usize],
        #[case] right: &[usize],
        #[case] expected: f64,
    ) {
        let a = FeatureSet::from_unsorted(left);
        let b = FeatureSet::from_unsorted(right);
        assert!((a.jaccard_distance(&b) - expected).abs() < 1e-12);
        assert!((b.jaccard_distance(&a) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn canonical_form_ignores_order_and_duplicates() {
        let a = FeatureSet::from_unsorted(&[9, 2, 2, 5]);
        let b = FeatureSet::from_unsorted(&[5, 9, 2]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[rstest]
    #[case(5, 3)]
    #[case(10, 6)]
    #[case(7, 7)]
    #[case(0, 0)]
    fn best_case_matches_subset_distance(#[case] larger: usize, #[case] smaller: usize) {
        let big = FeatureSet::from_unsorted(&(0..larger).collect::<Vec<_>>());
        let small = FeatureSet::from_unsorted(&(0..smaller).collect::<Vec<_>>());
        assert_eq!(best_case_distance(larger, smaller), big.jaccard_distance(&small));
    }
}
