//! Deduplication of identical rows into weighted condensed points.

use std::collections::{HashMap, hash_map::Entry};

use tracing::{debug, instrument};

use crate::{feature_set::FeatureSet, matrix::CsrMatrix};

/// A distinct feature set together with every row that carries it.
///
/// Condensed points are numbered `0..K` in order of the first row that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondensedPoint {
    features: FeatureSet,
    members: Vec<usize>,
}

impl CondensedPoint {
    pub(crate) fn new(features: FeatureSet, members: Vec<usize>) -> Self {
        Self { features, members }
    }

    /// The shared feature set.
    #[must_use]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Original row indices in ascending order.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Multiplicity: the number of rows condensed into this point.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.members.len()
    }
}

/// Groups the rows of `matrix` by exact feature-set equality.
///
/// Runs in time linear in the number of stored entries. Empty rows share a
/// single condensed point.
///
/// # Examples
/// ```
/// use jacscan_core::{CsrMatrix, condense};
///
/// let matrix = CsrMatrix::from_rows(4, [vec![1, 2], vec![3], vec![2, 1]])?;
/// let points = condense(&matrix);
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].members(), &[0, 2]);
/// assert_eq!(points[1].weight(), 1);
/// # Ok::<(), jacscan_core::MatrixError>(())
/// ```
#[must_use]
#[instrument(name = "core.condense", skip(matrix), fields(rows = matrix.rows(), nnz = matrix.nnz()))]
pub fn condense(matrix: &CsrMatrix) -> Vec<CondensedPoint> {
    let mut ids: HashMap<FeatureSet, usize> = HashMap::new();
    let mut points: Vec<CondensedPoint> = Vec::new();

    for (row, columns) in matrix.iter_rows().enumerate() {
        let features = FeatureSet::from_unsorted(columns);
        match ids.entry(features) {
            Entry::Occupied(slot) => {
                if let Some(point) = points.get_mut(*slot.get()) {
                    point.members.push(row);
                }
            }
            Entry::Vacant(slot) => {
                let features = slot.key().clone();
                slot.insert(points.len());
                points.push(CondensedPoint::new(features, vec![row]));
            }
        }
    }

    debug!(condensed = points.len(), "rows condensed");
    points
}
