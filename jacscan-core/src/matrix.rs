//! Sparse binary matrices in compressed row form.
//!
//! Only the sparsity pattern is stored: a row pointer array delimiting each
//! row and the column indices of its nonzero entries. Values are never
//! consulted, so a row is simply the set of columns it touches.

use crate::error::MatrixError;

/// Validated sparse binary matrix in compressed sparse row (CSR) layout.
///
/// # Examples
/// ```
/// use jacscan_core::CsrMatrix;
///
/// let matrix = CsrMatrix::try_new(4, vec![0, 2, 2, 3], vec![0, 3, 1])?;
/// assert_eq!(matrix.rows(), 3);
/// assert_eq!(matrix.row(0), Some(&[0, 3][..]));
/// assert_eq!(matrix.row(1), Some(&[][..]));
/// # Ok::<(), jacscan_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrMatrix {
    columns: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
}

impl CsrMatrix {
    /// Validates the row pointer and column index arrays and wraps them.
    ///
    /// # Errors
    /// Returns [`MatrixError::EmptyRowPointer`] when `indptr` is empty,
    /// [`MatrixError::NonZeroStart`] when it does not start at zero,
    /// [`MatrixError::NonMonotonicRowPointer`] when a boundary decreases,
    /// [`MatrixError::RowPointerLengthMismatch`] when the last boundary does
    /// not equal `indices.len()`, and [`MatrixError::ColumnOutOfBounds`] when a
    /// column index is not below `columns`.
    pub fn try_new(
        columns: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
    ) -> Result<Self, MatrixError> {
        let (&first, &last) = match (indptr.first(), indptr.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(MatrixError::EmptyRowPointer),
        };
        if first != 0 {
            return Err(MatrixError::NonZeroStart { got: first });
        }
        for (row, bounds) in indptr.windows(2).enumerate() {
            if let [start, end] = *bounds {
                if end < start {
                    return Err(MatrixError::NonMonotonicRowPointer { row, start, end });
                }
            }
        }
        if last != indices.len() {
            return Err(MatrixError::RowPointerLengthMismatch {
                end: last,
                indices: indices.len(),
            });
        }

        let matrix = Self {
            columns,
            indptr,
            indices,
        };
        for (row, entries) in matrix.iter_rows().enumerate() {
            if let Some(&column) = entries.iter().find(|&&column| column >= columns) {
                return Err(MatrixError::ColumnOutOfBounds {
                    row,
                    column,
                    columns,
                });
            }
        }
        Ok(matrix)
    }

    /// Builds a matrix from explicit row contents.
    ///
    /// # Errors
    /// Returns [`MatrixError::ColumnOutOfBounds`] when a row references a
    /// column not below `columns`.
    ///
    /// # Examples
    /// ```
    /// use jacscan_core::CsrMatrix;
    ///
    /// let matrix = CsrMatrix::from_rows(3, [vec![0, 1], vec![], vec![2]])?;
    /// assert_eq!(matrix.rows(), 3);
    /// assert_eq!(matrix.nnz(), 3);
    /// # Ok::<(), jacscan_core::MatrixError>(())
    /// ```
    pub fn from_rows<R, I>(columns: usize, rows: R) -> Result<Self, MatrixError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = usize>,
    {
        let mut indptr = vec![0];
        let mut indices = Vec::new();
        for row in rows {
            indices.extend(row);
            indptr.push(indices.len());
        }
        Self::try_new(columns, indptr, indices)
    }

    /// Returns a matrix with zero rows.
    #[must_use]
    pub fn empty(columns: usize) -> Self {
        Self {
            columns,
            indptr: vec![0],
            indices: Vec::new(),
        }
    }

    /// Number of rows (points).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.indptr.len().saturating_sub(1)
    }

    /// Declared number of columns (features).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Returns whether the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    /// Column indices stored for `row`, in storage order.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[usize]> {
        let start = *self.indptr.get(row)?;
        let end = *self.indptr.get(row.checked_add(1)?)?;
        self.indices.get(start..end)
    }

    /// Iterates over every row's column indices in row order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.indptr
            .windows(2)
            .map(|bounds| match *bounds {
                [start, end] => self.indices.get(start..end).unwrap_or_default(),
                _ => &[],
            })
    }

    /// Row pointer array.
    #[must_use]
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index array.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
