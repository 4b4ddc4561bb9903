//! Seeded synthetic sparse matrices for benchmarking.
//!
//! Points are drawn around a fixed number of prototype feature sets. Each
//! point starts as a copy of a randomly chosen prototype and then has up to
//! `max_swaps` features replaced, which yields exact duplicates, near
//! neighbours and outliers in proportions controlled by the configuration.

use jacscan_core::{CsrMatrix, MatrixError};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index};

/// Errors raised while generating a synthetic matrix.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested column count was zero.
    #[error("column count must be greater than zero")]
    ZeroColumns,
    /// The requested prototype count was zero.
    #[error("prototype count must be greater than zero")]
    ZeroPrototypes,
    /// Prototypes cannot hold more features than there are columns.
    #[error("features per point ({features}) must not exceed column count ({columns})")]
    FeaturesExceedColumns {
        /// Requested prototype size.
        features: usize,
        /// Available columns.
        columns: usize,
    },
    /// The generated rows failed matrix validation.
    #[error("generated matrix is invalid: {0}")]
    Matrix(#[from] MatrixError),
}

/// Configuration for synthetic sparse matrix generation.
#[derive(Clone, Debug)]
pub struct SyntheticSparseConfig {
    /// Number of rows to generate.
    pub point_count: usize,
    /// Number of feature columns.
    pub columns: usize,
    /// Number of prototype feature sets points are drawn around.
    pub prototypes: usize,
    /// Size of each prototype feature set.
    pub features_per_point: usize,
    /// Upper bound on features replaced per point.
    pub max_swaps: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl SyntheticSparseConfig {
    /// Defaults tuned for benchmarks: 512 columns, 32 prototypes of 12
    /// features, up to 3 swaps per point.
    #[must_use]
    pub fn with_points(point_count: usize, seed: u64) -> Self {
        Self {
            point_count,
            columns: 512,
            prototypes: 32,
            features_per_point: 12,
            max_swaps: 3,
            seed,
        }
    }
}

/// A generated sparse matrix.
#[derive(Clone, Debug)]
pub struct SyntheticSparseSource {
    matrix: CsrMatrix,
}

impl SyntheticSparseSource {
    /// Generates rows from the supplied configuration.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticSparseConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let prototypes: Vec<Vec<usize>> = (0..config.prototypes)
            .map(|_| index::sample(&mut rng, config.columns, config.features_per_point).into_vec())
            .collect();

        let mut rows = Vec::with_capacity(config.point_count);
        for _ in 0..config.point_count {
            let choice = rng.gen_range(0..prototypes.len());
            let mut row = prototypes.get(choice).cloned().unwrap_or_default();
            let swaps = rng.gen_range(0..=config.max_swaps.min(row.len()));
            for _ in 0..swaps {
                let position = rng.gen_range(0..row.len());
                let replacement = rng.gen_range(0..config.columns);
                if let Some(slot) = row.get_mut(position) {
                    *slot = replacement;
                }
            }
            row.sort_unstable();
            row.dedup();
            rows.push(row);
        }

        Ok(Self {
            matrix: CsrMatrix::from_rows(config.columns, rows)?,
        })
    }

    /// Returns the generated matrix.
    #[must_use]
    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }
}

const fn validate(config: &SyntheticSparseConfig) -> Result<(), SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if config.columns == 0 {
        return Err(SyntheticError::ZeroColumns);
    }
    if config.prototypes == 0 {
        return Err(SyntheticError::ZeroPrototypes);
    }
    if config.features_per_point > config.columns {
        return Err(SyntheticError::FeaturesExceedColumns {
            features: config.features_per_point,
            columns: config.columns,
        });
    }
    Ok(())
}
