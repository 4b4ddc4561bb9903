//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` instead of panicking inside
//! Criterion closures.

use crate::source::SyntheticError;
use jacscan_core::JacscanError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Pipeline configuration or execution failed.
    #[error("clustering failed: {0}")]
    Jacscan(#[from] JacscanError),
}
