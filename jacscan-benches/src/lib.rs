//! Benchmark support crate for jacscan.
//!
//! Provides a seeded synthetic sparse-matrix generator and parameter types
//! used by the Criterion benchmarks for the neighbour graph and the full
//! clustering pipeline.

pub mod error;
pub mod params;
pub mod source;
