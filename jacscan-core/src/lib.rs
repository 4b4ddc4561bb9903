//! jacscan core library.
//!
//! Density-based clustering of sparse binary feature vectors under Jaccard
//! distance. Identical rows are first condensed into weighted points, a
//! neighbour graph is built with size-sorted pruning, dense regions are
//! expanded breadth-first into clusters, and the groups are mapped back to
//! the original row indices with noise reported first.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod condense;
mod diagnostics;
mod error;
mod expand;
mod feature_set;
mod graph;
mod jacscan;
mod matrix;
mod restore;
mod result;

pub use crate::{
    builder::{DEFAULT_EPS, DEFAULT_MIN_PTS, ExecutionStrategy, JacscanBuilder},
    condense::{CondensedPoint, condense},
    diagnostics::{DiagnosticsSink, NullSink, RunSummary, Stage, StageReport, TracingSink},
    error::{
        ErrorCategory, JacscanError, JacscanErrorCode, MatrixError, MatrixErrorCode, Result,
    },
    expand::{CondensedPartition, PointState, expand_clusters, neighborhood_weight},
    feature_set::{FeatureSet, jaccard_distance_from_counts},
    graph::{GraphStats, NeighborGraph},
    jacscan::{Jacscan, cluster, cluster_csr},
    matrix::CsrMatrix,
    restore::restore_indices,
    result::{ClusterId, ClusteringResult, InvalidPartition},
};
