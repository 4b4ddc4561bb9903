//! Neighbour graph construction benchmarks.
//!
//! Compares the sequential and Rayon builders over condensed synthetic data
//! at a tight and a loose distance threshold. Condensation runs once per
//! dataset, outside the timed region.
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use jacscan_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    source::{SyntheticSparseConfig, SyntheticSparseSource},
};
use jacscan_core::{NeighborGraph, condense};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[1_000, 5_000, 20_000];

/// Distance thresholds to benchmark.
const EPS_VALUES: &[f64] = &[0.15, 0.5];

fn neighbor_graph_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("neighbor_graph");
    group.sample_size(20);

    for &point_count in POINT_COUNTS {
        let source =
            SyntheticSparseSource::generate(&SyntheticSparseConfig::with_points(point_count, SEED))?;
        let points = condense(source.matrix());

        for &eps in EPS_VALUES {
            let params = GraphBenchParams { point_count, eps };
            group.bench_with_input(
                BenchmarkId::new("sequential", params),
                &points,
                |b, points| b.iter(|| NeighborGraph::build(points, eps)),
            );
            group.bench_with_input(
                BenchmarkId::new("parallel", params),
                &points,
                |b, points| b.iter(|| NeighborGraph::build_parallel(points, eps)),
            );
        }
    }

    group.finish();
    Ok(())
}

fn neighbor_graph(c: &mut Criterion) {
    if let Err(err) = neighbor_graph_impl(c) {
        panic!("neighbor_graph benchmark setup failed: {err}");
    }
}

criterion_group!(benches, neighbor_graph);
criterion_main!(benches);
