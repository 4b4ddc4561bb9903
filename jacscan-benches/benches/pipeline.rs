//! End-to-end clustering benchmarks.
//!
//! Times `Jacscan::run` over synthetic matrices, covering condensation,
//! graph construction, expansion and index restoration together.
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use jacscan_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    source::{SyntheticSparseConfig, SyntheticSparseSource},
};
use jacscan_core::{ExecutionStrategy, JacscanBuilder};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 7;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[1_000, 10_000];

/// Distance threshold shared by all runs.
const EPS: f64 = 0.3;

fn pipeline_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let source =
            SyntheticSparseSource::generate(&SyntheticSparseConfig::with_points(point_count, SEED))?;
        let params = GraphBenchParams { point_count, eps: EPS };

        for (label, strategy) in [
            ("sequential", ExecutionStrategy::Sequential),
            ("auto", ExecutionStrategy::Auto),
        ] {
            let jacscan = JacscanBuilder::new()
                .with_eps(EPS)
                .with_min_pts(3)
                .with_execution_strategy(strategy)
                .build()?;
            // Surface configuration failures before timing starts.
            jacscan.run(source.matrix())?;
            group.bench_with_input(BenchmarkId::new(label, params), &source, |b, source| {
                b.iter(|| jacscan.run(source.matrix()));
            });
        }
    }

    group.finish();
    Ok(())
}

fn pipeline(c: &mut Criterion) {
    if let Err(err) = pipeline_impl(c) {
        panic!("pipeline benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pipeline);
criterion_main!(benches);
