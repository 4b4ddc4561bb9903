//! Fixtures shared by the jacscan-core integration suites.
#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use jacscan_core::{CsrMatrix, DiagnosticsSink, RunSummary, StageReport};
use jacscan_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};

/// Five rows: a duplicated pair, a near miss, and a linked pair.
pub fn scenario_matrix() -> CsrMatrix {
    CsrMatrix::from_rows(
        8,
        [
            vec![1, 2, 3],
            vec![1, 2, 3],
            vec![1, 2, 4],
            vec![5, 6],
            vec![5, 6, 7],
        ],
    )
    .expect("scenario rows are valid")
}

/// Sink that keeps everything it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub stages: Vec<StageReport>,
    pub summaries: Vec<RunSummary>,
}

impl DiagnosticsSink for RecordingSink {
    fn stage_completed(&mut self, report: &StageReport) {
        self.stages.push(*report);
    }

    fn finished(&mut self, summary: &RunSummary) {
        self.summaries.push(*summary);
    }
}

/// Proptest configuration honouring the shared CI profile.
pub fn proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Rows of fewer than `max_features` features drawn from `columns` columns.
/// Small domains make duplicates and near neighbours common; wide ones spread
/// set sizes far enough apart for size pruning to cut scans short.
pub fn sparse_rows(
    columns: usize,
    max_features: usize,
    max_rows: usize,
) -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..columns, 0..max_features), 0..max_rows)
}
