//! Unit tests for the CLI commands and input handling.

use super::commands::{derive_data_source_name, run_command};
use super::test_helpers::{
    SCENARIO, create_text_file, run_command_expecting_error, scenario_command, temp_dir,
};
use super::{Cli, CliError, Command, ExecutionSummary, StrategyArg, render_summary, run_cli};

use std::path::Path;

use clap::Parser;
use jacscan_core::{ClusteringResult, JacscanError};
use jacscan_providers_text::TextProviderError;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use jacscan_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case::override_name("/tmp/source.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/source.txt", None, "source")]
#[case::stem_without_extension("/tmp/source", None, "source")]
#[case::missing_stem("", None, "data_source")]
fn derive_data_source_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    let path = Path::new(raw_path);
    let name = derive_data_source_name(path, override_name);
    assert_eq!(name, expected);
}

#[rstest]
#[case(StrategyArg::Auto)]
#[case(StrategyArg::Sequential)]
#[case(StrategyArg::Parallel)]
fn run_clusters_scenario(#[case] strategy: StrategyArg) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "scenario.txt", SCENARIO.as_bytes())?;
    let mut command = scenario_command(path);
    command.strategy = strategy;
    let summary = run_cli(Cli {
        command: Command::Run(command),
    })?;

    assert_eq!(summary.data_source, "scenario");
    assert_eq!(summary.features, 7);
    assert_eq!(
        summary.result.groups(),
        &[vec![2], vec![0, 1], vec![3, 4]]
    );
    Ok(())
}

#[rstest]
fn run_honours_delimiter_and_name() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "tags.csv", b"red, blue\nblue,red\ngreen\n")?;
    let mut command = scenario_command(path);
    command.eps = 0.0;
    command.delimiter = Some(',');
    command.name = Some("tags".into());
    let summary = run_command(command)?;

    assert_eq!(summary.data_source, "tags");
    assert_eq!(summary.features, 3);
    assert_eq!(summary.result.groups(), &[vec![2], vec![0, 1]]);
    Ok(())
}

#[rstest]
fn run_accepts_empty_file() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "empty.txt", b"")?;
    let summary = run_command(scenario_command(path))?;
    assert_eq!(summary.result.groups(), &[Vec::<usize>::new()]);
    assert_eq!(summary.features, 0);
    Ok(())
}

#[rstest]
fn run_rejects_out_of_range_eps() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "scenario.txt", SCENARIO.as_bytes())?;
    let mut command = scenario_command(path);
    command.eps = 1.5;
    let err = run_command_expecting_error(command, "eps above 1 must fail");
    assert!(matches!(
        err,
        CliError::Core(JacscanError::InvalidEps { .. })
    ));
    Ok(())
}

#[rstest]
fn run_rejects_zero_min_pts() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "scenario.txt", SCENARIO.as_bytes())?;
    let mut command = scenario_command(path);
    command.min_pts = 0;
    let err = run_command_expecting_error(command, "zero min-pts must fail");
    assert!(matches!(
        err,
        CliError::Core(JacscanError::InvalidMinPts { got: 0 })
    ));
    Ok(())
}

#[rstest]
fn run_reports_missing_file() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.txt");
    let err = run_command_expecting_error(scenario_command(missing), "missing file must fail");
    match err {
        CliError::Io { path, .. } => assert!(path.ends_with("missing.txt")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn run_reports_invalid_utf8() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "binary.txt", b"a b\n\xc3\x28\n")?;
    let err = run_command_expecting_error(scenario_command(path), "invalid UTF-8 must fail");
    assert!(matches!(
        err,
        CliError::Text(TextProviderError::InvalidUtf8 { line: 2 })
    ));
    Ok(())
}

#[rstest]
fn render_summary_lists_groups() -> TestResult {
    let summary = ExecutionSummary {
        data_source: "scenario".into(),
        features: 7,
        result: ClusteringResult::try_from_groups(vec![vec![2], vec![0, 1], vec![3, 4]])?,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "data source: scenario\n\
         points: 5\n\
         features: 7\n\
         clusters: 2\n\
         noise points: 1\n\
         noise: 2\n\
         cluster 1: 0 1\n\
         cluster 2: 3 4\n"
    );
    Ok(())
}

#[rstest]
fn render_summary_handles_empty_noise() -> TestResult {
    let summary = ExecutionSummary {
        data_source: "dense".into(),
        features: 1,
        result: ClusteringResult::try_from_groups(vec![vec![], vec![0, 1]])?,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.ends_with("noise points: 0\nnoise:\ncluster 1: 0 1\n"));
    Ok(())
}

#[rstest]
fn clap_applies_defaults() {
    let cli = Cli::try_parse_from(["jacscan", "run", "data.txt"]).expect("arguments must parse");
    let Command::Run(run) = cli.command;
    assert_eq!(run.eps, 0.15);
    assert_eq!(run.min_pts, 2);
    assert!(!run.report);
    assert_eq!(run.strategy, StrategyArg::Auto);
    assert_eq!(run.delimiter, None);
    assert_eq!(run.name, None);
    assert_eq!(run.path, Path::new("data.txt"));
}

#[rstest]
fn clap_parses_every_flag() {
    let cli = Cli::try_parse_from([
        "jacscan",
        "run",
        "--eps",
        "0.4",
        "--min-pts",
        "3",
        "--report",
        "--strategy",
        "sequential",
        "--delimiter",
        ";",
        "--name",
        "demo",
        "data.txt",
    ])
    .expect("arguments must parse");
    let Command::Run(run) = cli.command;
    assert_eq!(run.eps, 0.4);
    assert_eq!(run.min_pts, 3);
    assert!(run.report);
    assert_eq!(run.strategy, StrategyArg::Sequential);
    assert_eq!(run.delimiter, Some(';'));
    assert_eq!(run.name.as_deref(), Some("demo"));
}

#[rstest]
#[case::unknown_strategy(&["jacscan", "run", "--strategy", "gpu", "data.txt"])]
#[case::missing_path(&["jacscan", "run"])]
#[case::non_numeric_eps(&["jacscan", "run", "--eps", "near", "data.txt"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_command_emits_tracing_fields() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "scenario.txt", SCENARIO.as_bytes())?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let command = scenario_command(path);
    let summary = tracing::subscriber::with_default(subscriber, || run_command(command))?;
    assert_eq!(summary.result.cluster_count(), 2);

    let execute = layer.span("cli.execute").expect("cli.execute span must exist");
    assert_eq!(execute.field("min_pts"), Some("2"));
    assert_eq!(execute.field("strategy"), Some("Sequential"));
    assert!(
        execute
            .field("path")
            .is_some_and(|value| value.ends_with("scenario.txt"))
    );

    let load = layer.span("cli.load_text").expect("cli.load_text span must exist");
    assert_eq!(load.field("points"), Some("5"));
    assert_eq!(load.field("features"), Some("7"));

    assert!(layer.span("core.run").is_some());
    let completed = layer.events_with_message("command completed");
    let [event] = completed.as_slice() else {
        panic!("expected one completion event, got {completed:?}");
    };
    assert_eq!(event.field("clusters"), Some("2"));
    assert_eq!(event.field("noise"), Some("1"));
    Ok(())
}

#[rstest]
fn failed_load_records_error_on_span() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.txt");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || {
        run_command(scenario_command(missing))
    })
    .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));

    let load = layer.span("cli.load_text").expect("cli.load_text span must exist");
    assert!(
        load.field("path")
            .is_some_and(|value| value.ends_with("missing.txt"))
    );
    assert_eq!(load.field("points"), None);
    assert!(layer.events_with_message("command completed").is_empty());
}
