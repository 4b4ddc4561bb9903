//! Command implementations and argument parsing for the jacscan CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use jacscan_core::{
    ClusteringResult, DEFAULT_EPS, DEFAULT_MIN_PTS, ExecutionStrategy, JacscanBuilder,
    JacscanError,
};
use jacscan_providers_text::{TextProvider, TextProviderError, Tokenizer};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "jacscan",
    about = "Cluster sparse binary feature sets by Jaccard distance."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a feature file with one point per line.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Maximum Jaccard distance between neighbours, in `[0, 1]`.
    #[arg(long, default_value_t = DEFAULT_EPS)]
    pub eps: f64,

    /// Minimum combined weight of a point and its neighbours.
    #[arg(
        long = "min-pts",
        default_value_t = DEFAULT_MIN_PTS,
        value_parser = clap::value_parser!(usize),
    )]
    pub min_pts: usize,

    /// Log stage timings and a run summary.
    #[arg(long)]
    pub report: bool,

    /// How the neighbour graph is built.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Split tokens on this character instead of whitespace.
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Override name for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,

    /// UTF-8 file with one point per line.
    pub path: PathBuf,
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when compiled in, otherwise sequential.
    Auto,
    /// Always run on the calling thread.
    Sequential,
    /// Require the parallel graph builder.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The feature file could not be loaded.
    #[error(transparent)]
    Text(#[from] TextProviderError),
    /// Parameter validation or clustering failed.
    #[error(transparent)]
    Core(#[from] JacscanError),
}

/// Outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the data source.
    pub data_source: String,
    /// Number of distinct feature tokens.
    pub features: usize,
    /// Groups produced by the pipeline, noise first.
    pub result: ClusteringResult,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or clustering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use jacscan_cli::cli::{Cli, Command, RunCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a b\na b\nc\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         eps: 0.0,
///         min_pts: 2,
///         report: false,
///         strategy: StrategyArg::Sequential,
///         delimiter: None,
///         name: None,
///         path: file.path().to_path_buf(),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.groups(), &[vec![2], vec![0, 1]]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        path = field::Empty,
        eps = command.eps,
        min_pts = command.min_pts,
        strategy = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        eps,
        min_pts,
        report,
        strategy,
        delimiter,
        name,
        path,
    } = command;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("strategy", field::debug(strategy));

    let jacscan = JacscanBuilder::new()
        .with_eps(eps)
        .with_min_pts(min_pts)
        .with_execution_strategy(strategy.into())
        .with_report(report)
        .build()?;

    let tokenizer = delimiter.map_or(Tokenizer::Whitespace, Tokenizer::Delimiter);
    let provider = load_text(&path, name.as_deref(), tokenizer)?;
    let result = jacscan.run(provider.matrix())?;

    info!(
        data_source = provider.name(),
        points = result.point_count(),
        clusters = result.cluster_count(),
        noise = result.noise().len(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        features: provider.vocabulary().len(),
        result,
    })
}

#[instrument(
    name = "cli.load_text",
    err,
    skip(path, override_name),
    fields(path = %path.display(), points = field::Empty, features = field::Empty),
)]
pub(super) fn load_text(
    path: &Path,
    override_name: Option<&str>,
    tokenizer: Tokenizer,
) -> Result<TextProvider, CliError> {
    let reader = open_text_reader(path)?;
    let name = derive_data_source_name(path, override_name);
    let provider = TextProvider::try_from_reader_with(name, reader, tokenizer)?;
    let span = Span::current();
    span.record("points", provider.len());
    span.record("features", provider.vocabulary().len());
    Ok(provider)
}

pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// One line per group follows the header: `noise:` first, then
/// `cluster <n>:`, each listing member indices separated by spaces.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use jacscan_cli::cli::{ExecutionSummary, render_summary};
/// # use jacscan_core::ClusteringResult;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     features: 3,
///     result: ClusteringResult::try_from_groups(vec![vec![2], vec![0, 1]])?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("noise: 2\ncluster 1: 0 1\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let result = &summary.result;
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "points: {}", result.point_count())?;
    writeln!(writer, "features: {}", summary.features)?;
    writeln!(writer, "clusters: {}", result.cluster_count())?;
    writeln!(writer, "noise points: {}", result.noise().len())?;
    for (index, group) in result.groups().iter().enumerate() {
        if index == 0 {
            write!(writer, "noise:")?;
        } else {
            write!(writer, "cluster {index}:")?;
        }
        for member in group {
            write!(writer, " {member}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
