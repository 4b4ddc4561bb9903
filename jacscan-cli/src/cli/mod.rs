//! Command-line interface orchestration for jacscan.
//!
//! The CLI offers a single `run` command that loads a line-oriented feature
//! file, clusters it and renders the groups.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, RunCommand, StrategyArg, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
