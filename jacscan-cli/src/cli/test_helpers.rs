//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, RunCommand, StrategyArg};

/// Five points: a duplicated pair, a near miss and a linked pair.
pub(super) const SCENARIO: &str = "a b c\na b c\na b d\ne f\ne f g\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents)?;
    Ok(path)
}

/// `run` options with the parameters that split [`SCENARIO`] into two
/// clusters and one noise point.
pub(super) fn scenario_command(path: PathBuf) -> RunCommand {
    RunCommand {
        eps: 0.4,
        min_pts: 2,
        report: false,
        strategy: StrategyArg::Sequential,
        delimiter: None,
        name: None,
        path,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
