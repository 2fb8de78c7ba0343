//! Command-line interface for the littlebound travelling-salesman solver.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod input;
mod report;
mod solve;

pub use error::CliError;
pub use input::PointParseError;
pub use report::ReportError;

use solve::{SolveArgs, run_solve};

const ARG_POINTS: &str = "points";
const ARG_MATRIX: &str = "matrix";
const ARG_OUTPUT: &str = "output";
const ARG_REPORT_DIR: &str = "report-dir";
const ARG_MAX_EXPANSIONS: &str = "max-expansions";
const ARG_FIRST_ONLY: &str = "first-only";
const ENV_POINTS: &str = "LITTLEBOUND_CMDS_SOLVE_POINTS";
const ENV_MATRIX: &str = "LITTLEBOUND_CMDS_SOLVE_MATRIX";

/// Run the littlebound CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or inputs are invalid,
/// the solver fails, or the response or report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Err(err) = builder.try_init() {
        log::debug!("logger already initialised: {err}");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "littlebound",
    about = "Exact travelling-salesman tours with Little's branch-and-bound",
    version
)]
struct Cli {
    /// Log progress at info level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find every optimal tour through the given vertices.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
