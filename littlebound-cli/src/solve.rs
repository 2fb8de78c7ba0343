//! Solve command implementation for the littlebound CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use littlebound_core::{Problem, SearchStatus, SolveResponse, TourSolver};
use littlebound_solver::{LittleSolver, SolverConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{CostTableFile, parse_points, problem_from_points};
use crate::report::FileReporter;
use crate::{
    ARG_FIRST_ONLY, ARG_MATRIX, ARG_MAX_EXPANSIONS, ARG_OUTPUT, ARG_POINTS, ARG_REPORT_DIR,
    CliError, ENV_MATRIX, ENV_POINTS,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the cheapest closed tour through every vertex using \
                 Little's branch-and-bound method. Vertices come either from \
                 a points file priced by Manhattan distance or from a JSON \
                 cost table. Paths can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Solve a travelling-salesman instance exactly"
)]
#[ortho_config(prefix = "LITTLEBOUND")]
pub(crate) struct SolveArgs {
    /// Path to a file of `x y` integer points, one per line.
    #[arg(long = ARG_POINTS, value_name = "path")]
    #[serde(default)]
    pub(crate) points: Option<Utf8PathBuf>,
    /// Path to a JSON cost table (`{"labels": [...], "costs": [[...]]}`).
    #[arg(long = ARG_MATRIX, value_name = "path")]
    #[serde(default)]
    pub(crate) matrix: Option<Utf8PathBuf>,
    /// Write the JSON response here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Directory receiving reduction tables, tree snapshots and the
    /// solutions log.
    #[arg(long = ARG_REPORT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) report_dir: Option<Utf8PathBuf>,
    /// Stop after this many expansions and report the best tours so far.
    #[arg(long = ARG_MAX_EXPANSIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_expansions: Option<u64>,
    /// Keep only the first optimal tour instead of every tied one.
    #[arg(
        long = ARG_FIRST_ONLY,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) first_only: Option<bool>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Where the vertices come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputSource {
    /// Integer points priced by Manhattan distance.
    Points(Utf8PathBuf),
    /// A labelled JSON cost table.
    Matrix(Utf8PathBuf),
}

impl InputSource {
    fn path(&self) -> &Utf8Path {
        match self {
            Self::Points(path) | Self::Matrix(path) => path,
        }
    }

    const fn field(&self) -> &'static str {
        match self {
            Self::Points(_) => ARG_POINTS,
            Self::Matrix(_) => ARG_MATRIX,
        }
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Problem input.
    pub(crate) input: InputSource,
    /// Response destination; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Report directory; no report is written when absent.
    pub(crate) report_dir: Option<Utf8PathBuf>,
    /// Search limits.
    pub(crate) solver: SolverConfig,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(self.input.path(), self.input.field())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match littlebound_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::ReadSource {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let input = match (args.points, args.matrix) {
            (Some(points), None) => InputSource::Points(points),
            (None, Some(matrix)) => InputSource::Matrix(matrix),
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingInputs {
                    first: ARG_POINTS,
                    second: ARG_MATRIX,
                });
            }
            (None, None) => {
                return Err(CliError::MissingInput {
                    points: ARG_POINTS,
                    matrix: ARG_MATRIX,
                    points_env: ENV_POINTS,
                    matrix_env: ENV_MATRIX,
                });
            }
        };
        let solver = SolverConfig {
            max_expansions: args.max_expansions,
            collect_all_optimal: !args.first_only.unwrap_or(false),
        };
        Ok(Self {
            input,
            output: args.output,
            report_dir: args.report_dir,
            solver,
        })
    }
}

/// JSON document written by `solve`.
#[derive(Debug, Serialize)]
struct SolveOutput<'a> {
    labels: &'a [String],
    /// Each tour's visiting order spelled with labels.
    labelled_tours: Vec<Vec<String>>,
    #[serde(flatten)]
    response: &'a SolveResponse,
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &mut stdout)
}

pub(crate) fn run_solve_with(args: SolveArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let problem = load_problem(&config.input)?;
    let response = execute_solve(&config, &problem)?;
    if response.status == SearchStatus::Interrupted {
        log::warn!(
            "search interrupted after {} expansions; tours may not be optimal",
            response.diagnostics.expansions
        );
    }

    let output = SolveOutput {
        labels: problem.labels(),
        labelled_tours: response
            .tours
            .iter()
            .map(|tour| tour.labels(&problem))
            .collect(),
        response: &response,
    };
    match &config.output {
        Some(path) => write_solve_file(path, &output),
        None => write_solve_response(writer, &output),
    }
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_solve(config: &SolveConfig, problem: &Problem) -> Result<SolveResponse, CliError> {
    log::info!("solving {} vertices", problem.len());
    let solver = LittleSolver::with_config(config.solver.clone());
    let Some(dir) = &config.report_dir else {
        return solver
            .solve(problem)
            .map_err(|source| CliError::Solve { source });
    };
    let mut reporter = FileReporter::create(dir, problem.labels().to_vec())?;
    let response = solver
        .solve_with_observer(problem, &mut reporter)
        .map_err(|source| CliError::Solve { source })?;
    reporter.finish()?;
    Ok(response)
}

/// Loads and validates the problem named by `input`.
pub(crate) fn load_problem(input: &InputSource) -> Result<Problem, CliError> {
    let path = input.path();
    let text = littlebound_fs::read_utf8_file(path).map_err(|source| CliError::ReadSource {
        field: input.field(),
        path: path.to_path_buf(),
        source,
    })?;
    match input {
        InputSource::Points(_) => {
            let points = parse_points(&text).map_err(|source| CliError::ParsePoints {
                path: path.to_path_buf(),
                source,
            })?;
            problem_from_points(&points)
        }
        InputSource::Matrix(_) => {
            let table: CostTableFile =
                serde_json::from_str(&text).map_err(|source| CliError::ParseMatrix {
                    path: path.to_path_buf(),
                    source,
                })?;
            Problem::try_from(table)
        }
    }
}

fn render_output(output: &SolveOutput<'_>) -> Result<String, CliError> {
    let mut payload =
        serde_json::to_string_pretty(output).map_err(CliError::SerialiseSolveResponse)?;
    payload.push('\n');
    Ok(payload)
}

fn write_solve_response(writer: &mut dyn Write, output: &SolveOutput<'_>) -> Result<(), CliError> {
    let payload = render_output(output)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)
}

fn write_solve_file(path: &Utf8Path, output: &SolveOutput<'_>) -> Result<(), CliError> {
    let payload = render_output(output)?;
    littlebound_fs::write_utf8_file(path, &payload).map_err(CliError::WriteSolveOutput)?;
    log::info!("wrote solve response to {path}");
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
