//! Error types emitted by the littlebound CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use littlebound_core::{CostError, ProblemError, SolveError};
use thiserror::Error;

use crate::input::PointParseError;
use crate::report::ReportError;

/// Errors emitted by the littlebound CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Neither input option was supplied after configuration merging.
    #[error("missing input (set --{points} or --{matrix}, or {points_env} or {matrix_env})")]
    MissingInput {
        /// Flag naming a points file.
        points: &'static str,
        /// Flag naming a cost matrix file.
        matrix: &'static str,
        /// Environment variable naming a points file.
        points_env: &'static str,
        /// Environment variable naming a cost matrix file.
        matrix_env: &'static str,
    },
    /// Both input options were supplied.
    #[error("--{first} and --{second} cannot be combined")]
    ConflictingInputs {
        /// First conflicting flag.
        first: &'static str,
        /// Second conflicting flag.
        second: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected or read.
    #[error("failed to read {field} path {path:?}: {source}")]
    ReadSource {
        /// Flag that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A points file line could not be parsed.
    #[error("invalid points file {path:?}: {source}")]
    ParsePoints {
        /// Points file path.
        path: Utf8PathBuf,
        /// Parse failure with its line number.
        #[source]
        source: PointParseError,
    },
    /// A cost matrix file was not valid JSON.
    #[error("failed to parse cost matrix JSON at {path:?}: {source}")]
    ParseMatrix {
        /// Cost matrix file path.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Points could not be priced.
    #[error("failed to price points: {0}")]
    Cost(#[from] CostError),
    /// The priced or parsed costs do not form a valid problem.
    #[error("invalid problem: {0}")]
    Problem(#[from] ProblemError),
    /// The solver rejected the problem.
    #[error("solver failed: {source}")]
    Solve {
        /// Underlying solver failure.
        source: SolveError,
    },
    /// Writing the search report failed.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// Serialising the solve response failed.
    #[error("failed to serialise solve response: {0}")]
    SerialiseSolveResponse(#[source] serde_json::Error),
    /// Writing the solve output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
}
