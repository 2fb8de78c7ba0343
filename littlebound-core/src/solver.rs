use std::time::Duration;

use thiserror::Error;

use crate::{Problem, ProblemError, ResidualError, Tour};

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchStatus {
    /// Every open branch was bounded above the best tour; the tours are
    /// optimal.
    Optimal,
    /// The expansion budget ran out; the tours are the best found so far.
    Interrupted,
}

/// Counters describing a finished search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent searching.
    pub solve_time: Duration,
    /// Number of nodes expanded.
    pub expansions: u64,
    /// Number of nodes created, including the root.
    pub nodes_created: u64,
    /// Branches discarded as infeasible or beaten by the best tour.
    pub branches_discarded: u64,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// Tours of the best known weight, in discovery order.
    pub tours: Vec<Tour>,
    /// Whether the tours are certified optimal.
    pub status: SearchStatus,
    /// Search counters.
    pub diagnostics: Diagnostics,
}

impl SolveResponse {
    /// First tour of the best weight.
    #[must_use]
    pub fn best(&self) -> Option<&Tour> {
        self.tours.first()
    }

    /// Best known weight.
    #[must_use]
    pub fn weight(&self) -> Option<u64> {
        self.best().map(|tour| tour.weight)
    }
}

/// Errors returned by [`TourSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The input cost table was rejected.
    #[error("invalid problem: {0}")]
    InvalidProblem(#[from] ProblemError),
    /// A residual matrix could not be closed into a tour.
    #[error("failed to close tour: {0}")]
    Residual(#[from] ResidualError),
    /// The search broke one of its own contracts.
    #[error("search contract violated: {detail}")]
    ContractViolation {
        /// Description of the violated contract.
        detail: String,
    },
}

/// Find a minimum-weight Hamiltonian cycle.
///
/// Solvers must be `Send + Sync` to operate safely across threads.
pub trait TourSolver: Send + Sync {
    /// Solve `problem`, producing the best tours found or an error.
    ///
    /// # Errors
    /// Returns [`SolveError`] when the search cannot complete.
    fn solve(&self, problem: &Problem) -> Result<SolveResponse, SolveError>;
}
