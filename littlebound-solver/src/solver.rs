//! `LittleSolver`, the [`TourSolver`] backed by the branch-and-bound search.

use std::time::Instant;

use littlebound_core::{Diagnostics, Problem, SolveError, SolveResponse, TourSolver};

use crate::{NoopObserver, SearchObserver, Solver};

/// Configuration for [`LittleSolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Stop after this many expansions and return the best tours so far.
    pub max_expansions: Option<u64>,
    /// Keep every tour tied with the best weight instead of only the first.
    pub collect_all_optimal: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            collect_all_optimal: true,
        }
    }
}

/// Exact solver using Little's branch-and-bound.
///
/// # Examples
/// ```
/// use littlebound_core::{Problem, TourSolver};
/// use littlebound_solver::LittleSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let problem = Problem::new(vec![vec![0, 2, 9], vec![1, 0, 6], vec![15, 7, 0]])?;
/// let response = LittleSolver::new().solve(&problem)?;
/// assert_eq!(response.weight(), Some(17));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LittleSolver {
    config: SolverConfig,
}

impl LittleSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `problem`, reporting every search event to `observer`.
    ///
    /// # Errors
    /// Returns [`SolveError`] when the search is driven outside its contract
    /// or a reported tour disagrees with the problem's costs.
    pub fn solve_with_observer<O>(
        &self,
        problem: &Problem,
        observer: O,
    ) -> Result<SolveResponse, SolveError>
    where
        O: SearchObserver,
    {
        let started_at = Instant::now();
        let outcome =
            Solver::with_config(problem.cost_matrix(), self.config.clone(), observer).start()?;

        for tour in &outcome.tours {
            if problem.tour_cost(&tour.vertices) != Some(tour.weight) {
                return Err(SolveError::ContractViolation {
                    detail: format!(
                        "tour {:?} reported with weight {} but costs {:?}",
                        tour.vertices,
                        tour.weight,
                        problem.tour_cost(&tour.vertices)
                    ),
                });
            }
        }

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            expansions: outcome.expansions,
            nodes_created: u64::try_from(outcome.tree.len()).unwrap_or(u64::MAX),
            branches_discarded: outcome.branches_discarded,
        };
        Ok(SolveResponse {
            tours: outcome.tours,
            status: outcome.status,
            diagnostics,
        })
    }
}

impl TourSolver for LittleSolver {
    fn solve(&self, problem: &Problem) -> Result<SolveResponse, SolveError> {
        self.solve_with_observer(problem, NoopObserver)
    }
}
