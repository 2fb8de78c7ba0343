//! Best-first branch-and-bound driver.
//!
//! [`Solver`] repeatedly expands the open leaf with the smallest
//! `(bound, power)` key. Including children that close a tour are compared
//! with the best weight seen so far; the search stops once every open leaf is
//! bounded above that weight.

use littlebound_core::{CostMatrix, SearchStatus, Tour};

use crate::frontier::Frontier;
use crate::{NodeId, SearchError, SearchObserver, SearchTree, SolverConfig};

/// Result of a finished [`Solver::start`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Tours of the best weight, in discovery order.
    pub tours: Vec<Tour>,
    /// Whether the search ran to exhaustion.
    pub status: SearchStatus,
    /// The full search tree.
    pub tree: SearchTree,
    /// Value of the step counter when the search stopped.
    pub steps: u64,
    /// Number of expanded leaves.
    pub expansions: u64,
    /// Leaves dropped as infeasible, beaten by the best tour or never
    /// expanded because their bound was too high.
    pub branches_discarded: u64,
}

impl SearchOutcome {
    /// Weight of the best tour found.
    #[must_use]
    pub fn best_weight(&self) -> Option<u64> {
        self.tours.first().map(|tour| tour.weight)
    }
}

/// How a closed tour compares with the best one so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    First,
    Improved,
    Tied,
    Worse,
}

impl Verdict {
    fn judge(weight: u64, current: Option<u64>) -> Self {
        match current {
            None => Self::First,
            Some(best) if weight < best => Self::Improved,
            Some(best) if weight == best => Self::Tied,
            Some(_) => Self::Worse,
        }
    }
}

/// Drives one search over a cost matrix, reporting to `O`.
///
/// # Examples
/// ```
/// use littlebound_core::{CostMatrix, SearchStatus};
/// use littlebound_solver::{NoopObserver, Solver};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let matrix = CostMatrix::from_costs(&[vec![0, 4, 9], vec![3, 0, 7], vec![5, 8, 0]])?;
/// let outcome = Solver::new(matrix, NoopObserver).start()?;
/// assert_eq!(outcome.status, SearchStatus::Optimal);
/// assert_eq!(outcome.best_weight(), Some(16));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Solver<O> {
    tree: SearchTree,
    frontier: Frontier,
    config: SolverConfig,
    observer: O,
    step: u64,
    best: Option<u64>,
    tours: Vec<Tour>,
    expansions: u64,
    discarded: u64,
}

impl<O> Solver<O>
where
    O: SearchObserver,
{
    /// Prepare a search over `matrix` using default configuration.
    #[must_use]
    pub fn new(matrix: CostMatrix, observer: O) -> Self {
        Self::with_config(matrix, SolverConfig::default(), observer)
    }

    /// Prepare a search over `matrix` with explicit configuration.
    #[must_use]
    pub fn with_config(matrix: CostMatrix, config: SolverConfig, observer: O) -> Self {
        Self {
            tree: SearchTree::new(matrix),
            frontier: Frontier::default(),
            config,
            observer,
            step: 1,
            best: None,
            tours: Vec::new(),
            expansions: 0,
            discarded: 0,
        }
    }

    /// Run the search to exhaustion or until the expansion budget is spent.
    ///
    /// # Errors
    /// Returns [`SearchError`] when the matrix has fewer than two vertices or
    /// the tree is driven outside its contract.
    pub fn start(mut self) -> Result<SearchOutcome, SearchError> {
        let root = self.tree.root();
        let dimension = self
            .tree
            .node(root)
            .map_or(0, |node| node.matrix().dimension());
        if dimension < 2 {
            return Err(SearchError::TooFewVertices { found: dimension });
        }

        let reduction = self
            .tree
            .reduce_root()
            .ok_or(SearchError::UnknownNode { node: root })?;
        log::debug!("root bound {}", reduction.after.min_weight());
        self.observer.initial_reduction(&reduction, self.step);

        if dimension == 2 {
            self.close_root()?;
        } else {
            self.open(root);
        }

        let status = self.run()?;
        self.observer.tree(&self.tree, None, self.step + 1);
        log::info!(
            "search {status:?} after {} expansions; best weight {:?}",
            self.expansions,
            self.best
        );

        Ok(SearchOutcome {
            tours: self.tours,
            status,
            tree: self.tree,
            steps: self.step,
            expansions: self.expansions,
            branches_discarded: self.discarded,
        })
    }

    fn run(&mut self) -> Result<SearchStatus, SearchError> {
        loop {
            if self.is_exhausted() {
                self.discarded += to_count(self.frontier.len());
                return Ok(SearchStatus::Optimal);
            }
            if self
                .config
                .max_expansions
                .is_some_and(|limit| self.expansions >= limit)
            {
                log::warn!(
                    "expansion budget of {} spent with {} open leaves",
                    self.expansions,
                    self.frontier.len()
                );
                return Ok(SearchStatus::Interrupted);
            }
            self.step += 1;
            let next = self
                .frontier
                .pop()
                .ok_or(SearchError::FrontierExhausted { step: self.step })?;
            self.expand(next)?;
        }
    }

    fn expand(&mut self, id: NodeId) -> Result<(), SearchError> {
        self.observer.tree(&self.tree, Some(id), self.step);
        let expansion = self.tree.expand(id)?;
        self.expansions += 1;

        let parent = self
            .tree
            .node(id)
            .ok_or(SearchError::UnknownNode { node: id })?;
        self.observer.branches(
            self.step,
            parent.prefix(),
            parent.matrix(),
            &expansion.including_reduction,
            &expansion.excluding_reduction,
        );

        for dead in &expansion.dead {
            log::trace!("branch {dead} is infeasible");
        }
        self.discarded += to_count(expansion.dead.len());
        for child in [expansion.including, expansion.excluding] {
            if !expansion.dead.contains(&child) && expansion.candidate != Some(child) {
                self.open(child);
            }
        }
        if let Some(candidate) = expansion.candidate {
            self.accept(candidate)?;
        }
        Ok(())
    }

    /// Two vertices admit a single tour: close the reduced root directly.
    fn close_root(&mut self) -> Result<(), SearchError> {
        let root = self.tree.root();
        let order = self
            .tree
            .node(root)
            .ok_or(SearchError::UnknownNode { node: root })?
            .matrix()
            .completed_tour()
            .map_err(|source| SearchError::Residual { node: root, source })?;
        self.tree.set_solution(root, order);
        self.accept(root)
    }

    fn open(&mut self, id: NodeId) {
        if let Some(node) = self.tree.node(id) {
            self.frontier.push(id, node);
        }
    }

    fn accept(&mut self, id: NodeId) -> Result<(), SearchError> {
        let tour = self
            .tree
            .node(id)
            .and_then(|node| {
                node.solution()
                    .map(|order| Tour::new(order.to_vec(), node.min_weight()))
            })
            .ok_or(SearchError::UnknownNode { node: id })?;

        match Verdict::judge(tour.weight, self.best) {
            Verdict::First | Verdict::Improved => {
                log::info!("step {}: new best tour of weight {}", self.step, tour.weight);
                self.best = Some(tour.weight);
                self.tours.clear();
                self.observer.reset();
                self.record(tour);
            }
            Verdict::Tied if self.config.collect_all_optimal => {
                log::debug!("step {}: another tour of weight {}", self.step, tour.weight);
                self.record(tour);
            }
            Verdict::Tied => {}
            Verdict::Worse => {
                log::debug!(
                    "step {}: discarding tour of weight {}",
                    self.step,
                    tour.weight
                );
                self.discarded += 1;
            }
        }
        Ok(())
    }

    fn record(&mut self, tour: Tour) {
        self.observer.tour_found(&tour, self.step);
        self.tours.push(tour);
    }

    /// No open leaf can still match or beat the best tour.
    ///
    /// Ties are only worth expanding when every optimal tour is wanted.
    fn is_exhausted(&self) -> bool {
        let Some(best) = self.best else {
            return false;
        };
        self.frontier.min_bound().is_none_or(|bound| {
            if self.config.collect_all_optimal {
                bound > best
            } else {
                bound >= best
            }
        })
    }
}

fn to_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
