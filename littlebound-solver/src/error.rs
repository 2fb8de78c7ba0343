//! Errors raised when the search is driven outside its contract.

use littlebound_core::{ProblemError, ResidualError, SolveError};
use thiserror::Error;

use crate::NodeId;

/// Misuse of the search tree or solver.
///
/// Infeasible branches are not errors; they are pruned silently. These
/// variants indicate a logic error in whoever drives the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The cost matrix cannot hold a tour.
    #[error("a tour needs at least two vertices, found {found}")]
    TooFewVertices {
        /// Number of vertices in the matrix.
        found: usize,
    },
    /// The node id does not belong to the tree.
    #[error("node {node} is not part of the search tree")]
    UnknownNode {
        /// Offending node id.
        node: NodeId,
    },
    /// Only leaves may be expanded.
    #[error("node {node} has already been expanded")]
    AlreadyExpanded {
        /// Offending node id.
        node: NodeId,
    },
    /// The node's matrix holds no zero cell to branch on.
    #[error("node {node} has no zero cell to branch on; was it reduced?")]
    NoBranchEdge {
        /// Offending node id.
        node: NodeId,
    },
    /// A residual that passed validation could not be closed.
    #[error("residual below node {node} does not close a tour: {source}")]
    Residual {
        /// Node whose expansion produced the residual.
        node: NodeId,
        /// Underlying residual failure.
        #[source]
        source: ResidualError,
    },
    /// No open leaf remained before any tour was found.
    #[error("no open leaf left at step {step} and no tour found")]
    FrontierExhausted {
        /// Step counter when the frontier ran dry.
        step: u64,
    },
}

impl From<SearchError> for SolveError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::TooFewVertices { found } => {
                Self::InvalidProblem(ProblemError::TooFewVertices { found })
            }
            SearchError::Residual { source, .. } => Self::Residual(source),
            other => Self::ContractViolation {
                detail: other.to_string(),
            },
        }
    }
}
