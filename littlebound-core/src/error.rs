//! Error types shared by the core domain.

use thiserror::Error;

/// Errors returned while building a [`Problem`](crate::Problem).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// No cost rows were supplied.
    #[error("cost table must contain at least one vertex")]
    Empty,
    /// A tour needs at least two distinct vertices.
    #[error("cost table has {found} vertex, at least two are required")]
    TooFewVertices {
        /// Number of vertices supplied.
        found: usize,
    },
    /// A row does not have one entry per vertex.
    #[error("cost row {row} has {found} entries, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of vertices in the table.
        expected: usize,
        /// Number of entries found in the row.
        found: usize,
    },
    /// The label table does not match the number of vertices.
    #[error("{found} labels supplied for {expected} vertices")]
    LabelCount {
        /// Number of vertices in the table.
        expected: usize,
        /// Number of labels supplied.
        found: usize,
    },
    /// Two vertices share a label.
    #[error("vertex label {label:?} is used more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
    /// A label-keyed mapping lacks the cost of an ordered pair.
    #[error("no cost given from {from:?} to {to:?}")]
    MissingCost {
        /// Label of the start vertex.
        from: String,
        /// Label of the end vertex.
        to: String,
    },
}

/// Errors from [`CostProvider::cost_table`](crate::CostProvider::cost_table).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    /// No points were provided.
    #[error("at least one point is required")]
    EmptyInput,
    /// A pairwise cost does not fit in `u64`.
    #[error("cost from point {from} to point {to} overflows")]
    Overflow {
        /// Index of the start point.
        from: usize,
        /// Index of the end point.
        to: usize,
    },
}

/// Errors raised when a residual matrix cannot be closed into a tour.
///
/// These indicate the caller finalised a matrix that was not a reduced,
/// feasible 2×2 residual.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResidualError {
    /// The live matrix is not 2×2.
    #[error("residual matrix is {rows}x{columns}, expected 2x2")]
    NotTwoByTwo {
        /// Live row count.
        rows: usize,
        /// Live column count.
        columns: usize,
    },
    /// The residual does not hold one zero per row and column.
    #[error("residual matrix holds {found} usable zero cells, expected 2 (was it reduced?)")]
    UnexpectedZeros {
        /// Number of zero cells found.
        found: usize,
    },
    /// The committed edges do not form a single Hamiltonian cycle.
    #[error("committed edges do not close a tour at vertex {vertex}")]
    BrokenCycle {
        /// Vertex where the walk stopped.
        vertex: usize,
    },
}
