//! Core domain types for the littlebound travelling-salesman engine.
//!
//! The crate provides the reduced-cost [`CostMatrix`] at the heart of
//! Little's branch-and-bound method, the [`Weight`] cells it is made of, the
//! labelled [`Problem`] input and the [`TourSolver`] seam implemented by
//! solver crates. Constructors return `Result` to surface invalid input
//! early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod components;
mod cost;
mod edge;
mod error;
mod matrix;
mod problem;
mod solver;
mod tour;
mod weight;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cost::{CostProvider, CostTable, ManhattanCosts};
pub use edge::Edge;
pub use error::{CostError, ProblemError, ResidualError};
pub use matrix::{CostMatrix, Reduction};
pub use problem::Problem;
pub use solver::{Diagnostics, SearchStatus, SolveError, SolveResponse, TourSolver};
pub use tour::Tour;
pub use weight::Weight;
