//! Exact travelling-salesman solver for littlebound.
//!
//! This crate provides [`LittleSolver`], the implementation of the
//! [`TourSolver`](littlebound_core::TourSolver) trait built on Little's
//! branch-and-bound. The moving parts are public so callers can drive or
//! watch a search directly:
//!
//! - [`SearchTree`] holds every branch in an arena addressed by [`NodeId`];
//! - [`Solver`] expands the open leaf with the smallest bound until no leaf
//!   can beat the best tour;
//! - [`SearchObserver`] receives read-only snapshots of each step.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod frontier;
mod observer;
mod search;
mod solver;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod tree;

pub use error::SearchError;
pub use observer::{NoopObserver, SearchObserver};
pub use search::{SearchOutcome, Solver};
pub use solver::{LittleSolver, SolverConfig};
pub use tree::{Children, Expansion, NodeId, SearchNode, SearchTree};
