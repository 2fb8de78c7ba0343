//! Facade crate for the littlebound travelling-salesman engine.
//!
//! This crate re-exports the core domain types and exposes the
//! branch-and-bound solver behind the `solver-little` feature flag.

#![forbid(unsafe_code)]

pub use littlebound_core::{
    CostError, CostMatrix, CostProvider, CostTable, Diagnostics, Edge, ManhattanCosts, Problem,
    ProblemError, Reduction, ResidualError, SearchStatus, SolveError, SolveResponse, Tour,
    TourSolver, Weight,
};

#[cfg(feature = "solver-little")]
pub use littlebound_solver::{
    LittleSolver, NoopObserver, SearchError, SearchObserver, SearchOutcome, SearchTree, Solver,
    SolverConfig,
};
