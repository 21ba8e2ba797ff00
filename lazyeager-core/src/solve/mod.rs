//! Dependency Resolution
//!
//! The [`Solver`] turns a vertex name into a value: it recursively resolves
//! the vertex's dependencies in declared order, memoizes every result on
//! its node, and reports cycles with the full loop of names.

mod config;
mod path;
mod solver;

pub use config::SolverConfig;
pub use solver::Solver;
