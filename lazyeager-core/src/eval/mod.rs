//! Evaluation Strategies
//!
//! Two evaluators drive a [`Solver`] over a bound graph:
//!
//! - [`LazyEvaluator`] resolves one requested vertex and whatever it
//!   transitively depends on. Unreachable vertices are never evaluated.
//! - [`EagerEvaluator`] resolves every vertex in declaration order with a
//!   single solver, so values computed for earlier vertices are reused.
//!
//! Both bind a graph after construction through the [`Evaluator`] trait and
//! build a fresh solver for every `solve` call.

mod eager;
mod lazy;

pub use eager::EagerEvaluator;
pub use lazy::LazyEvaluator;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::solve::{Solver, SolverConfig};

/// A value paired with the name of the vertex that produced it.
pub type Solution<T> = (String, T);

/// Shared capability of the evaluation strategies: hold a graph and build
/// solvers for it.
pub trait Evaluator<'g, T>
where
    T: Clone + 'static,
{
    /// Bind the graph to evaluate, replacing any previous binding.
    fn set_graph(&mut self, graph: &'g Graph<T>);

    /// Get the bound graph, if any.
    fn graph(&self) -> Option<&'g Graph<T>>;

    /// Get the configuration used for new solvers.
    fn config(&self) -> SolverConfig;

    /// Create a fresh solver over the bound graph.
    ///
    /// Fails with [`GraphError::InvalidArgument`] if no graph is bound.
    fn solver(&self) -> Result<Solver<'g, T>> {
        let graph = self
            .graph()
            .ok_or_else(|| GraphError::invalid("no graph bound to the evaluator"))?;
        Ok(Solver::with_config(graph, self.config()))
    }
}
