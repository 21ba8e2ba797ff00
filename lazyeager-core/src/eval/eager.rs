//! Eager evaluation: every vertex, in declaration order.

use tracing::debug;

use super::{Evaluator, Solution};
use crate::error::Result;
use crate::graph::Graph;
use crate::solve::SolverConfig;

/// Resolves every vertex of the bound graph.
///
/// A single solver handles the whole pass, so a vertex reached as a
/// dependency of an earlier one is not recomputed when its own turn comes.
pub struct EagerEvaluator<'g, T> {
    graph: Option<&'g Graph<T>>,
    config: SolverConfig,
}

impl<'g, T> EagerEvaluator<'g, T>
where
    T: Clone + 'static,
{
    /// Create an evaluator with no graph bound.
    pub fn new() -> Self {
        Self {
            graph: None,
            config: SolverConfig::default(),
        }
    }

    /// Create an evaluator bound to `graph`.
    pub fn with_graph(graph: &'g Graph<T>) -> Self {
        let mut evaluator = Self::new();
        evaluator.set_graph(graph);
        evaluator
    }

    /// Use `config` for the solvers this evaluator creates.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve every vertex, returning one pair per vertex in declaration
    /// order.
    ///
    /// The first error aborts the pass and no pairs are returned.
    pub fn solve(&self) -> Result<Vec<Solution<T>>> {
        let mut solver = self.solver()?;
        let graph = solver.graph();
        debug!(vertices = graph.len(), "eager evaluation started");

        let mut solutions = Vec::with_capacity(graph.len());
        for name in graph.names() {
            let value = solver.solve(name)?;
            solutions.push((name.to_string(), value));
        }

        debug!(
            vertices = solutions.len(),
            computed = solver.computed_count(),
            "eager evaluation finished"
        );
        Ok(solutions)
    }
}

impl<'g, T> Evaluator<'g, T> for EagerEvaluator<'g, T>
where
    T: Clone + 'static,
{
    fn set_graph(&mut self, graph: &'g Graph<T>) {
        self.graph = Some(graph);
    }

    fn graph(&self) -> Option<&'g Graph<T>> {
        self.graph
    }

    fn config(&self) -> SolverConfig {
        self.config
    }
}

impl<'g, T> Default for EagerEvaluator<'g, T>
where
    T: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
