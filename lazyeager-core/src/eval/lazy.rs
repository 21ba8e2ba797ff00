//! Lazy evaluation: one vertex on demand.

use tracing::debug;

use super::{Evaluator, Solution};
use crate::error::Result;
use crate::graph::Graph;
use crate::solve::SolverConfig;

/// Resolves a single requested vertex and its transitive dependencies.
pub struct LazyEvaluator<'g, T> {
    graph: Option<&'g Graph<T>>,
    config: SolverConfig,
}

impl<'g, T> LazyEvaluator<'g, T>
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

    /// Resolve `name`, returning it paired with its value.
    pub fn solve(&self, name: &str) -> Result<Solution<T>> {
        let mut solver = self.solver()?;
        debug!(vertex = name, "lazy evaluation started");
        let value = solver.solve(name)?;
        debug!(vertex = name, computed = solver.computed_count(), "lazy evaluation finished");
        Ok((name.to_string(), value))
    }
}

impl<'g, T> Evaluator<'g, T> for LazyEvaluator<'g, T>
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

impl<'g, T> Default for LazyEvaluator<'g, T>
where
    T: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
