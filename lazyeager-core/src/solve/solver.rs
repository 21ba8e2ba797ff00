//! Solver
//!
//! Resolves a vertex to a value by resolving its dependencies first.
//!
//! # Algorithm
//!
//! `solve(name)`:
//!
//! 1. If `name` is already on the active path, fail with a cycle error
//!    carrying the path from its first occurrence back to `name`.
//! 2. Look the vertex up. A missing binding is an unknown-vertex error.
//! 3. If the node already holds a value, return it. Memoized vertices are
//!    never pushed onto the path and their function is not called again.
//! 4. Otherwise push `name`, resolve each dependency in declared order into
//!    a positional argument list, compute the node, and pop `name`.
//!
//! The active path lives in the recursion frames (see `path`), so a solver
//! that returned an error can be reused without carrying stale entries.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::config::SolverConfig;
use super::path::ActivePath;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, Resolution};

/// Recursive, memoizing evaluator bound to one graph.
pub struct Solver<'g, T> {
    /// The graph being evaluated.
    graph: &'g Graph<T>,

    config: SolverConfig,

    /// Number of node functions this solver has called.
    computed: usize,
}

impl<'g, T> Solver<'g, T>
where
    T: Clone + 'static,
{
    /// Create a solver over `graph` with the default configuration.
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self::with_config(graph, SolverConfig::default())
    }

    /// Create a solver over `graph`.
    pub fn with_config(graph: &'g Graph<T>, config: SolverConfig) -> Self {
        Self {
            graph,
            config,
            computed: 0,
        }
    }

    /// Get the graph this solver evaluates.
    pub fn graph(&self) -> &'g Graph<T> {
        self.graph
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of node functions called so far. Memo hits are not counted.
    pub fn computed_count(&self) -> usize {
        self.computed
    }

    /// Resolve `name` and everything it transitively depends on.
    pub fn solve(&mut self, name: &str) -> Result<T> {
        self.resolve(name, ActivePath::empty())
    }

    fn resolve(&mut self, name: &str, path: ActivePath<'_>) -> Result<T> {
        if path.contains(name) {
            let cycle = path.cycle(name);
            debug!(vertex = name, cycle = ?cycle, "cycle detected");
            return Err(GraphError::CyclicGraph { path: cycle });
        }

        let graph = self.graph;
        let node = graph.get_vertex(name).ok_or_else(|| {
            debug!(vertex = name, path = ?path.names(), "unknown vertex");
            GraphError::UnknownVertex(name.to_string())
        })?;

        if let Some(value) = node.result() {
            trace!(vertex = name, "memo hit");
            return Ok(value);
        }

        if let Some(limit) = self.config.max_depth {
            if path.depth() >= limit {
                return Err(GraphError::DepthExceeded {
                    vertex: name.to_string(),
                    limit,
                });
            }
        }

        let frame = path.push(name);
        let path = frame.path();

        let mut args: SmallVec<[T; 4]> = SmallVec::with_capacity(node.dependencies().len());
        for dependency in node.dependencies() {
            args.push(self.resolve(dependency, path)?);
        }

        match node.compute_once(name, &args)? {
            Resolution::Computed(value) => {
                self.computed += 1;
                Ok(value)
            }
            Resolution::Memoized(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeState};
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn counted(counter: &Arc<AtomicI32>, value: i64) -> Node<i64> {
        let counter = counter.clone();
        Node::source(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            value
        })
    }

    #[test]
    fn solves_simple_dependency() {
        let mut graph = Graph::new();
        graph.add_vertex("a", Node::map("b", |x: &i64| 2 * x).unwrap()).unwrap();
        graph.add_vertex("b", Node::constant(2)).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("a").unwrap(), 4);
        assert_eq!(solver.computed_count(), 2);
    }

    #[test]
    fn unknown_requested_vertex() {
        let mut graph = Graph::new();
        graph.add_vertex("v", Node::map("x", |x: &i64| x / 2).unwrap()).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(
            solver.solve("test").unwrap_err(),
            GraphError::UnknownVertex("test".to_string())
        );
    }

    #[test]
    fn unknown_dependency_is_named() {
        let mut graph = Graph::new();
        graph.add_vertex("v", Node::map("x", |x: &i64| x / 2).unwrap()).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(
            solver.solve("v").unwrap_err(),
            GraphError::UnknownVertex("x".to_string())
        );
        assert!(!graph.get_vertex("v").unwrap().is_computed());
    }

    #[test]
    fn three_node_cycle() {
        let mut graph = Graph::new();
        graph.add_vertex("a", Node::map("b", |b: &i64| 2 * b).unwrap()).unwrap();
        graph.add_vertex("b", Node::map("c", |c: &i64| 2 * c).unwrap()).unwrap();
        graph.add_vertex("c", Node::map("a", |a: &i64| 2 * a).unwrap()).unwrap();

        let mut solver = Solver::new(&graph);
        let err = solver.solve("a").unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicGraph {
                path: vec!["a".into(), "b".into(), "c".into(), "a".into()],
            }
        );
        assert_eq!(solver.computed_count(), 0);
        assert!(graph.iter().all(|(_, node)| !node.is_computed()));
    }

    #[test]
    fn cycle_path_starts_at_reentered_vertex() {
        let mut graph = Graph::new();
        graph.add_vertex("root", Node::map("a", |a: &i64| *a).unwrap()).unwrap();
        graph.add_vertex("a", Node::map("b", |b: &i64| *b).unwrap()).unwrap();
        graph.add_vertex("b", Node::map("a", |a: &i64| *a).unwrap()).unwrap();

        let mut solver = Solver::new(&graph);
        let err = solver.solve("root").unwrap_err();
        assert_eq!(err.cycle().unwrap(), ["a", "b", "a"]);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let mut graph = Graph::new();
        graph.add_vertex("s", Node::map("s", |s: &i64| s + 1).unwrap()).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("s").unwrap_err().cycle().unwrap(), ["s", "s"]);
    }

    #[test]
    fn solver_is_reusable_after_cycle() {
        let mut graph = Graph::new();
        graph.add_vertex("a", Node::map("b", |b: &i64| *b).unwrap()).unwrap();
        graph.add_vertex("b", Node::map("a", |a: &i64| *a).unwrap()).unwrap();
        graph.add_vertex("c", Node::map("d", |d: &i64| d + 1).unwrap()).unwrap();
        graph.add_vertex("d", Node::constant(1)).unwrap();

        let mut solver = Solver::new(&graph);
        assert!(solver.solve("a").is_err());

        // No leftover path entries: "c" resolves and "a" still reports the
        // same cycle.
        assert_eq!(solver.solve("c").unwrap(), 2);
        assert_eq!(solver.solve("a").unwrap_err().cycle().unwrap(), ["a", "b", "a"]);
    }

    #[test]
    fn shared_dependency_computed_once() {
        let calls = Arc::new(AtomicI32::new(0));

        let mut graph = Graph::new();
        graph.add_vertex("x", counted(&calls, 3)).unwrap();
        graph.add_vertex("l", Node::map("x", |x: &i64| x + 1).unwrap()).unwrap();
        graph.add_vertex("r", Node::map("x", |x: &i64| x * 10).unwrap()).unwrap();
        graph.add_vertex("top", Node::zip("l", "r", |l: &i64, r: &i64| l + r).unwrap()).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("top").unwrap(), 34);
        assert_eq!(solver.solve("x").unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(solver.computed_count(), 4);
    }

    #[test]
    fn duplicate_dependency_passed_twice() {
        let calls = Arc::new(AtomicI32::new(0));

        let mut graph = Graph::new();
        graph.add_vertex("x", counted(&calls, 7)).unwrap();
        let pair = Node::new(["x", "x"], |args: &[i64]| args[0] * 100 + args[1]).unwrap();
        graph.add_vertex("pair", pair).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("pair").unwrap(), 707);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arguments_follow_declared_order() {
        let mut graph = Graph::new();
        graph.add_vertex("a", Node::constant(1)).unwrap();
        graph.add_vertex("b", Node::constant(2)).unwrap();
        graph.add_vertex("c", Node::constant(3)).unwrap();
        graph
            .add_vertex(
                "digits",
                Node::new(["c", "a", "b"], |args: &[i64]| {
                    args.iter().fold(0, |acc, d| acc * 10 + d)
                })
                .unwrap(),
            )
            .unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("digits").unwrap(), 312);
    }

    #[test]
    fn memoization_outlives_the_solver() {
        let calls = Arc::new(AtomicI32::new(0));

        let mut graph = Graph::new();
        graph.add_vertex("x", counted(&calls, 5)).unwrap();

        assert_eq!(Solver::new(&graph).solve("x").unwrap(), 5);

        let mut second = Solver::new(&graph);
        assert_eq!(second.solve("x").unwrap(), 5);
        assert_eq!(second.computed_count(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn memoized_vertex_short_circuits_cycle_check() {
        let mut graph = Graph::new();
        graph.add_vertex("a", Node::map("b", |b: &i64| b + 1).unwrap()).unwrap();
        graph.add_vertex("b", Node::constant(1)).unwrap();

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("a").unwrap(), 2);

        // Rebinding "b" to depend on "a" closes a loop, but "a" is already
        // memoized on its node, so it is returned without recursion.
        let mut graph = graph;
        graph.add_vertex("b", Node::map("a", |a: &i64| *a).unwrap()).unwrap();
        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("a").unwrap(), 2);
        assert!(solver.solve("b").is_ok());
    }

    #[test]
    fn failing_function_propagates_and_retries() {
        let attempts = Arc::new(AtomicI32::new(0));
        let attempts_clone = attempts.clone();

        let mut graph = Graph::new();
        graph.add_vertex("x", Node::constant(8)).unwrap();
        graph
            .add_vertex(
                "flaky",
                Node::try_new(["x"], move |args: &[i64]| {
                    if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err("not yet")
                    } else {
                        Ok(args[0] / 2)
                    }
                })
                .unwrap(),
            )
            .unwrap();

        let mut solver = Solver::new(&graph);
        let err = solver.solve("flaky").unwrap_err();
        assert_eq!(
            err,
            GraphError::Compute {
                vertex: "flaky".to_string(),
                message: "not yet".to_string(),
            }
        );
        assert!(matches!(graph.get_vertex("flaky").unwrap().state(), NodeState::Failed(_)));

        // The dependency that succeeded stays memoized.
        assert!(graph.get_vertex("x").unwrap().is_computed());

        assert_eq!(solver.solve("flaky").unwrap(), 4);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn depth_limit() {
        let mut graph = Graph::new();
        graph.add_vertex("n0", Node::constant(0)).unwrap();
        for i in 1..10 {
            let dep = format!("n{}", i - 1);
            graph.add_vertex(format!("n{}", i), Node::map(dep, |x: &i64| x + 1).unwrap()).unwrap();
        }

        let config = SolverConfig::new().with_max_depth(5);
        let mut solver = Solver::with_config(&graph, config);
        assert_eq!(
            solver.solve("n9").unwrap_err(),
            GraphError::DepthExceeded {
                vertex: "n4".to_string(),
                limit: 5,
            }
        );

        let mut solver = Solver::new(&graph);
        assert_eq!(solver.solve("n9").unwrap(), 9);
    }
}
