//! Lazyeager Core
//!
//! This crate evaluates named graphs of pure computations. Each vertex holds
//! a function whose positional arguments are the values of other vertices,
//! named in order. It implements:
//!
//! - Nodes with memoized results and a construction-time arity check
//! - An insertion-ordered graph of named nodes
//! - A recursive solver with memoization and cycle detection
//! - Lazy (one vertex on demand) and eager (every vertex) evaluators
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: nodes and the graph that owns them
//! - `solve`: the recursive solver and its configuration
//! - `eval`: lazy and eager evaluation strategies
//! - `error`: the error type shared by all of the above
//!
//! # Example
//!
//! ```rust
//! use lazyeager_core::{EagerEvaluator, Graph, LazyEvaluator, Node};
//!
//! let mut graph = Graph::new();
//! graph.add_vertex("xs", Node::constant(vec![1.0, 2.0, 3.0, 6.0]))?;
//! graph.add_vertex("n", Node::map("xs", |xs: &Vec<f64>| vec![xs.len() as f64])?)?;
//! graph.add_vertex(
//!     "m",
//!     Node::zip("xs", "n", |xs: &Vec<f64>, n: &Vec<f64>| {
//!         vec![xs.iter().sum::<f64>() / n[0]]
//!     })?,
//! )?;
//!
//! // Only "m" and what it reads are computed.
//! let lazy = LazyEvaluator::with_graph(&graph);
//! assert_eq!(lazy.solve("m")?, ("m".to_string(), vec![3.0]));
//!
//! // Every vertex, in declaration order.
//! let eager = EagerEvaluator::with_graph(&graph);
//! let names: Vec<_> = eager.solve()?.into_iter().map(|(name, _)| name).collect();
//! assert_eq!(names, ["xs", "n", "m"]);
//! # Ok::<(), lazyeager_core::GraphError>(())
//! ```

pub mod error;
pub mod eval;
pub mod graph;
pub mod solve;

pub use error::{GraphError, Result};
pub use eval::{EagerEvaluator, Evaluator, LazyEvaluator, Solution};
pub use graph::{Graph, Node, NodeState};
pub use solve::{Solver, SolverConfig};
