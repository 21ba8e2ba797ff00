//! Graph Nodes
//!
//! This module defines the node type that lives in the computation graph: a
//! function, the ordered names of the nodes whose values it consumes, and a
//! memoized result slot.

use std::fmt::{self, Debug, Display};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::error::{GraphError, Result};

/// A node function: positional arguments in, one value (or a failure
/// message) out.
type ComputeFn<T> = dyn Fn(&[T]) -> std::result::Result<T, String> + Send + Sync;

/// Vertex name used in errors when a node is computed outside a graph.
const UNNAMED: &str = "<unnamed>";

/// Evaluation state of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState<T> {
    /// The function has not produced a value yet.
    NotComputed,

    /// The memoized value.
    Computed(T),

    /// The most recent call to the function failed.
    ///
    /// A failed node is not considered computed and is retried on the next
    /// resolution.
    Failed(GraphError),
}

impl<T> NodeState<T> {
    /// Whether this state holds a value.
    pub fn is_computed(&self) -> bool {
        matches!(self, NodeState::Computed(_))
    }
}

/// A computation in the graph.
///
/// The function, its dependency names and its arity are fixed at
/// construction. The result slot moves from `NotComputed` to `Computed` the
/// first time the node is resolved successfully.
pub struct Node<T> {
    /// The computation function.
    func: Box<ComputeFn<T>>,

    /// Names of the nodes whose values are passed to `func`, in argument
    /// order. May be empty and may contain duplicates.
    dependencies: Vec<String>,

    /// Number of positional arguments `func` accepts.
    arity: usize,

    /// Memoized result.
    state: RwLock<NodeState<T>>,

    /// Serializes running `func` and storing its result.
    compute_lock: Mutex<()>,
}

/// How [`Node::compute_once`] produced its value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolution<T> {
    /// The function ran and its value was stored.
    Computed(T),

    /// Another caller stored a value first.
    Memoized(T),
}

impl<T> Node<T>
where
    T: Clone + 'static,
{
    /// Create a node from a function over a slice of dependency values.
    ///
    /// The node's arity is the number of dependency names.
    pub fn new<I, S, F>(dependencies: I, func: F) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[T]) -> T + Send + Sync + 'static,
    {
        let dependencies = collect_dependencies(dependencies)?;
        let arity = dependencies.len();
        Ok(Self::from_parts(dependencies, arity, move |args| Ok(func(args))))
    }

    /// Create a node from a function that can fail.
    ///
    /// A returned error surfaces as [`GraphError::Compute`] from the solver.
    pub fn try_new<I, S, F, E>(dependencies: I, func: F) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[T]) -> std::result::Result<T, E> + Send + Sync + 'static,
        E: Display,
    {
        let dependencies = collect_dependencies(dependencies)?;
        let arity = dependencies.len();
        Ok(Self::from_parts(dependencies, arity, move |args| {
            func(args).map_err(|e| e.to_string())
        }))
    }

    /// Create a node whose function declares an explicit arity.
    ///
    /// Fails with [`GraphError::InvalidArgument`] if the number of dependency
    /// names differs from `arity`.
    pub fn with_arity<I, S, F>(arity: usize, dependencies: I, func: F) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[T]) -> T + Send + Sync + 'static,
    {
        let dependencies = collect_dependencies(dependencies)?;
        if dependencies.len() != arity {
            return Err(GraphError::invalid(format!(
                "function takes {} arguments but {} dependencies were declared",
                arity,
                dependencies.len()
            )));
        }
        Ok(Self::from_parts(dependencies, arity, move |args| Ok(func(args))))
    }

    /// Create a node with no dependencies.
    pub fn source<F>(func: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_parts(Vec::new(), 0, move |_| Ok(func()))
    }

    /// Create a node that always yields `value`.
    pub fn constant(value: T) -> Self
    where
        T: Send + Sync,
    {
        Self::source(move || value.clone())
    }

    /// Create a node with a single dependency.
    pub fn map<S, F>(dependency: S, func: F) -> Result<Self>
    where
        S: Into<String>,
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        let dependencies = collect_dependencies([dependency])?;
        // `compute` checks the arity before calling in.
        Ok(Self::from_parts(dependencies, 1, move |args| Ok(func(&args[0]))))
    }

    /// Create a node with two dependencies.
    pub fn zip<A, B, F>(first: A, second: B, func: F) -> Result<Self>
    where
        A: Into<String>,
        B: Into<String>,
        F: Fn(&T, &T) -> T + Send + Sync + 'static,
    {
        let pair: [String; 2] = [first.into(), second.into()];
        let dependencies = collect_dependencies(pair)?;
        Ok(Self::from_parts(dependencies, 2, move |args| Ok(func(&args[0], &args[1]))))
    }

    fn from_parts<F>(dependencies: Vec<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[T]) -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
            dependencies,
            arity,
            state: RwLock::new(NodeState::NotComputed),
            compute_lock: Mutex::new(()),
        }
    }

    /// Run the function on `args` and store the value as the node's result.
    ///
    /// Overwrites any previous result. Fails with
    /// [`GraphError::InvalidArgument`] if `args` does not match the arity.
    pub fn compute(&self, args: &[T]) -> Result<T> {
        let _guard = self.compute_lock.lock();
        self.run(UNNAMED, args)
    }

    /// Compute the node unless it already holds a value.
    ///
    /// The check, the call and the store happen under the node's compute
    /// lock, so the function runs at most once even when several solvers
    /// share the graph. The lock is not held while dependencies resolve.
    pub(crate) fn compute_once(&self, vertex: &str, args: &[T]) -> Result<Resolution<T>> {
        let _guard = self.compute_lock.lock();
        if let Some(value) = self.result() {
            trace!(vertex, "computed while waiting for the lock");
            return Ok(Resolution::Memoized(value));
        }
        self.run(vertex, args).map(Resolution::Computed)
    }

    fn run(&self, vertex: &str, args: &[T]) -> Result<T> {
        if args.len() != self.arity {
            return Err(GraphError::invalid(format!(
                "vertex \"{}\" {}",
                vertex,
                arity_message(self.arity, args.len())
            )));
        }

        debug!(vertex, arity = self.arity, "computing vertex");

        match (self.func)(args) {
            Ok(value) => {
                *self.state.write() = NodeState::Computed(value.clone());
                Ok(value)
            }
            Err(message) => {
                let err = GraphError::Compute {
                    vertex: vertex.to_string(),
                    message,
                };
                *self.state.write() = NodeState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Clone of the memoized value, if computed.
    pub fn result(&self) -> Option<T> {
        match &*self.state.read() {
            NodeState::Computed(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Snapshot of the evaluation state.
    pub fn state(&self) -> NodeState<T> {
        self.state.read().clone()
    }
}

impl<T> Node<T> {
    /// Get the dependency names in argument order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Get the number of arguments the function accepts.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Check if the node holds a value.
    pub fn is_computed(&self) -> bool {
        self.state.read().is_computed()
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("dependencies", &self.dependencies)
            .field("arity", &self.arity)
            .field("state", &*self.state.read())
            .finish()
    }
}

fn collect_dependencies<I, S>(dependencies: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    dependencies
        .into_iter()
        .map(|name| {
            let name = name.into();
            if name.is_empty() {
                Err(GraphError::invalid("dependency name is empty"))
            } else {
                Ok(name)
            }
        })
        .collect()
}

fn arity_message(expected: usize, got: usize) -> String {
    format!("expects {} arguments, got {}", expected, got)
}
