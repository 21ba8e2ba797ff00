//! Computation Graph
//!
//! This module implements the graph being evaluated: named nodes, each
//! holding a pure function and the ordered names of the nodes it reads.
//!
//! # Overview
//!
//! - A [`Node`] is a function plus its dependency names and a memoized result.
//! - A [`Graph`] maps unique names to nodes and remembers declaration order.
//!
//! If node `v` lists `m` among its dependencies, the value of `m` is passed
//! to `v`'s function at that position. Edges are only followed at evaluation
//! time, so the graph accepts dangling and cyclic references until then.

mod node;
mod table;

pub use node::{Node, NodeState};
pub(crate) use node::Resolution;
pub use table::Graph;
