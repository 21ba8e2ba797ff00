//! Graph Table
//!
//! The graph owns its nodes in an insertion-ordered table keyed by name.

use indexmap::IndexMap;

use super::node::Node;
use crate::error::{GraphError, Result};

/// An insertion-ordered collection of named nodes.
///
/// No integrity check runs on insertion: dangling and cyclic references are
/// reported by the solver when the graph is evaluated.
pub struct Graph<T> {
    /// All nodes in the graph, in declaration order.
    vertices: IndexMap<String, Node<T>>,
}

impl<T> Graph<T> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            vertices: IndexMap::new(),
        }
    }

    /// Bind `name` to `node`.
    ///
    /// A name that is already bound keeps its position in declaration order
    /// and the previous node is returned.
    pub fn add_vertex(
        &mut self,
        name: impl Into<String>,
        node: Node<T>,
    ) -> Result<Option<Node<T>>> {
        let name = name.into();
        if name.is_empty() {
            return Err(GraphError::invalid("vertex name is empty"));
        }
        Ok(self.vertices.insert(name, node))
    }

    /// Builder-style [`Graph::add_vertex`].
    pub fn with_vertex(mut self, name: impl Into<String>, node: Node<T>) -> Result<Self> {
        self.add_vertex(name, node)?;
        Ok(self)
    }

    /// Get the node bound to `name`.
    pub fn get_vertex(&self, name: &str) -> Option<&Node<T>> {
        self.vertices.get(name)
    }

    /// Remove a binding.
    ///
    /// The remaining vertices keep their relative order.
    pub fn remove_vertex(&mut self, name: &str) -> Option<Node<T>> {
        self.vertices.shift_remove(name)
    }

    /// Check if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    /// Vertex names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Name and node pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node<T>)> {
        self.vertices.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Get the total number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Graph<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.vertices.iter()).finish()
    }
}
