//! Error types
//!
//! Every fallible operation in the crate reports a [`GraphError`]. Errors are
//! raised where they are detected and propagate unchanged to the caller of
//! the top-level evaluation; the core never retries or recovers.

use thiserror::Error;

/// Errors produced while building or evaluating a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Malformed construction or lookup input: an empty name, an arity
    /// mismatch, or an evaluator with no graph bound.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested or dependency name has no binding in the graph.
    #[error("there is no vertex \"{0}\" in the graph")]
    UnknownVertex(String),

    /// A name was reached while it was already being resolved.
    ///
    /// `path` holds the full cycle, starting and ending with the same name.
    #[error("cyclic graph detected ({})", .path.join(" => "))]
    CyclicGraph { path: Vec<String> },

    /// A fallible node function returned an error.
    #[error("vertex \"{vertex}\" failed to compute: {message}")]
    Compute { vertex: String, message: String },

    /// The chain of unresolved dependencies grew past the configured limit.
    #[error("dependency chain exceeds maximum depth of {limit} at vertex \"{vertex}\"")]
    DepthExceeded { vertex: String, limit: usize },
}

impl GraphError {
    /// Shorthand for [`GraphError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// The cycle carried by a [`GraphError::CyclicGraph`], if this is one.
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            Self::CyclicGraph { path } => Some(path),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
