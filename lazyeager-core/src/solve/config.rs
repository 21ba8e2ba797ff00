//! Solver configuration.

/// Tunables for a [`Solver`](super::Solver).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of vertices on the active path at once.
    ///
    /// Unlimited by default. Resolution is recursive, so a limit bounds
    /// native stack usage for long dependency chains.
    pub max_depth: Option<usize>,
}

impl SolverConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self { max_depth: None }
    }

    /// Limit the active path depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
