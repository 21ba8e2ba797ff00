//! Active Path
//!
//! The chain of vertex names currently being resolved, innermost last.
//!
//! Each recursive resolution pushes a [`Frame`] that lives on its own stack
//! frame and points at the path below it. Nothing is shared between calls,
//! so the path is unwound on every exit, including errors.

/// A view of the active path, from the innermost frame outwards.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActivePath<'a> {
    top: Option<&'a Frame<'a>>,
}

/// One vertex being resolved.
#[derive(Debug)]
pub(crate) struct Frame<'a> {
    name: &'a str,
    below: ActivePath<'a>,
    depth: usize,
}

impl<'a> ActivePath<'a> {
    /// The empty path.
    pub fn empty() -> Self {
        Self { top: None }
    }

    /// Number of vertices on the path.
    pub fn depth(&self) -> usize {
        self.top.map_or(0, |frame| frame.depth)
    }

    /// Create a frame for `name` on top of this path.
    pub fn push(self, name: &'a str) -> Frame<'a> {
        Frame {
            name,
            below: self,
            depth: self.depth() + 1,
        }
    }

    /// Check if `name` is being resolved.
    pub fn contains(&self, name: &str) -> bool {
        self.frames().any(|frame| frame.name == name)
    }

    /// The cycle closed by reaching `name` again.
    ///
    /// Runs from the outermost occurrence of `name` to the innermost frame,
    /// with `name` repeated at the end. Returns just `[name]` if `name` is
    /// not on the path.
    pub fn cycle(&self, name: &str) -> Vec<String> {
        let mut cycle = vec![name.to_string()];
        for frame in self.frames() {
            cycle.push(frame.name.to_string());
            if frame.name == name {
                break;
            }
        }
        cycle.reverse();
        cycle
    }

    /// Names on the path, outermost first.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<_> = self.frames().map(|frame| frame.name).collect();
        names.reverse();
        names
    }

    fn frames(&self) -> impl Iterator<Item = &'a Frame<'a>> {
        std::iter::successors(self.top, |frame| frame.below.top)
    }
}

impl<'a> Frame<'a> {
    /// The path with this frame on top.
    pub fn path(&'a self) -> ActivePath<'a> {
        ActivePath { top: Some(self) }
    }
}
