//! Per-traversal stack of active search paths.
//!
//! Frame `i` holds the paths still eligible at relative depth `i`; frame 0 is
//! the full set. Pure bookkeeping, no matching logic.

use crate::{Cursor, SearchPath};

/// Call-scoped traversal state, owned by exactly one `extract` call.
///
/// # INV: `stack.len() - 1 == current relative depth`
pub(crate) struct Tracker<'a, C: Cursor, Ctx> {
    stack: Vec<Vec<&'a SearchPath<C, Ctx>>>,
    initial_depth: usize,
}

impl<'a, C: Cursor, Ctx> Tracker<'a, C, Ctx> {
    /// Start a traversal with `paths` as frame 0.
    ///
    /// `max_path_len` sizes the stack: a traversal never descends further
    /// than the longest component path.
    pub(crate) fn new(
        paths: &'a [SearchPath<C, Ctx>],
        max_path_len: usize,
        initial_depth: usize,
    ) -> Self {
        let mut stack = Vec::with_capacity(max_path_len + 1);
        stack.push(paths.iter().collect());
        Self {
            stack,
            initial_depth,
        }
    }

    /// Relative depth of the frame on top.
    pub(crate) fn current_depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Cursor depth when the traversal started.
    pub(crate) fn initial_depth(&self) -> usize {
        self.initial_depth
    }

    /// Paths eligible at the current depth.
    pub(crate) fn active_paths(&self) -> &[&'a SearchPath<C, Ctx>] {
        self.stack.last().map_or(&[], Vec::as_slice)
    }

    /// Open a frame for a container being entered.
    pub(crate) fn push(&mut self, paths: Vec<&'a SearchPath<C, Ctx>>) {
        self.stack.push(paths);
    }

    /// Close the frame of the container being left.
    ///
    /// Frame 0 is never popped; the engine only pops what it pushed.
    pub(crate) fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "tracker popped below frame 0");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}
