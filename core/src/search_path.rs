//! `SearchPath` — A compiled pattern plus the callback it fires
//!
//! [`PathPattern`] is the non-generic half: it decides, for a given depth and
//! ordinal, whether the current value satisfies the pattern and whether the
//! pattern is terminal there. [`SearchPath`] binds a pattern to a callback.

use crate::{Cursor, MatchConfig, PathComponent, ValueView};
use std::fmt::{self, Debug};

/// Callback invoked when a search path matches.
///
/// Receives the cursor positioned on the matched value and the caller's context.
/// Returns how many enclosing containers the extractor should leave before
/// resuming, counted relative to where extraction began (`0` continues normally).
pub type Callback<C, Ctx> =
    Box<dyn Fn(&mut C, &mut Ctx) -> Result<usize, <C as Cursor>::Error> + Send + Sync>;

/// The shape of a search path.
///
/// - `TopLevel`: every value at depth zero.
/// - `AnnotatedTopLevel`: depth-zero values carrying exactly these annotations.
/// - `Components`: one component per level below the starting depth; terminal
///   at depth `components.len()`.
///
/// # INV: Depth zero only satisfies the top-level kinds
///
/// A `Components` pattern never matches at depth zero. Its first component is
/// tested once the cursor steps into the first container.
#[derive(Debug)]
pub enum PathPattern {
    /// Matches every top-level value.
    TopLevel,
    /// Matches top-level values whose annotations equal these.
    AnnotatedTopLevel(Vec<String>),
    /// Matches the value reached by following these components.
    Components(Vec<Box<dyn PathComponent>>),
}

impl PathPattern {
    /// Does the current value satisfy this pattern at `(depth, ordinal)`?
    ///
    /// For `Components` this is a partial match: the component for `depth`
    /// matched, which says nothing about deeper levels.
    pub fn matches_at(
        &self,
        value: &dyn ValueView,
        depth: usize,
        ordinal: usize,
        config: &MatchConfig,
    ) -> bool {
        match self {
            Self::TopLevel => depth == 0,
            Self::AnnotatedTopLevel(annotations) => {
                depth == 0 && config.annotations_eq(value.annotations(), annotations)
            }
            Self::Components(components) => {
                depth > 0
                    && components
                        .get(depth - 1)
                        .is_some_and(|c| c.matches(value, ordinal, config))
            }
        }
    }

    /// Is a match at `depth` complete, with nothing left to descend into?
    #[must_use]
    pub fn is_terminal_at(&self, depth: usize) -> bool {
        match self {
            Self::TopLevel | Self::AnnotatedTopLevel(_) => depth == 0,
            Self::Components(components) => depth == components.len(),
        }
    }

    /// Number of levels below the starting depth this pattern reaches.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::TopLevel | Self::AnnotatedTopLevel(_) => 0,
            Self::Components(components) => components.len(),
        }
    }

    /// Returns `true` for the two top-level kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A pattern plus the callback fired when it matches.
///
/// Immutable once built. Shared read-only across any number of traversals.
pub struct SearchPath<C: Cursor, Ctx> {
    pattern: PathPattern,
    callback: Callback<C, Ctx>,
}

impl<C: Cursor, Ctx> SearchPath<C, Ctx> {
    /// Create a search path.
    pub fn new<F>(pattern: PathPattern, callback: F) -> Self
    where
        F: Fn(&mut C, &mut Ctx) -> Result<usize, C::Error> + Send + Sync + 'static,
    {
        Self::from_boxed(pattern, Box::new(callback))
    }

    /// Create a search path from an already boxed callback.
    #[must_use]
    pub fn from_boxed(pattern: PathPattern, callback: Callback<C, Ctx>) -> Self {
        Self { pattern, callback }
    }

    /// The pattern this path matches.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Invoke the callback.
    ///
    /// # Errors
    ///
    /// Returns whatever the callback returns.
    pub fn call(&self, cursor: &mut C, ctx: &mut Ctx) -> Result<usize, C::Error> {
        (self.callback)(cursor, ctx)
    }
}

impl<C: Cursor, Ctx> Debug for SearchPath<C, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchPath")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
