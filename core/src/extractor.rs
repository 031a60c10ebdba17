//! `PathExtractor` — Single-pass depth-first matching engine
//!
//! The extractor walks a cursor once. At every depth it scans siblings,
//! evaluates each active search path, fires callbacks on terminal matches,
//! and descends into containers carrying only the paths still in play.

use crate::tracker::Tracker;
use crate::{Cursor, ExtractionError, MatchConfig, SearchPath, ValueKind, ValueView};
use std::fmt::{self, Debug};

/// The matching engine.
///
/// Built by [`PathExtractorBuilder`](crate::PathExtractorBuilder). Immutable after
/// construction; every call to [`extract_with`](Self::extract_with) owns its own
/// traversal state, so one extractor can serve many threads as long as each
/// traversal uses its own cursor.
///
/// # Type Parameters
///
/// - `C`: The cursor type being walked
/// - `Ctx`: Context passed through to every callback (defaults to `()`)
///
/// # INV: Callbacks fire in document order
///
/// Depth-first, sibling order, exactly once per terminal match. A callback that
/// requests a step-out suppresses every callback in the values it skips.
///
/// # INV: Cursor depth is restored
///
/// On success the cursor is back at the depth it had when `extract_with` was called,
/// positioned after the last value it consumed.
pub struct PathExtractor<C: Cursor, Ctx = ()> {
    search_paths: Vec<SearchPath<C, Ctx>>,
    config: MatchConfig,
    /// Longest component path, used to size the tracker.
    max_path_len: usize,
}

impl<C: Cursor, Ctx> PathExtractor<C, Ctx> {
    /// Create an extractor from paths the builder has already validated.
    #[must_use]
    pub(crate) fn new(search_paths: Vec<SearchPath<C, Ctx>>, config: MatchConfig) -> Self {
        let max_path_len = search_paths
            .iter()
            .map(|sp| sp.pattern().len())
            .max()
            .unwrap_or(0);

        Self {
            search_paths,
            config,
            max_path_len,
        }
    }

    /// The options this extractor was built with.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Registered search paths, in registration order.
    #[must_use]
    pub fn search_paths(&self) -> &[SearchPath<C, Ctx>] {
        &self.search_paths
    }

    /// Number of registered search paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.search_paths.len()
    }

    /// Returns `true` if no search paths are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_paths.is_empty()
    }

    /// Component count of the longest registered path.
    #[must_use]
    pub fn max_path_len(&self) -> usize {
        self.max_path_len
    }

    /// Walk the cursor with a default-constructed context.
    ///
    /// # Errors
    ///
    /// See [`extract_with`](Self::extract_with).
    pub fn extract(&self, cursor: &mut C) -> Result<(), ExtractionError<C::Error>>
    where
        Ctx: Default,
    {
        self.extract_with(cursor, &mut Ctx::default())
    }

    /// Walk every value from the cursor's position to the end of its current
    /// container (or stream), invoking callbacks for matching values.
    ///
    /// With no registered paths this does nothing, not even advance the cursor.
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::NotAtTopLevel`] if the cursor is below depth zero and
    ///   relative paths are disabled. Reported before the cursor moves.
    /// - [`ExtractionError::DepthMismatch`] if a callback returns with the cursor at
    ///   a different depth.
    /// - [`ExtractionError::StepOutTooFar`] if a callback asks to step out past the
    ///   starting depth.
    /// - [`ExtractionError::Cursor`] for any cursor or callback failure.
    pub fn extract_with(
        &self,
        cursor: &mut C,
        ctx: &mut Ctx,
    ) -> Result<(), ExtractionError<C::Error>> {
        let depth = cursor.depth();
        if depth != 0 && !self.config.match_relative_paths {
            return Err(ExtractionError::NotAtTopLevel { depth });
        }

        if self.search_paths.is_empty() {
            return Ok(());
        }

        let mut tracker = Tracker::new(&self.search_paths, self.max_path_len, depth);
        self.match_recursive(cursor, &mut tracker, ctx)?;
        Ok(())
    }

    /// Scan the siblings at the tracker's current depth.
    ///
    /// Returns how many more levels the caller must unwind (0 = resume normally).
    fn match_recursive<'a>(
        &'a self,
        cursor: &mut C,
        tracker: &mut Tracker<'a, C, Ctx>,
        ctx: &mut Ctx,
    ) -> Result<usize, ExtractionError<C::Error>> {
        let depth = tracker.current_depth();
        let mut ordinal = 0;

        while cursor.next().map_err(ExtractionError::Cursor)?.is_some() {
            let mut partial_matches = Vec::new();

            for &search_path in tracker.active_paths() {
                let pattern = search_path.pattern();
                let matched = pattern.matches_at(&*cursor, depth, ordinal, &self.config);
                let terminal = pattern.is_terminal_at(depth);

                if matched && terminal {
                    let step_out =
                        invoke_callback(cursor, search_path, tracker.initial_depth(), ctx)?;
                    if step_out > 0 {
                        tracing::debug!(target: "pathex", depth, step_out, "stepping out");
                        return Ok(step_out - 1);
                    }
                }

                // Depth zero: every non-terminal path is still open.
                if !terminal && (depth == 0 || matched) {
                    partial_matches.push(search_path);
                }
            }

            // Callbacks may have moved the cursor to a sibling; re-read the kind.
            let is_container = cursor.kind().is_some_and(ValueKind::is_container);
            if is_container && !partial_matches.is_empty() {
                tracker.push(partial_matches);
                cursor.step_in().map_err(ExtractionError::Cursor)?;
                let step_out = self.match_recursive(cursor, tracker, ctx)?;
                cursor.step_out().map_err(ExtractionError::Cursor)?;
                tracker.pop();

                if step_out > 0 {
                    return Ok(step_out - 1);
                }
            }

            ordinal += 1;
        }

        Ok(0)
    }
}

/// Run a callback and check the cursor protocol around it.
fn invoke_callback<C: Cursor, Ctx>(
    cursor: &mut C,
    search_path: &SearchPath<C, Ctx>,
    initial_depth: usize,
    ctx: &mut Ctx,
) -> Result<usize, ExtractionError<C::Error>> {
    let expected = cursor.depth();
    tracing::trace!(
        target: "pathex",
        depth = expected,
        pattern = ?search_path.pattern(),
        "invoking callback"
    );

    let step_out = search_path
        .call(cursor, ctx)
        .map_err(ExtractionError::Cursor)?;

    let actual = cursor.depth();
    if actual != expected {
        return Err(ExtractionError::DepthMismatch { expected, actual });
    }

    // Never step out past where the traversal started.
    let relative_depth = actual.saturating_sub(initial_depth);
    if step_out > relative_depth {
        return Err(ExtractionError::StepOutTooFar {
            requested: step_out,
            relative_depth,
        });
    }

    Ok(step_out)
}

impl<C: Cursor, Ctx> Debug for PathExtractor<C, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathExtractor")
            .field("search_paths_len", &self.search_paths.len())
            .field("config", &self.config)
            .field("max_path_len", &self.max_path_len)
            .finish()
    }
}
