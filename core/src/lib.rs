//! pathex - single-pass streaming path extractor
//!
//! Given a forward-only [`Cursor`] over a hierarchical, self-describing data stream and a set
//! of search paths, the extractor walks the stream once, depth-first, and invokes a callback
//! exactly when a value matches one of the registered paths.
//!
//! # Architecture
//!
//! - [`Cursor`] — Forward-only reader capability (depth, next, step in/out)
//! - [`ValueView`] — Read-only view of the current value (kind, field name, annotations)
//! - [`PathComponent`] — One step of a path (field, index, wildcard, annotated)
//! - [`PathPattern`] — Top-level, annotated top-level, or a component sequence (non-generic)
//! - [`SearchPath<C, Ctx>`] — A pattern plus its callback
//! - [`PathExtractor<C, Ctx>`] — The matching engine, immutable and shareable after build
//!
//! # Key Design Insights
//!
//! 1. **Patterns are non-generic**: `PathPattern` never sees the cursor type, so the same
//!    pattern set works for any reader.
//!
//! 2. **Tracker is call-scoped**: every `extract` call owns its own stack of active paths.
//!    A built extractor can be shared across threads, one cursor per traversal.
//!
//! 3. **Step-out is a return value**: callbacks return how many enclosing containers to
//!    leave, threaded back through the recursion as a plain integer.
//!
//! # Example
//!
//! ```
//! use pathex::prelude::*;
//!
//! let extractor = PathExtractorBuilder::<TreeCursor, Vec<i64>>::new()
//!     .with_search_path("(a 0)", |cursor: &mut TreeCursor, hits: &mut Vec<i64>| {
//!         if let Some(Node::Int(v)) = cursor.current_element().map(|e| &e.node) {
//!             hits.push(*v);
//!         }
//!         Ok(0)
//!     })
//!     .unwrap()
//!     .build();
//!
//! let mut cursor = TreeCursor::new(vec![Element::structure([
//!     ("a", Element::list([Element::int(1), Element::int(2)])),
//!     ("b", Element::list([Element::int(3)])),
//! ])]);
//!
//! let mut hits = Vec::new();
//! extractor.extract_with(&mut cursor, &mut hits).unwrap();
//! assert_eq!(hits, vec![1]);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod builder;
mod component;
mod config;
mod cursor;
mod extractor;
mod path_syntax;
mod search_path;
mod tracker;
mod tree;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use builder::PathExtractorBuilder;
pub use config::MatchConfig;
pub use cursor::{Cursor, ValueKind, ValueView};
pub use extractor::PathExtractor;
pub use path_syntax::parse_path;
pub use search_path::{Callback, PathPattern, SearchPath};

// Components
pub use component::{
    AnnotatedComponent, FieldComponent, IndexComponent, PathComponent, WildcardComponent,
};

// Reference cursor
pub use tree::{Element, Node, TreeCursor, TreeCursorError};

// Config types (feature-gated)
#[cfg(feature = "serde")]
pub use config::{ExtractorConfig, SearchPathConfig};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use pathex::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Components
        AnnotatedComponent,
        // Cursors
        Cursor,
        Element,
        // Errors
        ExtractionError,
        FieldComponent,
        IndexComponent,
        // Config
        MatchConfig,
        Node,
        PathComponent,
        PathError,
        // Engine
        PathExtractor,
        PathExtractorBuilder,
        PathPattern,
        SearchPath,
        TreeCursor,
        TreeCursorError,
        ValueKind,
        ValueView,
        WildcardComponent,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of components in a single search path.
///
/// The engine recurses at most once per component, so this bounds the stack
/// depth of a traversal. Checked when a path is added to the builder.
pub const MAX_PATH_COMPONENTS: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from search path construction.
///
/// These are caught while building the extractor, never during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The textual path could not be parsed.
    InvalidPath {
        /// The path text as given.
        path: String,
        /// Byte offset where parsing failed.
        offset: usize,
        /// What was wrong at that offset.
        reason: String,
    },
    /// A path has more components than [`MAX_PATH_COMPONENTS`].
    PathTooLong {
        /// Number of components in the path.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath {
                path,
                offset,
                reason,
            } => {
                write!(f, "invalid search path \"{path}\" at offset {offset}: {reason}")
            }
            Self::PathTooLong { len, max } => {
                write!(
                    f,
                    "search path has {len} components, but maximum allowed is {max}"
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Errors surfaced by [`PathExtractor::extract_with`].
///
/// Everything except [`Cursor`](Self::Cursor) is a usage fault: the traversal
/// is aborted and the cursor is left wherever the fault was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError<E> {
    /// The cursor was not at depth zero and relative paths are disabled.
    NotAtTopLevel {
        /// Depth of the cursor when `extract` was called.
        depth: usize,
    },
    /// A callback returned with the cursor at a different depth than it was given.
    DepthMismatch {
        /// Cursor depth when the callback was invoked.
        expected: usize,
        /// Cursor depth when the callback returned.
        actual: usize,
    },
    /// A callback asked to step out past the depth the traversal started at.
    StepOutTooFar {
        /// Step-out count returned by the callback.
        requested: usize,
        /// Cursor depth relative to the start of the traversal.
        relative_depth: usize,
    },
    /// The cursor (or a callback reading from it) failed.
    Cursor(E),
}

impl<E: std::fmt::Display> std::fmt::Display for ExtractionError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAtTopLevel { depth } => {
                write!(
                    f,
                    "cursor must be at depth zero, it was at {depth}; \
                     enable relative paths to start deeper"
                )
            }
            Self::DepthMismatch { expected, actual } => {
                write!(
                    f,
                    "cursor must be at the same depth when a callback returns: \
                     expected {expected}, found {actual}"
                )
            }
            Self::StepOutTooFar {
                requested,
                relative_depth,
            } => {
                write!(
                    f,
                    "callback requested {requested} step-outs, but the cursor is only \
                     {relative_depth} levels below where extraction started"
                )
            }
            Self::Cursor(e) => write!(f, "cursor error: {e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ExtractionError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cursor(e) => Some(e),
            _ => None,
        }
    }
}
