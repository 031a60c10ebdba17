//! `PathExtractorBuilder` — Collects search paths and options, then freezes them
//!
//! Everything that can be wrong with a path is caught here, before any
//! traversal runs. The built [`PathExtractor`] is immutable.

use crate::{
    parse_path, Cursor, MatchConfig, PathComponent, PathError, PathExtractor, PathPattern,
    SearchPath, MAX_PATH_COMPONENTS,
};

/// Builder for [`PathExtractor`].
///
/// # Example
///
/// ```
/// use pathex::prelude::*;
///
/// let extractor = PathExtractorBuilder::<TreeCursor, usize>::new()
///     .match_case_insensitive(true)
///     .with_search_path("(Title)", |_cursor: &mut TreeCursor, count: &mut usize| {
///         *count += 1;
///         Ok(0)
///     })
///     .unwrap()
///     .build();
///
/// let mut cursor = TreeCursor::new(vec![
///     Element::structure([("title", Element::string("a"))]),
///     Element::structure([("TITLE", Element::string("b"))]),
/// ]);
/// let mut count = 0;
/// extractor.extract_with(&mut cursor, &mut count).unwrap();
/// assert_eq!(count, 2);
/// ```
pub struct PathExtractorBuilder<C: Cursor, Ctx = ()> {
    config: MatchConfig,
    search_paths: Vec<SearchPath<C, Ctx>>,
}

impl<C: Cursor, Ctx> Default for PathExtractorBuilder<C, Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cursor, Ctx> PathExtractorBuilder<C, Ctx> {
    /// Create an empty builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatchConfig::default(),
            search_paths: Vec::new(),
        }
    }

    /// Allow extraction to start on a cursor below the top level.
    #[must_use]
    pub fn match_relative_paths(mut self, enabled: bool) -> Self {
        self.config.match_relative_paths = enabled;
        self
    }

    /// Compare field names and annotations ignoring case.
    #[must_use]
    pub fn match_case_insensitive(mut self, enabled: bool) -> Self {
        self.config.match_case_insensitive = enabled;
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a path written in the textual syntax (see [`parse_path`]).
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] if the text does not parse, or
    /// [`PathError::PathTooLong`] if it has too many components.
    pub fn with_search_path<F>(self, path: &str, callback: F) -> Result<Self, PathError>
    where
        F: Fn(&mut C, &mut Ctx) -> Result<usize, C::Error> + Send + Sync + 'static,
    {
        let pattern = parse_path(path)?;
        self.with_pattern(pattern, callback)
    }

    /// Register a path given as components. An empty list is the top-level path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PathTooLong`] if there are too many components.
    pub fn with_components<F>(
        self,
        components: Vec<Box<dyn PathComponent>>,
        callback: F,
    ) -> Result<Self, PathError>
    where
        F: Fn(&mut C, &mut Ctx) -> Result<usize, C::Error> + Send + Sync + 'static,
    {
        self.with_pattern(PathPattern::Components(components), callback)
    }

    /// Register a top-level path that requires exactly these annotations.
    #[must_use]
    pub fn with_annotated_top_level<F, I, S>(mut self, annotations: I, callback: F) -> Self
    where
        F: Fn(&mut C, &mut Ctx) -> Result<usize, C::Error> + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let annotations = annotations.into_iter().map(Into::into).collect();
        self.search_paths.push(SearchPath::new(
            PathPattern::AnnotatedTopLevel(annotations),
            callback,
        ));
        self
    }

    /// Register an already built pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PathTooLong`] if the pattern has more than
    /// [`MAX_PATH_COMPONENTS`] components.
    pub fn with_pattern<F>(mut self, pattern: PathPattern, callback: F) -> Result<Self, PathError>
    where
        F: Fn(&mut C, &mut Ctx) -> Result<usize, C::Error> + Send + Sync + 'static,
    {
        let pattern = normalize(pattern);
        let len = pattern.len();
        if len > MAX_PATH_COMPONENTS {
            return Err(PathError::PathTooLong {
                len,
                max: MAX_PATH_COMPONENTS,
            });
        }
        self.search_paths.push(SearchPath::new(pattern, callback));
        Ok(self)
    }

    /// Number of paths registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.search_paths.len()
    }

    /// Returns `true` if no paths are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_paths.is_empty()
    }

    /// Freeze the paths and options into an extractor.
    #[must_use]
    pub fn build(self) -> PathExtractor<C, Ctx> {
        PathExtractor::new(self.search_paths, self.config)
    }
}

#[cfg(feature = "serde")]
impl<C: Cursor, Ctx> PathExtractorBuilder<C, Ctx> {
    /// Build from an [`ExtractorConfig`](crate::ExtractorConfig).
    ///
    /// `make_callback` is called once per configured path, in order, and
    /// returns that path's callback.
    ///
    /// # Errors
    ///
    /// Returns the first [`PathError`] among the configured paths.
    pub fn from_config<F, G>(
        config: &crate::ExtractorConfig,
        mut make_callback: G,
    ) -> Result<Self, PathError>
    where
        G: FnMut(&crate::SearchPathConfig) -> F,
        F: Fn(&mut C, &mut Ctx) -> Result<usize, C::Error> + Send + Sync + 'static,
    {
        config
            .paths
            .iter()
            .try_fold(Self::new().with_config(config.match_config()), |builder, path| {
                builder.with_search_path(&path.path, make_callback(path))
            })
    }
}

/// An empty component list is the top-level path.
fn normalize(pattern: PathPattern) -> PathPattern {
    match pattern {
        PathPattern::Components(components) if components.is_empty() => PathPattern::TopLevel,
        other => other,
    }
}
