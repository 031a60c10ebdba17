//! pathex-test: Test domain for conformance testing
//!
//! Provides a hit-recording context and callbacks for driving a
//! [`PathExtractor`](pathex::PathExtractor) over a [`TreeCursor`](pathex::TreeCursor).
//!
//! # Example
//!
//! ```
//! use pathex_test::prelude::*;
//!
//! let extractor = PathExtractorBuilder::<TreeCursor, Recorder>::new()
//!     .with_search_path("(a *)", recording_callback("a", 0))
//!     .unwrap()
//!     .build();
//!
//! let mut cursor = TreeCursor::new(vec![Element::structure([(
//!     "a",
//!     Element::list([Element::int(1), Element::int(2)]),
//! )])]);
//! let mut recorder = Recorder::new();
//! extractor.extract_with(&mut cursor, &mut recorder).unwrap();
//!
//! assert_eq!(recorder.labels(), vec!["a", "a"]);
//! ```

use pathex::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// One callback invocation: which path fired and on what value.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub label: String,
    pub value: Element,
    /// Cursor depth when the callback ran.
    pub depth: usize,
}

/// Test context: records every hit in firing order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    hits: Vec<Hit>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit.
    pub fn record(&mut self, label: impl Into<String>, value: Element, depth: usize) {
        self.hits.push(Hit {
            label: label.into(),
            value,
            depth,
        });
    }

    /// All hits, in firing order.
    #[must_use]
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Labels of all hits, in firing order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.label.as_str()).collect()
    }

    /// Consume the recorder and return its hits.
    #[must_use]
    pub fn into_hits(self) -> Vec<Hit> {
        self.hits
    }
}

/// A callback recording the current value under `label`, then requesting `step_out`.
pub fn recording_callback(
    label: impl Into<String>,
    step_out: usize,
) -> impl Fn(&mut TreeCursor, &mut Recorder) -> Result<usize, TreeCursorError> + Send + Sync + 'static
{
    let label = label.into();
    move |cursor: &mut TreeCursor, recorder: &mut Recorder| -> Result<usize, TreeCursorError> {
        let value = cursor
            .current_element()
            .cloned()
            .ok_or(TreeCursorError::NoCurrentValue)?;
        recorder.record(label.as_str(), value, cursor.depth());
        Ok(step_out)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{recording_callback, Hit, Recorder};
    pub use pathex::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> Element {
        Element::structure([(
            "books",
            Element::list([
                Element::structure([("title", Element::string("Dune"))]),
                Element::structure([("title", Element::string("Emma"))]),
            ]),
        )])
    }

    #[test]
    fn recorder_keeps_order() {
        let mut recorder = Recorder::new();
        recorder.record("x", Element::int(1), 0);
        recorder.record("y", Element::int(2), 1);

        assert_eq!(recorder.labels(), vec!["x", "y"]);
        assert_eq!(recorder.hits()[1].depth, 1);
        assert_eq!(recorder.into_hits().len(), 2);
    }

    #[test]
    fn recording_callback_captures_value_and_depth() {
        let extractor = PathExtractorBuilder::<TreeCursor, Recorder>::new()
            .with_search_path("(books * title)", recording_callback("title", 0))
            .unwrap()
            .build();

        let mut cursor = TreeCursor::new(vec![books()]);
        let mut recorder = Recorder::new();
        extractor.extract_with(&mut cursor, &mut recorder).unwrap();

        assert_eq!(
            recorder.hits(),
            &[
                Hit {
                    label: "title".into(),
                    value: Element::string("Dune"),
                    depth: 3,
                },
                Hit {
                    label: "title".into(),
                    value: Element::string("Emma"),
                    depth: 3,
                },
            ]
        );
    }

    #[test]
    fn recording_callback_step_out() {
        let extractor = PathExtractorBuilder::<TreeCursor, Recorder>::new()
            .with_search_path("(books * title)", recording_callback("first", 2))
            .unwrap()
            .build();

        let mut cursor = TreeCursor::new(vec![books(), books()]);
        let mut recorder = Recorder::new();
        extractor.extract_with(&mut cursor, &mut recorder).unwrap();

        // One title per top-level value: the rest of `books` is skipped.
        assert_eq!(recorder.labels(), vec!["first", "first"]);
        assert_eq!(recorder.hits()[0].value, Element::string("Dune"));
        assert_eq!(recorder.hits()[1].value, Element::string("Dune"));
    }
}
