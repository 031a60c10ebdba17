//! `PathComponent` — One step of a search path
//!
//! A component decides whether the value at the cursor's current position
//! satisfies one level of a path. Components only see the read-only
//! [`ValueView`], the value's ordinal among its siblings, and the
//! [`MatchConfig`], so the same component works with any cursor.
//!
//! # Available Components
//!
//! - [`FieldComponent`] — Field name equality
//! - [`IndexComponent`] — Position among siblings
//! - [`WildcardComponent`] — Any value
//! - [`AnnotatedComponent`] — Required annotations on top of another component

use crate::{MatchConfig, ValueView};
use std::fmt::Debug;

/// Matches one level of a search path.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a built extractor can be shared
/// across threads.
///
/// # Example
///
/// ```
/// use pathex::{Cursor, Element, FieldComponent, MatchConfig, PathComponent, TreeCursor};
///
/// let mut cursor = TreeCursor::new(vec![Element::structure([("name", Element::int(1))])]);
/// cursor.next().unwrap();
/// cursor.step_in().unwrap();
/// cursor.next().unwrap();
///
/// let component = FieldComponent::new("name");
/// assert!(component.matches(&cursor, 0, &MatchConfig::default()));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `PathComponent`",
    label = "this type cannot match a path step",
    note = "use the built-in components (FieldComponent, IndexComponent, WildcardComponent, AnnotatedComponent) or implement `matches(&self, &dyn ValueView, usize, &MatchConfig) -> bool`"
)]
pub trait PathComponent: Send + Sync + Debug {
    /// Check if the current value satisfies this step.
    ///
    /// `ordinal` is the zero-based position of the value among its siblings.
    fn matches(&self, value: &dyn ValueView, ordinal: usize, config: &MatchConfig) -> bool;
}

#[diagnostic::do_not_recommend]
impl PathComponent for Box<dyn PathComponent> {
    fn matches(&self, value: &dyn ValueView, ordinal: usize, config: &MatchConfig) -> bool {
        (**self).matches(value, ordinal, config)
    }
}

/// Matches a value by its field name.
///
/// Values without a field name (list children, top-level values) never match.
#[derive(Debug, Clone)]
pub struct FieldComponent {
    name: String,
}

impl FieldComponent {
    /// Create a field component for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the field name being matched.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PathComponent for FieldComponent {
    fn matches(&self, value: &dyn ValueView, _ordinal: usize, config: &MatchConfig) -> bool {
        value
            .field_name()
            .is_some_and(|name| config.text_eq(name, &self.name))
    }
}

/// Matches a value by its position among its siblings.
///
/// Applies to struct fields as well as list elements.
#[derive(Debug, Clone, Copy)]
pub struct IndexComponent {
    index: usize,
}

impl IndexComponent {
    /// Create an index component.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the index being matched.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl PathComponent for IndexComponent {
    fn matches(&self, _value: &dyn ValueView, ordinal: usize, _config: &MatchConfig) -> bool {
        ordinal == self.index
    }
}

/// Matches every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WildcardComponent;

impl WildcardComponent {
    /// Create a wildcard component.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PathComponent for WildcardComponent {
    fn matches(&self, _value: &dyn ValueView, _ordinal: usize, _config: &MatchConfig) -> bool {
        true
    }
}

/// Requires exact annotations in addition to an inner component.
///
/// The value's annotation sequence must equal `annotations` (same order,
/// case policy from [`MatchConfig`]) and `inner` must match.
#[derive(Debug)]
pub struct AnnotatedComponent {
    annotations: Vec<String>,
    inner: Box<dyn PathComponent>,
}

impl AnnotatedComponent {
    /// Wrap `inner` with required annotations.
    pub fn new<I, S>(annotations: I, inner: Box<dyn PathComponent>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            annotations: annotations.into_iter().map(Into::into).collect(),
            inner,
        }
    }

    /// Returns the required annotations.
    #[must_use]
    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    /// Returns the wrapped component.
    #[must_use]
    pub fn inner(&self) -> &dyn PathComponent {
        &*self.inner
    }
}

impl PathComponent for AnnotatedComponent {
    fn matches(&self, value: &dyn ValueView, ordinal: usize, config: &MatchConfig) -> bool {
        config.annotations_eq(value.annotations(), &self.annotations)
            && self.inner.matches(value, ordinal, config)
    }
}
