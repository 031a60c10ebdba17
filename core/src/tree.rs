//! In-memory annotated document model and a [`Cursor`] over it.
//!
//! [`TreeCursor`] is the reference reader: it owns a sequence of top-level
//! [`Element`]s and walks them with the same forward-only protocol a streaming
//! reader would. With feature `json`, elements convert to and from
//! `serde_json::Value`.
//!
//! # JSON annotation convention
//!
//! JSON has no annotations, so an object with exactly the keys `$annotations`
//! (array of strings) and `$value` is read as an annotated value:
//!
//! ```json
//! { "$annotations": ["draft"], "$value": { "title": "x" } }
//! ```

use crate::{Cursor, ValueKind, ValueView};
use std::fmt;

/// Key holding annotations in the JSON convention.
#[cfg(feature = "json")]
const ANNOTATIONS_KEY: &str = "$annotations";

/// Key holding the annotated value in the JSON convention.
#[cfg(feature = "json")]
const VALUE_KEY: &str = "$value";

/// A value with its type annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Annotations, in declaration order.
    pub annotations: Vec<String>,
    /// The value itself.
    pub node: Node,
}

/// The value part of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    String(String),
    /// Ordered children.
    List(Vec<Element>),
    /// Named children, in document order. Duplicate names are allowed.
    Struct(Vec<(String, Element)>),
}

impl Node {
    /// The [`ValueKind`] of this node.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::List(_) => ValueKind::List,
            Self::Struct(_) => ValueKind::Struct,
        }
    }

    /// Number of children (zero for scalars).
    fn child_count(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Struct(fields) => fields.len(),
            _ => 0,
        }
    }

    /// Child at `index`, with its field name when this is a struct.
    fn child(&self, index: usize) -> Option<(Option<&str>, &Element)> {
        match self {
            Self::List(items) => items.get(index).map(|e| (None, e)),
            Self::Struct(fields) => fields
                .get(index)
                .map(|(name, e)| (Some(name.as_str()), e)),
            _ => None,
        }
    }
}

impl Element {
    /// Wrap a node with no annotations.
    #[must_use]
    pub fn new(node: Node) -> Self {
        Self {
            annotations: Vec::new(),
            node,
        }
    }

    /// A null element.
    #[must_use]
    pub fn null() -> Self {
        Self::new(Node::Null)
    }

    /// A boolean element.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::new(Node::Bool(value))
    }

    /// An integer element.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::new(Node::Int(value))
    }

    /// A float element.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::new(Node::Float(value))
    }

    /// A string element.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Node::String(value.into()))
    }

    /// A list element.
    pub fn list(items: impl IntoIterator<Item = Element>) -> Self {
        Self::new(Node::List(items.into_iter().collect()))
    }

    /// A struct element.
    pub fn structure<K: Into<String>>(fields: impl IntoIterator<Item = (K, Element)>) -> Self {
        Self::new(Node::Struct(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Replace this element's annotations (builder pattern).
    #[must_use]
    pub fn annotated<S: Into<String>>(mut self, annotations: impl IntoIterator<Item = S>) -> Self {
        self.annotations = annotations.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(feature = "json")]
impl From<&serde_json::Value> for Element {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::int(i),
                None => Self::float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::string(s.as_str()),
            Value::Array(items) => Self::list(items.iter().map(Self::from)),
            Value::Object(map) => {
                if let Some((annotations, inner)) = annotated_parts(map) {
                    return Self::from(inner).annotated(annotations);
                }
                Self::structure(map.iter().map(|(k, v)| (k.as_str(), Self::from(v))))
            }
        }
    }
}

/// Split `{"$annotations": [..], "$value": v}` into its parts.
#[cfg(feature = "json")]
fn annotated_parts(
    map: &serde_json::Map<String, serde_json::Value>,
) -> Option<(Vec<&str>, &serde_json::Value)> {
    if map.len() != 2 {
        return None;
    }
    let annotations = map
        .get(ANNOTATIONS_KEY)?
        .as_array()?
        .iter()
        .map(serde_json::Value::as_str)
        .collect::<Option<Vec<_>>>()?;
    let inner = map.get(VALUE_KEY)?;
    Some((annotations, inner))
}

#[cfg(feature = "json")]
impl Element {
    /// Convert to JSON, writing annotations with the `$annotations` convention.
    ///
    /// Non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        let value = match &self.node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Int(i) => Value::from(*i),
            Node::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Node::String(s) => Value::String(s.clone()),
            Node::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Node::Struct(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        };

        if self.annotations.is_empty() {
            value
        } else {
            serde_json::json!({
                ANNOTATIONS_KEY: self.annotations,
                VALUE_KEY: value,
            })
        }
    }
}

/// Misuse of a [`TreeCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeCursorError {
    /// `step_in` on a value that is not a list or struct.
    NotAContainer {
        /// Kind of the current value.
        kind: ValueKind,
    },
    /// `step_in` with no current value.
    NoCurrentValue,
    /// `step_out` at depth zero.
    AtTopLevel,
}

impl fmt::Display for TreeCursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAContainer { kind } => {
                write!(f, "cannot step into a {kind:?} value")
            }
            Self::NoCurrentValue => write!(f, "cannot step in: cursor is not on a value"),
            Self::AtTopLevel => write!(f, "cannot step out: cursor is at the top level"),
        }
    }
}

impl std::error::Error for TreeCursorError {}

/// A [`Cursor`] over an owned sequence of top-level [`Element`]s.
///
/// # Example
///
/// ```
/// use pathex::{Cursor, Element, TreeCursor, ValueView};
///
/// let mut cursor = TreeCursor::new(vec![
///     Element::structure([("a", Element::int(1).annotated(["x"]))]),
/// ]);
/// cursor.next().unwrap();
/// cursor.step_in().unwrap();
/// cursor.next().unwrap();
/// assert_eq!(cursor.field_name(), Some("a"));
/// assert_eq!(cursor.annotations(), ["x".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct TreeCursor {
    /// Top-level values, held as one synthetic list.
    root: Node,
    /// Child index of every container stepped into, outermost first.
    path: Vec<usize>,
    /// Position within the current container. `None` before the first `next()`.
    position: Option<usize>,
}

impl TreeCursor {
    /// Create a cursor positioned before the first top-level value.
    #[must_use]
    pub fn new(values: Vec<Element>) -> Self {
        Self {
            root: Node::List(values),
            path: Vec::new(),
            position: None,
        }
    }

    /// The container the cursor is currently inside.
    fn container(&self) -> &Node {
        let mut node = &self.root;
        for &index in &self.path {
            match node.child(index) {
                Some((_, element)) => node = &element.node,
                None => break,
            }
        }
        node
    }

    fn current(&self) -> Option<(Option<&str>, &Element)> {
        self.position.and_then(|p| self.container().child(p))
    }

    /// The element the cursor is positioned on.
    #[must_use]
    pub fn current_element(&self) -> Option<&Element> {
        self.current().map(|(_, element)| element)
    }
}

impl ValueView for TreeCursor {
    fn kind(&self) -> Option<ValueKind> {
        self.current_element().map(|e| e.node.kind())
    }

    fn field_name(&self) -> Option<&str> {
        self.current().and_then(|(name, _)| name)
    }

    fn annotations(&self) -> &[String] {
        self.current_element()
            .map_or(&[], |e| e.annotations.as_slice())
    }
}

impl Cursor for TreeCursor {
    type Error = TreeCursorError;

    fn depth(&self) -> usize {
        self.path.len()
    }

    fn next(&mut self) -> Result<Option<ValueKind>, Self::Error> {
        let count = self.container().child_count();
        let next = self.position.map_or(0, |p| (p + 1).min(count));
        self.position = Some(next);
        Ok(self.kind())
    }

    fn step_in(&mut self) -> Result<(), Self::Error> {
        let kind = self.kind().ok_or(TreeCursorError::NoCurrentValue)?;
        if !kind.is_container() {
            return Err(TreeCursorError::NotAContainer { kind });
        }
        if let Some(position) = self.position {
            self.path.push(position);
        }
        self.position = None;
        Ok(())
    }

    fn step_out(&mut self) -> Result<(), Self::Error> {
        let position = self.path.pop().ok_or(TreeCursorError::AtTopLevel)?;
        self.position = Some(position);
        Ok(())
    }
}
