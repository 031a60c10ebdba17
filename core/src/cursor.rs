//! `Cursor` — Forward-only reader over a hierarchical stream
//!
//! The engine never assumes an encoding. It drives any reader that can report
//! its depth, advance to the next sibling, and step into and out of containers.
//! Path components only ever see the read-only [`ValueView`] half.

use std::fmt::Debug;

/// Classification of the value a cursor is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool,
    /// An integer.
    Int,
    /// A floating point number.
    Float,
    /// A text value.
    String,
    /// An ordered container addressed by position.
    List,
    /// A container of named fields.
    Struct,
}

impl ValueKind {
    /// Returns `true` for kinds the cursor can step into.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Struct)
    }
}

/// Read-only view of the value a cursor is currently positioned on.
///
/// This is the surface [`PathComponent`](crate::PathComponent)s match against.
/// It is object safe so components stay independent of the concrete reader.
pub trait ValueView {
    /// Kind of the current value, or `None` before the first `next()` or after
    /// the end of the current container.
    fn kind(&self) -> Option<ValueKind>;

    /// Field name of the current value when its parent is a struct.
    fn field_name(&self) -> Option<&str>;

    /// Type annotations on the current value, in declaration order.
    fn annotations(&self) -> &[String];
}

/// A forward-only reader over a hierarchical, self-describing stream.
///
/// Calls to [`step_in`](Self::step_in) and [`step_out`](Self::step_out) must be
/// balanced by whoever makes them. The extractor balances its own; callbacks must
/// balance theirs before returning.
///
/// # Example
///
/// ```
/// use pathex::{Cursor, Element, TreeCursor, ValueKind};
///
/// let mut cursor = TreeCursor::new(vec![Element::list([Element::int(1)])]);
/// assert_eq!(cursor.next().unwrap(), Some(ValueKind::List));
/// cursor.step_in().unwrap();
/// assert_eq!(cursor.depth(), 1);
/// assert_eq!(cursor.next().unwrap(), Some(ValueKind::Int));
/// assert_eq!(cursor.next().unwrap(), None);
/// cursor.step_out().unwrap();
/// assert_eq!(cursor.depth(), 0);
/// ```
pub trait Cursor: ValueView {
    /// Failure raised by the underlying reader. Propagated unchanged.
    type Error: Debug;

    /// Number of containers the cursor is currently inside.
    fn depth(&self) -> usize;

    /// Advance to the next sibling value.
    ///
    /// Returns the kind of the new current value, or `None` once the current
    /// container (or the top-level stream) is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the reader's error if the stream cannot be read.
    fn next(&mut self) -> Result<Option<ValueKind>, Self::Error>;

    /// Enter the current container. The next call to `next()` yields its first child.
    ///
    /// # Errors
    ///
    /// Returns the reader's error if the current value is not a container.
    fn step_in(&mut self) -> Result<(), Self::Error>;

    /// Leave the current container. The next call to `next()` yields the
    /// container's next sibling.
    ///
    /// # Errors
    ///
    /// Returns the reader's error if the cursor is at the top level.
    fn step_out(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_are_lists_and_structs() {
        assert!(ValueKind::List.is_container());
        assert!(ValueKind::Struct.is_container());
        assert!(!ValueKind::Null.is_container());
        assert!(!ValueKind::String.is_container());
        assert!(!ValueKind::Int.is_container());
    }

    #[test]
    fn value_view_is_object_safe() {
        fn assert_object_safe(_: &dyn ValueView) {}
        let cursor = crate::TreeCursor::new(vec![]);
        assert_object_safe(&cursor);
    }
}
