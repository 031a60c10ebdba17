//! Textual search-path syntax.
//!
//! A path is a parenthesised, whitespace-separated list of components:
//!
//! | Text | Meaning |
//! |------|---------|
//! | `()` | every top-level value |
//! | `A::B::()` | top-level values annotated exactly `A::B` |
//! | `(foo)` | field `foo` of a top-level container |
//! | `(0)` | first child of a top-level container |
//! | `(*)` | any child of a top-level container |
//! | `(foo A::* 1)` | field `foo`, then any child annotated `A`, then its second child |
//! | `('*' "0")` | quoted text is always a field name |
//!
//! Symbols are `[A-Za-z_$][A-Za-z0-9_$]*`. Anything else that names a field
//! must be quoted with `'` or `"`; `\` escapes the next character.

use crate::{
    AnnotatedComponent, FieldComponent, IndexComponent, PathComponent, PathError, PathPattern,
    WildcardComponent,
};

/// Parse a textual search path.
///
/// # Errors
///
/// Returns [`PathError::InvalidPath`] with the byte offset of the first problem.
///
/// # Example
///
/// ```
/// use pathex::{parse_path, PathPattern};
///
/// assert!(matches!(parse_path("()").unwrap(), PathPattern::TopLevel));
/// assert_eq!(parse_path("(books 0 title)").unwrap().len(), 3);
/// assert!(parse_path("(books").is_err());
/// ```
pub fn parse_path(text: &str) -> Result<PathPattern, PathError> {
    Parser::new(text).parse()
}

/// One lexical item inside a path.
#[derive(Debug, PartialEq)]
enum Atom {
    Symbol(String),
    Quoted(String),
    Index(usize),
    Star,
}

impl Atom {
    /// Text usable as an annotation, if this atom can be one.
    fn into_text(self) -> Option<String> {
        match self {
            Self::Symbol(s) | Self::Quoted(s) => Some(s),
            Self::Index(_) | Self::Star => None,
        }
    }

    fn into_component(self) -> Box<dyn PathComponent> {
        match self {
            Self::Symbol(s) | Self::Quoted(s) => Box::new(FieldComponent::new(s)),
            Self::Index(i) => Box::new(IndexComponent::new(i)),
            Self::Star => Box::new(WildcardComponent),
        }
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse(mut self) -> Result<PathPattern, PathError> {
        self.skip_whitespace();
        let mut outer_annotations = Vec::new();
        while self.peek() != Some('(') {
            let start = self.pos;
            let annotation = self
                .atom()?
                .into_text()
                .ok_or_else(|| self.error_at(start, "expected an annotation or '('"))?;
            self.skip_whitespace();
            self.expect_annotation_separator()?;
            outer_annotations.push(annotation);
            self.skip_whitespace();
        }

        let open = self.pos;
        self.bump();
        let mut components = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(')') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error_at(open, "unclosed '('")),
                Some(_) => components.push(self.component()?),
            }
        }

        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(self.error("unexpected text after ')'"));
        }

        match (components.is_empty(), outer_annotations.is_empty()) {
            (true, true) => Ok(PathPattern::TopLevel),
            (true, false) => Ok(PathPattern::AnnotatedTopLevel(outer_annotations)),
            (false, true) => Ok(PathPattern::Components(components)),
            (false, false) => Err(self.error_at(
                0,
                "annotations before '(' are only allowed on the top-level path '()'",
            )),
        }
    }

    /// `annotation::* atom`, where the final atom becomes the component.
    fn component(&mut self) -> Result<Box<dyn PathComponent>, PathError> {
        let mut annotations = Vec::new();
        loop {
            let start = self.pos;
            let atom = self.atom()?;
            self.skip_whitespace();
            if !self.at_annotation_separator() {
                let component = atom.into_component();
                return Ok(if annotations.is_empty() {
                    component
                } else {
                    Box::new(AnnotatedComponent::new(annotations, component))
                });
            }
            let annotation = atom
                .into_text()
                .ok_or_else(|| self.error_at(start, "annotations must be symbols or quoted text"))?;
            self.expect_annotation_separator()?;
            annotations.push(annotation);
            self.skip_whitespace();
        }
    }

    fn atom(&mut self) -> Result<Atom, PathError> {
        match self.peek() {
            Some('*') => {
                self.bump();
                Ok(Atom::Star)
            }
            Some(quote @ ('\'' | '"')) => self.quoted(quote).map(Atom::Quoted),
            Some(c) if c.is_ascii_digit() => self.index(),
            Some(c) if is_symbol_start(c) => {
                let start = self.pos;
                while self.peek().is_some_and(is_symbol_char) {
                    self.bump();
                }
                Ok(Atom::Symbol(self.text[start..self.pos].to_string()))
            }
            Some(c) => Err(self.error(&format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of path")),
        }
    }

    fn index(&mut self) -> Result<Atom, PathError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek().is_some_and(is_symbol_char) {
            return Err(self.error_at(start, "field names starting with a digit must be quoted"));
        }
        self.text[start..self.pos]
            .parse()
            .map(Atom::Index)
            .map_err(|_| self.error_at(start, "index out of range"))
    }

    fn quoted(&mut self, quote: char) -> Result<String, PathError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err(self.error_at(start, "unterminated quoted text")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error_at(start, "unterminated quoted text")),
            }
        }
    }

    fn at_annotation_separator(&self) -> bool {
        self.text[self.pos..].starts_with("::")
    }

    fn expect_annotation_separator(&mut self) -> Result<(), PathError> {
        if self.at_annotation_separator() {
            self.pos += 2;
            Ok(())
        } else {
            Err(self.error("expected '::'"))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, reason: &str) -> PathError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, offset: usize, reason: &str) -> PathError {
        PathError::InvalidPath {
            path: self.text.to_string(),
            offset,
            reason: reason.to_string(),
        }
    }
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
