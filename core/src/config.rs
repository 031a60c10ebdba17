//! Match options and serde config types for config-driven extractor construction.
//!
//! [`MatchConfig`] carries the runtime options every traversal consults.
//! With feature `serde`, [`ExtractorConfig`] describes a whole extractor
//! (options plus named textual paths) and loads via
//! [`PathExtractorBuilder::from_config()`](crate::PathExtractorBuilder::from_config).
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type |
//! |-------------|--------------|
//! | [`ExtractorConfig`] | [`PathExtractor`](crate::PathExtractor) |
//! | [`SearchPathConfig`] | [`SearchPath`](crate::SearchPath) |

/// Options fixed at build time and consulted by every traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    /// Allow `extract` on a cursor that is not at depth zero.
    /// Paths are then matched relative to the cursor's starting depth.
    #[cfg_attr(feature = "serde", serde(default))]
    pub match_relative_paths: bool,

    /// Compare field names and annotations ignoring case.
    #[cfg_attr(feature = "serde", serde(default))]
    pub match_case_insensitive: bool,
}

impl MatchConfig {
    /// Compare two pieces of text under this config's case policy.
    ///
    /// Case-insensitive comparison is per character: both strings must have the
    /// same number of characters, and each pair must be equal after mapping
    /// to upper case or to lower case.
    #[must_use]
    pub fn text_eq(&self, a: &str, b: &str) -> bool {
        if self.match_case_insensitive {
            a.chars().count() == b.chars().count()
                && a.chars().zip(b.chars()).all(|(x, y)| char_eq_ignore_case(x, y))
        } else {
            a == b
        }
    }

    /// Compare annotation sequences: same length, same order, [`text_eq`](Self::text_eq) pairwise.
    #[must_use]
    pub fn annotations_eq(&self, actual: &[String], expected: &[String]) -> bool {
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected)
                .all(|(a, e)| self.text_eq(a, e))
    }
}

fn char_eq_ignore_case(a: char, b: char) -> bool {
    a == b
        || simple_upper(a) == simple_upper(b)
        || simple_lower(simple_upper(a)) == simple_lower(simple_upper(b))
}

/// Single-character upper case; characters that expand (`ß` to `SS`) map to themselves.
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Single-character lower case. `İ` lowers to `i` plus a combining dot; keep the `i`.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Configuration for a whole [`PathExtractor`](crate::PathExtractor).
///
/// Deserializes from JSON or YAML:
///
/// ```yaml
/// match_case_insensitive: true
/// paths:
///   - name: first_title
///     path: "(books 0 title)"
///   - name: tagged
///     path: "draft::()"
///     step_out: 0
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExtractorConfig {
    /// Allow extraction to start below the top level.
    #[serde(default)]
    pub match_relative_paths: bool,

    /// Compare field names and annotations ignoring case.
    #[serde(default)]
    pub match_case_insensitive: bool,

    /// Search paths, in registration order.
    pub paths: Vec<SearchPathConfig>,
}

#[cfg(feature = "serde")]
impl ExtractorConfig {
    /// The runtime options described by this config.
    #[must_use]
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            match_relative_paths: self.match_relative_paths,
            match_case_insensitive: self.match_case_insensitive,
        }
    }
}

/// Configuration for one search path.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchPathConfig {
    /// Label reported with every hit. Defaults to the path text.
    #[serde(default)]
    pub name: Option<String>,

    /// Path in the textual syntax accepted by [`parse_path`](crate::parse_path).
    pub path: String,

    /// Step-out count the generated callback returns on every hit.
    #[serde(default)]
    pub step_out: usize,
}

#[cfg(feature = "serde")]
impl SearchPathConfig {
    /// The hit label: `name` if set, otherwise the path text.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}
