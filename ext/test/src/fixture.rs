//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the pathex engine.
//!
//! ```yaml
//! name: nested_index
//! description: Field then index
//! extractor:
//!   paths:
//!     - { name: a0, path: "(a 0)" }
//! cases:
//!   - name: hit
//!     documents: [{ a: [1, 2] }]
//!     expect:
//!       - { path: a0, value: 1 }
//! ```
//!
//! Documents use the `{"$annotations": [..], "$value": v}` convention for
//! annotated values.

use crate::{recording_callback, Recorder};
use pathex::prelude::*;
use pathex::ExtractorConfig;
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub extractor: ExtractorConfig,
    /// Expected construction failure; when set, `cases` is ignored.
    #[serde(default)]
    pub expect_build_error: Option<BuildErrorKind>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Test case: one stream of top-level values
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub documents: Vec<serde_json::Value>,
    /// Step into the first value this many times before extracting.
    #[serde(default)]
    pub start_depth: usize,
    #[serde(default)]
    pub expect: Vec<ExpectedHit>,
    #[serde(default)]
    pub expect_error: Option<ExtractionErrorKind>,
}

/// One expected callback invocation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpectedHit {
    /// Path label (`name`, or the path text when unnamed)
    pub path: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildErrorKind {
    InvalidPath,
    PathTooLong,
}

impl BuildErrorKind {
    fn of(err: &PathError) -> Self {
        match err {
            PathError::InvalidPath { .. } => Self::InvalidPath,
            PathError::PathTooLong { .. } => Self::PathTooLong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionErrorKind {
    NotAtTopLevel,
    DepthMismatch,
    StepOutTooFar,
    Cursor,
}

impl ExtractionErrorKind {
    fn of<E>(err: &ExtractionError<E>) -> Self {
        match err {
            ExtractionError::NotAtTopLevel { .. } => Self::NotAtTopLevel,
            ExtractionError::DepthMismatch { .. } => Self::DepthMismatch,
            ExtractionError::StepOutTooFar { .. } => Self::StepOutTooFar,
            ExtractionError::Cursor(_) => Self::Cursor,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Vec<ExpectedHit>,
    pub actual: Vec<ExpectedHit>,
    pub expected_error: Option<ExtractionErrorKind>,
    pub actual_error: Option<ExtractionErrorKind>,
}

impl TestCase {
    /// Build a cursor over this case's documents, positioned at `start_depth`.
    ///
    /// # Panics
    ///
    /// Panics if the documents are not nested deeply enough.
    pub fn build_cursor(&self) -> TreeCursor {
        let mut cursor = TreeCursor::new(self.documents.iter().map(Element::from).collect());
        for _ in 0..self.start_depth {
            cursor.next().expect("advance to start value");
            cursor.step_in().expect("step into start value");
        }
        cursor
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the extractor, recording every hit under its configured label.
    pub fn build(&self) -> Result<PathExtractor<TreeCursor, Recorder>, PathError> {
        PathExtractorBuilder::<TreeCursor, Recorder>::from_config(&self.extractor, |path| {
            recording_callback(path.label().to_string(), path.step_out)
        })
        .map(PathExtractorBuilder::build)
    }

    /// Run all test cases and return results
    ///
    /// # Panics
    ///
    /// Panics if the extractor cannot be built.
    pub fn run(&self) -> Vec<CaseResult> {
        let extractor = self
            .build()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));

        self.cases
            .iter()
            .map(|case| {
                let mut cursor = case.build_cursor();
                let mut recorder = Recorder::new();
                let outcome = extractor.extract_with(&mut cursor, &mut recorder);

                let actual: Vec<ExpectedHit> = recorder
                    .into_hits()
                    .into_iter()
                    .map(|hit| ExpectedHit {
                        path: hit.label,
                        value: hit.value.to_json(),
                    })
                    .collect();
                let actual_error = outcome.err().as_ref().map(ExtractionErrorKind::of);

                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect && actual_error == case.expect_error,
                    expected: case.expect.clone(),
                    actual,
                    expected_error: case.expect_error,
                    actual_error,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        if let Some(expected) = self.expect_build_error {
            let actual = self.build().err().as_ref().map(BuildErrorKind::of);
            assert_eq!(
                actual,
                Some(expected),
                "Fixture '{}' expected build error {:?}",
                self.name,
                expected
            );
            return;
        }

        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed:\n  expected {:?} (error {:?})\n  got      {:?} (error {:?})",
                self.name,
                result.case_name,
                result.expected,
                result.expected_error,
                result.actual,
                result.actual_error
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: first
description: top level
extractor:
  paths:
    - { path: "()" }
cases:
  - name: two values
    documents: [1, "x"]
    expect:
      - { path: "()", value: 1 }
      - { path: "()", value: "x" }
---
name: second
description: bad path
extractor:
  paths:
    - { path: "(a" }
expect_build_error: invalid_path
"#;

    #[test]
    fn parses_multi_document_yaml() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases[0].documents.len(), 2);
        assert_eq!(
            fixtures[1].expect_build_error,
            Some(BuildErrorKind::InvalidPath)
        );
        assert!(fixtures[1].cases.is_empty());
    }

    #[test]
    fn runs_fixtures() {
        for fixture in Fixture::from_yaml_multi(YAML).unwrap() {
            fixture.run_and_assert();
        }
    }

    #[test]
    fn reports_mismatch() {
        let mut fixture = Fixture::from_yaml_multi(YAML).unwrap().remove(0);
        fixture.cases[0].expect.pop();
        let results = fixture.run();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual.len(), 2);
    }

    #[test]
    fn start_depth_positions_cursor() {
        let case = TestCase {
            name: "deep".into(),
            documents: vec![serde_json::json!([[1]])],
            start_depth: 2,
            expect: Vec::new(),
            expect_error: None,
        };
        assert_eq!(case.build_cursor().depth(), 2);
    }
}
