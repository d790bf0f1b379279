//! Response testing and assertions.
//!
//! This module provides the types a probe uses to describe what it expects
//! from a response, and the per-assertion outcome produced by an evaluator.

pub mod json_path;

/// A test assertion to run against a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check body is valid JSON.
    IsJson,
    /// Check a JSON path resolves to a value.
    JsonPath {
        /// Path expression (e.g., "$.data").
        path: String,
    },
    /// Check a JSON path resolves to a non-empty value.
    ///
    /// Strings must contain a non-whitespace character, arrays and objects
    /// must have at least one entry. `null` never passes.
    JsonPathNotEmpty {
        /// Path expression (e.g., "$.choices[0].message.content").
        path: String,
    },
}

impl Assertion {
    /// Shorthand for an exact status code assertion.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::StatusCode { expected }
    }

    /// Shorthand for a path-exists assertion.
    #[must_use]
    pub fn json_path(path: impl Into<String>) -> Self {
        Self::JsonPath { path: path.into() }
    }

    /// Shorthand for a non-empty path assertion.
    #[must_use]
    pub fn json_path_not_empty(path: impl Into<String>) -> Self {
        Self::JsonPathNotEmpty { path: path.into() }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::IsJson => "Body is valid JSON".to_string(),
            Self::JsonPath { path } => format!("JSON {path} exists"),
            Self::JsonPathNotEmpty { path } => format!("JSON {path} is not empty"),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}
