//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces assertion results.

use ccsmoke_application::ports::ResponseEvaluator;
use ccsmoke_domain::response::ResponseSpec;
use ccsmoke_domain::testing::{Assertion, AssertionResult, json_path};
use serde_json::Value;

const PREVIEW_LEN: usize = 100;

/// Test runner that executes assertions against responses.
///
/// Every assertion of a probe is evaluated even after one fails, so the
/// report lists all mismatches at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::IsJson => Self::check_is_json(assertion, response),
            Assertion::JsonPath { path } => Self::check_json_path(assertion, response, path),
            Assertion::JsonPathNotEmpty { path } => {
                Self::check_json_path_not_empty(assertion, response, path)
            }
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("Expected status {expected}, got {actual}"),
            )
        }
    }

    fn check_is_json(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match response.json() {
            Ok(_) => AssertionResult::pass(assertion.clone()),
            Err(e) => AssertionResult::fail_with_value(
                assertion.clone(),
                preview(&response.body),
                format!("Body is not valid JSON: {e}"),
            ),
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> AssertionResult {
        Self::with_path(assertion, response, path, |value| {
            AssertionResult::pass_with_value(assertion.clone(), json_path::render(value))
        })
    }

    fn check_json_path_not_empty(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> AssertionResult {
        Self::with_path(assertion, response, path, |value| {
            if is_empty(value) {
                AssertionResult::fail_with_value(
                    assertion.clone(),
                    value.to_string(),
                    format!("JSON path '{path}' is empty"),
                )
            } else {
                AssertionResult::pass_with_value(assertion.clone(), json_path::render(value))
            }
        })
    }

    /// Parses the body, resolves the path and hands the value to `check`.
    fn with_path<F>(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        check: F,
    ) -> AssertionResult
    where
        F: FnOnce(&Value) -> AssertionResult,
    {
        let json = match response.json() {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("Failed to parse body as JSON: {e}"),
                );
            }
        };

        match json_path::query(&json, path) {
            Ok(Some(value)) => check(value),
            Ok(None) => AssertionResult::fail(
                assertion.clone(),
                format!("JSON path '{path}' not found"),
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }
}

impl ResponseEvaluator for TestRunner {
    fn evaluate(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > PREVIEW_LEN {
        let cut: String = body.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}
