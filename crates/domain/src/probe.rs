//! Probes, their results, and the run tally.

use std::time::Duration;

use crate::request::HttpMethod;
use crate::testing::{Assertion, AssertionResult};

/// Whether a probe sends the configured bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credential {
    /// Send no `Authorization` header.
    #[default]
    None,
    /// Send `Authorization: Bearer <api key>` when a key is configured.
    Bearer,
}

/// Which configured timeout bounds a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutClass {
    /// Plain endpoint reads.
    #[default]
    Standard,
    /// Chat completions, which run an agent on the server.
    Completion,
}

/// A labelled JSON path echoed in the probe output when it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Label printed before the value (e.g., "Model used").
    pub label: String,
    /// Path into the response body.
    pub path: String,
}

impl Highlight {
    /// Creates a highlight.
    #[must_use]
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// One self-contained HTTP check against the target service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Display name (e.g., "health check endpoint").
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path appended to the base URL (e.g., "/v1/models").
    pub path: String,
    /// Credential handling.
    pub credential: Credential,
    /// JSON body for POST probes.
    pub body: Option<serde_json::Value>,
    /// Expectations, all of which must hold.
    pub assertions: Vec<Assertion>,
    /// Values echoed from the response body.
    pub highlights: Vec<Highlight>,
    /// Printed when the probe passes.
    pub pass_message: String,
    /// Timeout class.
    pub timeout: TimeoutClass,
}

impl Probe {
    /// Creates a GET probe with no assertions.
    #[must_use]
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Get,
            path: path.into(),
            credential: Credential::None,
            body: None,
            assertions: Vec::new(),
            highlights: Vec::new(),
            pass_message: "Passed".to_string(),
            timeout: TimeoutClass::Standard,
        }
    }

    /// Creates a POST probe carrying a JSON body.
    #[must_use]
    pub fn post(
        name: impl Into<String>,
        path: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body),
            ..Self::get(name, path)
        }
    }

    /// Sends the bearer credential.
    #[must_use]
    pub const fn authenticated(mut self) -> Self {
        self.credential = Credential::Bearer;
        self
    }

    /// Adds an assertion.
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Adds a highlight.
    #[must_use]
    pub fn highlight(mut self, label: impl Into<String>, path: impl Into<String>) -> Self {
        self.highlights.push(Highlight::new(label, path));
        self
    }

    /// Sets the message printed on success.
    #[must_use]
    pub fn on_pass(mut self, message: impl Into<String>) -> Self {
        self.pass_message = message.into();
        self
    }

    /// Sets the timeout class.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: TimeoutClass) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Outcome of one probe invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Probe display name.
    pub name: String,
    /// Whether every assertion held.
    pub passed: bool,
    /// Observed status code, absent when no response arrived.
    pub status: Option<u16>,
    /// Observed body, absent when no response arrived.
    pub body: Option<String>,
    /// Transport error or other failure cause outside assertions.
    pub error: Option<String>,
    /// Per-assertion outcomes, in declaration order.
    pub assertions: Vec<AssertionResult>,
    /// Resolved highlights as (label, value).
    pub highlights: Vec<(String, String)>,
    /// Time spent on the exchange.
    pub duration: Duration,
    /// Message to print on success.
    pub pass_message: String,
}

impl ProbeResult {
    /// A result for a probe that received a response.
    #[must_use]
    pub fn observed(
        probe: &Probe,
        status: u16,
        body: String,
        assertions: Vec<AssertionResult>,
        duration: Duration,
    ) -> Self {
        let passed = assertions.iter().all(|a| a.passed);
        Self {
            name: probe.name.clone(),
            passed,
            status: Some(status),
            body: Some(body),
            error: None,
            assertions,
            highlights: Vec::new(),
            duration,
            pass_message: probe.pass_message.clone(),
        }
    }

    /// A failed result for a probe that never got a response.
    #[must_use]
    pub fn errored(probe: &Probe, error: impl Into<String>) -> Self {
        Self {
            name: probe.name.clone(),
            passed: false,
            status: None,
            body: None,
            error: Some(error.into()),
            assertions: Vec::new(),
            highlights: Vec::new(),
            duration: Duration::ZERO,
            pass_message: probe.pass_message.clone(),
        }
    }

    /// Attaches resolved highlights.
    #[must_use]
    pub fn with_highlights(mut self, highlights: Vec<(String, String)>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Failure causes, one line each: the transport error or every failed
    /// assertion message.
    #[must_use]
    pub fn failure_reasons(&self) -> Vec<String> {
        if let Some(error) = &self.error {
            return vec![error.clone()];
        }
        self.assertions
            .iter()
            .filter(|a| !a.passed)
            .map(|a| {
                a.error
                    .clone()
                    .unwrap_or_else(|| a.assertion.description())
            })
            .collect()
    }
}

/// Running pass tally for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Probes attempted.
    pub total: usize,
    /// Probes that passed.
    pub passed: usize,
}

impl RunSummary {
    /// Counts one probe result.
    pub const fn record(&mut self, result: &ProbeResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        }
    }

    /// Probes that failed.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// True only if every probe passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}
