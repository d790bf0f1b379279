//! Advisory log inspection.
//!
//! An advisory check corroborates server configuration from its log. Its
//! findings are reported but never change the run's pass/fail status.

/// Something expected to appear in the server log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogExpectation {
    /// Fragments that must all appear on the same line.
    pub needles: Vec<String>,
    /// Reported when a matching line is found.
    pub found: String,
    /// Reported when no line matches.
    pub missing: String,
}

impl LogExpectation {
    /// Creates an expectation.
    #[must_use]
    pub fn new<I, S>(needles: I, found: impl Into<String>, missing: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            needles: needles.into_iter().map(Into::into).collect(),
            found: found.into(),
            missing: missing.into(),
        }
    }

    /// Checks the expectation against the full log text.
    #[must_use]
    pub fn check(&self, log: &str) -> Finding {
        let matched = log
            .lines()
            .any(|line| self.needles.iter().all(|n| line.contains(n.as_str())));
        if matched {
            Finding::ok(self.found.clone())
        } else {
            Finding::missing(self.missing.clone())
        }
    }
}

/// One line of advisory output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Whether the expectation held.
    pub ok: bool,
    /// What to print.
    pub message: String,
}

impl Finding {
    /// A satisfied expectation.
    #[must_use]
    pub const fn ok(message: String) -> Self {
        Self { ok: true, message }
    }

    /// An unsatisfied expectation.
    #[must_use]
    pub const fn missing(message: String) -> Self {
        Self { ok: false, message }
    }
}

/// Outcome of the advisory check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryReport {
    /// Per-expectation findings; empty when the log could not be read.
    pub findings: Vec<Finding>,
    /// Set when the log could not be read.
    pub warning: Option<String>,
}

impl AdvisoryReport {
    /// Evaluates every expectation against the log text.
    #[must_use]
    pub fn from_log(log: &str, expectations: &[LogExpectation]) -> Self {
        Self {
            findings: expectations.iter().map(|e| e.check(log)).collect(),
            warning: None,
        }
    }

    /// A report for an unreadable log.
    #[must_use]
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            findings: Vec::new(),
            warning: Some(reason.into()),
        }
    }
}
