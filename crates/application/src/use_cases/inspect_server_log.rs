//! Advisory server log inspection use case.

use ccsmoke_domain::{AdvisoryReport, LogExpectation, RunSettings};

use crate::ports::LogSource;

/// Reads the server log and checks that the expected configuration took
/// effect. Read failures become a warning in the report, never an error.
pub struct InspectServerLog<L: LogSource> {
    source: L,
    expectations: Vec<LogExpectation>,
}

impl<L: LogSource> InspectServerLog<L> {
    /// Creates the use case with explicit expectations.
    pub const fn new(source: L, expectations: Vec<LogExpectation>) -> Self {
        Self {
            source,
            expectations,
        }
    }

    /// Derives expectations from the run settings: the listening line must
    /// mention the target port, and key authentication must be announced
    /// when a key is configured.
    pub fn for_settings(source: L, settings: &RunSettings) -> Self {
        let mut expectations = Vec::new();
        if let Some(port) = settings.port() {
            expectations.push(LogExpectation::new(
                ["Listening on".to_string(), format!(":{port}")],
                format!("Server is using port {port}"),
                format!("Server might not be listening on port {port}"),
            ));
        }
        if settings.api_key.is_some() {
            expectations.push(LogExpectation::new(
                ["API Key authentication enabled"],
                "API key authentication is enabled",
                "API key might not be loaded by the server",
            ));
        }
        Self::new(source, expectations)
    }

    /// Where the log is read from.
    pub fn location(&self) -> String {
        self.source.location()
    }

    /// Runs the check.
    pub async fn inspect(&self) -> AdvisoryReport {
        match self.source.read().await {
            Ok(log) => {
                let report = AdvisoryReport::from_log(&log, &self.expectations);
                tracing::debug!(
                    location = %self.source.location(),
                    findings = report.findings.len(),
                    "server log inspected"
                );
                report
            }
            Err(e) => {
                tracing::warn!(
                    location = %self.source.location(),
                    error = %e,
                    "could not read server log"
                );
                AdvisoryReport::unreadable(e.to_string())
            }
        }
    }
}
