//! Console reporter.
//!
//! Prints one block per probe with ✓ / ✗ / ⚠ markers and a final tally
//! line, `=== Summary: <passed>/<total> tests passed ===`.

use std::fmt;
use std::io::Write;

use ccsmoke_application::ports::ProbeReporter;
use ccsmoke_domain::{AdvisoryReport, Probe, ProbeResult, RunSettings, RunSummary};

const BODY_PREVIEW_LEN: usize = 200;

/// Writes the human-readable report to any `Write` sink (stdout in the
/// binary, a buffer in tests).
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n")) {
            tracing::warn!(error = %e, "failed to write report output");
        }
    }

    fn blank(&mut self) {
        self.line(format_args!(""));
    }
}

impl<W: Write> ProbeReporter for ConsoleReporter<W> {
    fn run_started(&mut self, settings: &RunSettings, total: usize) {
        self.line(format_args!("=== Testing Claude Code API ===\n"));
        self.line(format_args!("Target:     {}", settings.base_url));
        self.line(format_args!("Suite:      {} ({total} probes)", settings.suite));
        self.line(format_args!("Model:      {}", settings.model));
        match settings.masked_api_key() {
            Some(key) => self.line(format_args!("API key:    {key}")),
            None => self.line(format_args!(
                "API key:    not set (authenticated probes will be rejected)"
            )),
        }
        match &settings.server_log {
            Some(path) => self.line(format_args!("Server log: {}", path.display())),
            None => self.line(format_args!("Server log: not checked")),
        }
        self.blank();

        if !settings.startup_delay.is_zero() {
            self.line(format_args!(
                "Waiting {}s for server to start...\n",
                settings.startup_delay.as_secs_f32()
            ));
        }
        self.flush();
    }

    fn probe_started(&mut self, index: usize, probe: &Probe) {
        self.line(format_args!("{index}. Testing {}...", probe.name));
        self.flush();
    }

    fn probe_finished(&mut self, _index: usize, result: &ProbeResult) {
        if let Some(status) = result.status {
            self.line(format_args!("   Status: {status}"));
        }

        if result.highlights.is_empty() {
            if let Some(body) = &result.body {
                self.line(format_args!("   Response: {}", render_body(body)));
            }
        } else {
            for (label, value) in &result.highlights {
                self.line(format_args!("   {label}: {}", truncate(value)));
            }
        }

        if result.passed {
            self.line(format_args!("   ✓ {}", result.pass_message));
        } else {
            let reasons = result.failure_reasons().join("; ");
            self.line(format_args!("   ✗ Test failed: {reasons}"));
        }
        self.blank();
        self.flush();
    }

    fn advisory(&mut self, location: &str, report: &AdvisoryReport) {
        self.line(format_args!("Checking server log ({location})..."));
        if let Some(warning) = &report.warning {
            self.line(format_args!("   ⚠ Could not read server log: {warning}"));
        }
        for finding in &report.findings {
            let marker = if finding.ok { "✓" } else { "✗" };
            self.line(format_args!("   {marker} {}", finding.message));
        }
        self.line(format_args!("   (advisory only, not counted in the summary)"));
        self.blank();
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.line(format_args!(
            "=== Summary: {}/{} tests passed ===\n",
            summary.passed, summary.total
        ));
        if summary.all_passed() {
            self.line(format_args!("✓ All tests passed!"));
        } else {
            self.line(format_args!("✗ {} tests failed.", summary.failed()));
        }
        self.flush();
    }
}

impl<W: Write> ConsoleReporter<W> {
    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "failed to flush report output");
        }
    }
}

/// Compact JSON when the body parses, otherwise the trimmed text.
fn render_body(body: &str) -> String {
    let rendered = serde_json::from_str::<serde_json::Value>(body)
        .map_or_else(|_| body.trim().to_string(), |v| v.to_string());
    truncate(&rendered)
}

fn truncate(text: &str) -> String {
    if text.chars().count() > BODY_PREVIEW_LEN {
        let cut: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
