//! Test doubles shared by the use case tests.
#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use ccsmoke_domain::request::RequestSpec;
use ccsmoke_domain::response::ResponseSpec;
use ccsmoke_domain::settings::DEFAULT_BASE_URL;
use ccsmoke_domain::testing::{Assertion, AssertionResult};
use ccsmoke_domain::{AdvisoryReport, Probe, ProbeResult, RunSettings, RunSummary};

use crate::ports::{
    HttpClient, HttpClientError, LogSource, LogSourceError, ProbeReporter, ResponseEvaluator,
};

pub fn settings(api_key: Option<&str>) -> RunSettings {
    let mut settings = RunSettings::new(DEFAULT_BASE_URL).unwrap();
    settings.api_key = api_key.map(ToString::to_string);
    settings.startup_delay = Duration::ZERO;
    settings
}

pub fn json_response(status: u16, body: &str) -> ResponseSpec {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(3))
}

/// Replays canned outcomes in order; refuses connections once exhausted.
#[derive(Default)]
pub struct StubClient {
    responses: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    pub requests: Mutex<Vec<RequestSpec>>,
    panic_on: Option<String>,
}

impl StubClient {
    pub fn responding(responses: Vec<Result<ResponseSpec, HttpClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn panicking_on(mut self, url_suffix: &str) -> Self {
        self.panic_on = Some(url_suffix.to_string());
        self
    }
}

impl HttpClient for StubClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(suffix) = &self.panic_on {
            if request.url.ends_with(suffix.as_str()) {
                panic!("stub client exploded on {}", request.url);
            }
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HttpClientError::ConnectionRefused {
                host: "localhost".to_string(),
                port: 8083,
            }))
    }
}

/// Checks status codes only; every other assertion passes.
pub struct StatusOnly;

impl ResponseEvaluator for StatusOnly {
    fn evaluate(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|a| match a {
                Assertion::StatusCode { expected } if *expected != response.status => {
                    AssertionResult::fail(a.clone(), format!("got {}", response.status))
                }
                _ => AssertionResult::pass(a.clone()),
            })
            .collect()
    }
}

/// Records every callback as a line of text.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl ProbeReporter for RecordingReporter {
    fn run_started(&mut self, _settings: &RunSettings, total: usize) {
        self.events.push(format!("start {total}"));
    }

    fn probe_started(&mut self, index: usize, probe: &Probe) {
        self.events.push(format!("begin {index} {}", probe.name));
    }

    fn probe_finished(&mut self, index: usize, result: &ProbeResult) {
        self.events.push(format!("end {index} {}", result.passed));
    }

    fn advisory(&mut self, location: &str, report: &AdvisoryReport) {
        let ok = report.findings.iter().filter(|f| f.ok).count();
        self.events.push(format!(
            "advisory {location} {ok}/{} warning={}",
            report.findings.len(),
            report.warning.is_some()
        ));
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.events
            .push(format!("summary {}/{}", summary.passed, summary.total));
    }
}

/// In-memory log; `None` behaves like a missing file.
pub struct StubLog(pub Option<String>);

impl LogSource for StubLog {
    fn location(&self) -> String {
        "server.log".to_string()
    }

    async fn read(&self) -> Result<String, LogSourceError> {
        self.0
            .clone()
            .ok_or_else(|| LogSourceError::NotFound("server.log".into()))
    }
}
