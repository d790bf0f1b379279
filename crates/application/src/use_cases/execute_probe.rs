//! Execute probe use case.

use std::sync::Arc;

use ccsmoke_domain::probe::Credential;
use ccsmoke_domain::request::{Header, RequestSpec};
use ccsmoke_domain::response::ResponseSpec;
use ccsmoke_domain::testing::json_path;
use ccsmoke_domain::{Probe, ProbeResult, RunSettings};

use crate::ports::{HttpClient, ResponseEvaluator};

/// Use case for running one probe against the target.
///
/// Never fails: transport errors are folded into a failed `ProbeResult`.
pub struct ExecuteProbe<C: HttpClient, E: ResponseEvaluator> {
    client: Arc<C>,
    evaluator: Arc<E>,
    settings: Arc<RunSettings>,
}

impl<C: HttpClient, E: ResponseEvaluator> ExecuteProbe<C, E> {
    /// Creates a new `ExecuteProbe` use case.
    pub const fn new(client: Arc<C>, evaluator: Arc<E>, settings: Arc<RunSettings>) -> Self {
        Self {
            client,
            evaluator,
            settings,
        }
    }

    /// The settings probes run against.
    #[must_use]
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Builds the concrete request for a probe.
    ///
    /// The bearer header is only attached when the probe asks for it and a
    /// key is configured.
    #[must_use]
    pub fn build_request(&self, probe: &Probe) -> RequestSpec {
        let url = self.settings.endpoint(&probe.path);
        let mut request = match &probe.body {
            Some(body) => RequestSpec::post_json(&probe.name, url, body),
            None => RequestSpec::get(&probe.name, url),
        };
        request.method = probe.method;

        if probe.credential == Credential::Bearer {
            if let Some(key) = &self.settings.api_key {
                request = request.with_header(Header::bearer(key));
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = self.settings.timeout_for(probe.timeout).as_millis() as u64;
        request.with_timeout_ms(timeout_ms)
    }

    /// Executes the probe once.
    pub async fn execute(&self, probe: &Probe) -> ProbeResult {
        let request = self.build_request(probe);
        tracing::debug!(
            probe = %probe.name,
            method = %request.method,
            url = %request.url,
            timeout_ms = request.timeout_ms,
            "sending probe request"
        );

        match self.client.execute(&request).await {
            Ok(response) => {
                tracing::debug!(
                    probe = %probe.name,
                    status = response.status,
                    duration_ms = response.duration.as_millis(),
                    size = response.size,
                    "received response"
                );
                let assertions = self.evaluator.evaluate(&probe.assertions, &response);
                let highlights = Self::resolve_highlights(probe, &response);
                ProbeResult::observed(
                    probe,
                    response.status,
                    response.body,
                    assertions,
                    response.duration,
                )
                .with_highlights(highlights)
            }
            Err(e) => {
                tracing::warn!(probe = %probe.name, error = %e, "probe request failed");
                ProbeResult::errored(probe, e.to_string())
            }
        }
    }

    fn resolve_highlights(probe: &Probe, response: &ResponseSpec) -> Vec<(String, String)> {
        if probe.highlights.is_empty() {
            return Vec::new();
        }
        let Ok(json) = response.json() else {
            return Vec::new();
        };
        probe
            .highlights
            .iter()
            .filter_map(|h| match json_path::query(&json, &h.path) {
                Ok(Some(value)) => Some((h.label.clone(), json_path::render(value))),
                _ => None,
            })
            .collect()
    }
}
