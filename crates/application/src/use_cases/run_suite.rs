//! Run suite use case.
//!
//! Drives an ordered list of probes, one at a time, and tallies the results.

use std::sync::Arc;

use ccsmoke_domain::{Probe, ProbeResult, RunSummary};
use tracing::Instrument;

use super::{ExecuteProbe, InspectServerLog};
use crate::ports::{HttpClient, LogSource, ProbeReporter, ResponseEvaluator};

/// Use case for a full smoke-test run.
///
/// Probes execute strictly in the given order and every probe is attempted
/// exactly once, whatever happened to the ones before it. Each probe runs in
/// its own task so that a panic inside it is reported as a failed result
/// instead of ending the run.
pub struct RunSuite<C: HttpClient, E: ResponseEvaluator> {
    executor: Arc<ExecuteProbe<C, E>>,
}

impl<C, E> RunSuite<C, E>
where
    C: HttpClient + 'static,
    E: ResponseEvaluator + 'static,
{
    /// Creates a new `RunSuite` use case.
    pub fn new(executor: ExecuteProbe<C, E>) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    /// Runs the probes, then the advisory check if one is given, and
    /// returns the tally. The advisory check never affects the tally.
    pub async fn run<R, L>(
        &self,
        probes: &[Probe],
        reporter: &mut R,
        advisory: Option<&InspectServerLog<L>>,
    ) -> RunSummary
    where
        R: ProbeReporter,
        L: LogSource,
    {
        let settings = self.executor.settings();
        reporter.run_started(settings, probes.len());

        if !settings.startup_delay.is_zero() {
            tokio::time::sleep(settings.startup_delay).await;
        }

        let mut summary = RunSummary::default();
        for (i, probe) in probes.iter().enumerate() {
            let index = i + 1;
            reporter.probe_started(index, probe);
            let result = self.run_isolated(index, probe).await;
            summary.record(&result);
            reporter.probe_finished(index, &result);
        }

        if let Some(check) = advisory {
            let report = check.inspect().await;
            reporter.advisory(&check.location(), &report);
        }

        tracing::info!(
            passed = summary.passed,
            total = summary.total,
            "smoke run finished"
        );
        reporter.summary(&summary);
        summary
    }

    async fn run_isolated(&self, index: usize, probe: &Probe) -> ProbeResult {
        let executor = Arc::clone(&self.executor);
        let owned = probe.clone();
        let span = tracing::info_span!("probe", index, name = %probe.name);

        let handle = tokio::spawn(async move { executor.execute(&owned).await }.instrument(span));

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(probe = %probe.name, error = %e, "probe task aborted");
                ProbeResult::errored(probe, format!("Probe aborted unexpectedly: {e}"))
            }
        }
    }
}
