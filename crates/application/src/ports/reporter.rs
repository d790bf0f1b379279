//! Progress reporting port.

use ccsmoke_domain::{AdvisoryReport, Probe, ProbeResult, RunSettings, RunSummary};

/// Receives run progress as it happens.
///
/// Called from the orchestrating task only, strictly in run order.
pub trait ProbeReporter {
    /// A run is starting.
    fn run_started(&mut self, settings: &RunSettings, total: usize);

    /// Probe number `index` (1-based) is about to execute.
    fn probe_started(&mut self, index: usize, probe: &Probe);

    /// Probe number `index` finished.
    fn probe_finished(&mut self, index: usize, result: &ProbeResult);

    /// The advisory log check finished.
    fn advisory(&mut self, location: &str, report: &AdvisoryReport);

    /// The run finished.
    fn summary(&mut self, summary: &RunSummary);
}
