//! ccsmoke - wiring for the smoke-test binary.
//!
//! Composes the reqwest client, assertion runner, log source and reporter
//! into a single run.

pub mod cli;

use std::sync::Arc;

use anyhow::Context;
use ccsmoke_application::ports::ProbeReporter;
use ccsmoke_application::{ExecuteProbe, InspectServerLog, RunSuite, catalog};
use ccsmoke_domain::{RunSettings, RunSummary};
use ccsmoke_infrastructure::{FileLogSource, ReqwestHttpClient, TestRunner};

/// Runs the probes selected by `settings`, reporting progress to `reporter`.
///
/// Probe failures are part of the returned summary; only setup problems
/// (such as an HTTP client that cannot be built) are errors.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub async fn run<R: ProbeReporter>(
    settings: RunSettings,
    reporter: &mut R,
) -> anyhow::Result<RunSummary> {
    let client = ReqwestHttpClient::new(settings.connect_timeout)
        .context("failed to create HTTP client")?;
    let probes = catalog::select(&settings);
    let advisory = settings
        .server_log
        .as_ref()
        .map(|path| InspectServerLog::for_settings(FileLogSource::new(path), &settings));

    tracing::info!(
        base_url = %settings.base_url,
        suite = %settings.suite,
        probes = probes.len(),
        "starting smoke run"
    );

    let suite = RunSuite::new(ExecuteProbe::new(
        Arc::new(client),
        Arc::new(TestRunner::new()),
        Arc::new(settings),
    ));
    Ok(suite.run(&probes, reporter, advisory.as_ref()).await)
}
