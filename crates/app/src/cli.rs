//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use ccsmoke_domain::settings::{
    DEFAULT_BASE_URL, DEFAULT_COMPLETION_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MODEL,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_STARTUP_DELAY,
};
use ccsmoke_domain::{DomainResult, RunSettings, SuiteSelection};
use clap::Parser;

/// Smoke-test a running Claude Code API server through its
/// OpenAI-compatible HTTP surface.
#[derive(Debug, Parser)]
#[command(name = "ccsmoke", version, about, long_about = None)]
pub struct Cli {
    /// Server root URL; probe paths such as /health and /v1/models are appended.
    #[arg(long, env = "CCSMOKE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer credential for authenticated probes.
    #[arg(long, env = "CCSMOKE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name sent in chat completions.
    #[arg(long, env = "CCSMOKE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Probe list to run: endpoints, agent or all.
    #[arg(long, env = "CCSMOKE_SUITE", default_value = "endpoints")]
    pub suite: SuiteSelection,

    /// TCP connect timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub connect_timeout_secs: u64,

    /// Timeout for plain endpoint probes in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub request_timeout_secs: u64,

    /// Timeout for chat completion probes in seconds.
    #[arg(long, default_value_t = DEFAULT_COMPLETION_TIMEOUT.as_secs())]
    pub completion_timeout_secs: u64,

    /// Seconds to wait before the first probe.
    #[arg(long, default_value_t = DEFAULT_STARTUP_DELAY.as_secs())]
    pub startup_delay_secs: u64,

    /// Server log read by the advisory configuration check.
    #[arg(long, env = "CCSMOKE_SERVER_LOG", default_value = "server.log")]
    pub server_log: PathBuf,

    /// Skip the advisory server log check.
    #[arg(long)]
    pub no_log_check: bool,
}

impl Cli {
    /// Validates the arguments into run settings.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed base URL or out-of-range values.
    pub fn into_settings(self) -> DomainResult<RunSettings> {
        let mut settings = RunSettings::new(&self.base_url)?;
        settings.api_key = self.api_key;
        settings.model = self.model;
        settings.suite = self.suite;
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs);
        settings.completion_timeout = Duration::from_secs(self.completion_timeout_secs);
        settings.startup_delay = Duration::from_secs(self.startup_delay_secs);
        settings.server_log = (!self.no_log_check).then_some(self.server_log);
        settings.validate()?;
        Ok(settings)
    }
}
