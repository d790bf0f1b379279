//! Run settings domain model
//!
//! Everything a run needs to know about its target, validated once up front.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::probe::TimeoutClass;

/// Default target, matching the server's `.env` port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8083";
/// Default model name sent in chat completions.
pub const DEFAULT_MODEL: &str = "claude-code";
/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default timeout for plain endpoint probes.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default timeout for chat completion probes.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(300);
/// Default pause before the first probe.
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(2);

/// Which probe lists to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiteSelection {
    /// Health, root, models (with and without auth) and one chat completion.
    #[default]
    Endpoints,
    /// Chat completions exercising server-side agent tools.
    Agent,
    /// Endpoints, then Agent.
    All,
}

impl SuiteSelection {
    /// Returns true if the endpoint probes run.
    #[must_use]
    pub const fn includes_endpoints(self) -> bool {
        matches!(self, Self::Endpoints | Self::All)
    }

    /// Returns true if the agent probes run.
    #[must_use]
    pub const fn includes_agent(self) -> bool {
        matches!(self, Self::Agent | Self::All)
    }

    /// Returns the selection as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Endpoints => "endpoints",
            Self::Agent => "agent",
            Self::All => "all",
        }
    }
}

impl fmt::Display for SuiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuiteSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "endpoints" => Ok(Self::Endpoints),
            "agent" => Ok(Self::Agent),
            "all" => Ok(Self::All),
            other => Err(DomainError::UnknownSuite(other.to_string())),
        }
    }
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Server root; probe paths are appended to it.
    pub base_url: Url,
    /// Bearer credential for authenticated probes.
    pub api_key: Option<String>,
    /// Model name for chat completions.
    pub model: String,
    /// Which probes to run.
    pub suite: SuiteSelection,
    /// TCP connect bound.
    pub connect_timeout: Duration,
    /// Bound for plain endpoint probes.
    pub request_timeout: Duration,
    /// Bound for chat completion probes.
    pub completion_timeout: Duration,
    /// Pause before the first probe.
    pub startup_delay: Duration,
    /// Server log for the advisory check; `None` skips it.
    pub server_log: Option<PathBuf>,
}

impl RunSettings {
    /// Creates settings with defaults for everything but the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or not http(s).
    pub fn new(base_url: &str) -> DomainResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            suite: SuiteSelection::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            startup_delay: DEFAULT_STARTUP_DELAY,
            server_log: None,
        })
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error for zero timeouts, an empty model or a blank key.
    pub fn validate(&self) -> DomainResult<()> {
        for (name, value) in [
            ("connect-timeout", self.connect_timeout),
            ("request-timeout", self.request_timeout),
            ("completion-timeout", self.completion_timeout),
        ] {
            if value.is_zero() {
                return Err(DomainError::invalid_setting(name, "must be greater than zero"));
            }
        }
        if self.model.trim().is_empty() {
            return Err(DomainError::invalid_setting("model", "must not be empty"));
        }
        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err(DomainError::invalid_setting("api-key", "must not be blank"));
        }
        Ok(())
    }

    /// Joins a probe path onto the base URL, keeping any base path prefix.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Port the server is expected to listen on.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.base_url.port_or_known_default()
    }

    /// Timeout for a probe class.
    #[must_use]
    pub const fn timeout_for(&self, class: TimeoutClass) -> Duration {
        match class {
            TimeoutClass::Standard => self.request_timeout,
            TimeoutClass::Completion => self.completion_timeout,
        }
    }

    /// The API key with all but its first four characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            let visible: String = key.chars().take(4).collect();
            if key.chars().count() > 4 {
                format!("{visible}****")
            } else {
                "****".to_string()
            }
        })
    }
}

fn parse_base_url(raw: &str) -> DomainResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidUrl("URL is required".to_string()));
    }
    let url = Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }
    // Probe paths are appended to the base as text
    if url.query().is_some() || url.fragment().is_some() {
        return Err(DomainError::InvalidUrl(format!(
            "base URL must not carry a query or fragment: {trimmed}"
        )));
    }
    Ok(url)
}
