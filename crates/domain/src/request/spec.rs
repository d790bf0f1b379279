//! Request specification type

use super::{Header, Headers, HttpMethod, RequestBody};

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Complete specification for a single HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Human-readable name, used in logs
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// HTTP headers
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
    /// Upper bound on the whole exchange, in milliseconds
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Get,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::none(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post_json(
        name: impl Into<String>,
        url: impl Into<String>,
        body: &serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            method: HttpMethod::Post,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::from_value(body),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.add(header);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
