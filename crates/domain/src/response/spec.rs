//! Response specification type

use std::collections::HashMap;
use std::time::Duration;

/// HTTP response as observed by a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as string (lossy UTF-8)
    pub body: String,
    /// Value of the Content-Type header, if any
    pub content_type: Option<String>,
    /// Response time
    pub duration: Duration,
    /// Response size in bytes
    pub size: usize,
}

impl ResponseSpec {
    /// Builds a response from raw parts.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let content_type = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.clone());
        let size = body.len();
        Self {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            content_type,
            duration,
            size,
        }
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
