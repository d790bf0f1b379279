//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the runner.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use ccsmoke_application::ports::{HttpClient, HttpClientError};
use ccsmoke_domain::{
    request::{HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method, Url};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client` configured with an explicit connect timeout.
/// The overall timeout comes from each `RequestSpec`.
pub struct ReqwestHttpClient {
    client: Client,
    connect_timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client.
    ///
    /// Configuration:
    /// - Connection timeout: as given
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "ccsmoke/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(connect_timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("ccsmoke/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            connect_timeout,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Attaches the request body, rejecting malformed JSON before it is sent.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        if body.is_empty() {
            return Ok(builder);
        }
        if body.is_json() {
            let _: serde_json::Value = serde_json::from_str(&body.content)
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
        }
        Ok(builder.body(body.content.clone()))
    }

    /// A timeout while connecting is bounded by the connect timeout, not by
    /// the request's own.
    #[allow(clippy::cast_possible_truncation)]
    fn timeout_error(&self, connecting: bool, timeout_ms: u64) -> HttpClientError {
        if connecting {
            HttpClientError::ConnectTimeout {
                timeout_ms: self.connect_timeout.as_millis() as u64,
            }
        } else {
            HttpClientError::Timeout { timeout_ms }
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(&self, error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return self.timeout_error(error.is_connect(), timeout_ms);
        }

        let message = error_chain(error);
        if error.is_connect() {
            let host = error
                .url()
                .and_then(|u| u.host_str().map(ToString::to_string))
                .unwrap_or_else(|| "unknown".to_string());
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!("Too many redirects (max {MAX_REDIRECTS})"));
        }

        HttpClientError::Other(message)
    }
}

/// Renders an error together with its sources; reqwest's own message omits
/// the underlying cause.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        let timeout_ms = request.timeout_ms;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms));

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(content_type) = request.body.content_type() {
            if !request.headers.contains("content-type") {
                builder = builder.header("Content-Type", content_type);
            }
        }

        builder = Self::build_body(builder, &request.body)?;

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&e, timeout_ms))?
            .to_vec();
        let duration = start.elapsed();

        Ok(ResponseSpec::new(status, headers, body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ccsmoke_domain::request::Header;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> ReqwestHttpClient {
        ReqwestHttpClient::new(Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
    }

    #[test]
    fn test_invalid_json_body() {
        let body = RequestBody::json("{invalid json}");
        let builder = Client::new().post("http://localhost:8083");
        let result = ReqwestHttpClient::build_body(builder, &body);
        assert!(matches!(result, Err(HttpClientError::InvalidBody(_))));
    }

    #[test]
    fn test_valid_json_body() {
        let body = RequestBody::json(r#"{"key": "value"}"#);
        let builder = Client::new().post("http://localhost:8083");
        assert!(ReqwestHttpClient::build_body(builder, &body).is_ok());
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ok", "service": "claude-code-api"})),
            )
            .mount(&server)
            .await;

        let request = RequestSpec::get("health", format!("{}/health", server.uri()));
        let response = client().execute(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.json().unwrap()["status"], "ok");
        assert!(response
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json")));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(401).set_body_json(
                serde_json::json!({"error": {"message": "Incorrect API key provided.", "code": "invalid_api_key"}}),
            ))
            .mount(&server)
            .await;

        let request = RequestSpec::get("models", format!("{}/v1/models", server.uri()));
        let response = client().execute(&request).await.unwrap();
        assert_eq!(response.status, 401);
    }

    #[tokio::test]
    async fn test_post_sends_json_and_headers() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({"model": "claude-code", "messages": []});
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-api-key-123"))
            .and(header("content-type", "application/json"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestSpec::post_json(
            "chat",
            format!("{}/v1/chat/completions", server.uri()),
            &payload,
        )
        .with_header(Header::bearer("test-api-key-123"));
        let response = client().execute(&request).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let request =
            RequestSpec::get("slow", format!("{}/health", server.uri())).with_timeout_ms(50);
        let result = client().execute(&request).await;
        assert_eq!(result, Err(HttpClientError::Timeout { timeout_ms: 50 }));
    }

    #[test]
    fn test_connect_timeout_reports_connect_budget() {
        let client = ReqwestHttpClient::new(Duration::from_secs(10)).unwrap();
        assert_eq!(
            client.timeout_error(true, 300_000),
            HttpClientError::ConnectTimeout { timeout_ms: 10_000 }
        );
        assert_eq!(
            client.timeout_error(false, 300_000),
            HttpClientError::Timeout { timeout_ms: 300_000 }
        );
        assert_eq!(
            HttpClientError::ConnectTimeout { timeout_ms: 10_000 }.to_string(),
            "Connection timed out after 10000ms"
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let request = RequestSpec::get("health", format!("http://127.0.0.1:{port}/health"));
        let result = client().execute(&request).await;
        assert!(matches!(
            result,
            Err(HttpClientError::ConnectionRefused { port: p, .. }) if p == port
        ));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let request = RequestSpec::get("bad", "not a url");
        let result = client().execute(&request).await;
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }
}
