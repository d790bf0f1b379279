//! End-to-end runs of the probe suites against a mock server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;
use std::process::{Command, Output};
use std::time::Duration;

use ccsmoke_domain::{RunSettings, SuiteSelection};
use ccsmoke_infrastructure::ConsoleReporter;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key-123";

fn settings(base_url: &str, suite: SuiteSelection) -> RunSettings {
    let mut settings = RunSettings::new(base_url).unwrap();
    settings.api_key = Some(API_KEY.to_string());
    settings.suite = suite;
    settings.startup_delay = Duration::ZERO;
    settings.request_timeout = Duration::from_secs(5);
    settings.completion_timeout = Duration::from_secs(5);
    settings
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "claude-code",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

async fn healthy_server() -> MockServer {
    let server = MockServer::start().await;
    let bearer = format!("Bearer {API_KEY}");

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Claude Code API"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"object": "list", "data": [{"id": "claude-code"}]})),
        )
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Invalid API key"}})),
        )
        .with_priority(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hello from .env test!")))
        .mount(&server)
        .await;

    server
}

async fn run(settings: RunSettings) -> (ccsmoke_domain::RunSummary, String) {
    let mut reporter = ConsoleReporter::new(Vec::new());
    let summary = ccsmoke::run(settings, &mut reporter).await.unwrap();
    (summary, String::from_utf8(reporter.into_inner()).unwrap())
}

#[tokio::test]
async fn test_endpoint_suite_passes_against_healthy_server() {
    let server = healthy_server().await;

    let (summary, output) = run(settings(&server.uri(), SuiteSelection::Endpoints)).await;

    assert_eq!((summary.passed, summary.total), (5, 5));
    assert!(summary.all_passed());
    assert!(output.contains("3. Testing models endpoint without auth..."));
    assert!(output.contains("   Status: 401"));
    assert!(output.contains("   ✓ Correctly rejected without auth"));
    assert!(output.contains("   Model used: claude-code"));
    assert!(output.contains("   Response: Hello from .env test!"));
    assert!(output.contains("=== Summary: 5/5 tests passed ==="));
    assert!(output.ends_with("✓ All tests passed!\n"));
    assert!(!output.contains(API_KEY));
}

#[tokio::test]
async fn test_models_probes_run_unauthenticated_first() {
    let server = healthy_server().await;

    run(settings(&server.uri(), SuiteSelection::Endpoints)).await;

    let models: Vec<bool> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/v1/models")
        .map(|r| r.headers.contains_key("authorization"))
        .collect();
    assert_eq!(models, vec![false, true]);
}

#[tokio::test]
async fn test_missing_key_fails_authenticated_probes() {
    let server = healthy_server().await;
    let mut settings = settings(&server.uri(), SuiteSelection::Endpoints);
    settings.api_key = None;

    let (summary, output) = run(settings).await;

    assert_eq!((summary.passed, summary.total), (3, 5));
    assert!(output.contains("API key:    not set"));
    assert!(output.contains("✗ 2 tests failed."));
}

#[tokio::test]
async fn test_unreachable_server_fails_every_probe_but_still_reports() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut settings = settings(&format!("http://127.0.0.1:{port}"), SuiteSelection::Endpoints);
    settings.server_log = Some("definitely-missing-server.log".into());

    let (summary, output) = run(settings).await;

    assert_eq!((summary.passed, summary.total), (0, 5));
    assert_eq!(output.matches("✗ Test failed:").count(), 5);
    assert!(!output.contains("   Status:"));
    assert!(output.contains("⚠ Could not read server log"));
    assert!(output.contains("=== Summary: 0/5 tests passed ==="));
}

#[tokio::test]
async fn test_agent_suite_sends_claude_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Done.")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"claude_options": {"tools": ["Bash"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .with_priority(1)
        .mount(&server)
        .await;

    let (summary, output) = run(settings(&server.uri(), SuiteSelection::Agent)).await;

    assert_eq!((summary.passed, summary.total), (3, 4));
    assert!(output.contains("   ✓ File operations passed"));
    assert!(output.contains("3. Testing code execution..."));
    assert!(output.contains("✗ 1 tests failed."));
}

#[tokio::test]
async fn test_server_log_check_is_advisory() {
    let server = healthy_server().await;
    let port = server.address().port();
    let mut log = tempfile::NamedTempFile::new().unwrap();
    writeln!(log, "INFO Listening on 127.0.0.1:{port}").unwrap();
    log.flush().unwrap();

    let mut settings = settings(&server.uri(), SuiteSelection::Endpoints);
    settings.server_log = Some(log.path().to_path_buf());

    let (summary, output) = run(settings).await;

    assert!(summary.all_passed());
    assert!(output.contains(&format!("✓ Server is using port {port}")));
    assert!(output.contains("✗ API key might not be loaded by the server"));
    assert!(output.contains("(advisory only, not counted in the summary)"));
    assert!(output.contains("=== Summary: 5/5 tests passed ==="));
}

/// Runs the compiled binary off the async runtime so the mock server keeps
/// answering while it waits.
async fn run_binary(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_ccsmoke"))
            .args(&args)
            .env_remove("CCSMOKE_BASE_URL")
            .env_remove("CCSMOKE_API_KEY")
            .env_remove("CCSMOKE_MODEL")
            .env_remove("CCSMOKE_SUITE")
            .env_remove("CCSMOKE_SERVER_LOG")
            .output()
            .expect("binary should start")
    })
    .await
    .unwrap()
}

fn binary_args(base_url: &str) -> Vec<String> {
    [
        "--base-url",
        base_url,
        "--api-key",
        API_KEY,
        "--startup-delay-secs",
        "0",
        "--no-log-check",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_exits_zero_when_every_probe_passes() {
    let server = healthy_server().await;

    let output = run_binary(binary_args(&server.uri())).await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("=== Summary: 5/5 tests passed ==="));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_exits_one_when_a_probe_fails() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let output = run_binary(binary_args(&format!("http://127.0.0.1:{port}"))).await;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("=== Summary: 0/5 tests passed ==="));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_exits_two_on_invalid_configuration() {
    for base_url in ["localhost:8083", "http://localhost:8083/#x"] {
        let output = run_binary(binary_args(base_url)).await;
        assert_eq!(output.status.code(), Some(2), "base url {base_url}");
        assert!(output.stdout.is_empty());
    }

    let mut args = binary_args("http://localhost:8083");
    args.extend(["--suite".to_string(), "nightly".to_string()]);
    assert_eq!(run_binary(args).await.status.code(), Some(2));
}
