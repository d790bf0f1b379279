//! The fixed probe lists.
//!
//! Order is significant: the unauthenticated models probe runs before the
//! authenticated one against the same endpoint.

use ccsmoke_domain::chat::{ChatCompletionRequest, ClaudeOptions};
use ccsmoke_domain::testing::Assertion;
use ccsmoke_domain::{Probe, RunSettings, TimeoutClass};

const CHAT_PATH: &str = "/v1/chat/completions";
const CONTENT_PATH: &str = "$.choices[0].message.content";
const AGENT_WORKDIR: &str = "/tmp";

/// Probes for the server's HTTP surface: health, root, models and one chat
/// completion.
#[must_use]
pub fn endpoint_probes(model: &str) -> Vec<Probe> {
    let chat = ChatCompletionRequest::single(model, "Say 'Hello from .env test!'").max_tokens(100);

    vec![
        Probe::get("health check endpoint", "/health")
            .expect(Assertion::status(200))
            .expect(Assertion::IsJson)
            .on_pass("Health check passed"),
        Probe::get("root endpoint", "/")
            .expect(Assertion::status(200))
            .expect(Assertion::IsJson)
            .on_pass("Root endpoint passed"),
        Probe::get("models endpoint without auth", "/v1/models")
            .expect(Assertion::status(401))
            .expect(Assertion::IsJson)
            .on_pass("Correctly rejected without auth"),
        Probe::get("models endpoint with auth", "/v1/models")
            .authenticated()
            .expect(Assertion::status(200))
            .expect(Assertion::IsJson)
            .expect(Assertion::json_path("$.data[*]"))
            .on_pass("Models endpoint passed with auth"),
        completion_probe("chat completions endpoint", &chat)
            .highlight("Model used", "$.model")
            .highlight("Response", CONTENT_PATH)
            .on_pass("Chat completions passed"),
    ]
}

/// Chat completions that ask the server-side agent to use tools.
///
/// The file operations probe makes the remote agent create
/// `test_output.txt` in its working directory.
#[must_use]
pub fn agent_probes(model: &str) -> Vec<Probe> {
    let basic = ChatCompletionRequest::single(model, "Say hello and tell me what day it is");
    let write = ChatCompletionRequest::single(
        model,
        "Create a file called test_output.txt with the content 'Claude Code API works!' in the current directory",
    )
    .claude_options(
        &ClaudeOptions::with_tool("Write")
            .working_dir(AGENT_WORKDIR)
            .auto_allow(),
    );
    let bash =
        ChatCompletionRequest::single(model, "List all Python files in the current directory")
            .claude_options(
                &ClaudeOptions::with_tool("Bash")
                    .working_dir(AGENT_WORKDIR)
                    .auto_allow(),
            );
    let read =
        ChatCompletionRequest::single(model, "Read this Python script and explain what it does")
            .claude_options(
                &ClaudeOptions::with_tool("Read")
                    .file("/tmp/test_claude_api.py")
                    .auto_allow(),
            );

    vec![
        completion_probe("basic chat completion", &basic)
            .highlight("Response", CONTENT_PATH)
            .on_pass("Basic chat passed"),
        completion_probe("file operations with auto permissions", &write)
            .highlight("Response", CONTENT_PATH)
            .on_pass("File operations passed"),
        completion_probe("code execution", &bash)
            .highlight("Response", CONTENT_PATH)
            .on_pass("Code execution passed"),
        completion_probe("file analysis", &read)
            .highlight("Response", CONTENT_PATH)
            .on_pass("File analysis passed"),
    ]
}

/// The probes selected by the settings, in run order.
#[must_use]
pub fn select(settings: &RunSettings) -> Vec<Probe> {
    let mut probes = Vec::new();
    if settings.suite.includes_endpoints() {
        probes.extend(endpoint_probes(&settings.model));
    }
    if settings.suite.includes_agent() {
        probes.extend(agent_probes(&settings.model));
    }
    probes
}

fn completion_probe(name: &str, request: &ChatCompletionRequest) -> Probe {
    Probe::post(name, CHAT_PATH, request.to_value())
        .authenticated()
        .with_timeout(TimeoutClass::Completion)
        .expect(Assertion::status(200))
        .expect(Assertion::IsJson)
        .expect(Assertion::json_path_not_empty(CONTENT_PATH))
}
