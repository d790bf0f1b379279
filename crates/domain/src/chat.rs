//! OpenAI-compatible chat completions request types.
//!
//! Only the request side is modelled; responses are inspected through JSON
//! paths so that extra or missing fields never abort a probe.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt.
    System,
    /// End user.
    User,
    /// Model output.
    Assistant,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Server-side agent options carried in the `claude_options` extension field.
///
/// The server interprets these; the runner only forwards them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeOptions {
    /// Tools the agent may use (e.g., "Write", "Bash", "Read").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    /// Working directory for the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// Files attached to the conversation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Approve tool permission prompts automatically.
    #[serde(default)]
    pub auto_allow_permissions: bool,
}

impl ClaudeOptions {
    /// Options allowing a single tool.
    #[must_use]
    pub fn with_tool(tool: impl Into<String>) -> Self {
        Self {
            tools: vec![tool.into()],
            ..Self::default()
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Attaches a file.
    #[must_use]
    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Enables automatic permission approval.
    #[must_use]
    pub const fn auto_allow(mut self) -> Self {
        self.auto_allow_permissions = true;
        self
    }

    /// Converts to the opaque extension object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut options = json!({ "auto_allow_permissions": self.auto_allow_permissions });
        if !self.tools.is_empty() {
            options["tools"] = json!(self.tools);
        }
        if let Some(dir) = &self.working_dir {
            options["working_dir"] = json!(dir);
        }
        if !self.files.is_empty() {
            options["files"] = json!(self.files);
        }
        options
    }
}

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletionRequest {
    /// Model name.
    pub model: String,
    /// Conversation.
    pub messages: Vec<ChatMessage>,
    /// Completion length cap.
    pub max_tokens: Option<u32>,
    /// Opaque extension object forwarded as `claude_options`.
    pub claude_options: Option<Value>,
}

impl ChatCompletionRequest {
    /// A single-turn request with one user message.
    #[must_use]
    pub fn single(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: None,
            claude_options: None,
        }
    }

    /// Sets `max_tokens`.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the extension object.
    #[must_use]
    pub fn claude_options(mut self, options: &ClaudeOptions) -> Self {
        self.claude_options = Some(options.to_value());
        self
    }

    /// Serializes to the wire body. Optional fields are omitted when unset.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let messages: Vec<Value> = self
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();
        let mut body = json!({ "model": self.model, "messages": messages });
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(options) = &self.claude_options {
            body["claude_options"] = options.clone();
        }
        body
    }
}
