//! HTTP Request body types

/// HTTP request body with its content type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestBody {
    /// The content type (e.g., "application/json"); `None` for an empty body
    pub content_type: Option<String>,
    /// The body content as a string
    pub content: String,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            content_type: None,
            content: String::new(),
        }
    }

    /// Creates a JSON body from an already serialized document.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            content_type: Some("application/json".to_string()),
            content: content.into(),
        }
    }

    /// Creates a JSON body from a value.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self::json(value.to_string())
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::is_empty is not const
    pub fn is_empty(&self) -> bool {
        self.content_type.is_none() || self.content.is_empty()
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns true if the body declares a JSON content type.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}
