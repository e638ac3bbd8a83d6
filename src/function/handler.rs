//! Proxy function trait and invocation context.

use crate::http::{ProxyRequest, ProxyResponse};
use async_trait::async_trait;
use std::collections::HashMap;

/// Per-invocation context handed to a proxy function.
#[derive(Debug, Clone, Default)]
pub struct FunctionContext {
    /// Environment the function reads its configuration from.
    pub env: HashMap<String, String>,
    pub function_name: String,
    /// Request ID for tracing.
    pub request_id: String,
}

impl FunctionContext {
    /// Create a new function context.
    pub fn new(function_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            env: HashMap::new(),
            function_name: function_name.into(),
            request_id: request_id.into(),
        }
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Get an environment variable.
    pub fn get_env(&self, key: &str) -> Option<&String> {
        self.env.get(key)
    }
}

/// A fetch-style HTTP function hosted by the proxy runtime.
///
/// `fetch` is called once per inbound request. Implementations own their
/// error mapping: anything returned as `Err` is rendered by the runtime as a
/// plain-text response with the error's status code.
#[async_trait]
pub trait ProxyFunction: Send + Sync {
    async fn fetch(
        &self,
        request: ProxyRequest,
        ctx: &FunctionContext,
    ) -> Result<ProxyResponse, ProxyError>;

    /// Get the function name.
    fn name(&self) -> &str;

    /// Whether `fetch` looks at [`ProxyRequest::body`]. When `false` the
    /// runtime drains the body without buffering it and passes `None`.
    fn reads_body(&self) -> bool {
        true
    }
}

/// Runtime-level error with an HTTP status code.
#[derive(Debug, Clone)]
pub struct ProxyError {
    pub message: String,
    /// HTTP status code to respond with.
    pub code: u16,
}

impl ProxyError {
    /// Create a new ProxyError (500).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 500,
        }
    }

    /// Create a ProxyError with a specific code.
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(400, message)
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ProxyError {}

impl From<ProxyError> for ProxyResponse {
    fn from(err: ProxyError) -> Self {
        ProxyResponse::error(err.code, err.message)
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::new(err.to_string())
    }
}
