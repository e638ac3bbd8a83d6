//! Inbound request type handed to proxy functions.

use bytes::Bytes;
use hyper::http::request::Parts;
use std::collections::HashMap;

/// Methods a proxy function distinguishes. Anything other than `POST` and
/// `OPTIONS` is served as `GET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Options,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Options => "OPTIONS",
        })
    }
}

impl From<&hyper::Method> for Method {
    fn from(method: &hyper::Method) -> Self {
        match *method {
            hyper::Method::POST => Method::Post,
            hyper::Method::OPTIONS => Method::Options,
            _ => Method::Get,
        }
    }
}

/// Fetch-like HTTP request passed to a [`ProxyFunction`](crate::function::ProxyFunction).
#[derive(Debug, Clone, Default)]
pub struct ProxyRequest {
    pub method: Method,
    /// Request path, without the query string.
    pub url: String,
    /// Headers with lowercased names; values that are not visible ASCII are dropped.
    pub headers: HashMap<String, String>,
    /// `None` when the body was empty or the function does not read bodies.
    pub body: Option<Bytes>,
}

impl ProxyRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Build from the head of a hyper request and an already-read body.
    pub fn from_parts(parts: &Parts, body: Option<Bytes>) -> Self {
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Self {
            method: Method::from(&parts.method),
            url: parts.uri.path().to_string(),
            headers,
            body,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Whether this is a CORS preflight request.
    pub fn is_preflight(&self) -> bool {
        self.method == Method::Options
    }
}
