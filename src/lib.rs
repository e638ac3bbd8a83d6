//! # Glossary Proxy
//!
//! A fetch-like HTTP function that reads glossary entries from a Webflow CMS
//! collection and serves them as a short, normalized JSON list that browsers
//! can fetch cross-origin.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────────────────────┐      ┌──────────────────┐
//! │   Browser    │ ───▶ │  ProxyServer (hyper, tokio)  │ ───▶ │ Webflow API      │
//! │ (CORS fetch) │ ◀─── │   └─ GlossaryFunction        │ ◀─── │ v2, then v1      │
//! └──────────────┘      └──────────────────────────────┘      └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use glossary_proxy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = ServerConfig::new()
//!         .port(8080)
//!         .env("WEBFLOW_API_TOKEN", "token")
//!         .env("WEBFLOW_COLLECTION_ID", "collection");
//!
//!     let function = GlossaryFunction::new(WebflowClient::default());
//!     ProxyServer::new(config, Arc::new(function)).run().await
//! }
//! ```
//!
//! Configuration reaches the function through [`FunctionContext::env`] on
//! every invocation, so a missing token is reported per request rather than at
//! startup.

pub mod function;
pub mod glossary;
pub mod http;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::function::{FunctionContext, ProxyError, ProxyFunction};
    pub use crate::glossary::{GlossaryFunction, GlossaryItem, WebflowClient};
    pub use crate::http::{Method, ProxyRequest, ProxyResponse, StatusCode};
    pub use crate::runtime::{ProxyServer, ServerConfig};
    pub use async_trait::async_trait;
}

pub use function::{FunctionContext, ProxyError, ProxyFunction};
pub use glossary::{GlossaryError, GlossaryFunction, GlossaryItem, WebflowClient};
pub use http::{ProxyRequest, ProxyResponse};
pub use runtime::{ProxyServer, ServerConfig};
