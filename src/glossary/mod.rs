//! The glossary function: proxies a Webflow collection as a short, normalized
//! JSON list with permissive CORS headers.
//!
//! One invocation runs strictly in order:
//!
//! ```text
//! OPTIONS? ── yes ──▶ 200, empty body
//!    │ no
//!    ▼
//! validate config ─▶ GET v2 items ─▶ (non-2xx) GET v1 items ─▶ parse ─▶ normalize ─▶ first 5
//! ```
//!
//! Any failure along the way becomes a 500 with
//! `{"error": "Failed to fetch glossary data", "message": ...}`.

mod config;
mod error;
pub mod normalize;
mod upstream;

pub use config::{
    Credentials, GlossaryConfig, API_BASE_URL_VAR, API_TOKEN_VAR, COLLECTION_ID_VAR, ENV_KEYS,
    SITE_ID_VAR,
};
pub use error::GlossaryError;
pub use normalize::{GlossaryItem, GLOSSARY_BASE_URL, ITEM_LIMIT};
pub use upstream::{ApiVersion, WebflowClient, DEFAULT_API_BASE_URL};

use crate::function::{FunctionContext, ProxyError, ProxyFunction};
use crate::http::{ProxyRequest, ProxyResponse, StatusCode};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

pub const FUNCTION_NAME: &str = "glossary";
const ERROR_LABEL: &str = "Failed to fetch glossary data";

/// Body of every failed glossary response.
#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a str,
    message: String,
}

pub struct GlossaryFunction {
    client: WebflowClient,
    limit: usize,
}

impl GlossaryFunction {
    pub fn new(client: WebflowClient) -> Self {
        Self {
            client,
            limit: ITEM_LIMIT,
        }
    }

    /// Configuration, upstream fetch and normalization, without response shaping.
    pub async fn load_items(
        &self,
        ctx: &FunctionContext,
    ) -> Result<Vec<GlossaryItem>, GlossaryError> {
        let credentials = GlossaryConfig::from_context(ctx).require()?;
        let data = self.client.fetch_collection_items(&credentials).await?;
        normalize::normalize_items(&data, self.limit)
    }

    fn error_response(err: &GlossaryError) -> Result<ProxyResponse, ProxyError> {
        let envelope = ErrorEnvelope {
            error: ERROR_LABEL,
            message: err.to_string(),
        };
        Ok(ProxyResponse::json_with_status(StatusCode::INTERNAL_SERVER_ERROR, &envelope)?
            .with_cors())
    }
}

#[async_trait]
impl ProxyFunction for GlossaryFunction {
    async fn fetch(
        &self,
        request: ProxyRequest,
        ctx: &FunctionContext,
    ) -> Result<ProxyResponse, ProxyError> {
        if request.is_preflight() {
            debug!(request_id = %ctx.request_id, "CORS preflight");
            return Ok(ProxyResponse::ok().with_cors());
        }

        // GET and POST are served identically; the request body is never read.
        match self.load_items(ctx).await {
            Ok(items) => Ok(ProxyResponse::json(&items)?.with_cors()),
            Err(err) => {
                error!(
                    request_id = %ctx.request_id,
                    error = %err,
                    "Error in glossary function"
                );
                Self::error_response(&err)
            }
        }
    }

    fn name(&self) -> &str {
        FUNCTION_NAME
    }

    fn reads_body(&self) -> bool {
        false
    }
}
