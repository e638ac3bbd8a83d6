//! Webflow collection-items client with a single v2 → v1 fallback.

use crate::glossary::{Credentials, GlossaryError};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{error, info, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://api.webflow.com";

/// Which form of the collection-items endpoint a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V2,
    /// Legacy endpoint, pinned with `Accept-Version: 1.0.0`.
    V1,
}

impl ApiVersion {
    fn items_path(&self, collection_id: &str) -> String {
        match self {
            ApiVersion::V2 => format!("/v2/collections/{collection_id}/items"),
            ApiVersion::V1 => format!("/collections/{collection_id}/items"),
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiVersion::V2 => write!(f, "v2"),
            ApiVersion::V1 => write!(f, "v1"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebflowClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebflowClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing `reqwest::Client` (and its connection pool).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the collection-items endpoint for `version`.
    pub fn items_url(&self, version: ApiVersion, collection_id: &str) -> String {
        format!("{}{}", self.base_url, version.items_path(collection_id))
    }

    /// Fetch the collection's items as raw JSON.
    ///
    /// The v1 endpoint is tried only when v2 answers with a non-success
    /// status; transport failures are returned as-is.
    pub async fn fetch_collection_items(
        &self,
        credentials: &Credentials,
    ) -> Result<Value, GlossaryError> {
        let mut response = self.get_items(ApiVersion::V2, credentials).await?;

        if !response.status().is_success() {
            warn!(
                stage = "fetch",
                status = response.status().as_u16(),
                "API v2 failed, trying v1"
            );
            response = self.get_items(ApiVersion::V1, credentials).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!(
                stage = "fetch",
                status = status.as_u16(),
                body = %body,
                "Webflow API error response"
            );
            return Err(GlossaryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)?;
        info!(
            stage = "parse",
            shape = %describe_shape(&data),
            "Webflow API success"
        );
        Ok(data)
    }

    async fn get_items(
        &self,
        version: ApiVersion,
        credentials: &Credentials,
    ) -> Result<reqwest::Response, GlossaryError> {
        let url = self.items_url(version, &credentials.collection_id);
        info!(stage = "fetch", version = %version, url = %url, "Making API call");

        let mut request = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", credentials.api_token))
            .header(ACCEPT, "application/json");
        if version == ApiVersion::V1 {
            request = request.header("Accept-Version", "1.0.0");
        }

        let response = request.send().await?;
        info!(
            stage = "fetch",
            version = %version,
            status = response.status().as_u16(),
            "Webflow API response status"
        );
        Ok(response)
    }
}

impl Default for WebflowClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Short description of a payload for logs: top-level keys or array length.
fn describe_shape(data: &Value) -> String {
    match data {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object{{{}}}", keys.join(", "))
        }
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Null => "null".to_string(),
        _ => "scalar".to_string(),
    }
}
