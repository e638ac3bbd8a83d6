//! Glossary configuration, read from the invocation's injected environment.

use crate::function::FunctionContext;
use crate::glossary::GlossaryError;
use tracing::info;

pub const API_TOKEN_VAR: &str = "WEBFLOW_API_TOKEN";
pub const SITE_ID_VAR: &str = "WEBFLOW_SITE_ID";
pub const COLLECTION_ID_VAR: &str = "WEBFLOW_COLLECTION_ID";
pub const API_BASE_URL_VAR: &str = "WEBFLOW_API_BASE_URL";

/// Variables the binary forwards from the process environment into every invocation.
pub const ENV_KEYS: [&str; 3] = [API_TOKEN_VAR, SITE_ID_VAR, COLLECTION_ID_VAR];

/// Raw glossary configuration. Any value may be missing until [`require`](Self::require).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryConfig {
    pub api_token: Option<String>,
    /// Read and reported, never enforced.
    pub site_id: Option<String>,
    pub collection_id: Option<String>,
}

/// Validated values needed to call the upstream collection API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub collection_id: String,
}

impl GlossaryConfig {
    /// Read configuration from the function context. Empty values count as absent.
    pub fn from_context(ctx: &FunctionContext) -> Self {
        let read = |key: &str| ctx.get_env(key).filter(|v| !v.is_empty()).cloned();
        Self {
            api_token: read(API_TOKEN_VAR),
            site_id: read(SITE_ID_VAR),
            collection_id: read(COLLECTION_ID_VAR),
        }
    }

    /// Log which values are present and return the required pair.
    pub fn require(&self) -> Result<Credentials, GlossaryError> {
        info!(
            stage = "config",
            api_token_present = self.api_token.is_some(),
            site_id_present = self.site_id.is_some(),
            collection_id_present = self.collection_id.is_some(),
            "Environment variables check"
        );

        match (&self.api_token, &self.collection_id) {
            (Some(api_token), Some(collection_id)) => Ok(Credentials {
                api_token: api_token.clone(),
                collection_id: collection_id.clone(),
            }),
            _ => Err(GlossaryError::MissingConfig),
        }
    }
}
