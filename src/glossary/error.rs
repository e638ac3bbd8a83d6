//! Failures of a glossary invocation.

use thiserror::Error;

/// Everything that can stop the glossary handler from returning items.
///
/// All variants collapse into the same 500 envelope; only the display text
/// reaches the caller, as the envelope's `message`.
#[derive(Error, Debug)]
pub enum GlossaryError {
    #[error("Missing required environment variables")]
    MissingConfig,
    #[error("Webflow API error: {status} - {body}")]
    Upstream { status: u16, body: String },
    #[error("Failed to reach Webflow API: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid JSON from Webflow API: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unexpected items payload: {0}")]
    UnexpectedShape(String),
}
