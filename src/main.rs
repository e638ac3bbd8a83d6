//! Glossary proxy server.
//!
//! Reads `WEBFLOW_*` settings (and `HOST`/`PORT`) from the environment or a
//! `.env` file and serves the glossary function on every path.

use glossary_proxy::glossary::{API_BASE_URL_VAR, DEFAULT_API_BASE_URL, ENV_KEYS};
use glossary_proxy::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is the normal deployed case.
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting glossary proxy...");

    let mut config = ServerConfig::new();
    if let Ok(host) = std::env::var("HOST") {
        config = config.host(host);
    }
    if let Ok(port) = std::env::var("PORT") {
        config = config.port(port.parse()?);
    }
    for key in ENV_KEYS {
        if let Ok(value) = std::env::var(key) {
            config = config.env(key, value);
        }
    }

    let base_url =
        std::env::var(API_BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let function = GlossaryFunction::new(WebflowClient::new(base_url));

    tracing::info!("Try: curl http://localhost:{}/glossary", config.port);
    tracing::info!("Health check: curl http://localhost:{}/_health", config.port);

    ProxyServer::new(config, Arc::new(function)).run().await
}
