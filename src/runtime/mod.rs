//! Host runtime serving a single proxy function over HTTP.

mod config;
mod server;

pub use config::ServerConfig;
pub use server::ProxyServer;
