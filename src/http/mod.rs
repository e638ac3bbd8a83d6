//! HTTP types for proxy functions providing a fetch-like API.

mod request;
mod response;

pub use request::{Method, ProxyRequest};
pub use response::{ProxyResponse, StatusCode, CORS_HEADERS};
