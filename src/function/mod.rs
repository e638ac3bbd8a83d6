//! Function interface hosted by the proxy runtime.

pub mod handler;

pub use handler::{FunctionContext, ProxyError, ProxyFunction};
