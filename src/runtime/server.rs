//! Proxy HTTP server implementation.

use crate::function::{FunctionContext, ProxyError, ProxyFunction};
use crate::http::{ProxyRequest, ProxyResponse};
use crate::runtime::ServerConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// HTTP host for one proxy function.
///
/// Every path except `/_health` is dispatched to the function, whatever the
/// method, so the function owns preflight handling and its own error shapes.
pub struct ProxyServer {
    config: ServerConfig,
    function: Arc<dyn ProxyFunction>,
}

impl ProxyServer {
    /// Create a new server hosting `function`.
    pub fn new(config: ServerConfig, function: Arc<dyn ProxyFunction>) -> Self {
        Self { config, function }
    }

    /// Bind the configured address and serve until the listener fails.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve connections accepted from an already-bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            "Proxy server for '{}' listening on {}",
            self.function.name(),
            listener.local_addr()?
        );

        let function = self.function.clone();
        let config = Arc::new(self.config);

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let function = function.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let function = function.clone();
                    let config = config.clone();
                    async move { handle_request(req, function, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    function: Arc<dyn ProxyFunction>,
    config: Arc<ServerConfig>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let path = req.uri().path().to_string();
    let request_id = generate_request_id();

    debug!(
        "Handling request: {} {} from {} [{}]",
        req.method(),
        path,
        remote_addr,
        request_id
    );

    if config.enable_health && path == "/_health" {
        return Ok(build_response(ProxyResponse::text("OK")));
    }

    let proxy_request =
        match convert_request(req, function.reads_body(), config.max_body_size).await {
            Ok(req) => req,
            Err(e) => {
                warn!("Failed to convert request: {} [{}]", e, request_id);
                return Ok(build_response(e.into()));
            }
        };

    let ctx = FunctionContext {
        env: config.env.clone(),
        function_name: function.name().to_string(),
        request_id: request_id.clone(),
    };

    match function.fetch(proxy_request, &ctx).await {
        Ok(response) => Ok(build_response(response)),
        Err(e) => {
            error!(
                "Function '{}' error: {} [{}]",
                ctx.function_name, e, request_id
            );
            Ok(build_response(e.into()))
        }
    }
}

/// Convert a hyper Request to ProxyRequest.
///
/// Bodies are read through a [`Limited`] wrapper, so an oversized upload is
/// rejected as soon as it crosses `max_body_size`. Functions that ignore
/// bodies get the body drained frame by frame and never buffered.
async fn convert_request(
    req: Request<Incoming>,
    reads_body: bool,
    max_body_size: usize,
) -> Result<ProxyRequest, ProxyError> {
    let (parts, body) = req.into_parts();

    let body = if reads_body {
        let bytes = Limited::new(body, max_body_size)
            .collect()
            .await
            .map_err(|e| {
                if e.downcast_ref::<LengthLimitError>().is_some() {
                    ProxyError::bad_request("Request body too large")
                } else {
                    ProxyError::bad_request(e.to_string())
                }
            })?
            .to_bytes();
        (!bytes.is_empty()).then_some(bytes)
    } else {
        let discarded = drain(body)
            .await
            .map_err(|e| ProxyError::bad_request(e.to_string()))?;
        if discarded > 0 {
            debug!("Ignored {} request body bytes", discarded);
        }
        None
    };

    Ok(ProxyRequest::from_parts(&parts, body))
}

/// Read and drop a body, returning how many data bytes it carried.
async fn drain(mut body: Incoming) -> Result<usize, hyper::Error> {
    let mut total = 0;
    while let Some(frame) = body.frame().await {
        if let Some(data) = frame?.data_ref() {
            total += data.len();
        }
    }
    Ok(total)
}

/// Build a hyper Response from ProxyResponse.
fn build_response(proxy_response: ProxyResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(proxy_response.status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            proxy_response.status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);

    for (name, value) in proxy_response.headers {
        builder = builder.header(name, value);
    }

    let body = proxy_response.body.unwrap_or_default();
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        error!("Invalid response headers: {}", e);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{:x}", timestamp)
}
