//! Integration tests for the proxy runtime types.

use glossary_proxy::http::CORS_HEADERS;
use glossary_proxy::prelude::*;

#[tokio::test]
async fn test_proxy_request_builder() {
    let request = ProxyRequest::new(Method::Post, "/glossary")
        .header("Content-Type", "application/json")
        .body(r#"{"query": "burnout"}"#);

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/glossary");
    assert_eq!(
        request.headers.get("content-type"),
        Some(&"application/json".to_string())
    );
    assert!(request.body.is_some());
    assert!(!request.is_preflight());
}

#[tokio::test]
async fn test_options_request_is_preflight() {
    let request = ProxyRequest::new(Method::Options, "/glossary");
    assert!(request.is_preflight());
}

#[tokio::test]
async fn test_proxy_response_json() {
    #[derive(serde::Serialize)]
    struct TestData {
        message: String,
        count: u32,
    }

    let data = TestData {
        message: "Hello".to_string(),
        count: 42,
    };

    let response = ProxyResponse::json(&data).unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );
    let body: serde_json::Value = response.json_body().unwrap().unwrap();
    assert_eq!(body["count"], 42);
}

#[tokio::test]
async fn test_json_with_status() {
    let response =
        ProxyResponse::json_with_status(StatusCode::INTERNAL_SERVER_ERROR, &["a"]).unwrap();
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text_body(), Some(r#"["a"]"#.to_string()));
}

#[tokio::test]
async fn test_with_cors_sets_every_header() {
    let response = ProxyResponse::text("hi").with_cors();

    for (name, value) in CORS_HEADERS {
        assert_eq!(response.headers.get(name), Some(&value.to_string()));
    }
    // The JSON content type replaces the text one.
    assert_eq!(response.headers.len(), CORS_HEADERS.len());
}

#[tokio::test]
async fn test_proxy_response_error() {
    let response = ProxyResponse::error(502u16, "upstream unavailable");

    assert_eq!(response.status, StatusCode(502));
    assert_eq!(
        response.headers.get("Content-Type"),
        Some(&"text/plain".to_string())
    );
    assert_eq!(response.text_body(), Some("upstream unavailable".to_string()));
}

#[tokio::test]
async fn test_function_context() {
    let ctx = FunctionContext::new("glossary", "req-456")
        .with_env("WEBFLOW_API_TOKEN", "secret123")
        .with_env("WEBFLOW_SITE_ID", "site");

    assert_eq!(ctx.function_name, "glossary");
    assert_eq!(ctx.request_id, "req-456");
    assert_eq!(ctx.get_env("WEBFLOW_API_TOKEN"), Some(&"secret123".to_string()));
    assert_eq!(ctx.get_env("WEBFLOW_SITE_ID"), Some(&"site".to_string()));
    assert_eq!(ctx.get_env("NONEXISTENT"), None);
}

#[tokio::test]
async fn test_proxy_error_conversion() {
    let error = ProxyError::bad_request("Request body too large");
    let response: ProxyResponse = error.into();

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text_body(),
        Some("Request body too large".to_string())
    );
}

#[tokio::test]
async fn test_proxy_error_display() {
    let error = ProxyError::new("boom");
    assert_eq!(error.code, 500);
    assert_eq!(error.to_string(), "[500] boom");
}

#[tokio::test]
async fn test_request_from_hyper_parts() {
    let (parts, ()) = hyper::Request::builder()
        .method(hyper::Method::POST)
        .uri("http://localhost:3000/glossary?term=burnout")
        .header("X-Trace", "abc")
        .body(())
        .unwrap()
        .into_parts();

    let request = ProxyRequest::from_parts(&parts, None);

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/glossary");
    assert_eq!(request.headers.get("x-trace"), Some(&"abc".to_string()));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_unlisted_methods_are_served_as_get() {
    assert_eq!(Method::from(&hyper::Method::PUT), Method::Get);
    assert_eq!(Method::from(&hyper::Method::DELETE), Method::Get);
    assert_eq!(Method::from(&hyper::Method::HEAD), Method::Get);
    assert_eq!(Method::from(&hyper::Method::OPTIONS), Method::Options);
    assert_eq!(Method::from(&hyper::Method::POST), Method::Post);
}

#[tokio::test]
async fn test_method_display() {
    assert_eq!(Method::Get.to_string(), "GET");
    assert_eq!(Method::Post.to_string(), "POST");
    assert_eq!(Method::Options.to_string(), "OPTIONS");
}

#[tokio::test]
async fn test_server_config_builder() {
    let config = ServerConfig::new()
        .host("127.0.0.1")
        .port(9000)
        .env("WEBFLOW_COLLECTION_ID", "abc")
        .max_body_size(16);

    assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    assert_eq!(config.env.get("WEBFLOW_COLLECTION_ID"), Some(&"abc".to_string()));
    assert_eq!(config.max_body_size, 16);
    assert!(config.enable_health);
}
