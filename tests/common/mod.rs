//! Shared helpers: in-process stub servers for the vendor and the backend

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use clickdial::infrastructure::vendor::HttpVendorGateway;
use clickdial::interface::api::{build_router, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const VENDOR_PATH: &str = "/Cpaas/api/clicktocall/initiate-call";

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// What the stub vendor received
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct StubVendor {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: String,
}

async fn stub_vendor_handler(
    State(stub): State<StubVendor>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    stub.captured.lock().unwrap().push(CapturedRequest {
        content_type: header_text(header::CONTENT_TYPE),
        authorization: header_text(header::AUTHORIZATION),
        body,
    });
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body.clone(),
    )
}

/// Start a vendor stub answering every POST with `status` and the raw `body`
pub async fn spawn_vendor_raw(
    status: StatusCode,
    body: &str,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let stub = StubVendor {
        captured: captured.clone(),
        status,
        body: body.to_string(),
    };
    let app = Router::new()
        .route(VENDOR_PATH, post(stub_vendor_handler))
        .with_state(stub);
    let base = spawn_server(app).await;
    (format!("{}{}", base, VENDOR_PATH), captured)
}

/// Start a vendor stub answering with `status` and a JSON body
pub async fn spawn_vendor(
    status: StatusCode,
    body: Value,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    spawn_vendor_raw(status, &body.to_string()).await
}

/// Pass-through router forwarding to `endpoint`, with a local metrics handle
pub fn proxy_router(endpoint: &str) -> Router {
    let vendor = HttpVendorGateway::new(endpoint, None).unwrap();
    let handle = PrometheusBuilder::new().build_recorder().handle();
    build_router(AppState::new(Arc::new(vendor)), handle)
}

pub fn post_request(body: &str, content_type: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/initiate-call")
        .header(header::CONTENT_TYPE, content_type);
    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Backend stub: canned JSON per path, plus a log of (path, authorization, body)
#[derive(Clone, Default)]
pub struct StubBackend {
    pub calls: Arc<Mutex<Vec<(String, Option<String>, String)>>>,
}

pub async fn spawn_backend(routes: Vec<(&'static str, StatusCode, Value)>) -> (String, StubBackend) {
    let stub = StubBackend::default();
    let mut app = Router::new();
    for (path, status, body) in routes {
        let calls = stub.calls.clone();
        app = app.route(
            path,
            post(move |headers: HeaderMap, request_body: String| {
                let calls = calls.clone();
                let body = body.clone();
                async move {
                    let authorization = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    calls
                        .lock()
                        .unwrap()
                        .push((path.to_string(), authorization, request_body));
                    (status, Json(body))
                }
            }),
        );
    }
    let base = spawn_server(app).await;
    (base, stub)
}
