//! Click-to-call pass-through handler
//!
//! Accepts a call request as JSON or urlencoded form, re-encodes it as a
//! form, forwards it to the vendor with the caller's Authorization header
//! (if any), and relays the vendor's status and JSON body. Exactly one
//! upstream call per POST; nothing is cached, queued or retried.

use super::dto::ProxyErrorBody;
use super::metrics_handler::{record_initiate_call, record_upstream_duration, ProxyOutcome};
use crate::domain::shared::RequestId;
use crate::infrastructure::vendor::{encode_form, normalize_body, ProxyError, VendorGateway};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

/// State shared by the pass-through routes
#[derive(Clone)]
pub struct AppState {
    pub vendor: Arc<dyn VendorGateway>,
}

impl AppState {
    pub fn new(vendor: Arc<dyn VendorGateway>) -> Self {
        Self { vendor }
    }
}

/// `/api/initiate-call` for every method; only POST is forwarded
pub async fn initiate_call(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        warn!("Rejected {} on initiate-call", method);
        record_initiate_call(ProxyOutcome::MethodNotAllowed);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ProxyErrorBody::method_not_allowed()),
        )
            .into_response();
    }

    let request_id = RequestId::new();
    async move {
        match forward(&state, &headers, &body).await {
            Ok((status, relayed)) => {
                record_initiate_call(ProxyOutcome::Relayed);
                (status, Json(relayed)).into_response()
            }
            Err(e) => {
                error!("Proxy error: {}", e);
                record_initiate_call(ProxyOutcome::Failed);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ProxyErrorBody::proxy_failure(e.to_string())),
                )
                    .into_response()
            }
        }
    }
    .instrument(info_span!("initiate_call", %request_id))
    .await
}

async fn forward(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(StatusCode, serde_json::Value), ProxyError> {
    let pairs = normalize_body(body)?;
    let form = encode_form(&pairs)?;
    let authorization = headers.get(AUTHORIZATION).cloned();
    info!(
        "Forwarding {} field(s) to vendor (authorization: {})",
        pairs.len(),
        if authorization.is_some() { "present" } else { "absent" }
    );

    let started = Instant::now();
    let upstream = state.vendor.initiate_call(form, authorization).await?;
    record_upstream_duration(upstream.status.as_u16(), started.elapsed());

    Ok((upstream.status, upstream.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::vendor::{MockVendorGateway, UpstreamResponse};
    use axum::http::HeaderValue;
    use serde_json::json;

    fn state(mock: MockVendorGateway) -> AppState {
        AppState::new(Arc::new(mock))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_non_post_never_reaches_vendor() {
        for method in [
            Method::GET,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ] {
            let mut vendor = MockVendorGateway::new();
            vendor.expect_initiate_call().never();

            let response = initiate_call(
                State(state(vendor)),
                method,
                HeaderMap::new(),
                Bytes::from_static(b"cli=1"),
            )
            .await;

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body_json(response).await, json!({"error": "Method not allowed"}));
        }
    }

    #[tokio::test]
    async fn test_authorization_is_forwarded_verbatim() {
        let mut vendor = MockVendorGateway::new();
        vendor
            .expect_initiate_call()
            .withf(|form, auth| {
                form == "bpartyno=9111111111"
                    && auth.as_ref().and_then(|v| v.to_str().ok()) == Some("Bearer abc.def")
            })
            .times(1)
            .returning(|_, _| {
                Ok(UpstreamResponse {
                    status: StatusCode::OK,
                    body: json!({"status": 200}),
                })
            });
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));

        let response = initiate_call(
            State(state(vendor)),
            Method::POST,
            headers,
            Bytes::from_static(br#"{"bpartyno":"9111111111"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_vendor_error_status_is_relayed() {
        let mut vendor = MockVendorGateway::new();
        vendor
            .expect_initiate_call()
            .withf(|_, auth| auth.is_none())
            .returning(|_, _| {
                Ok(UpstreamResponse {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    body: json!({"status": 422, "message": "invalid bpartyno"}),
                })
            });

        let response = initiate_call(
            State(state(vendor)),
            Method::POST,
            HeaderMap::new(),
            Bytes::from_static(b"bpartyno=1"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({"status": 422, "message": "invalid bpartyno"})
        );
    }

    #[tokio::test]
    async fn test_local_failure_is_500_with_details() {
        let mut vendor = MockVendorGateway::new();
        vendor
            .expect_initiate_call()
            .returning(|_, _| Err(ProxyError::Transport("connection refused".to_string())));

        let response = initiate_call(
            State(state(vendor)),
            Method::POST,
            HeaderMap::new(),
            Bytes::from_static(b"{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Error proxying request");
        assert_eq!(body["details"], "connection refused");
    }
}
