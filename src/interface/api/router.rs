//! API Router configuration

use super::health::health_check;
use super::initiate_call::{initiate_call, AppState};
use super::metrics_handler::metrics_handler;
use crate::infrastructure::dial_client::INITIATE_CALL_PATH;
use axum::{
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route
    let health_routes = Router::new().route("/health", get(health_check));

    // Pass-through route, same-origin only; every method (OPTIONS included) reaches the handler
    let call_routes = Router::new().route(INITIATE_CALL_PATH, any(initiate_call));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .merge(health_routes)
        .merge(call_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
}
