//! Prometheus metrics handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "initiate_call_requests_total";
pub const UPSTREAM_DURATION: &str = "initiate_call_upstream_duration_seconds";

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(UPSTREAM_DURATION.to_string()),
            &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
        )?
        .install_recorder()?;

    describe_counter!(
        REQUESTS_TOTAL,
        "Call-initiation requests received by the pass-through, by outcome"
    );
    describe_histogram!(
        UPSTREAM_DURATION,
        "Time spent waiting on the vendor click-to-call API"
    );

    Ok(handle)
}

pub async fn metrics_handler(State(prometheus_handle): State<PrometheusHandle>) -> Response {
    (StatusCode::OK, prometheus_handle.render()).into_response()
}

/// Outcome label of a pass-through request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyOutcome {
    MethodNotAllowed,
    Relayed,
    Failed,
}

impl ProxyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyOutcome::MethodNotAllowed => "method_not_allowed",
            ProxyOutcome::Relayed => "relayed",
            ProxyOutcome::Failed => "failed",
        }
    }
}

pub fn record_initiate_call(outcome: ProxyOutcome) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

pub fn record_upstream_duration(status: u16, duration: Duration) {
    histogram!(UPSTREAM_DURATION, "status" => status.to_string()).record(duration.as_secs_f64());
}
