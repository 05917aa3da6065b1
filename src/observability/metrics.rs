//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, policy resolutions)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `annotation_requests_total` (counter): requests by endpoint, status
//! - `annotation_request_duration_seconds` (histogram): latency distribution
//! - `annotation_policy_resolutions_total` (counter): resolutions by kind, outcome
//! - `annotation_strategies_loaded` (gauge): loaded strategies by kind
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Labels for endpoint, status code, strategy kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter, listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one policy-name resolution.
pub fn record_resolution(kind: &'static str, outcome: &'static str) {
    metrics::counter!("annotation_policy_resolutions_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}

/// Report how many strategies of a kind were loaded at startup.
pub fn record_loaded(kind: &'static str, count: usize) {
    metrics::gauge!("annotation_strategies_loaded", "kind" => kind).set(count as f64);
}

/// Count one served request and its latency.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!("annotation_requests_total", "endpoint" => endpoint, "status" => status)
        .increment(1);
    metrics::histogram!("annotation_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
