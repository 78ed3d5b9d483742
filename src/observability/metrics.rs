//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (request counts by verdict, latency)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `waf_requests_total` (counter): requests by verdict and status code
//! - `waf_request_duration_seconds` (histogram): mediation latency
//!
//! # Design Decisions
//! - Low-overhead updates: one counter bump and one histogram sample per
//!   completed request
//! - The exporter is optional; the atomic [`crate::proxy::Counters`] remain
//!   the source of truth when it is disabled

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(verdict: &str, status: u16, start: Instant) {
    counter!(
        "waf_requests_total",
        "verdict" => verdict.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!(
        "waf_request_duration_seconds",
        "verdict" => verdict.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}
