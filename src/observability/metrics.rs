//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Install the Prometheus recorder and scrape listener
//! - Record per-endpoint session issuance outcomes
//!
//! # Metrics
//! - `relay_requests_total` (counter): session requests by endpoint, status
//! - `relay_request_duration_seconds` (histogram): issuance latency
//!
//! # Design Decisions
//! - The exporter is optional; the relay serves traffic without it
//! - Label cardinality stays bounded (two endpoints, HTTP status codes)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Installation failure is logged; the relay keeps serving without a
/// scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(err) => {
            tracing::error!(address = %addr, error = %err, "Failed to install Prometheus exporter");
        }
    }
}

/// Record one session issuance attempt.
pub fn record_session_request(endpoint: &'static str, status: u16, start: Instant) {
    counter!(
        "relay_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("relay_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
