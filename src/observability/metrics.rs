//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lapurd_requests_total` (counter): handled requests by status
//! - `lapurd_request_duration_seconds` (histogram): time to produce a page
//! - `lapurd_route_lookups_total` (counter): resolutions by outcome
//!   (`hit`, `not_found`, `redirect_cycle`)
//!
//! Recording is a no-op until a recorder is installed, so library code
//! records unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "lapurd_requests_total";
pub const REQUEST_DURATION: &str = "lapurd_request_duration_seconds";
pub const ROUTE_LOOKUPS: &str = "lapurd_route_lookups_total";

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(status: u16, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "status" => status.to_string()).increment(1);
    metrics::histogram!(REQUEST_DURATION).record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a path resolution.
pub fn record_lookup(outcome: &'static str) {
    metrics::counter!(ROUTE_LOOKUPS, "outcome" => outcome).increment(1);
}
