//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by route, method, status
//! - `proxy_request_duration_seconds` (histogram): latency by route
//! - `proxy_rate_limited_total` (counter): requests rejected by the limiter
//! - `proxy_upstream_failures_total` (counter): outbound calls that got
//!   no response, by upstream
//!
//! # Design Decisions
//! - Exposition via a standalone Prometheus listener, kept off the
//!   proxy's own port
//! - Metric updates are cheap atomic operations; recording never fails
//!   a request

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(route: &str, method: &str, status: u16, started: Instant) {
    counter!(
        "proxy_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("proxy_request_duration_seconds", "route" => route.to_string())
        .record(started.elapsed().as_secs_f64());
}

/// Record a request rejected by the rate limiter.
pub fn record_rate_limited() {
    counter!("proxy_rate_limited_total").increment(1);
}

/// Record an outbound call that never produced a response.
pub fn record_upstream_failure(upstream: &str) {
    counter!("proxy_upstream_failures_total", "upstream" => upstream.to_string()).increment(1);
}

/// Middleware recording request count and latency for every route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&route, &method, response.status().as_u16(), started);
    response
}
