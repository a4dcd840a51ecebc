//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define client metrics (attempts, latency, fallback outcomes)
//! - Expose a Prometheus-compatible metrics endpoint when enabled
//!
//! # Metrics
//! - `promag_attempts_total` (counter): upstream attempts by namespace, status
//! - `promag_attempt_duration_seconds` (histogram): latency by namespace
//! - `promag_fallback_total` (counter): fallback outcomes (rescued/failed/error)
//! - `promag_cache_lookups_total` (counter): member cache hits and misses
//! - `promag_poll_cycles_total` (counter): task poll cycles by result
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Status label is the numeric code, or "error" for transport failures
//! - Recording without an installed exporter is a no-op, so library users
//!   pay nothing unless they opt in

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and start its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one upstream attempt and its latency.
pub fn record_attempt(namespace: &'static str, status: Option<u16>, start_time: Instant) {
    let status_label = match status {
        Some(code) => code.to_string(),
        None => "error".to_string(),
    };

    metrics::counter!(
        "promag_attempts_total",
        "namespace" => namespace,
        "status" => status_label,
    )
    .increment(1);

    metrics::histogram!(
        "promag_attempt_duration_seconds",
        "namespace" => namespace,
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Record how an engaged fallback ended: "rescued", "failed", or "error".
pub fn record_fallback(outcome: &'static str) {
    metrics::counter!("promag_fallback_total", "outcome" => outcome).increment(1);
}

/// Record a cache lookup as a hit or a miss.
pub fn record_cache_lookup(resource: &'static str, hit: bool) {
    metrics::counter!(
        "promag_cache_lookups_total",
        "resource" => resource,
        "result" => if hit { "hit" } else { "miss" },
    )
    .increment(1);
}

/// Record one task poll cycle.
pub fn record_poll_cycle(success: bool) {
    metrics::counter!(
        "promag_poll_cycles_total",
        "result" => if success { "ok" } else { "error" },
    )
    .increment(1);
}
