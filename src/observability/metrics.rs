//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tx_submissions_total` (counter): resolved attempts by outcome label
//! - `tx_submissions_rejected_total` (counter): submits refused while in flight
//! - `tx_confirmation_duration_seconds` (histogram): time spent awaiting finality
//! - `tx_chain_rpc_health` (gauge): 1=healthy, 0=unhealthy

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count a resolved attempt. `outcome` is `confirmed` or a failure kind.
pub fn record_submission(outcome: &'static str) {
    metrics::counter!("tx_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_rejected_attempt() {
    metrics::counter!("tx_submissions_rejected_total").increment(1);
}

pub fn record_confirmation_duration(elapsed: Duration) {
    metrics::histogram!("tx_confirmation_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_backend_health(backend: &'static str, healthy: bool) {
    metrics::gauge!("tx_chain_rpc_health", "backend" => backend).set(if healthy { 1.0 } else { 0.0 });
}
