//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hbar_agent_pipeline_runs_total` (counter): pipeline runs by outcome
//! - `hbar_agent_pipeline_duration_seconds` (histogram): end-to-end latency
//! - `hbar_agent_rpc_calls_total` (counter): node calls by method, status
//! - `hbar_agent_rpc_duration_seconds` (histogram): node call latency
//! - `hbar_agent_model_calls_total` (counter): model calls by status
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the end of a pipeline run.
pub fn record_pipeline_run(outcome: &'static str, start: Instant) {
    ::metrics::counter!("hbar_agent_pipeline_runs_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("hbar_agent_pipeline_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record one ledger node call.
pub fn record_rpc_call(method: &'static str, ok: bool, start: Instant) {
    let status = if ok { "ok" } else { "error" };
    ::metrics::counter!("hbar_agent_rpc_calls_total", "method" => method, "status" => status)
        .increment(1);
    ::metrics::histogram!("hbar_agent_rpc_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record one language-model call.
pub fn record_model_call(status: &'static str) {
    ::metrics::counter!("hbar_agent_model_calls_total", "status" => status).increment(1);
}
