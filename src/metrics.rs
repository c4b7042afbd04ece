// src/metrics.rs
use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::signal::SignalKind;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "confidence_evaluations_total",
            "Reports scored by the confidence engine."
        );
        describe_counter!(
            "confidence_guard_defaults_total",
            "Reports that hit the structural-failure default."
        );
        describe_counter!(
            "confidence_signal_fallbacks_total",
            "Signals that degraded to their fallback score."
        );
        describe_histogram!("confidence_signal_ms", "Per-signal evaluation time in milliseconds.");
        describe_histogram!("confidence_score", "Final confidence score distribution.");
    });
}

pub(crate) fn record_signal(kind: SignalKind, elapsed_ms: f64) {
    ensure_metrics_described();
    histogram!("confidence_signal_ms", "signal" => kind.key()).record(elapsed_ms);
}

pub(crate) fn record_fallback(kind: SignalKind) {
    ensure_metrics_described();
    counter!("confidence_signal_fallbacks_total", "signal" => kind.key()).increment(1);
}

pub(crate) fn record_result(score: u8) {
    ensure_metrics_described();
    counter!("confidence_evaluations_total").increment(1);
    histogram!("confidence_score").record(f64::from(score));
}

pub(crate) fn record_guard_default() {
    ensure_metrics_described();
    counter!("confidence_guard_defaults_total").increment(1);
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
