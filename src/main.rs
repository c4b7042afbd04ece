//! Incident Confidence Service — Binary Entrypoint
//! Boots the Axum HTTP server: config, engine, router, metrics.

use std::sync::Arc;

use incident_confidence::{
    api::{create_router, AppState},
    metrics::Metrics,
    telemetry, ConfidenceEngine, EngineConfig,
};
use shuttle_axum::ShuttleAxum;

/// Local logging only when CONFIDENCE_DEV_LOG=1; the deployment runtime
/// installs its own subscriber otherwise.
fn enable_dev_tracing() {
    let dev_flag = std::env::var("CONFIDENCE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");
    if dev_flag && !telemetry::init_tracing() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = EngineConfig::load_default()?;
    let engine = ConfidenceEngine::from_config(cfg)?;
    let metrics = Metrics::init()?;

    let state = AppState {
        engine: Arc::new(engine),
    };
    let router = create_router(state).merge(metrics.router());

    Ok(router.into())
}
