use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::engine::ConfidenceEngine;
use crate::registry::{self, SignalSpec};
use crate::result::ConfidenceResult;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConfidenceEngine>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/confidence", post(score_report))
        .route("/signals", get(list_signals))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Raw body in, so anything unparsable (wrong or missing content-type,
/// broken JSON, not a report) reaches the guard instead of a 4xx.
async fn score_report(State(state): State<AppState>, body: Bytes) -> Json<ConfidenceResult> {
    Json(state.engine.score_bytes(&body).await)
}

async fn list_signals() -> Json<Vec<SignalSpec>> {
    Json(registry::catalog())
}
