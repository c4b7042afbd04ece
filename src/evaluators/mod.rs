// src/evaluators/mod.rs
//! The six verification signals. Every evaluator is total: upstream errors and
//! timeouts are turned into the signal's fallback result right here, so the
//! aggregator never sees a failed signal.

pub mod image;
pub mod location;
pub mod news;
pub mod reputation;
pub mod search;
pub mod trend;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::outlets::RecognizedOutlets;
use crate::photos::PhotoStore;
use crate::report::ReportInput;
use crate::reputation::ReputationLookup;
use crate::signal::{SignalKind, SignalResult};
use crate::sources::VerificationSource;

/// Collaborators shared (read-only) by all evaluators of an engine.
#[derive(Clone)]
pub struct SignalContext {
    pub sources: Arc<dyn VerificationSource>,
    pub photos: Arc<dyn PhotoStore>,
    pub reputation: Arc<dyn ReputationLookup>,
    pub outlets: Arc<RecognizedOutlets>,
    pub timeout: Duration,
}

/// Run one signal against a report. Never fails.
pub async fn evaluate(
    kind: SignalKind,
    ctx: &SignalContext,
    report: &ReportInput,
    now: DateTime<Utc>,
) -> SignalResult {
    let t0 = Instant::now();
    let result = match kind {
        SignalKind::News => news::evaluate(ctx, report, now).await,
        SignalKind::Search => search::evaluate(ctx, report).await,
        SignalKind::Location => location::evaluate(ctx, report).await,
        SignalKind::Image => image::evaluate(ctx, report).await,
        SignalKind::Trend => trend::evaluate(ctx, report).await,
        SignalKind::Reputation => reputation::evaluate(ctx, report).await,
    };
    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    crate::metrics::record_signal(kind, ms);
    debug!(
        target: "confidence",
        signal = %kind,
        score = result.score,
        elapsed_ms = ms,
        "signal evaluated"
    );
    result
}

/// Await an upstream call under the per-signal timeout; a timeout is just another error.
pub(crate) async fn within<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res,
        Err(_) => Err(anyhow!("timed out after {} ms", timeout.as_millis())),
    }
}

/// Log + count a degraded signal and hand back its fallback.
pub(crate) fn degraded(kind: SignalKind, err: &anyhow::Error) -> SignalResult {
    warn!(target: "confidence", signal = %kind, error = %err, "verification degraded, using fallback");
    crate::metrics::record_fallback(kind);
    SignalResult::fallback(kind)
}
