// src/aggregate.rs
//! # Aggregator
//! Fans the planned signals out as independent tokio tasks, reassembles their
//! results in registry order and folds them into one `ConfidenceResult`.
//!
//! A signal task that panics is treated like any other upstream failure and
//! contributes its fallback; the other signals are unaffected.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::evaluators::{self, SignalContext};
use crate::registry;
use crate::report::ReportInput;
use crate::result::{Breakdown, ConfidenceResult, SignalBreakdown};
use crate::signal::{SignalKind, SignalResult};

const REASON_SEPARATOR: &str = "; ";

/// Aborts the held tasks when dropped, so a caller that goes away (client
/// disconnect, outer timeout) takes its spawned work with it.
pub(crate) struct AbortOnDrop(Vec<AbortHandle>);

impl AbortOnDrop {
    pub(crate) fn new<T>(handles: &[&JoinHandle<T>]) -> Self {
        Self(handles.iter().map(|h| h.abort_handle()).collect())
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for h in &self.0 {
            h.abort();
        }
    }
}

/// Validate, evaluate every planned signal concurrently, compose.
/// Errors here are structural; signal failures never surface.
pub async fn aggregate(
    ctx: Arc<SignalContext>,
    report: Arc<ReportInput>,
    base_score: u32,
) -> Result<ConfidenceResult> {
    report.validate().context("invalid report")?;

    let now = Utc::now();
    let handles: Vec<(SignalKind, JoinHandle<SignalResult>)> = registry::plan(&report)
        .into_iter()
        .map(|kind| {
            let ctx = Arc::clone(&ctx);
            let report = Arc::clone(&report);
            let handle =
                tokio::spawn(async move { evaluators::evaluate(kind, &ctx, &report, now).await });
            (kind, handle)
        })
        .collect();
    let _abort = AbortOnDrop::new(&handles.iter().map(|(_, h)| h).collect::<Vec<_>>());

    let mut results = Vec::with_capacity(handles.len());
    for (kind, handle) in handles {
        let result = match handle.await {
            Ok(r) => r,
            Err(join_err) => evaluators::degraded(kind, &anyhow!("signal task failed: {join_err}")),
        };
        results.push(result);
    }

    Ok(compose(base_score, results))
}

/// Pure fold of signal results into the final result. Input order does not
/// matter: results are put back into registry order first.
pub fn compose(base_score: u32, mut results: Vec<SignalResult>) -> ConfidenceResult {
    results.sort_by_key(|r| registry::position(r.signal));

    let mut total = base_score;
    let mut breakdown = SignalBreakdown::default();
    let mut reasons = Vec::with_capacity(results.len());
    let mut evidence = Vec::new();

    for r in results {
        let capped = r.score.min(r.signal.max_score());
        total = total.saturating_add(capped);
        breakdown.set(r.signal, capped);
        reasons.push(r.reason);
        if r.evidence.has_source() {
            evidence.push(r.evidence);
        }
    }

    let score = total.min(100) as u8;
    breakdown.total = score;

    ConfidenceResult {
        score,
        reason: reasons.join(REASON_SEPARATOR),
        evidence,
        breakdown: Breakdown::Signals(breakdown),
    }
}
