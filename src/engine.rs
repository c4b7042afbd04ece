//! # Confidence Engine
//! Public entry point. Owns the collaborators, runs the aggregator and wraps
//! it in the top-level guard: whatever happens, callers get a usable
//! `ConfidenceResult` back, never an error.

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::aggregate::{aggregate, AbortOnDrop};
use crate::config::EngineConfig;
use crate::evaluators::SignalContext;
use crate::outlets::RecognizedOutlets;
use crate::photos::{FsPhotoStore, PhotoStore};
use crate::report::ReportInput;
use crate::reputation::{FixedReputation, ReputationLookup};
use crate::result::ConfidenceResult;
use crate::sources::http::HttpVerificationSources;
use crate::sources::VerificationSource;
use crate::telemetry::anon_hash;

pub struct ConfidenceEngine {
    ctx: Arc<SignalContext>,
    base_score: u32,
}

/// Builder for swapping individual collaborators (tests, alternative providers).
pub struct EngineBuilder {
    cfg: EngineConfig,
    sources: Option<Arc<dyn VerificationSource>>,
    photos: Option<Arc<dyn PhotoStore>>,
    reputation: Option<Arc<dyn ReputationLookup>>,
}

impl EngineBuilder {
    pub fn sources(mut self, sources: Arc<dyn VerificationSource>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn photos(mut self, photos: Arc<dyn PhotoStore>) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn reputation(mut self, reputation: Arc<dyn ReputationLookup>) -> Self {
        self.reputation = Some(reputation);
        self
    }

    /// Fill unset collaborators from the config (HTTP sources, local photos,
    /// fixed reputation bonus).
    pub fn build(self) -> Result<ConfidenceEngine> {
        let sources: Arc<dyn VerificationSource> = match self.sources {
            Some(s) => s,
            None => Arc::new(
                HttpVerificationSources::from_config(&self.cfg)
                    .context("building http verification sources")?,
            ),
        };
        let photos = self
            .photos
            .unwrap_or_else(|| Arc::new(FsPhotoStore::new()));
        let reputation = self
            .reputation
            .unwrap_or_else(|| Arc::new(FixedReputation::new(self.cfg.reputation_bonus)));

        let ctx = SignalContext {
            sources,
            photos,
            reputation,
            outlets: Arc::new(RecognizedOutlets::from_config(&self.cfg.outlets)),
            timeout: self.cfg.signal_timeout(),
        };

        info!(
            target: "confidence",
            source = ctx.sources.name(),
            base_score = self.cfg.base_score,
            timeout_ms = self.cfg.signal_timeout_ms,
            "confidence engine ready"
        );

        Ok(ConfidenceEngine {
            ctx: Arc::new(ctx),
            base_score: self.cfg.base_score.min(100),
        })
    }
}

impl ConfidenceEngine {
    pub fn builder(cfg: EngineConfig) -> EngineBuilder {
        EngineBuilder {
            cfg,
            sources: None,
            photos: None,
            reputation: None,
        }
    }

    /// Production wiring straight from config.
    pub fn from_config(cfg: EngineConfig) -> Result<Self> {
        Self::builder(cfg).build()
    }

    /// Score a report. Structural failures (invalid report, aggregator
    /// error or panic) yield the fixed low-confidence default.
    pub async fn score(&self, report: ReportInput) -> ConfidenceResult {
        let user = anon_hash(&report.user_id);
        let outcome = self.try_score(report).await;
        Self::guard(&user, outcome)
    }

    /// Score a raw JSON payload; a payload that is not a valid report is a
    /// structural failure.
    pub async fn score_payload(&self, payload: serde_json::Value) -> ConfidenceResult {
        match serde_json::from_value::<ReportInput>(payload) {
            Ok(report) => self.score(report).await,
            Err(e) => Self::guard("-", Err(anyhow!(e).context("malformed report payload"))),
        }
    }

    /// Score a raw request body. Bodies that are not JSON at all take the
    /// same guard path as JSON that is not a report.
    pub async fn score_bytes(&self, body: &[u8]) -> ConfidenceResult {
        match serde_json::from_slice::<ReportInput>(body) {
            Ok(report) => self.score(report).await,
            Err(e) => Self::guard("-", Err(anyhow!(e).context("malformed report payload"))),
        }
    }

    /// The aggregator without the guard. Runs in its own task so a panic
    /// is reported as an error instead of unwinding into the caller.
    pub async fn try_score(&self, report: ReportInput) -> Result<ConfidenceResult> {
        let task = tokio::spawn(aggregate(
            Arc::clone(&self.ctx),
            Arc::new(report),
            self.base_score,
        ));
        let _abort = AbortOnDrop::new(&[&task]);
        match task.await {
            Ok(res) => res,
            Err(join_err) => Err(anyhow!("aggregation task failed: {join_err}")),
        }
    }

    fn guard(user: &str, outcome: Result<ConfidenceResult>) -> ConfidenceResult {
        match outcome {
            Ok(result) => {
                crate::metrics::record_result(result.score);
                info!(
                    target: "confidence",
                    user,
                    score = result.score,
                    evidence = result.evidence.len(),
                    "report scored"
                );
                result
            }
            Err(e) => {
                crate::metrics::record_guard_default();
                warn!(target: "confidence", user, error = %format!("{e:#}"), "structural failure, using default confidence");
                ConfidenceResult::guard_default(format!("{e:#}"))
            }
        }
    }
}
