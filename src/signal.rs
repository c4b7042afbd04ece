//! # Signals
//! One bounded sub-score per verification source, plus the evidence that
//! backs it. Scores are clamped to the signal's ceiling on construction, so a
//! `SignalResult` can never exceed what its signal is allowed to contribute.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Every verification signal the engine knows about, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    News,
    Search,
    Location,
    Image,
    Trend,
    Reputation,
}

impl SignalKind {
    pub const ALL: [SignalKind; 6] = [
        Self::News,
        Self::Search,
        Self::Location,
        Self::Image,
        Self::Trend,
        Self::Reputation,
    ];

    /// Key used in the result breakdown.
    pub fn key(&self) -> &'static str {
        match self {
            Self::News => "news_verification",
            Self::Search => "search_verification",
            Self::Location => "location_verification",
            Self::Image => "image_authenticity",
            Self::Trend => "trend_analysis",
            Self::Reputation => "user_reputation",
        }
    }

    /// Ceiling on the sub-score.
    pub fn max_score(&self) -> u32 {
        match self {
            Self::News => 30,
            Self::Search => 25,
            Self::Location => 15,
            Self::Image => 15,
            Self::Trend => 10,
            Self::Reputation => 5,
        }
    }

    /// Score used when the upstream dependency is unavailable.
    pub fn fallback_score(&self) -> u32 {
        match self {
            Self::News | Self::Search | Self::Location => 5,
            Self::Trend => 2,
            Self::Image | Self::Reputation => 0,
        }
    }

    pub fn fallback_reason(&self) -> &'static str {
        match self {
            Self::News => "News verification unavailable",
            Self::Search => "Web search verification unavailable",
            Self::Location => "Location verification unavailable",
            Self::Image => "Image verification failed",
            Self::Trend => "Trend analysis unavailable",
            Self::Reputation => "User reputation unavailable",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Supporting data for a signal. Only evidence tagged with a non-empty
/// `source` survives into the final result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Evidence {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fields: Map::new(),
        }
    }

    /// Evidence with no origin; dropped during aggregation.
    pub fn untagged() -> Self {
        Self::default()
    }

    /// Add a field (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn has_source(&self) -> bool {
        !self.source.trim().is_empty()
    }
}

/// Output of one evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: SignalKind,
    pub score: u32,
    pub reason: String,
    pub evidence: Evidence,
}

impl SignalResult {
    /// Build a result, capping `score` at the signal's ceiling.
    pub fn new(
        signal: SignalKind,
        score: u32,
        reason: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        Self {
            signal,
            score: score.min(signal.max_score()),
            reason: reason.into(),
            evidence,
        }
    }

    /// Degraded result used when the signal's upstream failed.
    pub fn fallback(signal: SignalKind) -> Self {
        Self::new(
            signal,
            signal.fallback_score(),
            signal.fallback_reason(),
            Evidence::untagged(),
        )
    }
}
