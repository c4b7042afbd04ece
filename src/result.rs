// src/result.rs
//! Final engine output: score, joined reasoning, sourced evidence and a
//! per-signal breakdown.

use serde::{Deserialize, Serialize};

use crate::signal::{Evidence, SignalKind};

pub const GUARD_DEFAULT_SCORE: u8 = 25;
pub const GUARD_DEFAULT_REASON: &str =
    "Error in real-time verification - defaulting to low confidence";

/// Contribution of every signal plus the final total. `image_authenticity`
/// is always present and 0 when no photo was attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub news_verification: u32,
    pub search_verification: u32,
    pub location_verification: u32,
    pub image_authenticity: u32,
    pub trend_analysis: u32,
    pub user_reputation: u32,
    pub total: u8,
}

impl SignalBreakdown {
    pub fn get(&self, kind: SignalKind) -> u32 {
        match kind {
            SignalKind::News => self.news_verification,
            SignalKind::Search => self.search_verification,
            SignalKind::Location => self.location_verification,
            SignalKind::Image => self.image_authenticity,
            SignalKind::Trend => self.trend_analysis,
            SignalKind::Reputation => self.user_reputation,
        }
    }

    pub fn set(&mut self, kind: SignalKind, score: u32) {
        let slot = match kind {
            SignalKind::News => &mut self.news_verification,
            SignalKind::Search => &mut self.search_verification,
            SignalKind::Location => &mut self.location_verification,
            SignalKind::Image => &mut self.image_authenticity,
            SignalKind::Trend => &mut self.trend_analysis,
            SignalKind::Reputation => &mut self.user_reputation,
        };
        *slot = score;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Breakdown {
    Signals(SignalBreakdown),
    Error { error: String },
}

/// Coarse band for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// 0..=100
    pub score: u8,
    pub reason: String,
    pub evidence: Vec<Evidence>,
    pub breakdown: Breakdown,
}

impl ConfidenceResult {
    /// Fixed result returned when aggregation itself failed.
    pub fn guard_default(error: impl Into<String>) -> Self {
        Self {
            score: GUARD_DEFAULT_SCORE,
            reason: GUARD_DEFAULT_REASON.to_string(),
            evidence: Vec::new(),
            breakdown: Breakdown::Error {
                error: error.into(),
            },
        }
    }

    pub fn is_guard_default(&self) -> bool {
        matches!(self.breakdown, Breakdown::Error { .. })
    }

    pub fn signals(&self) -> Option<&SignalBreakdown> {
        match &self.breakdown {
            Breakdown::Signals(b) => Some(b),
            Breakdown::Error { .. } => None,
        }
    }

    pub fn level(&self) -> ConfidenceLevel {
        match self.score {
            70..=u8::MAX => ConfidenceLevel::High,
            40..=69 => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}
