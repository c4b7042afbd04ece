// src/registry.rs
//! Which signals run for a report, and in what order.
//!
//! The order is fixed: News, Search, Location, Image (photo only), Trend,
//! Reputation. It decides the order of reasons and breakdown entries; it has
//! no effect on the numeric score.

use serde::Serialize;

use crate::report::ReportInput;
use crate::signal::SignalKind;

/// Static description of a signal, as exposed on `/signals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalSpec {
    pub kind: SignalKind,
    pub key: &'static str,
    pub max_score: u32,
    pub fallback_score: u32,
    /// Only scheduled when the report carries a photo.
    pub requires_photo: bool,
}

impl SignalSpec {
    fn of(kind: SignalKind) -> Self {
        Self {
            kind,
            key: kind.key(),
            max_score: kind.max_score(),
            fallback_score: kind.fallback_score(),
            requires_photo: kind == SignalKind::Image,
        }
    }
}

/// All signals in registry order.
pub fn catalog() -> Vec<SignalSpec> {
    SignalKind::ALL.into_iter().map(SignalSpec::of).collect()
}

/// Signals to evaluate for `report`, in registry order.
pub fn plan(report: &ReportInput) -> Vec<SignalKind> {
    let has_photo = report.photo().is_some();
    catalog()
        .into_iter()
        .filter(|s| has_photo || !s.requires_photo)
        .map(|s| s.kind)
        .collect()
}

/// Position of `kind` in registry order.
pub fn position(kind: SignalKind) -> usize {
    SignalKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(SignalKind::ALL.len())
}
