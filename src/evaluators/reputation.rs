// src/evaluators/reputation.rs
//! Reporter reputation signal (max 5).

use super::{within, SignalContext};
use crate::report::ReportInput;
use crate::signal::{Evidence, SignalKind, SignalResult};
use crate::telemetry::anon_hash;

pub async fn evaluate(ctx: &SignalContext, report: &ReportInput) -> SignalResult {
    match within(ctx.timeout, ctx.reputation.bonus_for(&report.user_id)).await {
        Ok(bonus) => score(&report.user_id, bonus),
        Err(e) => {
            tracing::warn!(
                target: "confidence",
                user = %anon_hash(&report.user_id),
                error = %e,
                "reputation lookup failed"
            );
            crate::metrics::record_fallback(SignalKind::Reputation);
            SignalResult::fallback(SignalKind::Reputation)
        }
    }
}

/// The bonus is a local placeholder, so its evidence carries no source and
/// is not surfaced in the final result.
pub fn score(user_id: &str, bonus: u32) -> SignalResult {
    let bonus = bonus.min(SignalKind::Reputation.max_score());
    SignalResult::new(
        SignalKind::Reputation,
        bonus,
        format!("User reputation bonus: +{bonus}"),
        Evidence::untagged()
            .with("user", anon_hash(user_id))
            .with("bonus", bonus),
    )
}
