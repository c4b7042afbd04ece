// src/evaluators/trend.rs
//! "Is this being talked about right now" signal (max 10).

use super::{degraded, within, SignalContext};
use crate::report::ReportInput;
use crate::signal::{Evidence, SignalKind, SignalResult};
use crate::sources::WebHit;

const BASE: u32 = 2;
const TRENDING_BONUS: u32 = 6;
const QUIET_BONUS: u32 = 2;
const TREND_MARKERS: [&str; 4] = ["today", "now", "breaking", "latest"];

pub fn build_query(report: &ReportInput) -> String {
    format!(
        "{} {} trending today",
        report.category,
        report.location_name.trim()
    )
}

pub async fn evaluate(ctx: &SignalContext, report: &ReportInput) -> SignalResult {
    let query = build_query(report);
    match within(ctx.timeout, ctx.sources.search_web(&query)).await {
        Ok(hits) => score(&query, &hits),
        Err(e) => degraded(SignalKind::Trend, &e),
    }
}

/// Whole-word match so "snow" or "known" do not count as "now".
fn has_trend_marker(text: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| TREND_MARKERS.contains(&w))
}

pub fn score(query: &str, hits: &[WebHit]) -> SignalResult {
    let trending = hits.iter().filter(|h| has_trend_marker(&h.text())).count();

    let (score, reason) = if trending > 0 {
        (
            BASE + TRENDING_BONUS,
            format!("{trending} result(s) indicate the topic is trending"),
        )
    } else {
        (
            BASE + QUIET_BONUS,
            "No current trending activity detected".to_string(),
        )
    };

    let evidence = Evidence::new("trend_search")
        .with("query", query)
        .with("results", hits.len())
        .with("trending_results", trending);

    SignalResult::new(SignalKind::Trend, score, reason, evidence)
}
