// src/evaluators/news.rs
//! News coverage signal (max 30).

use chrono::{DateTime, Utc};
use serde_json::json;

use super::{degraded, within, SignalContext};
use crate::outlets::RecognizedOutlets;
use crate::report::ReportInput;
use crate::signal::{Evidence, SignalKind, SignalResult};
use crate::sources::NewsHit;
use crate::text::extract_keywords;

const RECENT_BONUS: u32 = 20;
const MANY_RESULTS_BONUS: u32 = 15;
const ANY_RESULT_BONUS: u32 = 10;
const RECOGNIZED_OUTLET_BONUS: u32 = 5;

/// Category + place + top description keywords.
pub fn build_query(report: &ReportInput) -> String {
    let mut parts = vec![
        report.category.label().to_string(),
        report.location_name.trim().to_string(),
    ];
    parts.extend(extract_keywords(&report.description));
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

pub async fn evaluate(
    ctx: &SignalContext,
    report: &ReportInput,
    now: DateTime<Utc>,
) -> SignalResult {
    let query = build_query(report);
    match within(ctx.timeout, ctx.sources.search_news(&query)).await {
        Ok(hits) => score(&query, &hits, &ctx.outlets, now),
        Err(e) => degraded(SignalKind::News, &e),
    }
}

/// Pure scoring over the news hits.
pub fn score(
    query: &str,
    hits: &[NewsHit],
    outlets: &RecognizedOutlets,
    now: DateTime<Utc>,
) -> SignalResult {
    let recent = hits.iter().filter(|h| h.is_recent(now)).count();
    let mut recognized: Vec<&str> = hits
        .iter()
        .map(|h| h.publisher.as_str())
        .filter(|p| outlets.is_recognized(p))
        .collect();
    recognized.sort_unstable();
    recognized.dedup();

    let mut score = if recent > 0 {
        RECENT_BONUS
    } else if hits.len() > 2 {
        MANY_RESULTS_BONUS
    } else if !hits.is_empty() {
        ANY_RESULT_BONUS
    } else {
        0
    };
    if !recognized.is_empty() {
        score += RECOGNIZED_OUTLET_BONUS;
    }

    let reason = if hits.is_empty() {
        "No related news coverage found".to_string()
    } else {
        let mut r = format!("Found {} related news article(s)", hits.len());
        if recent > 0 {
            r.push_str(&format!(", {recent} published within the last hour"));
        }
        if !recognized.is_empty() {
            r.push_str(" incl. recognized outlets");
        }
        r
    };

    let mut evidence = Evidence::new("news_search")
        .with("query", query)
        .with("articles", hits.len())
        .with("recent_articles", recent)
        .with("recognized_outlets", json!(recognized));
    if let Some(top) = hits.first() {
        evidence = evidence.with("top_headline", top.title.as_str());
    }

    SignalResult::new(SignalKind::News, score, reason, evidence)
}
