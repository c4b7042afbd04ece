// src/evaluators/search.rs
//! Web search corroboration signal (max 25).

use super::{degraded, within, SignalContext};
use crate::report::ReportInput;
use crate::signal::{Evidence, SignalKind, SignalResult};
use crate::sources::WebHit;
use crate::text::{contains_any, extract_keywords};

const BASE: u32 = 5;
const OFFICIAL_BONUS: u32 = 5;
/// URL fragments that mark an official or authority page.
const OFFICIAL_MARKERS: [&str; 4] = ["gov.", "police", "municipal", "traffic"];

/// `"<location>" <category>`
pub fn build_query(report: &ReportInput) -> String {
    format!("\"{}\" {}", report.location_name.trim(), report.category)
}

pub async fn evaluate(ctx: &SignalContext, report: &ReportInput) -> SignalResult {
    let query = build_query(report);
    let keywords = extract_keywords(&report.description);
    match within(ctx.timeout, ctx.sources.search_web(&query)).await {
        Ok(hits) => score(&query, &keywords, &hits),
        Err(e) => degraded(SignalKind::Search, &e),
    }
}

fn match_bonus(matches: usize) -> u32 {
    match matches {
        m if m > 5 => 15,
        m if m > 2 => 10,
        m if m > 0 => 5,
        _ => 0,
    }
}

pub fn score(query: &str, keywords: &[String], hits: &[WebHit]) -> SignalResult {
    let matches = hits
        .iter()
        .filter(|h| contains_any(&h.text(), keywords))
        .count();
    let official: Vec<&str> = hits
        .iter()
        .map(|h| h.url.as_str())
        .filter(|u| contains_any(u, &OFFICIAL_MARKERS))
        .collect();

    let mut score = BASE + match_bonus(matches);
    if !official.is_empty() {
        score += OFFICIAL_BONUS;
    }

    let mut reason = format!(
        "{matches} of {} web result(s) match the report",
        hits.len()
    );
    if !official.is_empty() {
        reason.push_str(", official source found");
    }

    let mut evidence = Evidence::new("web_search")
        .with("query", query)
        .with("results", hits.len())
        .with("keyword_matches", matches);
    if let Some(url) = official.first() {
        evidence = evidence.with("official_url", *url);
    }

    SignalResult::new(SignalKind::Search, score, reason, evidence)
}
