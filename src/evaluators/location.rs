// src/evaluators/location.rs
//! Place plausibility signal (max 15).

use serde_json::json;

use super::{degraded, within, SignalContext};
use crate::report::ReportInput;
use crate::signal::{Evidence, SignalKind, SignalResult};
use crate::sources::PlaceHit;
use crate::text::contains_any;

const BASE: u32 = 5;
const ANY_PLACE_BONUS: u32 = 5;
const RATED_PLACE_BONUS: u32 = 3;
const ROAD_CONTEXT_BONUS: u32 = 2;
const ROAD_MARKERS: [&str; 4] = ["road", "highway", "junction", "signal"];

pub async fn evaluate(ctx: &SignalContext, report: &ReportInput) -> SignalResult {
    let query = report.location_name.trim();
    match within(
        ctx.timeout,
        ctx.sources.search_places(report.location, query),
    )
    .await
    {
        Ok(places) => score(&places),
        Err(e) => degraded(SignalKind::Location, &e),
    }
}

pub fn score(places: &[PlaceHit]) -> SignalResult {
    let rated = places.iter().any(|p| p.rating.is_some());
    let road: Vec<&str> = places
        .iter()
        .map(|p| p.name.as_str())
        .filter(|n| contains_any(n, &ROAD_MARKERS))
        .collect();

    let mut score = BASE;
    if !places.is_empty() {
        score += ANY_PLACE_BONUS;
    }
    if rated {
        score += RATED_PLACE_BONUS;
    }
    if !road.is_empty() {
        score += ROAD_CONTEXT_BONUS;
    }

    let reason = if places.is_empty() {
        "No known places found near the reported location".to_string()
    } else {
        let mut r = format!("{} place(s) found near the reported location", places.len());
        if rated {
            r.push_str(", incl. well-known places");
        }
        if !road.is_empty() {
            r.push_str(", road context present");
        }
        r
    };

    let evidence = Evidence::new("places_search")
        .with("places", places.len())
        .with("rated_place", rated)
        .with(
            "nearby",
            json!(places.iter().take(3).map(|p| p.name.as_str()).collect::<Vec<_>>()),
        );

    SignalResult::new(SignalKind::Location, score, reason, evidence)
}
