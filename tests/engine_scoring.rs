// tests/engine_scoring.rs
// End-to-end scoring scenarios with scripted upstreams.

mod common;

use common::*;
use incident_confidence::result::{GUARD_DEFAULT_REASON, GUARD_DEFAULT_SCORE};
use incident_confidence::{ConfidenceEngine, SignalKind};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn healthy_upstreams_without_photo() {
    let source = Arc::new(ScriptedSource::healthy());
    let photos = Arc::new(CountingPhotos::default());
    let engine = engine_with(source.clone(), photos.clone());

    let r = engine.score(pileup_report()).await;
    let b = r.signals().expect("signal breakdown");

    assert_eq!(b.news_verification, 25);
    assert_eq!(b.search_verification, 15);
    assert_eq!(b.location_verification, 12);
    assert_eq!(b.image_authenticity, 0);
    assert_eq!(b.trend_analysis, 8);
    assert_eq!(b.user_reputation, 3);
    assert_eq!(r.score, 83);
    assert_eq!(b.total, 83);

    // Image signal never scheduled, photo store never touched.
    assert_eq!(photos.calls.load(Ordering::SeqCst), 0);
    // news + search + places + trend
    assert_eq!(source.calls(), 4);

    let parts: Vec<&str> = r.reason.split("; ").collect();
    assert_eq!(parts.len(), 5);
    assert!(parts[0].starts_with("Found 2 related news article(s)"));
    assert_eq!(parts[4], "User reputation bonus: +3");

    // Reputation evidence has no source and is dropped.
    let sources: Vec<&str> = r.evidence.iter().map(|e| e.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["news_search", "web_search", "places_search", "trend_search"]
    );
}

#[tokio::test]
async fn news_timeout_degrades_only_news() {
    let mut scripted = ScriptedSource::healthy();
    scripted.news = Reply::Hang;
    let engine = engine_with(Arc::new(scripted), Arc::new(CountingPhotos::default()));

    let r = engine.score(pileup_report()).await;
    let b = r.signals().expect("signal breakdown");

    assert_eq!(b.news_verification, 5);
    assert_eq!(b.search_verification, 15);
    assert_eq!(r.score, 63);
    assert!(r.reason.starts_with("News verification unavailable; "));
    assert!(!r.is_guard_default());
}

#[tokio::test]
async fn photo_of_typical_size_scores_15() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crash.jpg");
    std::fs::write(&path, vec![0u8; 2 * 1024 * 1024]).unwrap();

    let photos = Arc::new(CountingPhotos::default());
    let engine = engine_with(Arc::new(ScriptedSource::healthy()), photos.clone());

    let report = pileup_report().with_photo(path.to_str().unwrap());
    let r = engine.score(report).await;
    let b = r.signals().unwrap();

    assert_eq!(b.image_authenticity, 15);
    assert_eq!(r.score, 98);
    assert_eq!(photos.calls.load(Ordering::SeqCst), 1);
    // Image reason slots in after location.
    let parts: Vec<&str> = r.reason.split("; ").collect();
    assert!(parts[3].starts_with("Photo provided (2048 KB"));
    assert!(r.evidence.iter().any(|e| e.source == "image_analysis"));
}

#[tokio::test]
async fn missing_photo_file_scores_0() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.jpg");

    let engine = engine_with(
        Arc::new(ScriptedSource::healthy()),
        Arc::new(CountingPhotos::default()),
    );
    let r = engine
        .score(pileup_report().with_photo(path.to_str().unwrap()))
        .await;

    assert_eq!(r.signals().unwrap().image_authenticity, 0);
    assert!(r.reason.contains("Image file not accessible"));
    assert_eq!(r.score, 83);
}

#[tokio::test]
async fn payload_without_description_hits_guard() {
    let source = Arc::new(ScriptedSource::healthy());
    let engine = engine_with(source.clone(), Arc::new(CountingPhotos::default()));

    let r = engine
        .score_payload(json!({
            "category": "Traffic",
            "location": [77.59, 12.97],
            "locationName": "Central Ave",
            "userId": "u"
        }))
        .await;

    assert_eq!(r.score, GUARD_DEFAULT_SCORE);
    assert_eq!(r.reason, GUARD_DEFAULT_REASON);
    assert!(r.evidence.is_empty());
    assert!(r.is_guard_default());
    let v = serde_json::to_value(&r).unwrap();
    assert!(v["breakdown"]["error"]
        .as_str()
        .unwrap()
        .contains("description"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn invalid_report_fails_before_any_signal_runs() {
    let source = Arc::new(ScriptedSource::healthy());
    let photos = Arc::new(CountingPhotos::default());
    let engine = engine_with(source.clone(), photos.clone());

    let mut report = pileup_report().with_photo("x.jpg");
    report.description = "   ".into();
    let r = engine.score(report).await;

    assert_eq!(r.score, 25);
    assert_eq!(r.reason, GUARD_DEFAULT_REASON);
    assert_eq!(source.calls(), 0);
    assert_eq!(photos.calls.load(Ordering::SeqCst), 0);

    // The unguarded path reports the structural error.
    let mut bad = pileup_report();
    bad.location.latitude = 123.0;
    let err = engine.try_score(bad).await.unwrap_err();
    assert!(format!("{err:#}").contains("invalid coordinate"));
}

#[tokio::test]
async fn completion_order_does_not_change_composition() {
    // News answers last, trend answers first.
    let mut slow_news = ScriptedSource::healthy();
    if let Reply::Ok(hits) = slow_news.news.clone() {
        slow_news.news = Reply::After(Duration::from_millis(120), hits);
    }
    let mut slow_trend = ScriptedSource::healthy();
    if let Reply::Ok(hits) = slow_trend.trend.clone() {
        slow_trend.trend = Reply::After(Duration::from_millis(120), hits);
    }

    let a = engine_with(Arc::new(slow_news), Arc::new(CountingPhotos::default()))
        .score(pileup_report())
        .await;
    let b = engine_with(Arc::new(slow_trend), Arc::new(CountingPhotos::default()))
        .score(pileup_report())
        .await;

    assert_eq!(a.reason, b.reason);
    assert_eq!(a.breakdown, b.breakdown);
    let keys = |r: &incident_confidence::ConfidenceResult| -> Vec<String> {
        r.evidence.iter().map(|e| e.source.clone()).collect()
    };
    assert_eq!(keys(&a), keys(&b));
}

#[tokio::test]
async fn base_score_from_config_and_clamp() {
    let mut cfg = test_config();
    cfg.base_score = 100;
    let engine = ConfidenceEngine::builder(cfg)
        .sources(Arc::new(ScriptedSource::healthy()))
        .build()
        .unwrap();
    let r = engine.score(pileup_report()).await;
    assert_eq!(r.score, 100);
    assert_eq!(r.signals().unwrap().total, 100);
}

#[tokio::test]
async fn every_signal_respects_its_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p.jpg");
    std::fs::write(&path, vec![1u8; 300 * 1024]).unwrap();

    let mut loud = ScriptedSource::healthy();
    loud.news = Reply::Ok((0..40).map(|i| news("pileup", "BBC", i)).collect());
    loud.web = Reply::Ok(
        (0..40)
            .map(|_| web("pileup", "junction", "https://police.gov.example"))
            .collect(),
    );

    let engine = engine_with(Arc::new(loud), Arc::new(CountingPhotos::default()));
    let r = engine
        .score(pileup_report().with_photo(path.to_str().unwrap()))
        .await;
    let b = r.signals().unwrap();
    for kind in SignalKind::ALL {
        assert!(b.get(kind) <= kind.max_score(), "{kind} over ceiling");
    }
    assert!(r.score <= 100);
}

#[tokio::test]
async fn dropped_caller_cancels_signal_tasks() {
    let source = Arc::new(StuckNews::default());
    let cancelled = Arc::clone(&source.cancelled);
    let engine = ConfidenceEngine::builder(test_config())
        .sources(source)
        .build()
        .unwrap();

    // Give up well before the 300 ms signal timeout would release the news task.
    let outcome =
        tokio::time::timeout(Duration::from_millis(50), engine.score(pileup_report())).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(cancelled.load(Ordering::SeqCst), "news task outlived its caller");
}
