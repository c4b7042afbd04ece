// tests/common/mod.rs
// Scripted collaborators shared by the integration tests.
#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use incident_confidence::photos::{FsPhotoStore, PhotoStore};
use incident_confidence::reputation::ReputationLookup;
use incident_confidence::sources::{NewsHit, PlaceHit, VerificationSource, WebHit};
use incident_confidence::{
    ConfidenceEngine, EngineConfig, GeoPoint, IncidentCategory, ReportInput,
};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How a scripted upstream call behaves.
#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    After(Duration, T),
    Fail,
    Hang,
    Panic,
}

async fn resolve<T: Clone>(reply: &Reply<T>) -> Result<T> {
    match reply {
        Reply::Ok(v) => Ok(v.clone()),
        Reply::After(d, v) => {
            tokio::time::sleep(*d).await;
            Ok(v.clone())
        }
        Reply::Fail => bail!("upstream returned 503"),
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            bail!("hung call finished")
        }
        Reply::Panic => panic!("upstream client exploded"),
    }
}

pub struct ScriptedSource {
    pub news: Reply<Vec<NewsHit>>,
    pub web: Reply<Vec<WebHit>>,
    /// Web queries containing "trending today" are answered from here.
    pub trend: Reply<Vec<WebHit>>,
    pub places: Reply<Vec<PlaceHit>>,
    pub calls: AtomicUsize,
}

impl ScriptedSource {
    /// Healthy upstreams matching the "multi car pileup" scenario.
    pub fn healthy() -> Self {
        Self {
            news: Reply::Ok(vec![
                news("Pileup closes Central Ave", "Reuters", 10),
                news("Multi-car crash near central junction", "Local Daily", 25),
            ]),
            web: Reply::Ok(vec![
                web("Pileup on Central Ave", "", "https://citynews.example/a"),
                web("Central junction crash", "multi car pileup", "https://blog.example/b"),
                web("Traffic alert", "pileup near junction", "https://news.example/c"),
                web("Commuters stuck", "junction jammed", "https://radio.example/d"),
                web("Weather", "sunny", "https://weather.example/e"),
            ]),
            trend: Reply::Ok(vec![web("Breaking: Central Ave closed", "", "")]),
            places: Reply::Ok(vec![PlaceHit {
                name: "Central Junction Road".into(),
                rating: None,
                categories: vec!["route".into()],
            }]),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerificationSource for ScriptedSource {
    async fn search_news(&self, _query: &str) -> Result<Vec<NewsHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        resolve(&self.news).await
    }

    async fn search_web(&self, query: &str) -> Result<Vec<WebHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query.contains("trending today") {
            resolve(&self.trend).await
        } else {
            resolve(&self.web).await
        }
    }

    async fn search_places(&self, _near: GeoPoint, _query: &str) -> Result<Vec<PlaceHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        resolve(&self.places).await
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Filesystem photos, counting every lookup.
#[derive(Default)]
pub struct CountingPhotos {
    pub inner: FsPhotoStore,
    pub calls: AtomicUsize,
}

#[async_trait]
impl PhotoStore for CountingPhotos {
    async fn size_of(&self, path: &str) -> io::Result<Option<u64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.size_of(path).await
    }
}

/// Photo store whose backend errors with something other than NotFound.
pub struct BrokenPhotos;

#[async_trait]
impl PhotoStore for BrokenPhotos {
    async fn size_of(&self, _path: &str) -> io::Result<Option<u64>> {
        Err(io::Error::other("upload volume unreadable"))
    }
}

/// Photo store that never answers.
pub struct HangingPhotos;

#[async_trait]
impl PhotoStore for HangingPhotos {
    async fn size_of(&self, _path: &str) -> io::Result<Option<u64>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

/// Sets its flag when dropped, i.e. when the future holding it is cancelled.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// News lookups hang until cancelled; everything else answers empty.
#[derive(Default)]
pub struct StuckNews {
    pub cancelled: Arc<AtomicBool>,
}

#[async_trait]
impl VerificationSource for StuckNews {
    async fn search_news(&self, _query: &str) -> Result<Vec<NewsHit>> {
        let _flag = DropFlag(Arc::clone(&self.cancelled));
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }

    async fn search_web(&self, _query: &str) -> Result<Vec<WebHit>> {
        Ok(Vec::new())
    }

    async fn search_places(&self, _near: GeoPoint, _query: &str) -> Result<Vec<PlaceHit>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "stuck-news"
    }
}

pub struct FailingReputation;

#[async_trait]
impl ReputationLookup for FailingReputation {
    async fn bonus_for(&self, _user_id: &str) -> Result<u32> {
        bail!("user-history service unavailable")
    }
}

pub fn news(title: &str, publisher: &str, age_min: i64) -> NewsHit {
    NewsHit {
        title: title.to_string(),
        snippet: String::new(),
        publisher: publisher.to_string(),
        url: None,
        published_at: Some(Utc::now() - chrono::Duration::minutes(age_min)),
        published_label: None,
    }
}

pub fn web(title: &str, snippet: &str, url: &str) -> WebHit {
    WebHit {
        title: title.to_string(),
        snippet: snippet.to_string(),
        url: url.to_string(),
    }
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        signal_timeout_ms: 300,
        ..EngineConfig::default()
    }
}

pub fn pileup_report() -> ReportInput {
    ReportInput::new(
        "multi car pileup near central junction",
        IncidentCategory::Traffic,
        GeoPoint::new(77.5946, 12.9716),
        "Central Ave",
        "user-17",
    )
}

pub fn engine_with(
    source: Arc<ScriptedSource>,
    photos: Arc<CountingPhotos>,
) -> ConfidenceEngine {
    ConfidenceEngine::builder(test_config())
        .sources(source)
        .photos(photos)
        .build()
        .expect("engine builds with injected collaborators")
}
