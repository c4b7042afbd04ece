// src/sources/mod.rs
//! External verification sources. The engine only sees `VerificationSource`;
//! concrete providers (HTTP APIs, RSS) live in submodules.

pub mod http;
pub mod news_rss;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::GeoPoint;

/// One news search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    /// Publisher name, e.g. "Reuters".
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Relative label some providers return instead of a timestamp ("5 minutes ago").
    #[serde(default)]
    pub published_label: Option<String>,
}

impl NewsHit {
    /// Published within the last hour relative to `now`.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        if let Some(ts) = self.published_at {
            let age = now.signed_duration_since(ts);
            return age >= chrono::Duration::zero() && age <= chrono::Duration::hours(1);
        }
        match self.published_label.as_deref() {
            Some(label) => {
                let l = label.to_ascii_lowercase();
                l.contains("minute")
                    || l.contains("min ago")
                    || l.contains("just now")
                    || l.starts_with("1 hour")
                    || l.starts_with("an hour")
            }
            None => false,
        }
    }
}

/// One general web search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub url: String,
}

impl WebHit {
    /// Title and snippet joined for keyword matching.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }
}

/// One place near a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceHit {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// The three upstream capabilities the evaluators need.
#[async_trait]
pub trait VerificationSource: Send + Sync {
    async fn search_news(&self, query: &str) -> Result<Vec<NewsHit>>;
    async fn search_web(&self, query: &str) -> Result<Vec<WebHit>>;
    async fn search_places(&self, near: GeoPoint, query: &str) -> Result<Vec<PlaceHit>>;
    fn name(&self) -> &'static str;
}

/// Source that refuses every call; every dependent signal falls back.
pub struct DisabledSource;

#[async_trait]
impl VerificationSource for DisabledSource {
    async fn search_news(&self, _query: &str) -> Result<Vec<NewsHit>> {
        bail!("news source disabled")
    }
    async fn search_web(&self, _query: &str) -> Result<Vec<WebHit>> {
        bail!("web source disabled")
    }
    async fn search_places(&self, _near: GeoPoint, _query: &str) -> Result<Vec<PlaceHit>> {
        bail!("places source disabled")
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hit(ts: Option<DateTime<Utc>>, label: Option<&str>) -> NewsHit {
        NewsHit {
            title: "t".into(),
            snippet: String::new(),
            publisher: String::new(),
            url: None,
            published_at: ts,
            published_label: label.map(str::to_string),
        }
    }

    #[test]
    fn recency_by_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert!(hit(Some(now - chrono::Duration::minutes(20)), None).is_recent(now));
        assert!(hit(Some(now - chrono::Duration::minutes(60)), None).is_recent(now));
        assert!(!hit(Some(now - chrono::Duration::minutes(61)), None).is_recent(now));
        assert!(!hit(Some(now + chrono::Duration::minutes(5)), None).is_recent(now));
    }

    #[test]
    fn recency_by_label() {
        let now = Utc::now();
        assert!(hit(None, Some("12 minutes ago")).is_recent(now));
        assert!(hit(None, Some("1 hour ago")).is_recent(now));
        assert!(!hit(None, Some("5 hours ago")).is_recent(now));
        assert!(!hit(None, Some("2 days ago")).is_recent(now));
        assert!(!hit(None, None).is_recent(now));
    }

    #[tokio::test]
    async fn disabled_source_errors() {
        let s = DisabledSource;
        assert!(s.search_news("q").await.is_err());
        assert!(s.search_web("q").await.is_err());
        assert!(s
            .search_places(GeoPoint::new(0.0, 0.0), "q")
            .await
            .is_err());
    }
}
