// src/sources/http.rs
//! HTTP-backed verification sources: NewsAPI-shaped news search, Custom
//! Search-shaped web search and Places Nearby-shaped place lookup.
//! Missing API keys make the matching capability fail fast, which the
//! evaluators turn into their fallback score.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use crate::config::{EngineConfig, NewsProvider};
use crate::config::engine::{NewsSourceConfig, PlacesSourceConfig, WebSourceConfig};
use crate::report::GeoPoint;
use crate::sources::news_rss::{self, GOOGLE_NEWS_RSS_ENDPOINT};
use crate::sources::{NewsHit, PlaceHit, VerificationSource, WebHit};
use crate::text::normalize_text;

const USER_AGENT: &str = concat!("incident-confidence/", env!("CARGO_PKG_VERSION"));

pub struct HttpVerificationSources {
    http: reqwest::Client,
    news: NewsSourceConfig,
    web: WebSourceConfig,
    places: PlacesSourceConfig,
}

impl HttpVerificationSources {
    pub fn from_config(cfg: &EngineConfig) -> Result<Self> {
        // The per-signal timeout is enforced by the evaluators; this is a hard backstop.
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(4))
            .timeout(cfg.signal_timeout() + Duration::from_secs(1))
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            news: cfg.news.clone(),
            web: cfg.web.clone(),
            places: cfg.places.clone(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(endpoint)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {endpoint}"))?;
        let status = resp.status();
        if !status.is_success() {
            bail!("{endpoint} returned {status}");
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("decoding response from {endpoint}"))
    }

    async fn newsapi(&self, query: &str) -> Result<Vec<NewsHit>> {
        if self.news.api_key.is_empty() {
            bail!("news source not configured");
        }

        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            articles: Vec<Article>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Article {
            title: Option<String>,
            description: Option<String>,
            url: Option<String>,
            published_at: Option<DateTime<Utc>>,
            source: Option<ArticleSource>,
        }
        #[derive(Deserialize)]
        struct ArticleSource {
            name: Option<String>,
        }

        let body: Resp = self
            .get_json(
                &self.news.endpoint,
                &[
                    ("q", query.to_string()),
                    ("sortBy", "publishedAt".to_string()),
                    ("pageSize", self.news.page_size.to_string()),
                    ("apiKey", self.news.api_key.clone()),
                ],
            )
            .await?;

        Ok(body
            .articles
            .into_iter()
            .map(|a| NewsHit {
                title: normalize_text(a.title.as_deref().unwrap_or_default()),
                snippet: normalize_text(a.description.as_deref().unwrap_or_default()),
                publisher: a.source.and_then(|s| s.name).unwrap_or_default(),
                url: a.url,
                published_at: a.published_at,
                published_label: None,
            })
            .filter(|h| !h.title.is_empty())
            .collect())
    }

    async fn rss(&self, query: &str) -> Result<Vec<NewsHit>> {
        let endpoint = if self.news.endpoint.contains("newsapi.org") {
            GOOGLE_NEWS_RSS_ENDPOINT
        } else {
            self.news.endpoint.as_str()
        };
        let resp = self
            .http
            .get(endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .with_context(|| format!("GET {endpoint}"))?;
        if !resp.status().is_success() {
            bail!("{endpoint} returned {}", resp.status());
        }
        let xml = resp.text().await.context("reading rss body")?;
        let mut hits = news_rss::parse_news_rss(&xml)?;
        hits.truncate(self.news.page_size as usize);
        Ok(hits)
    }
}

#[async_trait]
impl VerificationSource for HttpVerificationSources {
    async fn search_news(&self, query: &str) -> Result<Vec<NewsHit>> {
        match self.news.provider {
            NewsProvider::Newsapi => self.newsapi(query).await,
            NewsProvider::Rss => self.rss(query).await,
            NewsProvider::Disabled => Err(anyhow!("news source disabled")),
        }
    }

    async fn search_web(&self, query: &str) -> Result<Vec<WebHit>> {
        if self.web.api_key.is_empty() || self.web.engine_id.is_empty() {
            bail!("web search source not configured");
        }

        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            items: Vec<Item>,
        }
        #[derive(Deserialize)]
        struct Item {
            title: Option<String>,
            snippet: Option<String>,
            link: Option<String>,
        }

        let body: Resp = self
            .get_json(
                &self.web.endpoint,
                &[
                    ("q", query.to_string()),
                    ("key", self.web.api_key.clone()),
                    ("cx", self.web.engine_id.clone()),
                ],
            )
            .await?;

        Ok(body
            .items
            .into_iter()
            .map(|i| WebHit {
                title: normalize_text(i.title.as_deref().unwrap_or_default()),
                snippet: normalize_text(i.snippet.as_deref().unwrap_or_default()),
                url: i.link.unwrap_or_default(),
            })
            .collect())
    }

    async fn search_places(&self, near: GeoPoint, query: &str) -> Result<Vec<PlaceHit>> {
        if self.places.api_key.is_empty() {
            bail!("places source not configured");
        }

        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            results: Vec<Place>,
            #[serde(default)]
            status: Option<String>,
        }
        #[derive(Deserialize)]
        struct Place {
            name: Option<String>,
            rating: Option<f64>,
            #[serde(default)]
            types: Vec<String>,
        }

        let body: Resp = self
            .get_json(
                &self.places.endpoint,
                &[
                    ("location", format!("{},{}", near.latitude, near.longitude)),
                    ("radius", self.places.radius_m.to_string()),
                    ("keyword", query.to_string()),
                    ("key", self.places.api_key.clone()),
                ],
            )
            .await?;

        match body.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(other) => bail!("places lookup failed: {other}"),
        }

        Ok(body
            .results
            .into_iter()
            .filter_map(|p| {
                let name = p.name?;
                Some(PlaceHit {
                    name,
                    rating: p.rating,
                    categories: p.types,
                })
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
