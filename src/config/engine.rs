// src/config/engine.rs
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, time::Duration};

use crate::outlets::OutletsConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/confidence.toml";
pub const ENV_CONFIG_PATH: &str = "CONFIDENCE_CONFIG_PATH";

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_WEB_SEARCH_API_KEY: &str = "WEB_SEARCH_API_KEY";
pub const ENV_PLACES_API_KEY: &str = "PLACES_API_KEY";

fn default_base_score() -> u32 {
    20
}
fn default_signal_timeout_ms() -> u64 {
    4_000
}
fn default_reputation_bonus() -> u32 {
    3
}

/// Which news backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsProvider {
    /// NewsAPI-shaped JSON endpoint (needs an API key).
    #[default]
    Newsapi,
    /// Google News RSS search, no key required.
    Rss,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSourceConfig {
    #[serde(default)]
    pub provider: NewsProvider,
    #[serde(default = "NewsSourceConfig::default_endpoint")]
    pub endpoint: String,
    /// Literal key, or "ENV" to read `NEWS_API_KEY` at load time.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "NewsSourceConfig::default_page_size")]
    pub page_size: u32,
}

impl NewsSourceConfig {
    fn default_endpoint() -> String {
        "https://newsapi.org/v2/everything".to_string()
    }
    fn default_page_size() -> u32 {
        10
    }
}

impl Default for NewsSourceConfig {
    fn default() -> Self {
        Self {
            provider: NewsProvider::default(),
            endpoint: Self::default_endpoint(),
            api_key: String::new(),
            page_size: Self::default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSourceConfig {
    #[serde(default = "WebSourceConfig::default_endpoint")]
    pub endpoint: String,
    /// Literal key, or "ENV" to read `WEB_SEARCH_API_KEY` at load time.
    #[serde(default)]
    pub api_key: String,
    /// Search engine id (`cx`) for Custom Search-shaped APIs.
    #[serde(default)]
    pub engine_id: String,
}

impl WebSourceConfig {
    fn default_endpoint() -> String {
        "https://www.googleapis.com/customsearch/v1".to_string()
    }
}

impl Default for WebSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            api_key: String::new(),
            engine_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesSourceConfig {
    #[serde(default = "PlacesSourceConfig::default_endpoint")]
    pub endpoint: String,
    /// Literal key, or "ENV" to read `PLACES_API_KEY` at load time.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "PlacesSourceConfig::default_radius_m")]
    pub radius_m: u32,
}

impl PlacesSourceConfig {
    fn default_endpoint() -> String {
        "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
    }
    fn default_radius_m() -> u32 {
        500
    }
}

impl Default for PlacesSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            api_key: String::new(),
            radius_m: Self::default_radius_m(),
        }
    }
}

/// Everything the engine needs, passed in explicitly at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Starting total before any signal is added.
    #[serde(default = "default_base_score")]
    pub base_score: u32,
    /// Per-signal upstream timeout.
    #[serde(default = "default_signal_timeout_ms")]
    pub signal_timeout_ms: u64,
    /// Placeholder reputation bonus until a user-history service exists.
    #[serde(default = "default_reputation_bonus")]
    pub reputation_bonus: u32,
    #[serde(default)]
    pub news: NewsSourceConfig,
    #[serde(default)]
    pub web: WebSourceConfig,
    #[serde(default)]
    pub places: PlacesSourceConfig,
    #[serde(default)]
    pub outlets: OutletsConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            signal_timeout_ms: default_signal_timeout_ms(),
            reputation_bonus: default_reputation_bonus(),
            news: NewsSourceConfig::default(),
            web: WebSourceConfig::default(),
            places: PlacesSourceConfig::default(),
            outlets: OutletsConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn signal_timeout(&self) -> Duration {
        Duration::from_millis(self.signal_timeout_ms)
    }

    /// Parse TOML, resolve "ENV" keys and sanitize ranges.
    pub fn from_toml_str(data: &str) -> anyhow::Result<Self> {
        let mut cfg: EngineConfig = toml::from_str(data).context("parsing engine config toml")?;
        cfg.resolve_env_keys();
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading engine config from {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Load using env var + fallbacks:
    /// 1) $CONFIDENCE_CONFIG_PATH (must exist)
    /// 2) config/confidence.toml
    /// 3) built-in defaults
    pub fn load_default() -> anyhow::Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            return Self::load_from_file(p);
        }
        let p = Path::new(DEFAULT_CONFIG_PATH);
        if p.exists() {
            return Self::load_from_file(p);
        }
        let mut cfg = Self::default();
        cfg.resolve_env_keys();
        Ok(cfg)
    }

    /// Replace "ENV" placeholders with the matching env var (empty if unset).
    fn resolve_env_keys(&mut self) {
        fn resolve(key: &mut String, var: &str) {
            if key.trim().eq_ignore_ascii_case("env") {
                *key = env::var(var).unwrap_or_default();
                if key.is_empty() {
                    tracing::warn!(var, "api key placeholder set to ENV but variable is missing");
                }
            }
        }
        resolve(&mut self.news.api_key, ENV_NEWS_API_KEY);
        resolve(&mut self.web.api_key, ENV_WEB_SEARCH_API_KEY);
        resolve(&mut self.places.api_key, ENV_PLACES_API_KEY);
    }

    fn sanitize(&mut self) {
        self.base_score = self.base_score.min(100);
        self.signal_timeout_ms = self.signal_timeout_ms.clamp(250, 30_000);
        self.reputation_bonus = self.reputation_bonus.min(5);
        self.news.page_size = self.news.page_size.clamp(1, 100);
    }
}
