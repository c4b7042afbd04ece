//! # Recognized Outlets
//!
//! Allow-list of news publishers whose coverage earns the news signal its
//! "recognized outlet" bonus.
//!
//! - Loaded from the `[outlets]` table of the engine config (names + aliases).
//! - Case-insensitive lookup with normalization of punctuation, dashes, etc.
//! - Fallback order: aliases → exact match → substring match → fuzzy match.
//! - Includes a built-in `default_seed()` with common outlets.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Minimum Jaro–Winkler similarity for a fuzzy publisher match.
const FUZZY_THRESHOLD: f64 = 0.93;

/// Raw `[outlets]` config section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutletsConfig {
    /// Canonical outlet names.
    #[serde(default)]
    pub recognized: Vec<String>,
    /// Alternative spellings/domains → canonical names.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// Normalized allow-list ready for lookups.
#[derive(Debug, Clone)]
pub struct RecognizedOutlets {
    names: HashSet<String>,
    aliases: HashMap<String, String>,
}

impl RecognizedOutlets {
    /// Build from config; an empty `recognized` list falls back to the seed.
    pub fn from_config(cfg: &OutletsConfig) -> Self {
        if cfg.recognized.is_empty() {
            let mut seed = Self::default_seed();
            for (a, c) in &cfg.aliases {
                seed.aliases.insert(normalize(a), normalize(c));
            }
            return seed;
        }
        Self {
            names: cfg.recognized.iter().map(|n| normalize(n)).collect(),
            aliases: cfg
                .aliases
                .iter()
                .map(|(a, c)| (normalize(a), normalize(c)))
                .collect(),
        }
    }

    /// Whether `publisher` resolves to a recognized outlet.
    ///
    /// Steps:
    /// 1. Alias lookup (normalized) → canonical name in the list.
    /// 2. Exact match.
    /// 3. Substring fallback (e.g. "BBC News India" → "bbc").
    /// 4. Fuzzy match for near spellings ("Hindustan Time" → "hindustan times").
    pub fn is_recognized(&self, publisher: &str) -> bool {
        let s = normalize(publisher);
        if s.is_empty() {
            return false;
        }

        // 1) Alias resolution.
        if let Some(canon) = self.aliases.get(&s) {
            if self.names.contains(canon) {
                return true;
            }
        }

        // 2) Exact.
        if self.names.contains(&s) {
            return true;
        }

        // 3) Substring on word boundaries.
        let padded = format!(" {s} ");
        if self
            .names
            .iter()
            .any(|n| padded.contains(&format!(" {n} ")))
        {
            return true;
        }

        // 4) Fuzzy.
        self.names
            .iter()
            .any(|n| strsim::jaro_winkler(n, &s) >= FUZZY_THRESHOLD)
    }

    /// Built-in seed of widely recognized news outlets.
    pub fn default_seed() -> Self {
        let names = [
            "reuters",
            "associated press",
            "bbc",
            "cnn",
            "al jazeera",
            "the guardian",
            "new york times",
            "washington post",
            "times of india",
            "the hindu",
            "hindustan times",
            "indian express",
            "ndtv",
            "india today",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let aliases = [
            ("ap", "associated press"),
            ("ap news", "associated press"),
            ("apnews com", "associated press"),
            ("bbc news", "bbc"),
            ("bbc co uk", "bbc"),
            ("guardian", "the guardian"),
            ("nyt", "new york times"),
            ("nytimes", "new york times"),
            ("toi", "times of india"),
            ("the times of india", "times of india"),
            ("hindu", "the hindu"),
            ("the indian express", "indian express"),
            ("ndtv com", "ndtv"),
        ]
        .into_iter()
        .map(|(a, c)| (a.to_string(), c.to_string()))
        .collect();

        Self { names, aliases }
    }
}

impl Default for RecognizedOutlets {
    fn default() -> Self {
        Self::default_seed()
    }
}

/// Lowercase, replace punctuation/dashes with spaces, collapse whitespace.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();
    for ch in ['—', '–', '-', '_', '/', '\\', '.', ',', '\'', '’', '|', ':'] {
        out = out.replace(ch, " ");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> RecognizedOutlets {
        RecognizedOutlets::default_seed()
    }

    #[test]
    fn exact_match() {
        assert!(seed().is_recognized("Reuters"));
    }

    #[test]
    fn alias_match() {
        assert!(seed().is_recognized("AP"));
        assert!(seed().is_recognized("nytimes"));
        assert!(seed().is_recognized("NDTV.com"));
    }

    #[test]
    fn substring_match() {
        assert!(seed().is_recognized("BBC News India"));
        assert!(seed().is_recognized("The Times of India - Mumbai"));
    }

    #[test]
    fn fuzzy_match_tolerates_small_typos() {
        assert!(seed().is_recognized("Hindustan Time"));
    }

    #[test]
    fn unknown_outlet_is_rejected() {
        assert!(!seed().is_recognized("Totally Unknown Blog"));
        assert!(!seed().is_recognized(""));
        // "cnn" must not match inside another word.
        assert!(!seed().is_recognized("cnnfanclub"));
    }

    #[test]
    fn config_list_replaces_seed() {
        let cfg = OutletsConfig {
            recognized: vec!["Local Gazette".into()],
            aliases: HashMap::from([("gazette".to_string(), "Local Gazette".to_string())]),
        };
        let o = RecognizedOutlets::from_config(&cfg);
        assert!(o.is_recognized("gazette"));
        assert!(o.is_recognized("The Local Gazette"));
        assert!(!o.is_recognized("Reuters"));
    }
}
