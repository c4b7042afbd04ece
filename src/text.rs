// src/text.rs
//! Text helpers shared by the evaluators: keyword extraction from the report
//! description and cleanup of upstream titles/snippets before matching.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Maximum number of keywords taken from a description.
pub const MAX_KEYWORDS: usize = 5;

/// Deterministic tokenizer: lower-case, strip non-word characters, drop
/// words of 3 chars or fewer, keep the first `MAX_KEYWORDS` in order.
pub fn extract_keywords(description: &str) -> Vec<String> {
    static RE_NON_WORD: OnceCell<Regex> = OnceCell::new();
    let re = RE_NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex"));

    let lowered = description.to_lowercase();
    let stripped = re.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Normalize upstream text: decode HTML entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("static regex"));
    let untagged = re_tags.replace_all(&decoded, " ");

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    re_ws.replace_all(&untagged, " ").trim().to_string()
}

/// Case-insensitive substring test for any of `needles` in `haystack`.
pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    let hay = haystack.to_lowercase();
    needles
        .iter()
        .map(|n| n.as_ref().to_lowercase())
        .any(|n| !n.is_empty() && hay.contains(&n))
}
