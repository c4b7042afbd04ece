// src/sources/news_rss.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::sources::NewsHit;
use crate::text::normalize_text;

pub const GOOGLE_NEWS_RSS_ENDPOINT: &str = "https://news.google.com/rss/search";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<ItemSource>,
}

#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "$text")]
    name: Option<String>,
}

fn parse_rfc2822(ts: &str) -> Option<DateTime<Utc>> {
    let odt = OffsetDateTime::parse(ts.trim(), &Rfc2822)
        .ok()?
        .to_offset(UtcOffset::UTC);
    DateTime::<Utc>::from_timestamp(odt.unix_timestamp(), odt.nanosecond())
}

/// Google News titles end in " - Publisher"; split that off when the
/// `<source>` element is missing.
fn split_publisher(title: &str) -> (String, Option<String>) {
    match title.rsplit_once(" - ") {
        Some((head, publisher)) if !head.trim().is_empty() && !publisher.trim().is_empty() => {
            (head.trim().to_string(), Some(publisher.trim().to_string()))
        }
        _ => (title.to_string(), None),
    }
}

/// Parse a news search RSS document into hits, skipping items without a title.
pub fn parse_news_rss(xml: &str) -> Result<Vec<NewsHit>> {
    let rss: Rss = from_str(xml).context("parsing news rss xml")?;
    let mut out = Vec::with_capacity(rss.channel.item.len());

    for it in rss.channel.item {
        let raw_title = normalize_text(it.title.as_deref().unwrap_or_default());
        if raw_title.is_empty() {
            continue;
        }
        let (title, title_publisher) = split_publisher(&raw_title);
        let publisher = it
            .source
            .and_then(|s| s.name)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or(title_publisher)
            .unwrap_or_default();

        out.push(NewsHit {
            title,
            snippet: normalize_text(it.description.as_deref().unwrap_or_default()),
            publisher,
            url: it.link,
            published_at: it.pub_date.as_deref().and_then(parse_rfc2822),
            published_label: None,
        });
    }

    Ok(out)
}
