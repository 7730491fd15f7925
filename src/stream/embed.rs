//! Locating the embedded player page of an item.
//!
//! Two places are checked, in order: the `embedUrl` field of JSON-LD
//! blocks, then any `embedUrl: "..."` pair anywhere in the raw body.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;
use url::Url;

static EMBED_URL_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"embedUrl["']?\s*[:=]\s*["']([^"']+)["']"#).expect("embedUrl pattern is valid")
});

static EMBED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/embed/(\d+)").expect("embed id pattern is valid"));

static LD_JSON: LazyLock<Option<Selector>> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).ok());

/// Find the embed URL on an item page and make it absolute against `page_url`.
pub fn locate_embed_url(html: &str, page_url: &str) -> Option<String> {
    let raw = embed_url_from_ld_json(html).or_else(|| embed_url_from_text(html))?;
    let resolved = absolutize(&raw, page_url);
    debug!(embed_url = %resolved, "Located embed URL");
    Some(resolved)
}

/// `embedUrl` from the first JSON-LD block that has one.
pub fn embed_url_from_ld_json(html: &str) -> Option<String> {
    let selector = LD_JSON.as_ref()?;
    let document = Html::parse_document(html);

    document.select(selector).find_map(|script| {
        let text = script.text().collect::<String>();
        let json: Value = serde_json::from_str(text.trim()).ok()?;
        find_embed_url(&json)
    })
}

/// Search a JSON-LD value: top-level object, arrays, and `@graph` containers.
fn find_embed_url(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            if let Some(url) = map.get("embedUrl").and_then(Value::as_str) {
                let url = url.trim();
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
            map.get("@graph").and_then(find_embed_url)
        }
        Value::Array(items) => items.iter().find_map(find_embed_url),
        _ => None,
    }
}

/// `embedUrl` key/value pair anywhere in the raw body.
pub fn embed_url_from_text(html: &str) -> Option<String> {
    let caps = EMBED_URL_PAIR.captures(html)?;
    let url = caps.get(1)?.as_str().trim().replace("\\/", "/");
    (!url.is_empty()).then_some(url)
}

/// Numeric player id from an `/embed/<digits>` path segment.
pub fn embed_numeric_id(embed_url: &str) -> Option<&str> {
    EMBED_ID
        .captures(embed_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Cookie pair asking the player for `tier` quality on video `id`.
pub fn quality_cookies(id: &str, tier: &str) -> String {
    format!("kt_qparams_{id}={tier}; kt_rt_quality_{id}={tier}")
}

fn absolutize(raw: &str, page_url: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(raw))
        .map_or_else(|_| raw.to_string(), String::from)
}
