//! Parsing of the embed player's inline `flashvars = { ... };` block.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::StreamDescriptor;

/// URL key, label key and fallback label of one quality slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySlot {
    pub url_key: &'static str,
    pub label_key: &'static str,
    pub default_label: &'static str,
}

/// Quality slots in the order the player declares them.
pub const QUALITY_SLOTS: [QualitySlot; 4] = [
    QualitySlot {
        url_key: "video_url",
        label_key: "video_url_text",
        default_label: "MP4",
    },
    QualitySlot {
        url_key: "video_alt_url",
        label_key: "video_alt_url_text",
        default_label: "480p",
    },
    QualitySlot {
        url_key: "video_alt_url2",
        label_key: "video_alt_url2_text",
        default_label: "720p",
    },
    QualitySlot {
        url_key: "video_alt_url3",
        label_key: "video_alt_url3_text",
        default_label: "1080p",
    },
];

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\bflashvars\s*=\s*\{(.*?)\}\s*;").expect("flashvars pattern is valid")
});

/// `key: 'value'` or `key: "value"`.
static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(\w+)\s*:\s*(?:'([^']*)'|"([^"]*)")"#).expect("flashvars pair pattern is valid")
});

/// Body of the first `flashvars` object literal, without the braces.
pub fn extract_block(html: &str) -> Option<&str> {
    BLOCK
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Quoted key/value pairs of a block, in declaration order.
fn pairs(block: &str) -> impl Iterator<Item = (&str, &str)> {
    PAIR.captures_iter(block).filter_map(|caps| {
        let key = caps.get(1)?.as_str();
        let value = caps.get(2).or_else(|| caps.get(3))?.as_str().trim();
        Some((key, value))
    })
}

/// Quoted string value of `key` inside a flashvars block.
pub fn value_of(block: &str, key: &str) -> Option<String> {
    pairs(block)
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Playable streams declared in `block`, in slot order. URLs that don't
/// contain `file_marker` are ignored.
pub fn streams_from_block(block: &str, file_marker: &str) -> Vec<StreamDescriptor> {
    let mut values: HashMap<&str, &str> = HashMap::new();
    for (key, value) in pairs(block) {
        values.entry(key).or_insert(value);
    }
    let lookup = |key: &str| values.get(key).copied().filter(|v| !v.is_empty());

    QUALITY_SLOTS
        .iter()
        .filter_map(|slot| {
            let url = lookup(slot.url_key)?;
            if !url.contains(file_marker) {
                return None;
            }
            let label = lookup(slot.label_key).unwrap_or(slot.default_label);
            Some(StreamDescriptor::playable(label, url))
        })
        .collect()
}
