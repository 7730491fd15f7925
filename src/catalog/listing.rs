//! Listing page parsing.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::{CatalogEntry, ENTRY_KIND, UNTITLED};
use crate::error::{BridgeError, Result};
use crate::id;

/// CSS selectors describing a listing tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLayout {
    /// Container of one listing tile.
    pub item: String,
    /// First match inside the tile gives the item link and title.
    pub link: String,
    /// First match inside the tile gives the fallback title and poster.
    pub image: String,
}

impl Default for ListingLayout {
    fn default() -> Self {
        Self {
            item: ".item".to_string(),
            link: "a".to_string(),
            image: "img".to_string(),
        }
    }
}

struct CompiledLayout {
    item: Selector,
    link: Selector,
    image: Selector,
}

impl CompiledLayout {
    fn compile(layout: &ListingLayout) -> Result<Self> {
        Ok(Self {
            item: selector(&layout.item)?,
            link: selector(&layout.link)?,
            image: selector(&layout.image)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BridgeError::Parse(format!("bad selector {css:?}: {e:?}")))
}

/// Parse a listing page into catalog entries, in document order.
///
/// Tiles without a resolvable link are dropped. Relative links and posters
/// are resolved against `base`.
pub fn parse_listing(html: &str, base: &Url, layout: &ListingLayout) -> Result<Vec<CatalogEntry>> {
    let compiled = CompiledLayout::compile(layout)?;
    let document = Html::parse_document(html);

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for tile in document.select(&compiled.item) {
        match parse_tile(tile, base, &compiled) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "Dropped listing tiles without a usable link");
    }
    Ok(entries)
}

fn parse_tile(tile: ElementRef<'_>, base: &Url, layout: &CompiledLayout) -> Option<CatalogEntry> {
    let link = tile.select(&layout.link).next()?;
    let image = tile.select(&layout.image).next();

    let href = non_empty(link.value().attr("href"))?;
    let url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let id = id::encode(url.as_str()).ok()?;

    let title = non_empty(link.value().attr("title"))
        .or_else(|| image.and_then(|img| non_empty(img.value().attr("alt"))))
        .unwrap_or(UNTITLED)
        .to_string();

    let poster = image
        .and_then(|img| {
            non_empty(img.value().attr("data-src")).or_else(|| non_empty(img.value().attr("src")))
        })
        .map(|src| base.join(src).map_or_else(|_| src.to_string(), String::from));

    Some(CatalogEntry {
        id,
        kind: ENTRY_KIND.to_string(),
        description: title.clone(),
        name: title,
        poster,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
