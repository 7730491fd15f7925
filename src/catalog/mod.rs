//! Paginated catalog listing.
//!
//! Maps a `(skip, search)` pair onto the site's listing URLs, fetches the
//! page and turns every listing tile into a [`CatalogEntry`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidbridge::{BridgeConfig, CatalogExtractor, SiteClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Arc::new(BridgeConfig::default());
//! let client = Arc::new(SiteClient::new(&config)?);
//! let catalog = CatalogExtractor::new(config, client);
//!
//! for entry in catalog.list_videos(0, Some("the matrix")).await {
//!     println!("{} {}", entry.id, entry.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod listing;
pub mod paging;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::http_client::{PageFetch, PageFetcher};

pub use listing::{parse_listing, ListingLayout};
pub use paging::{listing_url, page_for_skip, search_slug};

/// Kind reported for every entry. The site only hosts single videos.
pub const ENTRY_KIND: &str = "movie";

/// Title used when neither the link nor the thumbnail carries one.
pub const UNTITLED: &str = "Sin título";

/// One listing tile, shaped the way the add-on protocol expects a meta preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub description: String,
}

/// A catalog page request as it arrives from the protocol layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u32,
    pub query: Option<String>,
}

impl PageRequest {
    pub fn new(skip: u32, query: Option<&str>) -> Self {
        Self {
            skip,
            query: query
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
        }
    }

    /// 1-based page number for this request.
    pub fn page(&self, items_per_page: u32) -> u32 {
        page_for_skip(self.skip, items_per_page)
    }
}

/// Listing extractor bound to one target site.
pub struct CatalogExtractor {
    config: Arc<BridgeConfig>,
    fetcher: Arc<dyn PageFetcher>,
    layout: ListingLayout,
}

impl CatalogExtractor {
    pub fn new(config: Arc<BridgeConfig>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config,
            fetcher,
            layout: ListingLayout::default(),
        }
    }

    /// Replace the selectors used to find listing tiles.
    #[must_use]
    pub fn with_layout(mut self, layout: ListingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// List catalog entries for `skip`/`query`. Never fails: any error is
    /// logged and yields an empty list.
    pub async fn list_videos(&self, skip: u32, query: Option<&str>) -> Vec<CatalogEntry> {
        let request = PageRequest::new(skip, query);
        match self.try_list(&request).await {
            Ok(entries) => entries,
            Err(e) => {
                if e.is_bot_block() {
                    warn!(skip, "Listing blocked by the site: {e}");
                } else {
                    warn!(skip, "Listing failed: {e}");
                }
                Vec::new()
            }
        }
    }

    /// Fallible listing, for callers that want the error.
    pub async fn try_list(&self, request: &PageRequest) -> Result<Vec<CatalogEntry>> {
        let base = self.config.target_url()?;
        let page = request.page(self.config.items_per_page);
        let url = listing_url(&base, page, request.query.as_deref())?;

        info!(page, url = %url, "Scraping listing page");
        let body = self.fetcher.fetch_page(&PageFetch::new(url.as_str())).await?;

        let entries = parse_listing(&body, &base, &self.layout)?;
        info!(page, count = entries.len(), "Listing parsed");
        Ok(entries)
    }
}
