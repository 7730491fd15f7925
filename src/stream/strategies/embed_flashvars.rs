//! Streams declared in the embed player's `flashvars` block.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::http_client::{PageFetch, PageFetcher};
use crate::stream::embed::{embed_numeric_id, quality_cookies};
use crate::stream::flashvars::{extract_block, streams_from_block};
use crate::stream::rank_by_quality;
use crate::stream::strategy::{Extraction, ExtractionStrategy, ItemPage};

/// Highest quality tier the player accepts in its preference cookie.
pub const DEFAULT_QUALITY_TIER: &str = "1080p";

pub struct EmbedFlashvarsStrategy {
    file_marker: String,
    preferred_quality: String,
    quality_tier: String,
    host_guard: Option<Arc<BridgeConfig>>,
}

impl EmbedFlashvarsStrategy {
    pub fn new(file_marker: impl Into<String>, preferred_quality: impl Into<String>) -> Self {
        Self {
            file_marker: file_marker.into(),
            preferred_quality: preferred_quality.into(),
            quality_tier: DEFAULT_QUALITY_TIER.to_string(),
            host_guard: None,
        }
    }

    /// Only fetch embed pages that pass [`BridgeConfig::check_host`].
    #[must_use]
    pub fn with_host_guard(mut self, config: Arc<BridgeConfig>) -> Self {
        self.host_guard = Some(config);
        self
    }

    /// Request for the embed page: referred by the item page, with the
    /// quality cookie when the embed URL carries a numeric id.
    pub fn embed_request(&self, embed_url: &str, item_url: &str) -> PageFetch {
        let request = PageFetch::new(embed_url).with_referer(item_url);
        match embed_numeric_id(embed_url) {
            Some(id) => request.with_cookies(quality_cookies(id, &self.quality_tier)),
            None => request,
        }
    }
}

#[async_trait]
impl ExtractionStrategy for EmbedFlashvarsStrategy {
    fn name(&self) -> &'static str {
        "embed-flashvars"
    }

    async fn extract(&self, page: &ItemPage, fetcher: &dyn PageFetcher) -> Extraction {
        let Some(embed_url) = page.embed_url() else {
            debug!("No embed URL on item page");
            return Extraction::NotFound;
        };

        if let Some(config) = &self.host_guard {
            if let Err(e) = config.check_host(embed_url) {
                warn!(embed_url, "Not fetching embed page: {e}");
                return Extraction::NotFound;
            }
        }

        let request = self.embed_request(embed_url, &page.url);
        let body = match fetcher.fetch_page(&request).await {
            Ok(body) => body,
            Err(e) => {
                warn!(embed_url, "Embed page fetch failed: {e}");
                return Extraction::NotFound;
            }
        };

        let Some(block) = extract_block(&body) else {
            debug!(embed_url, "Embed page has no flashvars block");
            return Extraction::NotFound;
        };

        let mut streams = streams_from_block(block, &self.file_marker);
        rank_by_quality(&mut streams, &self.preferred_quality);
        debug!(embed_url, count = streams.len(), "Streams from flashvars");
        Extraction::from_streams(streams)
    }
}
