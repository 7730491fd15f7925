//! Extraction strategy trait and the item page it operates on.

use std::sync::OnceLock;

use async_trait::async_trait;

use super::embed::locate_embed_url;
use super::StreamDescriptor;
use crate::http_client::PageFetcher;

/// Outcome of one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// At least one stream, already ranked.
    Found(Vec<StreamDescriptor>),
    /// Nothing usable; try the next strategy.
    NotFound,
}

impl Extraction {
    /// `Found` for a non-empty list, `NotFound` otherwise.
    pub fn from_streams(streams: Vec<StreamDescriptor>) -> Self {
        if streams.is_empty() {
            Self::NotFound
        } else {
            Self::Found(streams)
        }
    }
}

/// A fetched item page.
///
/// The embed URL is located on first use and cached, so strategies that
/// need it share one lookup.
#[derive(Debug)]
pub struct ItemPage {
    pub url: String,
    pub body: String,
    embed_url: OnceLock<Option<String>>,
}

impl ItemPage {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            embed_url: OnceLock::new(),
        }
    }

    /// Absolute URL of the embedded player page, if the item page links one.
    pub fn embed_url(&self) -> Option<&str> {
        self.embed_url
            .get_or_init(|| locate_embed_url(&self.body, &self.url))
            .as_deref()
    }
}

/// One self-contained way of finding streams on an item page.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Short name for logs (e.g., `"source-tags"`).
    fn name(&self) -> &'static str;

    /// Look for streams. Failures are handled inside and reported as `NotFound`.
    async fn extract(&self, page: &ItemPage, fetcher: &dyn PageFetcher) -> Extraction;
}
