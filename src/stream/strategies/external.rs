//! Last resort: hand the embed page to the client as a web link.

use async_trait::async_trait;

use crate::http_client::PageFetcher;
use crate::stream::strategy::{Extraction, ExtractionStrategy, ItemPage};
use crate::stream::StreamDescriptor;

/// Label of the web-view fallback stream.
pub const EXTERNAL_LABEL: &str = "Ver en Web";

pub struct ExternalFallbackStrategy {
    label: String,
}

impl ExternalFallbackStrategy {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for ExternalFallbackStrategy {
    fn default() -> Self {
        Self::new(EXTERNAL_LABEL)
    }
}

#[async_trait]
impl ExtractionStrategy for ExternalFallbackStrategy {
    fn name(&self) -> &'static str {
        "external-fallback"
    }

    async fn extract(&self, page: &ItemPage, _fetcher: &dyn PageFetcher) -> Extraction {
        match page.embed_url() {
            Some(embed_url) => Extraction::Found(vec![StreamDescriptor::external(
                self.label.clone(),
                embed_url,
            )]),
            None => Extraction::NotFound,
        }
    }
}
