//! `<source>` tags served directly on the item page.

use std::sync::LazyLock;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::http_client::PageFetcher;
use crate::stream::strategy::{Extraction, ExtractionStrategy, ItemPage};
use crate::stream::{rank_by_quality, StreamDescriptor};

static SOURCE: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("source[src]").ok());

/// Label used when a `<source>` tag has no `label` attribute.
pub const DEFAULT_SOURCE_LABEL: &str = "MP4";

pub struct SourceTagStrategy {
    file_marker: String,
    preferred_quality: String,
}

impl SourceTagStrategy {
    pub fn new(file_marker: impl Into<String>, preferred_quality: impl Into<String>) -> Self {
        Self {
            file_marker: file_marker.into(),
            preferred_quality: preferred_quality.into(),
        }
    }

    /// Playable `<source>` tags in document order, unranked.
    pub fn collect(&self, html: &str) -> Vec<StreamDescriptor> {
        let Some(selector) = SOURCE.as_ref() else {
            return Vec::new();
        };
        let document = Html::parse_document(html);

        document
            .select(selector)
            .filter_map(|tag| {
                let src = tag.value().attr("src")?.trim();
                if !src.contains(&self.file_marker) {
                    return None;
                }
                let label = tag
                    .value()
                    .attr("label")
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .unwrap_or(DEFAULT_SOURCE_LABEL);
                Some(StreamDescriptor::playable(label, src))
            })
            .collect()
    }
}

#[async_trait]
impl ExtractionStrategy for SourceTagStrategy {
    fn name(&self) -> &'static str {
        "source-tags"
    }

    async fn extract(&self, page: &ItemPage, _fetcher: &dyn PageFetcher) -> Extraction {
        let mut streams = self.collect(&page.body);
        rank_by_quality(&mut streams, &self.preferred_quality);
        Extraction::from_streams(streams)
    }
}
