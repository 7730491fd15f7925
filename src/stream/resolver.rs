//! Opaque id to ranked stream list.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::strategies::{EmbedFlashvarsStrategy, ExternalFallbackStrategy, SourceTagStrategy};
use super::strategy::{Extraction, ExtractionStrategy, ItemPage};
use super::StreamDescriptor;
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::http_client::{PageFetch, PageFetcher};
use crate::id;

/// Runs the extraction strategies, in order, against an item page.
///
/// Strategies are checked in registration order. First `Found` wins.
pub struct StreamResolver {
    config: Arc<BridgeConfig>,
    fetcher: Arc<dyn PageFetcher>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl StreamResolver {
    /// Resolver with the default strategy chain.
    pub fn new(config: Arc<BridgeConfig>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(SourceTagStrategy::new(
                config.file_marker.clone(),
                config.preferred_quality.clone(),
            )),
            Box::new(
                EmbedFlashvarsStrategy::new(
                    config.file_marker.clone(),
                    config.preferred_quality.clone(),
                )
                .with_host_guard(config.clone()),
            ),
            Box::new(ExternalFallbackStrategy::default()),
        ];

        Self {
            config,
            fetcher,
            strategies,
        }
    }

    /// Replace the strategy chain.
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Strategy names in evaluation order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve `id` into streams. Never fails: malformed ids and item-page
    /// fetch failures are logged and yield an empty list.
    #[instrument(skip(self))]
    pub async fn resolve_stream(&self, id: &str) -> Vec<StreamDescriptor> {
        match self.try_resolve(id).await {
            Ok(streams) => streams,
            Err(e) => {
                warn!("Stream resolution failed: {e}");
                Vec::new()
            }
        }
    }

    /// Fallible resolution, for callers that want the error.
    pub async fn try_resolve(&self, id: &str) -> Result<Vec<StreamDescriptor>> {
        let item_url = id::decode(id)?;
        self.config.check_host(&item_url)?;

        info!(url = %item_url, "Fetching item page");
        let body = self.fetcher.fetch_page(&PageFetch::new(&item_url)).await?;
        let page = ItemPage::new(item_url, body);

        Ok(self.run_strategies(&page).await)
    }

    /// Evaluate strategies against an already fetched page.
    pub async fn run_strategies(&self, page: &ItemPage) -> Vec<StreamDescriptor> {
        for strategy in &self.strategies {
            match strategy.extract(page, self.fetcher.as_ref()).await {
                Extraction::Found(streams) => {
                    info!(
                        strategy = strategy.name(),
                        count = streams.len(),
                        "Streams resolved"
                    );
                    return streams;
                }
                Extraction::NotFound => {
                    debug!(strategy = strategy.name(), "No streams");
                }
            }
        }
        info!(url = %page.url, "No playable stream or embed page found");
        Vec::new()
    }
}
