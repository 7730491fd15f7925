//! Stream resolution for a single catalog item.
//!
//! The item page is fetched once and handed to an ordered list of
//! [`ExtractionStrategy`] implementations; the first one that finds at
//! least one stream wins.
//!
//! Default order:
//! 1. [`SourceTagStrategy`]: `<source>` tags on the item page
//! 2. [`EmbedFlashvarsStrategy`]: the embed player's `flashvars` block
//! 3. [`ExternalFallbackStrategy`]: the embed page itself, opened in a web view

pub mod embed;
pub mod flashvars;
pub mod resolver;
pub mod strategies;
pub mod strategy;

pub use resolver::StreamResolver;
pub use strategies::{EmbedFlashvarsStrategy, ExternalFallbackStrategy, SourceTagStrategy};
pub use strategy::{Extraction, ExtractionStrategy, ItemPage};

/// A stream the add-on can offer for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamDescriptor {
    /// Direct media URL the player can open.
    Playable { label: String, url: String },
    /// Page to open in a web view; not directly playable.
    External { label: String, url: String },
}

impl StreamDescriptor {
    pub fn playable(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Playable {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn external(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::External {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Quality or display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Playable { label, .. } | Self::External { label, .. } => label,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Playable { url, .. } | Self::External { url, .. } => url,
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Playable { .. })
    }
}

/// Move streams whose label contains `preferred` (case-insensitive) to the
/// front. Everything else keeps its relative order.
pub fn rank_by_quality(streams: &mut [StreamDescriptor], preferred: &str) {
    let preferred = preferred.to_lowercase();
    if preferred.is_empty() {
        return;
    }
    streams.sort_by_key(|s| !s.label().to_lowercase().contains(&preferred));
}
