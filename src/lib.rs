//! `vidbridge` - catalog and stream bridge for a video listing site
//!
//! # Features
//!
//! - **Catalog**: paginated listing and search, mapped from `skip`/`search`
//!   onto the site's URL layout
//! - **Streams**: ordered extraction strategies (`<source>` tags, embed
//!   player `flashvars`, web-view fallback) with quality ranking
//! - **Browser Fingerprinting**: realistic Chrome/Firefox/Safari header sets,
//!   rotated per request
//! - **Add-on server**: manifest, catalog, meta and stream routes over HTTP
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidbridge::{BridgeConfig, SiteClient, StreamResolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(BridgeConfig::default());
//!     let client = Arc::new(SiteClient::new(&config)?);
//!     let resolver = StreamResolver::new(config, client);
//!     for stream in resolver.resolve_stream("wow:aHR0cHM6Ly93d3cud293Lnh4eC9lcy92aWRlb3MvMS8").await {
//!         println!("{} {}", stream.label(), stream.url());
//!     }
//!     Ok(())
//! }
//! ```

pub mod addon;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod http_client;
pub mod id;
pub mod stream;

pub use addon::{Addon, Manifest};
pub use catalog::{CatalogEntry, CatalogExtractor, PageRequest};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use fingerprint::{chrome_profile, firefox_profile, random_profile, safari_profile, BrowserProfile, ProfileRotation};
pub use http_client::{PageFetch, PageFetcher, SiteClient};
pub use stream::{Extraction, ExtractionStrategy, ItemPage, StreamDescriptor, StreamResolver};

/// Version of vidbridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
