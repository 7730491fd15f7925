//! Add-on protocol facade: catalog, meta and stream operations.
//!
//! Maps protocol requests onto [`CatalogExtractor`] and [`StreamResolver`]
//! and shapes their results into protocol responses. No extraction logic
//! lives here, and every operation answers with a well-formed body.

pub mod manifest;
pub mod server;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CatalogEntry, CatalogExtractor, ENTRY_KIND};
use crate::config::BridgeConfig;
use crate::http_client::PageFetcher;
use crate::stream::{StreamDescriptor, StreamResolver};

pub use manifest::{Manifest, CATALOG_ID};

/// Optional catalog arguments, as strings straight off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogExtra {
    pub search: Option<String>,
    pub skip: Option<String>,
}

impl CatalogExtra {
    /// Parse a `search=...&skip=...` extra path segment.
    pub fn from_query(raw: &str) -> Self {
        let mut extra = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "search" => extra.search = Some(value.into_owned()),
                "skip" => extra.skip = Some(value.into_owned()),
                other => debug!(key = other, "Ignoring unknown catalog extra"),
            }
        }
        extra
    }

    /// `skip` as an offset. Leading digits are used; anything else is 0.
    pub fn skip(&self) -> u32 {
        let Some(raw) = self.skip.as_deref() else {
            return 0;
        };
        let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub media_kind: String,
    pub catalog_id: String,
    pub extra: CatalogExtra,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub media_kind: String,
    pub item_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaResponse {
    pub meta: MetaPreview,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamResponse {
    pub streams: Vec<StreamObject>,
}

/// One stream as the protocol expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamObject {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_hints: Option<BehaviorHints>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub not_web_ready: bool,
}

impl StreamObject {
    fn from_descriptor(descriptor: StreamDescriptor, name: &str) -> Self {
        match descriptor {
            StreamDescriptor::Playable { label, url } => Self {
                name: name.to_string(),
                title: label,
                url: Some(url),
                external_url: None,
                behavior_hints: Some(BehaviorHints {
                    not_web_ready: false,
                }),
            },
            StreamDescriptor::External { label, url } => Self {
                name: name.to_string(),
                title: label,
                url: None,
                external_url: Some(url),
                behavior_hints: None,
            },
        }
    }
}

/// The three protocol operations plus the manifest.
pub struct Addon {
    manifest: Manifest,
    catalog: CatalogExtractor,
    streams: StreamResolver,
}

impl Addon {
    pub fn new(config: Arc<BridgeConfig>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            manifest: Manifest::default(),
            catalog: CatalogExtractor::new(config.clone(), fetcher.clone()),
            streams: StreamResolver::new(config, fetcher),
        }
    }

    /// Build from already configured extractors.
    pub fn from_parts(manifest: Manifest, catalog: CatalogExtractor, streams: StreamResolver) -> Self {
        Self {
            manifest,
            catalog,
            streams,
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Catalog operation. Unknown kinds or catalog ids give an empty list.
    pub async fn catalog(&self, request: &CatalogRequest) -> CatalogResponse {
        info!(
            kind = %request.media_kind,
            catalog = %request.catalog_id,
            extra = ?request.extra,
            "Request for catalog"
        );
        let known = self
            .manifest
            .catalogs
            .iter()
            .any(|c| c.kind == request.media_kind && c.id == request.catalog_id);
        if !known {
            return CatalogResponse { metas: Vec::new() };
        }

        let metas = self
            .catalog
            .list_videos(request.extra.skip(), request.extra.search())
            .await;
        CatalogResponse { metas }
    }

    /// Meta operation. Answers with id and type only; the client keeps the
    /// catalog preview for everything else.
    pub fn meta(&self, request: &ItemRequest) -> MetaResponse {
        info!(kind = %request.media_kind, id = %request.item_id, "Request for meta");
        MetaResponse {
            meta: MetaPreview {
                id: request.item_id.clone(),
                kind: ENTRY_KIND.to_string(),
            },
        }
    }

    /// Stream operation.
    pub async fn stream(&self, request: &ItemRequest) -> StreamResponse {
        info!(kind = %request.media_kind, id = %request.item_id, "Request for streams");
        let streams = self
            .streams
            .resolve_stream(&request.item_id)
            .await
            .into_iter()
            .map(|d| StreamObject::from_descriptor(d, &self.manifest.name))
            .collect();
        StreamResponse { streams }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{BridgeError, Result};
    use crate::http_client::PageFetch;

    struct Offline;

    #[async_trait]
    impl PageFetcher for Offline {
        async fn fetch_page(&self, request: &PageFetch) -> Result<String> {
            Err(BridgeError::Blocked {
                status: reqwest::StatusCode::FORBIDDEN,
                url: request.url.clone(),
            })
        }
    }

    fn addon() -> Addon {
        Addon::new(Arc::new(BridgeConfig::default()), Arc::new(Offline))
    }

    #[test]
    fn extra_parsing() {
        let extra = CatalogExtra::from_query("search=the%20matrix&skip=48&genre=x");
        assert_eq!(extra.search(), Some("the matrix"));
        assert_eq!(extra.skip(), 48);
    }

    #[test]
    fn extra_decodes_reserved_characters_once() {
        let extra = CatalogExtra::from_query("search=c%2B%2B%20%26%2050%25&skip=24");
        assert_eq!(extra.search(), Some("c++ & 50%"));
        assert_eq!(extra.skip(), 24);
    }

    #[test]
    fn skip_is_lenient() {
        let skip = |s: &str| CatalogExtra { search: None, skip: Some(s.into()) }.skip();
        assert_eq!(skip("24"), 24);
        assert_eq!(skip("24abc"), 24);
        assert_eq!(skip("abc"), 0);
        assert_eq!(skip("-5"), 0);
        assert_eq!(skip(""), 0);
        assert_eq!(CatalogExtra::default().skip(), 0);
    }

    #[test]
    fn blank_search_is_none() {
        let extra = CatalogExtra { search: Some("  ".into()), skip: None };
        assert_eq!(extra.search(), None);
    }

    #[tokio::test]
    async fn unknown_catalog_is_empty() {
        let response = addon()
            .catalog(&CatalogRequest {
                media_kind: "series".into(),
                catalog_id: CATALOG_ID.into(),
                extra: CatalogExtra::default(),
            })
            .await;
        assert!(response.metas.is_empty());
    }

    #[tokio::test]
    async fn blocked_catalog_is_empty() {
        let response = addon()
            .catalog(&CatalogRequest {
                media_kind: "movie".into(),
                catalog_id: CATALOG_ID.into(),
                extra: CatalogExtra::default(),
            })
            .await;
        assert!(response.metas.is_empty());
    }

    #[test]
    fn meta_is_minimal() {
        let response = addon().meta(&ItemRequest {
            media_kind: "movie".into(),
            item_id: "wow:abc".into(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "meta": { "id": "wow:abc", "type": "movie" } }));
    }

    #[tokio::test]
    async fn malformed_stream_id_is_empty() {
        let response = addon()
            .stream(&ItemRequest {
                media_kind: "movie".into(),
                item_id: "tt0133093".into(),
            })
            .await;
        assert!(response.streams.is_empty());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "streams": [] }));
    }

    #[test]
    fn stream_object_shapes() {
        let playable = StreamObject::from_descriptor(StreamDescriptor::playable("720p", "https://x/get_file/1.mp4"), "Video Bridge");
        let json = serde_json::to_value(&playable).unwrap();
        assert_eq!(json["title"], "720p");
        assert_eq!(json["url"], "https://x/get_file/1.mp4");
        assert_eq!(json["behaviorHints"]["notWebReady"], false);
        assert!(json.get("externalUrl").is_none());

        let external = StreamObject::from_descriptor(StreamDescriptor::external("Ver en Web", "https://x/embed/1"), "Video Bridge");
        let json = serde_json::to_value(&external).unwrap();
        assert_eq!(json["externalUrl"], "https://x/embed/1");
        assert!(json.get("url").is_none());
        assert_eq!(json["name"], "Video Bridge");
    }
}
